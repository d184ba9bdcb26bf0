// Declares a newtype over an integer with named constants. Unlike a plain
// enum, values that are not listed still round-trip through the type, which
// is what a wire decoder needs.
macro_rules! enum_sim {
    (
        $(#[$enum_attr: meta])*
        pub struct $tname:ident ($size_t:ty) {
            $(
                $(#[$arm_attr: meta])*
                $enum_arm:ident = $num_exp:expr
            ),+ $(,)?
        }
    ) => {
        #[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
        $(#[$enum_attr])*
        pub struct $tname($size_t);

        impl $tname {
            $(
                $(#[$arm_attr])*
                pub const $enum_arm: Self = Self($num_exp);
            )+

            /// Get the raw value.
            #[inline]
            pub const fn raw(&self) -> $size_t {
                self.0
            }

            /// The name of a listed value, `None` for anything else.
            pub fn name(&self) -> Option<&'static str> {
                $(
                    if *self == Self::$enum_arm {
                        return Some(stringify!($enum_arm));
                    }
                )+
                None
            }

            /// Whether the value is one of the listed constants.
            #[inline]
            pub fn is_known(&self) -> bool {
                self.name().is_some()
            }
        }

        impl ::core::convert::From<$size_t> for $tname {
            #[inline]
            fn from(value: $size_t) -> $tname {
                $tname(value)
            }
        }

        impl ::core::convert::From<$tname> for $size_t {
            #[inline]
            fn from(value: $tname) -> $size_t {
                value.0
            }
        }

        impl ::core::fmt::Display for $tname {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                match self.name() {
                    Some(name) => f.write_str(name),
                    None => write!(f, "unknown({})", self.0),
                }
            }
        }
    };
}
