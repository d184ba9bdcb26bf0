pub use bytes::Buf;

/// A [`Buf`] whose read position can be rewound.
///
/// Packet views advance the cursor past their header to hand out the payload;
/// `move_back` walks back over it again and `trim_off` drops trailing bytes
/// such as Ethernet padding behind a shorter UDP datagram.
pub trait PktBuf: Buf {
    /// Move the cursor back by `cnt` bytes.
    ///
    /// # Panics
    /// Panics if fewer than `cnt` bytes lie before the cursor.
    fn move_back(&mut self, cnt: usize);

    /// Remove `cnt` trailing bytes.
    ///
    /// # Panics
    /// Panics if fewer than `cnt` bytes remain.
    fn trim_off(&mut self, cnt: usize);
}

/// A [`PktBuf`] that can be written to, used to build frames back to front.
pub trait PktBufMut: PktBuf {
    /// Number of bytes in front of the cursor that a header may be prepended into.
    fn chunk_headroom(&self) -> usize;

    /// The remaining bytes as a mutable slice.
    fn chunk_mut(&mut self) -> &mut [u8];
}

impl<T: PktBuf + ?Sized> PktBuf for &mut T {
    #[inline]
    fn move_back(&mut self, cnt: usize) {
        (**self).move_back(cnt)
    }

    #[inline]
    fn trim_off(&mut self, cnt: usize) {
        (**self).trim_off(cnt);
    }
}

impl<T: PktBufMut + ?Sized> PktBufMut for &mut T {
    #[inline]
    fn chunk_headroom(&self) -> usize {
        (**self).chunk_headroom()
    }

    #[inline]
    fn chunk_mut(&mut self) -> &mut [u8] {
        (**self).chunk_mut()
    }
}
