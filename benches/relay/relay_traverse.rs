use std::net::Ipv6Addr;

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dhcp6relay::dhcpv6::{Dhcpv6Message, Dhcpv6Option, LeafMessage, MessageType, RelayEnvelope};
use dhcp6relay::relay::Traversal;

// A SOLICIT behind `depth` relay agents.
fn relay_chain(depth: u8) -> Bytes {
    let mut msg =
        Dhcpv6Message::from(LeafMessage::new(MessageType::SOLICIT, 0x123456, vec![]).unwrap());
    for hop in 0..depth {
        let relay = RelayEnvelope::forward(
            hop,
            Ipv6Addr::UNSPECIFIED,
            Ipv6Addr::LOCALHOST,
            vec![Dhcpv6Option::relay_message(msg.to_bytes()).unwrap()],
        );
        msg = relay.into();
    }
    msg.to_bytes()
}

pub fn b(c: &mut Criterion) {
    let traversal = Traversal::default();

    for depth in [1u8, 8] {
        let wire = relay_chain(depth);
        c.bench_function(&format!("find_leaf_depth_{}", depth), |b| {
            b.iter(|| {
                let msg = Dhcpv6Message::decode(black_box(wire.clone())).unwrap();
                let leaf = traversal.find_leaf(&msg).unwrap();
                assert!(leaf.msg_type() == MessageType::SOLICIT);
                traversal.is_directly_connected(&msg)
            })
        });
    }
}

criterion_group!(benches, b);
criterion_main!(benches);
