use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dhcp6relay::ether::EtherAddr;
use dhcp6relay::relay::{ConnectPoint, DeviceId, Interface, PortNumber, RelayForwarder, ServerInfo};

// Ethernet/IPv6/UDP SOLICIT from fe80::201:2ff:fe03:405 to ff02::1:2.
static FRAME_BYTES: [u8; 110] = [
    0x33, 0x33, 0x00, 0x01, 0x00, 0x02, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x86, 0xdd, 0x60, 0x00,
    0x00, 0x00, 0x00, 0x38, 0x11, 0x01, 0xfe, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x01,
    0x02, 0xff, 0xfe, 0x03, 0x04, 0x05, 0xff, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x02, 0x02, 0x22, 0x02, 0x23, 0x00, 0x38, 0xba, 0xd6, 0x01, 0x12,
    0x34, 0x56, 0x00, 0x01, 0x00, 0x0a, 0x00, 0x03, 0x00, 0x01, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05,
    0x00, 0x08, 0x00, 0x02, 0x00, 0x00, 0x00, 0x06, 0x00, 0x04, 0x00, 0x17, 0x00, 0x18, 0x00, 0x03,
    0x00, 0x0c, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

pub fn b(c: &mut Criterion) {
    let device = DeviceId::new("of:0000000000000001");

    let mut client_iface = Interface::new("client", ConnectPoint::new(device.clone(), PortNumber(1)));
    client_iface.ip_addresses = vec!["2001:db8:1::254".parse().unwrap()];
    client_iface.mac = Some(EtherAddr([0x00, 0x00, 0x00, 0x00, 0xaa, 0x01]));

    let mut server_iface = Interface::new("server", ConnectPoint::new(device.clone(), PortNumber(2)));
    server_iface.ip_addresses = vec!["2001:db8::254".parse().unwrap()];
    server_iface.mac = Some(EtherAddr([0x00, 0x00, 0x00, 0x00, 0xbb, 0x01]));

    let info = ServerInfo {
        server_ip6: Some("2001:db8::547".parse().unwrap()),
        connect_mac: Some(EtherAddr([0x00, 0x00, 0x00, 0x00, 0xcc, 0x01])),
        server_connect_point: Some(server_iface.connect_point.clone()),
        ..Default::default()
    };

    let received_from = client_iface.connect_point.clone();
    let client_ifaces = [client_iface];
    let forwarder = RelayForwarder::default();

    c.bench_function("relay_build", |b| {
        b.iter(|| {
            let pkt = forwarder.build_forward(
                &received_from,
                black_box(&FRAME_BYTES[..]),
                &client_ifaces,
                &info,
                &server_iface,
            );
            assert!(pkt.is_some());
        })
    });
}

criterion_group!(benches, b);
criterion_main!(benches);
