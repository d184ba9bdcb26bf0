mod common;
use common::*;

use smoltcp::wire::{
    EthernetFrame, EthernetProtocol, IpAddress, IpProtocol as SmolIpProtocol,
    Ipv6Packet as SmolIpv6Packet, UdpPacket as SmolUdpPacket,
};

use dhcp6relay::dhcpv6::{
    find_option, option_code, Dhcpv6Message, MessageType, RelayEnvelope, OPTION_HEADER_LEN,
    RELAY_HEADER_LEN, SERVER_PORT,
};
use dhcp6relay::relay::guards::has_static_relay_agent_ip;
use dhcp6relay::relay::{
    interface_id_option, ClientFrame, DeviceId, Notice, RelayForward, RelayForwarder,
};
use dhcp6relay::vlan::VlanId;
use dhcp6relay::{Error, MissingFact, RelayConfig};

fn forward(fname: &str, info: &dhcp6relay::relay::ServerInfo) -> Result<RelayForward, Error> {
    init_logger();
    let frame = file_to_packet(fname);
    RelayForwarder::default().try_build_forward(
        &client_port(),
        &frame,
        &[client_interface()],
        info,
        &server_interface(),
    )
}

fn envelope_of(frame: &[u8]) -> RelayEnvelope {
    let out = ClientFrame::parse(frame).unwrap();
    match Dhcpv6Message::decode(out.payload).unwrap() {
        Dhcpv6Message::Relay(relay) => relay,
        Dhcpv6Message::Leaf(leaf) => panic!("expected a relay-forward, got {:?}", leaf),
    }
}

#[test]
fn direct_client() {
    let fwd = forward("dhcp6_solicit.dat", &server_info()).unwrap();
    assert!(fwd.direct);
    assert!(fwd.notices.is_empty());
    assert_eq!(fwd.packet.dest_location, Some(server_port()));

    let relay = envelope_of(&fwd.packet.frame);
    assert_eq!(relay, fwd.envelope);
    assert_eq!(relay.msg_type(), MessageType::RELAY_FORW);
    assert_eq!(relay.hop_count, 0);
    assert_eq!(relay.link_address, addr("2001:db8:1::254"));
    assert_eq!(relay.peer_address, addr("fe80::201:2ff:fe03:405"));

    // Relayed message first, then the interface id.
    assert_eq!(relay.options.len(), 2);
    assert_eq!(relay.options[0].code(), option_code::RELAY_MSG);
    let client = ClientFrame::parse(&file_to_packet("dhcp6_solicit.dat")).unwrap();
    assert_eq!(relay.options[0].data(), &client.payload);
    assert_eq!(
        relay.options[1],
        interface_id_option(CLIENT_MAC, client_port(), VlanId::NONE).unwrap()
    );
}

#[test]
fn direct_client_headers() {
    let fwd = forward("dhcp6_solicit.dat", &server_info()).unwrap();
    let out = ClientFrame::parse(&fwd.packet.frame).unwrap();

    assert_eq!(out.src_mac, SERVER_IFACE_MAC);
    assert_eq!(out.dst_mac, SERVER_MAC);
    assert_eq!(out.vlan, VlanId::NONE);
    assert_eq!(out.src_ip, addr("2001:db8::254"));
    assert_eq!(out.dst_ip, addr("2001:db8::547"));
    assert_eq!(out.src_port, SERVER_PORT);
    assert_eq!(out.dst_port, SERVER_PORT);
}

#[test]
fn checksum_and_hop_limit_verified_by_smoltcp() {
    let fwd = forward("dhcp6_solicit.dat", &server_info()).unwrap();

    let eth = EthernetFrame::new_checked(&fwd.packet.frame[..]).unwrap();
    assert_eq!(eth.ethertype(), EthernetProtocol::Ipv6);
    let ip = SmolIpv6Packet::new_checked(eth.payload()).unwrap();
    assert_eq!(ip.next_header(), SmolIpProtocol::Udp);
    assert_eq!(ip.hop_limit(), 64);
    let udp = SmolUdpPacket::new_checked(ip.payload()).unwrap();
    assert_eq!(udp.src_port(), 547);
    assert!(udp.verify_checksum(
        &IpAddress::Ipv6(ip.src_addr()),
        &IpAddress::Ipv6(ip.dst_addr())
    ));
}

#[test]
fn configured_hop_limit() {
    init_logger();
    let config = RelayConfig::from_toml_str("hop_limit = 32\n").unwrap();
    let fwd = RelayForwarder::new(config)
        .try_build_forward(
            &client_port(),
            &file_to_packet("dhcp6_solicit.dat"),
            &[client_interface()],
            &server_info(),
            &server_interface(),
        )
        .unwrap();

    let eth = EthernetFrame::new_checked(&fwd.packet.frame[..]).unwrap();
    let ip = SmolIpv6Packet::new_checked(eth.payload()).unwrap();
    assert_eq!(ip.hop_limit(), 32);
}

#[test]
fn relay_forward_of_solicit_counts_as_direct() {
    let fwd = forward("dhcp6_relay_forw_solicit.dat", &server_info()).unwrap();
    assert!(fwd.direct);
    assert_eq!(fwd.envelope.hop_count, 0);
    assert_eq!(fwd.envelope.link_address, addr("2001:db8:1::254"));
    assert_eq!(fwd.envelope.peer_address, addr("fe80::200:5eff:fe00:5301"));
}

#[test]
fn indirect_client_dynamic_link_address() {
    let fwd = forward("dhcp6_relay_forw_nested.dat", &server_info()).unwrap();
    assert!(!fwd.direct);
    assert_eq!(
        fwd.notices,
        vec![Notice::DynamicRelayAgentAddress(addr("2001:db8:1::254"))]
    );

    let relay = envelope_of(&fwd.packet.frame);
    assert_eq!(relay.hop_count, 3);
    assert_eq!(relay.link_address, addr("2001:db8:1::254"));
    assert_eq!(relay.peer_address, addr("2001:db8:2::1"));

    let mut expected = RELAY_AGENT_MAC.0.to_vec();
    expected.extend_from_slice(b"-of:0000000000000001/1:");
    expected.extend_from_slice(&[100, 0]);
    let interface_id = find_option(&relay.options, option_code::INTERFACE_ID).unwrap();
    assert_eq!(&interface_id.data()[..], &expected[..]);
}

#[test]
fn indirect_client_static_link_address() {
    let mut info = server_info();
    info.relay_agent_ips.insert(device(), addr("2001:db8:1::1"));

    let fwd = forward("dhcp6_relay_forw_nested.dat", &info).unwrap();
    assert!(fwd.notices.is_empty());
    assert_eq!(fwd.envelope.link_address, addr("2001:db8:1::1"));
    assert_eq!(fwd.envelope.hop_count, 3);
}

#[test]
fn static_link_address_of_other_device_is_ignored() {
    let mut info = server_info();
    info.relay_agent_ips
        .insert(DeviceId::new("of:0000000000000002"), addr("2001:db8:9::1"));
    assert!(!has_static_relay_agent_ip(&info, &device()));

    let fwd = forward("dhcp6_relay_forw_nested.dat", &info).unwrap();
    assert_eq!(
        fwd.notices,
        vec![Notice::DynamicRelayAgentAddress(addr("2001:db8:1::254"))]
    );
    assert_eq!(fwd.envelope.link_address, addr("2001:db8:1::254"));
}

#[test]
fn missing_server_connect_point_still_forwards() {
    init_logger();
    let mut info = server_info();
    info.server_connect_point = None;
    let frame = file_to_packet("dhcp6_relay_forw_nested.dat");

    let packet = RelayForwarder::default()
        .build_forward(
            &client_port(),
            &frame,
            &[client_interface()],
            &info,
            &server_interface(),
        )
        .unwrap();
    assert_eq!(packet.dest_location, None);
    assert_eq!(envelope_of(&packet.frame).hop_count, 3);
}

#[test]
fn indirect_client_without_server_ip() {
    let mut info = server_info();
    info.server_ip6 = None;

    let fwd = forward("dhcp6_relay_forw_nested.dat", &info).unwrap();
    assert_eq!(fwd.notices[0], Notice::ServerIpDefaulted);

    // The destination is left as the downstream relay addressed it.
    let out = ClientFrame::parse(&fwd.packet.frame).unwrap();
    assert_eq!(out.dst_ip, addr("2001:db8:1::254"));
    assert_eq!(out.dst_mac, SERVER_MAC);
}

#[test]
fn indirect_client_unresolved_mac() {
    let mut info = server_info();
    info.connect_mac = None;

    let err = forward("dhcp6_relay_forw_nested.dat", &info).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(
        err,
        Error::ConfigurationIncomplete(MissingFact::ConnectMac(
            "server IP 2001:db8::547".to_string()
        ))
    );
}

#[test]
fn direct_client_unresolved_mac_keeps_client_destination() {
    let mut info = server_info();
    info.connect_mac = None;
    info.connect_vlan = None;

    let fwd = forward("dhcp6_solicit.dat", &info).unwrap();
    let out = ClientFrame::parse(&fwd.packet.frame).unwrap();
    assert_eq!(out.dst_mac.0, [0x33, 0x33, 0x00, 0x01, 0x00, 0x02]);
    assert_eq!(out.dst_ip, addr("2001:db8::547"));
}

#[test]
fn server_vlan_is_tagged() {
    let mut info = server_info();
    info.connect_vlan = Some(VlanId::new(200).unwrap());

    let fwd = forward("dhcp6_solicit.dat", &info).unwrap();
    let out = ClientFrame::parse(&fwd.packet.frame).unwrap();
    assert_eq!(out.vlan, VlanId::new(200).unwrap());
    assert_eq!(envelope_of(&fwd.packet.frame), fwd.envelope);
}

#[test]
fn client_vlan_kept_without_server_vlan() {
    let mut info = server_info();
    info.connect_vlan = None;

    let fwd = forward("dhcp6_relay_forw_nested.dat", &info).unwrap();
    let out = ClientFrame::parse(&fwd.packet.frame).unwrap();
    assert_eq!(out.vlan, VlanId::new(100).unwrap());
    assert_eq!(out.dst_mac, SERVER_MAC);
}

#[test]
fn server_interface_without_mac() {
    init_logger();
    let mut server_iface = server_interface();
    server_iface.mac = None;
    let frame = file_to_packet("dhcp6_solicit.dat");
    let forwarder = RelayForwarder::default();

    let err = forwarder
        .try_build_forward(
            &client_port(),
            &frame,
            &[client_interface()],
            &server_info(),
            &server_iface,
        )
        .unwrap_err();
    assert_eq!(
        err,
        Error::ConfigurationIncomplete(MissingFact::ServerInterface("server".to_string()))
    );
    assert!(forwarder
        .build_forward(
            &client_port(),
            &frame,
            &[client_interface()],
            &server_info(),
            &server_iface,
        )
        .is_none());
}

#[test]
fn client_interfaces_without_ipv6() {
    init_logger();
    let mut v4_only = client_interface();
    v4_only.ip_addresses.retain(|ip| ip.is_ipv4());
    let frame = file_to_packet("dhcp6_solicit.dat");
    let forwarder = RelayForwarder::default();

    for interfaces in [vec![], vec![v4_only]] {
        let err = forwarder
            .try_build_forward(
                &client_port(),
                &frame,
                &interfaces,
                &server_info(),
                &server_interface(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            Error::ConfigurationIncomplete(MissingFact::RelayAgentAddress(client_port()))
        );
    }
}

#[test]
fn first_client_interface_without_mac() {
    init_logger();
    let mut no_mac = client_interface();
    no_mac.mac = None;

    let err = RelayForwarder::default()
        .try_build_forward(
            &client_port(),
            &file_to_packet("dhcp6_solicit.dat"),
            &[no_mac, client_interface()],
            &server_info(),
            &server_interface(),
        )
        .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn non_udp_frame_is_dropped() {
    init_logger();
    let mut frame = file_to_packet("dhcp6_solicit.dat");
    frame[12] = 0x08;
    frame[13] = 0x00;

    let forwarder = RelayForwarder::default();
    let err = forwarder
        .try_build_forward(
            &client_port(),
            &frame,
            &[client_interface()],
            &server_info(),
            &server_interface(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedFrame(_)));
    assert!(!err.is_configuration());
}

#[test]
fn oversized_relay_forward_is_refused() {
    init_logger();
    // Grow the SOLICIT with a large vendor option, keeping the IPv6 and UDP
    // lengths consistent.
    const PAYLOAD_LEN: usize = 65480;
    let mut frame = file_to_packet("dhcp6_solicit.dat");
    let solicit_len = frame.len() - 62;
    let data_len = PAYLOAD_LEN - solicit_len - OPTION_HEADER_LEN;
    frame.extend_from_slice(&[0x00, 0x11]);
    frame.extend_from_slice(&(data_len as u16).to_be_bytes());
    frame.resize(frame.len() + data_len, 0xab);
    let udp_len = (PAYLOAD_LEN + 8) as u16;
    frame[18..20].copy_from_slice(&udp_len.to_be_bytes());
    frame[58..60].copy_from_slice(&udp_len.to_be_bytes());

    let client = ClientFrame::parse(&frame).unwrap();
    assert_eq!(client.payload.len(), PAYLOAD_LEN);

    let interface_id = interface_id_option(CLIENT_MAC, client_port(), VlanId::NONE).unwrap();
    let relay_len = RELAY_HEADER_LEN
        + OPTION_HEADER_LEN
        + PAYLOAD_LEN
        + OPTION_HEADER_LEN
        + interface_id.data().len();

    let forwarder = RelayForwarder::default();
    let err = forwarder
        .try_build_forward(
            &client_port(),
            &frame,
            &[client_interface()],
            &server_info(),
            &server_interface(),
        )
        .unwrap_err();
    assert_eq!(err, Error::DatagramTooLong { len: relay_len });
    assert!(!err.is_configuration());
    assert!(forwarder
        .build_forward(
            &client_port(),
            &frame,
            &[client_interface()],
            &server_info(),
            &server_interface(),
        )
        .is_none());
}
