use std::net::Ipv4Addr;

/// First octets of /8 blocks historically announced by Azure.
///
/// There is no authoritative dataset behind this list, so a match is an
/// approximation. 52/8 is shared with AWS, which is why AWS is checked first.
const AZURE_FIRST_OCTETS: [u8; 3] = [20, 40, 52];

pub fn matches(ip: Ipv4Addr) -> bool {
    AZURE_FIRST_OCTETS.contains(&ip.octets()[0])
}
