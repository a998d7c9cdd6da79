use netblock::{Address, AddressFamily, Network, PrefixRecord};
use std::net::{Ipv4Addr, Ipv6Addr};

pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

pub fn format_qps(qps: f64) -> String {
    if qps >= 1_000_000.0 {
        format!("{:.2}M", qps / 1_000_000.0)
    } else if qps >= 1_000.0 {
        format!("{:.2}K", qps / 1_000.0)
    } else {
        format!("{:.2}", qps)
    }
}

/// Address inside `network` whose host bits come from `salt`
pub fn address_in(network: &Network, salt: u128) -> Address {
    let bits = network.address().bits() | (salt & !network.mask());
    address_from_bits(network.family(), bits)
}

/// Build an address of `family` from right-aligned bits
pub fn address_from_bits(family: AddressFamily, bits: u128) -> Address {
    match family {
        AddressFamily::V4 => Address::from(Ipv4Addr::from(bits as u32)),
        AddressFamily::V6 => Address::from(Ipv6Addr::from(bits)),
    }
}

/// Order-independent fingerprint of a match set
pub fn match_set(records: &[&PrefixRecord]) -> Vec<String> {
    let mut keys: Vec<String> = records
        .iter()
        .map(|r| format!("{} {} {:?}", r.network(), r.provider(), r.tags()))
        .collect();
    keys.sort();
    keys
}
