//! Address codec
//!
//! Parses query text into fixed-width bit vectors tagged with their address
//! family, and CIDR text into canonical [`Network`] values.
//!
//! Bits are stored right-aligned in a `u128`: an IPv4 address occupies the
//! low 32 bits, an IPv6 address all 128. Bit positions are always counted
//! MSB-first within the family width, so depth 0 is the first bit of the
//! network portion for both families.
//!
//! # Example
//!
//! ```rust
//! use netblock::address::{parse, parse_network};
//!
//! let net = parse_network("192.168.1.77/24")?;
//! assert_eq!(net.to_string(), "192.168.1.0/24");
//!
//! let addr = parse("192.168.1.10")?;
//! assert!(net.contains(&addr));
//! # Ok::<(), netblock::NetblockError>(())
//! ```

use crate::error::{NetblockError, Result};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Address family of an address or network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressFamily {
    /// 32-bit IPv4
    V4,
    /// 128-bit IPv6
    V6,
}

impl AddressFamily {
    /// Number of bits in an address of this family
    pub const fn width(self) -> u8 {
        match self {
            AddressFamily::V4 => 32,
            AddressFamily::V6 => 128,
        }
    }

    /// All-ones value covering the family width
    const fn full_mask(self) -> u128 {
        match self {
            AddressFamily::V4 => u32::MAX as u128,
            AddressFamily::V6 => u128::MAX,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => write!(f, "IPv4"),
            AddressFamily::V6 => write!(f, "IPv6"),
        }
    }
}

/// A parsed IP address as a fixed-width bit vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    family: AddressFamily,
    bits: u128,
}

impl Address {
    /// Address family
    pub fn family(&self) -> AddressFamily {
        self.family
    }

    /// Raw address bits, right-aligned
    pub fn bits(&self) -> u128 {
        self.bits
    }

    /// Bit at `depth`, counted MSB-first within the family width
    ///
    /// `depth` must be less than the family width.
    pub fn bit(&self, depth: u8) -> u8 {
        debug_assert!(depth < self.family.width());
        ((self.bits >> (self.family.width() - 1 - depth)) & 1) as u8
    }

    /// Convert back to a standard library address
    pub fn to_ip_addr(&self) -> IpAddr {
        match self.family {
            AddressFamily::V4 => IpAddr::V4(Ipv4Addr::from(self.bits as u32)),
            AddressFamily::V6 => IpAddr::V6(Ipv6Addr::from(self.bits)),
        }
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Self {
        Self {
            family: AddressFamily::V4,
            bits: u32::from(addr) as u128,
        }
    }
}

impl From<Ipv6Addr> for Address {
    fn from(addr: Ipv6Addr) -> Self {
        Self {
            family: AddressFamily::V6,
            bits: u128::from(addr),
        }
    }
}

impl From<IpAddr> for Address {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => v4.into(),
            IpAddr::V6(v6) => v6.into(),
        }
    }
}

impl FromStr for Address {
    type Err = NetblockError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ip_addr())
    }
}

/// A canonical network block: base address with all host bits cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Network {
    base: Address,
    prefix_len: u8,
}

impl Network {
    /// Build a network from any address inside it
    ///
    /// Host bits of `addr` are masked off. Fails with
    /// [`NetblockError::InvalidSubnet`] if `prefix_len` exceeds the family width.
    pub fn new(addr: Address, prefix_len: u8) -> Result<Self> {
        let width = addr.family.width();
        if prefix_len > width {
            return Err(NetblockError::InvalidSubnet(format!(
                "{}/{}: prefix length {} exceeds {}",
                addr, prefix_len, prefix_len, width
            )));
        }

        let base = Address {
            family: addr.family,
            bits: addr.bits & mask_for(addr.family, prefix_len),
        };
        Ok(Self { base, prefix_len })
    }

    /// Canonical base address
    pub fn address(&self) -> Address {
        self.base
    }

    /// Prefix length in bits
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Address family of the network
    pub fn family(&self) -> AddressFamily {
        self.base.family
    }

    /// Network mask, right-aligned like [`Address::bits`]
    pub fn mask(&self) -> u128 {
        mask_for(self.base.family, self.prefix_len)
    }

    /// Whether `addr` falls inside this network
    ///
    /// Always false for an address of the other family.
    pub fn contains(&self, addr: &Address) -> bool {
        addr.family == self.base.family && (addr.bits & self.mask()) == self.base.bits
    }
}

impl FromStr for Network {
    type Err = NetblockError;

    fn from_str(s: &str) -> Result<Self> {
        parse_network(s)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix_len)
    }
}

/// Parse an IPv4 (dotted-decimal) or IPv6 (colon form, `::` allowed) address
pub fn parse(text: &str) -> Result<Address> {
    text.parse::<IpAddr>()
        .map(Address::from)
        .map_err(|_| NetblockError::InvalidAddress(text.to_string()))
}

/// Parse `address/prefixLength` CIDR text into a canonical network
///
/// The address part need not be canonical: `10.1.2.3/8` yields `10.0.0.0/8`.
pub fn parse_network(text: &str) -> Result<Network> {
    let invalid = |reason: &str| NetblockError::InvalidSubnet(format!("{}: {}", text, reason));

    let (addr_str, prefix_str) = text
        .split_once('/')
        .ok_or_else(|| invalid("missing prefix length"))?;

    let addr = addr_str
        .parse::<IpAddr>()
        .map_err(|_| invalid("invalid address"))?;

    // u8::from_str accepts a leading '+', which is not CIDR syntax
    if prefix_str.is_empty() || !prefix_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("prefix length is not a number"));
    }
    let prefix_len: u8 = prefix_str
        .parse()
        .map_err(|_| invalid("prefix length out of range"))?;

    let addr = Address::from(addr);
    if prefix_len > addr.family.width() {
        return Err(invalid(&format!(
            "prefix length {} exceeds {}",
            prefix_len,
            addr.family.width()
        )));
    }

    Network::new(addr, prefix_len)
}

/// Mask with the top `prefix_len` bits of the family width set
fn mask_for(family: AddressFamily, prefix_len: u8) -> u128 {
    let full = family.full_mask();
    let host = full.checked_shr(prefix_len as u32).unwrap_or(0);
    full & !host
}
