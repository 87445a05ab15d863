use crate::attributes::ATTR_XOR_MAPPED_ADDRESS;
use crate::message::{Message, MAGIC_COOKIE};
use shared::error::{Error, Result};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

const FAMILY_IPV4: u8 = 0x01;
const FAMILY_IPV6: u8 = 0x02;

/// XorMappedAddress implements XOR-MAPPED-ADDRESS (RFC 5389 §15.2).
///
/// The port is XORed with the upper 16 bits of the magic cookie; the address
/// with the cookie (IPv4) or the cookie concatenated with the transaction id
/// (IPv6).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct XorMappedAddress {
    pub ip: IpAddr,
    pub port: u16,
}

impl From<SocketAddr> for XorMappedAddress {
    fn from(addr: SocketAddr) -> Self {
        Self {
            ip: addr.ip(),
            port: addr.port(),
        }
    }
}

impl From<XorMappedAddress> for SocketAddr {
    fn from(addr: XorMappedAddress) -> Self {
        SocketAddr::new(addr.ip, addr.port)
    }
}

impl fmt::Display for XorMappedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ip {
            IpAddr::V4(ip) => write!(f, "{ip}:{}", self.port),
            IpAddr::V6(ip) => write!(f, "[{ip}]:{}", self.port),
        }
    }
}

impl XorMappedAddress {
    pub fn add_to(&self, m: &mut Message) -> Result<()> {
        let xport = self.port ^ (MAGIC_COOKIE >> 16) as u16;

        let mut value = vec![0u8];
        match self.ip {
            IpAddr::V4(ip) => {
                value.push(FAMILY_IPV4);
                value.extend_from_slice(&xport.to_be_bytes());
                let cookie = MAGIC_COOKIE.to_be_bytes();
                for (i, b) in ip.octets().iter().enumerate() {
                    value.push(b ^ cookie[i]);
                }
            }
            IpAddr::V6(ip) => {
                value.push(FAMILY_IPV6);
                value.extend_from_slice(&xport.to_be_bytes());
                let key = xor_key_v6(&m.transaction_id.0);
                for (i, b) in ip.octets().iter().enumerate() {
                    value.push(b ^ key[i]);
                }
            }
        }

        m.add(ATTR_XOR_MAPPED_ADDRESS, &value);
        Ok(())
    }

    pub fn get_from(m: &Message) -> Result<Self> {
        let value = m.get(ATTR_XOR_MAPPED_ADDRESS)?;
        if value.len() < 4 {
            return Err(Error::ErrBadIpLength);
        }

        let family = value[1];
        let port = u16::from_be_bytes([value[2], value[3]]) ^ (MAGIC_COOKIE >> 16) as u16;

        match family {
            FAMILY_IPV4 => {
                if value.len() < 8 {
                    return Err(Error::ErrBadIpLength);
                }
                let cookie = MAGIC_COOKIE.to_be_bytes();
                let mut octets = [0u8; 4];
                for i in 0..4 {
                    octets[i] = value[4 + i] ^ cookie[i];
                }
                Ok(Self {
                    ip: IpAddr::V4(Ipv4Addr::from(octets)),
                    port,
                })
            }
            FAMILY_IPV6 => {
                if value.len() < 20 {
                    return Err(Error::ErrBadIpLength);
                }
                let key = xor_key_v6(&m.transaction_id.0);
                let mut octets = [0u8; 16];
                for i in 0..16 {
                    octets[i] = value[4 + i] ^ key[i];
                }
                Ok(Self {
                    ip: IpAddr::V6(Ipv6Addr::from(octets)),
                    port,
                })
            }
            _ => Err(Error::ErrBadIpLength),
        }
    }
}

fn xor_key_v6(transaction_id: &[u8; 12]) -> [u8; 16] {
    let mut key = [0u8; 16];
    key[..4].copy_from_slice(&MAGIC_COOKIE.to_be_bytes());
    key[4..].copy_from_slice(transaction_id);
    key
}
