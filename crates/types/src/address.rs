use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing a Core address string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AddressError {
    #[error("address must be {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("address payload is not valid hexadecimal")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("unknown network prefix {0:#04x}")]
    UnknownNetwork(u8),
    #[error("invalid address checksum: expected {expected:02}, got {actual:#04x}")]
    InvalidChecksum { expected: u8, actual: u8 },
    #[error("address is not in canonical form")]
    NotCanonical,
}

/// Number of raw bytes contained in an address.
pub const ADDRESS_BYTES: usize = 22;
/// Number of account bytes following the prefix and checksum.
pub const ACCOUNT_BYTES: usize = 20;
/// Expected string length of a canonical address (44 hex chars).
pub const ADDRESS_STRING_LENGTH: usize = ADDRESS_BYTES * 2;

/// Network a Core address belongs to, encoded in its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Devin,
    Private,
}

impl Network {
    pub const fn prefix(self) -> u8 {
        match self {
            Network::Mainnet => 0xcb,
            Network::Devin => 0xab,
            Network::Private => 0xce,
        }
    }

    pub fn from_prefix(prefix: u8) -> Result<Self, AddressError> {
        match prefix {
            0xcb => Ok(Network::Mainnet),
            0xab => Ok(Network::Devin),
            0xce => Ok(Network::Private),
            other => Err(AddressError::UnknownNetwork(other)),
        }
    }

    /// Map a node's reported network id onto an address network.
    ///
    /// Every id other than mainnet (1) and Devin (3) is a private network.
    pub fn from_network_id(id: u64) -> Self {
        match id {
            1 => Network::Mainnet,
            3 => Network::Devin,
            _ => Network::Private,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::Mainnet => "mainnet",
            Network::Devin => "devin",
            Network::Private => "private",
        };
        f.write_str(name)
    }
}

/// ICAN checksum over the account bytes and network prefix.
///
/// The hex digits of `account ++ prefix ++ 00` are read as decimal values
/// (`a` = 10 .. `f` = 15) and concatenated into one decimal number `n`; the
/// checksum is `98 - n mod 97`. The result is returned as the byte whose two
/// hex nibbles spell the two decimal digits, so 45 becomes `0x45`.
pub fn ican_checksum(network: Network, account: &[u8; ACCOUNT_BYTES]) -> u8 {
    let prefix = network.prefix();
    let mut remainder: u32 = 0;
    let nibbles = account
        .iter()
        .chain(std::iter::once(&prefix))
        .chain(std::iter::once(&0u8))
        .flat_map(|byte| [byte >> 4, byte & 0x0f]);

    for nibble in nibbles {
        let digit = u32::from(nibble);
        remainder = if digit < 10 {
            (remainder * 10 + digit) % 97
        } else {
            (remainder * 100 + digit) % 97
        };
    }

    let checksum = (98 - remainder) as u8;
    ((checksum / 10) << 4) | (checksum % 10)
}

/// A 22-byte Core account or contract address.
///
/// Layout: network prefix, ICAN checksum, 20 account bytes. Values can only
/// be built through [`Address::new`] or validated decoding, so every
/// `Address` carries a correct checksum.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; ADDRESS_BYTES]);

impl Address {
    /// Build an address for `account` on `network`, computing its checksum.
    pub fn new(network: Network, account: [u8; ACCOUNT_BYTES]) -> Self {
        let mut bytes = [0u8; ADDRESS_BYTES];
        bytes[0] = network.prefix();
        bytes[1] = ican_checksum(network, &account);
        bytes[2..].copy_from_slice(&account);
        Address(bytes)
    }

    /// The all-zero account on `network`.
    pub fn zero(network: Network) -> Self {
        Self::new(network, [0u8; ACCOUNT_BYTES])
    }

    /// Validate raw bytes as an address.
    pub fn from_bytes(bytes: [u8; ADDRESS_BYTES]) -> Result<Self, AddressError> {
        let network = Network::from_prefix(bytes[0])?;
        let mut account = [0u8; ACCOUNT_BYTES];
        account.copy_from_slice(&bytes[2..]);

        let expected = ican_checksum(network, &account);
        if bytes[1] != expected {
            return Err(AddressError::InvalidChecksum {
                expected: (expected >> 4) * 10 + (expected & 0x0f),
                actual: bytes[1],
            });
        }
        Ok(Address(bytes))
    }

    pub fn network(&self) -> Network {
        // Checked at construction.
        Network::from_prefix(self.0[0]).unwrap_or(Network::Private)
    }

    pub fn checksum(&self) -> u8 {
        self.0[1]
    }

    pub fn account(&self) -> &[u8] {
        &self.0[2..]
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_BYTES] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.account().iter().all(|byte| *byte == 0)
    }

    /// Canonical text form: 44 lowercase hex characters without `0x`.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Encode an address into its canonical text form.
pub fn encode_address(address: &Address) -> String {
    address.to_hex()
}

/// Decode a textual address.
///
/// Accepts an optional `0x` prefix and either letter case, but requires
/// exactly 44 hex digits, a known network prefix and a matching checksum.
pub fn decode_address(address: &str) -> Result<Address, AddressError> {
    let payload = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);

    if payload.len() != ADDRESS_STRING_LENGTH {
        return Err(AddressError::InvalidLength {
            expected: ADDRESS_STRING_LENGTH,
            actual: payload.len(),
        });
    }

    let mut bytes = [0u8; ADDRESS_BYTES];
    hex::decode_to_slice(payload, &mut bytes)?;
    Address::from_bytes(bytes)
}

/// Decode a textual address, rejecting anything but the canonical form.
pub fn decode_canonical_address(address: &str) -> Result<Address, AddressError> {
    let decoded = decode_address(address)?;
    if decoded.to_hex() != address {
        return Err(AddressError::NotCanonical);
    }
    Ok(decoded)
}

/// Check whether the provided string is a valid Core address.
///
/// With `checksummed` set the string must also be in canonical form.
pub fn is_valid_address(address: &str, checksummed: bool) -> bool {
    if checksummed {
        decode_canonical_address(address).is_ok()
    } else {
        decode_address(address).is_ok()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_address(s)
    }
}

impl TryFrom<[u8; ADDRESS_BYTES]> for Address {
    type Error = AddressError;

    fn try_from(value: [u8; ADDRESS_BYTES]) -> Result<Self, Self::Error> {
        Address::from_bytes(value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_hex()
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        decode_address(&value)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
