use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of bytes in a registry lookup key.
pub const LOOKUP_KEY_BYTES: usize = 32;

/// Fixed-width key used to index the on-chain registry.
///
/// Produced by hashing a symbolic name; treated as an opaque `bytes32`
/// argument and never reversed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LookupKey(#[serde(with = "hex_bytes")] pub [u8; LOOKUP_KEY_BYTES]);

impl LookupKey {
    pub fn new(bytes: [u8; LOOKUP_KEY_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; LOOKUP_KEY_BYTES] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LookupKey(0x{})", self.to_hex())
    }
}

impl From<[u8; LOOKUP_KEY_BYTES]> for LookupKey {
    fn from(value: [u8; LOOKUP_KEY_BYTES]) -> Self {
        Self(value)
    }
}

mod hex_bytes {
    use super::LOOKUP_KEY_BYTES;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        bytes: &[u8; LOOKUP_KEY_BYTES],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<[u8; LOOKUP_KEY_BYTES], D::Error> {
        let text = String::deserialize(deserializer)?;
        let payload = text.strip_prefix("0x").unwrap_or(&text);
        let mut bytes = [0u8; LOOKUP_KEY_BYTES];
        hex::decode_to_slice(payload, &mut bytes).map_err(D::Error::custom)?;
        Ok(bytes)
    }
}
