//! Minimal contract ABI codec.
//!
//! Covers the argument and return types used by the registry and token
//! bindings: `bytes32`, `address`, `uint256`, `uint8` and dynamic `string`.
//! Method selectors are the first four bytes of the SHA3-256 of the
//! canonical signature.

use crate::errors::AbiError;
use num_bigint::BigUint;
use xcb_crypto::sha3_256;
use xcb_types::{Address, ADDRESS_BYTES};

/// Size of one ABI word.
pub const WORD: usize = 32;

/// A static call argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    FixedBytes32([u8; WORD]),
    Address(Address),
}

/// Four-byte method selector for `signature`, e.g. `get(bytes32)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = sha3_256(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Encode a call to `signature` with static arguments.
pub fn encode_call(signature: &str, args: &[Token]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + args.len() * WORD);
    data.extend_from_slice(&selector(signature));
    for arg in args {
        match arg {
            Token::FixedBytes32(bytes) => data.extend_from_slice(bytes),
            Token::Address(address) => {
                data.extend_from_slice(&[0u8; WORD - ADDRESS_BYTES]);
                data.extend_from_slice(address.as_bytes());
            }
        }
    }
    data
}

/// Encode a single dynamic `string`/`bytes` return value.
pub fn encode_string(value: &[u8]) -> Vec<u8> {
    let padded = value.len().div_ceil(WORD) * WORD;
    let mut data = Vec::with_capacity(2 * WORD + padded);
    data.extend_from_slice(&usize_word(WORD));
    data.extend_from_slice(&usize_word(value.len()));
    data.extend_from_slice(value);
    data.resize(2 * WORD + padded, 0);
    data
}

/// Encode a single `uint256` return value.
pub fn encode_uint(value: &BigUint) -> Vec<u8> {
    let bytes = value.to_bytes_be();
    let mut word = vec![0u8; WORD.saturating_sub(bytes.len())];
    word.extend_from_slice(&bytes[bytes.len().saturating_sub(WORD)..]);
    word
}

/// Decode a single dynamic `string`/`bytes` return value into raw bytes.
pub fn decode_bytes(data: &[u8]) -> Result<Vec<u8>, AbiError> {
    let offset = read_usize(data, 0)?;
    let length = read_usize(data, offset)?;
    let start = offset.checked_add(WORD).ok_or(AbiError::InvalidWord(offset))?;
    let end = start
        .checked_add(length)
        .ok_or(AbiError::InvalidWord(offset))?;

    if data.len() < end {
        return Err(AbiError::ShortData {
            expected: end,
            actual: data.len(),
        });
    }
    Ok(data[start..end].to_vec())
}

/// Decode a single `string` return value.
pub fn decode_string(data: &[u8]) -> Result<String, AbiError> {
    String::from_utf8(decode_bytes(data)?).map_err(|_| AbiError::InvalidUtf8)
}

/// Decode a single `uint256` return value.
pub fn decode_uint(data: &[u8]) -> Result<BigUint, AbiError> {
    Ok(BigUint::from_bytes_be(word_at(data, 0)?))
}

/// Decode a single `uint8` return value.
pub fn decode_u8(data: &[u8]) -> Result<u8, AbiError> {
    let word = word_at(data, 0)?;
    if word[..WORD - 1].iter().any(|byte| *byte != 0) {
        return Err(AbiError::Overflow("uint8"));
    }
    Ok(word[WORD - 1])
}

fn word_at(data: &[u8], at: usize) -> Result<&[u8], AbiError> {
    let end = at.checked_add(WORD).ok_or(AbiError::InvalidWord(at))?;
    data.get(at..end).ok_or(AbiError::ShortData {
        expected: end,
        actual: data.len(),
    })
}

fn read_usize(data: &[u8], at: usize) -> Result<usize, AbiError> {
    let word = word_at(data, at)?;
    if word[..WORD - 8].iter().any(|byte| *byte != 0) {
        return Err(AbiError::InvalidWord(at));
    }
    let mut tail = [0u8; 8];
    tail.copy_from_slice(&word[WORD - 8..]);
    usize::try_from(u64::from_be_bytes(tail)).map_err(|_| AbiError::InvalidWord(at))
}

fn usize_word(value: usize) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&(value as u64).to_be_bytes());
    word
}

#[cfg(test)]
mod tests {
    use super::*;
    use xcb_types::Network;

    #[test]
    fn get_selector_uses_sha3() {
        assert_eq!(hex::encode(selector("get(bytes32)")), "ee1effc4");
    }

    #[test]
    fn encode_call_layout() {
        let key = [0x42u8; 32];
        let owner = Address::new(Network::Devin, [9u8; 20]);
        let data = encode_call(
            "f(bytes32,address)",
            &[Token::FixedBytes32(key), Token::Address(owner)],
        );
        assert_eq!(data.len(), 4 + 2 * WORD);
        assert_eq!(&data[4..36], &key);
        assert_eq!(&data[36..46], &[0u8; 10]);
        assert_eq!(&data[46..68], owner.as_bytes());
    }

    #[test]
    fn string_encoding_is_word_aligned() {
        let encoded = encode_string(b"hello");
        assert_eq!(encoded.len(), 3 * WORD);
        assert_eq!(decode_string(&encoded).unwrap(), "hello");

        let empty = encode_string(b"");
        assert_eq!(empty.len(), 2 * WORD);
        assert_eq!(decode_string(&empty).unwrap(), "");
    }

    #[test]
    fn truncated_string_is_rejected() {
        let mut encoded = encode_string(&[b'a'; 44]);
        encoded.truncate(2 * WORD + 10);
        assert!(matches!(
            decode_bytes(&encoded),
            Err(AbiError::ShortData { expected: 108, .. })
        ));
        assert!(matches!(
            decode_bytes(&[0u8; 12]),
            Err(AbiError::ShortData { .. })
        ));
    }

    #[test]
    fn oversized_offset_is_rejected() {
        let mut encoded = encode_string(b"x");
        encoded[0] = 0xff;
        assert_eq!(decode_bytes(&encoded), Err(AbiError::InvalidWord(0)));
    }

    #[test]
    fn non_utf8_string_is_rejected() {
        let encoded = encode_string(&[0xff, 0xfe]);
        assert_eq!(decode_string(&encoded), Err(AbiError::InvalidUtf8));
    }

    #[test]
    fn uint_values() {
        let value = BigUint::from(200u32) * BigUint::from(10u64.pow(18));
        assert_eq!(decode_uint(&encode_uint(&value)).unwrap(), value);
        assert_eq!(decode_u8(&encode_uint(&BigUint::from(18u8))).unwrap(), 18);
        assert_eq!(
            decode_u8(&encode_uint(&BigUint::from(256u32))),
            Err(AbiError::Overflow("uint8"))
        );
    }
}
