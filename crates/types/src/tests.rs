use crate::{decode_address, decode_canonical_address, Address, AddressError, LookupKey, Network};
use proptest::prelude::*;

fn network() -> impl Strategy<Value = Network> {
    prop_oneof![
        Just(Network::Mainnet),
        Just(Network::Devin),
        Just(Network::Private),
    ]
}

proptest! {
    #[test]
    fn canonical_text_roundtrips(network in network(), account in any::<[u8; 20]>()) {
        let address = Address::new(network, account);
        let text = address.to_string();
        prop_assert_eq!(decode_canonical_address(&text).unwrap(), address);
        prop_assert_eq!(address.network(), network);
        prop_assert_eq!(address.account(), &account[..]);
    }

    #[test]
    fn truncated_or_extended_text_is_rejected(
        account in any::<[u8; 20]>(),
        cut in 1usize..44,
        extra in "[0-9a-f]{1,8}",
    ) {
        let text = Address::new(Network::Mainnet, account).to_hex();
        let short = decode_address(&text[..44 - cut]);
        let is_length_error = matches!(short, Err(AddressError::InvalidLength { .. }));
        prop_assert!(is_length_error);
        let long = format!("{text}{extra}");
        prop_assert!(decode_address(&long).is_err());
    }

    #[test]
    fn non_hex_characters_are_rejected(account in any::<[u8; 20]>(), pos in 0usize..44, c in "[g-zG-Z_ ]") {
        let mut text = Address::new(Network::Devin, account).to_hex();
        text.replace_range(pos..pos + 1, &c);
        prop_assert!(decode_address(&text).is_err());
    }
}

#[test]
fn raw_bytes_are_validated() {
    let address = Address::new(Network::Devin, [7u8; 20]);
    let mut bytes = *address.as_bytes();
    assert_eq!(Address::try_from(bytes).unwrap(), address);

    bytes[1] ^= 0x01;
    assert!(matches!(
        Address::try_from(bytes),
        Err(AddressError::InvalidChecksum { .. })
    ));
}

#[test]
fn lookup_key_serializes_as_prefixed_hex() {
    let key = LookupKey::new([0x11; 32]);
    let json = serde_json::to_string(&key).unwrap();
    assert_eq!(json, format!("\"0x{}\"", "11".repeat(32)));
    let back: LookupKey = serde_json::from_str(&json).unwrap();
    assert_eq!(back, key);
    assert!(serde_json::from_str::<LookupKey>("\"0x1234\"").is_err());
}
