use proptest::prelude::*;

use stele_types::{Address, LogId, TxHash, Uint};

proptest! {
    /// Decimal and hex renderings of the same value parse to the same Uint.
    #[test]
    fn decimal_and_hex_agree(v in any::<u128>()) {
        let dec: Uint = v.to_string().parse().unwrap();
        let hex: Uint = format!("0x{v:x}").parse().unwrap();
        prop_assert_eq!(&dec, &hex);
        prop_assert_eq!(dec.to_string(), v.to_string());
    }

    /// Uint addition agrees with native addition where the latter does not overflow.
    #[test]
    fn addition_matches_u128(a in any::<u64>(), b in any::<u64>()) {
        let sum = &Uint::from(a) + &Uint::from(b);
        prop_assert_eq!(sum, Uint::from(a as u128 + b as u128));
    }

    /// AddAssign and Add produce the same result.
    #[test]
    fn add_assign_matches_add(a in any::<u128>(), b in any::<u128>()) {
        let (a, b) = (Uint::from(a), Uint::from(b));
        let mut acc = a.clone();
        acc += &b;
        prop_assert_eq!(acc, &a + &b);
    }

    /// Addresses parse regardless of hex case and always display lowercase.
    #[test]
    fn address_parse_ignores_case(bytes in prop::array::uniform20(0u8..)) {
        let addr = Address::new(bytes);
        let upper = format!("0x{}", hex::encode_upper(bytes));
        let parsed: Address = upper.parse().unwrap();
        prop_assert_eq!(parsed, addr);
        prop_assert_eq!(addr.to_string(), format!("0x{}", hex::encode(bytes)));
    }

    /// Log keys sort by transaction hash before log index.
    #[test]
    fn log_keys_group_by_transaction(
        a in prop::array::uniform32(0u8..),
        b in prop::array::uniform32(0u8..),
        i in any::<u32>(),
        j in any::<u32>(),
    ) {
        prop_assume!(a != b);
        let ka = LogId::new(TxHash::new(a), i).to_key();
        let kb = LogId::new(TxHash::new(b), j).to_key();
        prop_assert_eq!(ka < kb, a < b);
    }
}
