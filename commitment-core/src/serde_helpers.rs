//! Serde helpers for big integers that overflow JSON numbers.

/// `BigUint` as a decimal string.
pub mod decimal {
    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.to_str_radix(10).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        // `parse_bytes` alone would also take a sign and `_` separators
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(serde::de::Error::custom(format!("invalid decimal integer: {s:?}")));
        }
        BigUint::parse_bytes(s.as_bytes(), 10)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid decimal integer: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Wrapper {
        #[serde(with = "super::decimal")]
        value: BigUint,
    }

    #[test]
    fn test_decimal_roundtrip() {
        let wrapper = Wrapper { value: BigUint::from(1u8) << 200 };
        let json = serde_json::to_string(&wrapper).unwrap();
        assert!(json.contains("\"1606938044258990275541962092341162602522202993782792835301376\""));
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wrapper);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":"12x"}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":"-1"}"#).is_err());
    }

    #[test]
    fn test_rejects_non_digit_forms() {
        for input in ["1_0", "+5", "", " 7", "0x10"] {
            let json = format!(r#"{{"value":"{input}"}}"#);
            assert!(serde_json::from_str::<Wrapper>(&json).is_err(), "accepted {input:?}");
        }

        let leading_zeros: Wrapper = serde_json::from_str(r#"{"value":"007"}"#).unwrap();
        assert_eq!(leading_zeros.value, BigUint::from(7u8));
    }
}
