use num_bigint::{BigInt, Sign};

use crate::error::GenError;

/// Parse a base-10 string into a non-negative `BigInt`.
pub fn parse_non_negative(value: &str) -> Result<BigInt, GenError> {
    let number: BigInt = value
        .trim()
        .parse()
        .map_err(|_| GenError::StringIsNotANumber(value.to_string()))?;
    if number.sign() == Sign::Minus {
        return Err(GenError::NegativeNumber(value.to_string()));
    }

    Ok(number)
}

/// Serde adapter encoding a `BigInt` as a decimal string, the way genesis
/// files carry amounts.
pub mod decimal {
    use num_bigint::BigInt;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| D::Error::custom(format!("invalid decimal amount: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_large_amounts() {
        let v = parse_non_negative("20000000000000000000000000").unwrap();
        assert_eq!(v.to_string(), "20000000000000000000000000");
    }

    #[test]
    fn zero_is_accepted() {
        assert_eq!(parse_non_negative("0").unwrap(), BigInt::from(0));
    }

    #[test]
    fn not_a_number_is_rejected() {
        let err = parse_non_negative("not a number").unwrap_err();
        assert!(matches!(err, GenError::StringIsNotANumber(_)));
    }

    #[test]
    fn negative_is_rejected() {
        let err = parse_non_negative("-1").unwrap_err();
        assert!(matches!(err, GenError::NegativeNumber(_)));
    }
}
