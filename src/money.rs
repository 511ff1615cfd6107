//! Serde adapters for money values.
//!
//! Amounts are held as `BigDecimal` so totals are exact, but clients send and
//! receive them as plain JSON numbers. Inbound floats are converted through
//! their shortest decimal rendering, so `1299.99` becomes exactly `1299.99`.

use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive};
use serde::{de, Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
    if value.with_scale(0) == *value {
        if let Some(n) = value.to_i64() {
            return serializer.serialize_i64(n);
        }
    }
    match value.to_string().parse::<f64>() {
        Ok(f) if f.is_finite() => serializer.serialize_f64(f),
        _ => serializer.serialize_str(&value.to_string()),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigDecimal, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    from_f64(raw).map_err(de::Error::custom)
}

/// Converts a float to the decimal it prints as.
pub fn from_f64(value: f64) -> Result<BigDecimal, String> {
    if !value.is_finite() {
        return Err(format!("'{}' is not a finite number", value));
    }
    BigDecimal::from_str(&value.to_string()).map_err(|e| e.to_string())
}

/// Adapters for `Option<BigDecimal>` request fields: absent or `null` is `None`.
pub mod option {
    use bigdecimal::BigDecimal;
    use serde::{de, Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BigDecimal>, D::Error> {
        match Option::<f64>::deserialize(deserializer)? {
            Some(raw) => super::from_f64(raw).map(Some).map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Priced {
        #[serde(with = "crate::money")]
        price: BigDecimal,
    }

    #[derive(Deserialize)]
    struct MaybePriced {
        #[serde(default, deserialize_with = "crate::money::option::deserialize")]
        price: Option<BigDecimal>,
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    #[test]
    fn float_input_keeps_its_printed_digits() {
        let p: Priced = serde_json::from_str(r#"{"price": 1299.99}"#).unwrap();
        assert_eq!(p.price, dec("1299.99"));
    }

    #[test]
    fn integer_input_is_accepted() {
        let p: Priced = serde_json::from_str(r#"{"price": 50}"#).unwrap();
        assert_eq!(p.price, dec("50"));
    }

    #[test]
    fn string_input_is_rejected() {
        assert!(serde_json::from_str::<Priced>(r#"{"price": "9.99"}"#).is_err());
    }

    #[test]
    fn fractional_output_is_a_json_float() {
        let json = serde_json::to_value(Priced {
            price: dec("1299.99") * BigDecimal::from(2),
        })
        .unwrap();
        assert_eq!(json["price"].as_f64(), Some(2599.98));
    }

    #[test]
    fn integral_output_is_a_json_integer() {
        let json = serde_json::to_string(&Priced { price: dec("0") }).unwrap();
        assert_eq!(json, r#"{"price":0}"#);
    }

    #[test]
    fn optional_price_absent_and_null_are_none() {
        let absent: MaybePriced = serde_json::from_str("{}").unwrap();
        let null: MaybePriced = serde_json::from_str(r#"{"price": null}"#).unwrap();
        assert!(absent.price.is_none());
        assert!(null.price.is_none());
    }

    #[test]
    fn optional_price_present_is_some() {
        let p: MaybePriced = serde_json::from_str(r#"{"price": -10}"#).unwrap();
        assert_eq!(p.price, Some(dec("-10")));
    }
}
