//! Decimal (de)serialization for [`U256`] configuration fields.
//!
//! Values are written as decimal strings so that 1e18-scaled parameters
//! survive JSON round trips. Plain JSON integers are accepted on input.

use core::fmt;

use primitive_types::U256;
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

pub(crate) fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    deserializer.deserialize_any(U256Visitor)
}

struct U256Visitor;

impl<'de> Visitor<'de> for U256Visitor {
    type Value = U256;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an unsigned integer or a decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<U256, E> {
        Ok(U256::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<U256, E> {
        u64::try_from(v)
            .map(U256::from)
            .map_err(|_| E::custom("negative value"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<U256, E> {
        U256::from_dec_str(v).map_err(|_| E::custom(format!("invalid decimal integer: {v}")))
    }
}
