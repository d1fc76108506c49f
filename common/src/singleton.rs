//! Serde adapter for nested blocks that may appear at most once.
//!
//! Configuration documents describe an optional nested block as a list holding zero or one
//! element. In Rust the block is an [`Option`]; this module converts between the two
//! representations and rejects lists with more than one element.
//!
//! # Examples
//!
//! ```
//! #[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
//! pub struct Units {
//!     pub access_token: String,
//! }
//!
//! #[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
//! pub struct Client {
//!     #[serde(default, with = "stratus_common::singleton")]
//!     pub units: Option<Units>,
//! }
//!
//! assert_eq!(
//!     Client { units: None },
//!     serde_json::from_str(r#"{ "units": [] }"#).unwrap(),
//! );
//!
//! assert_eq!(
//!     Client { units: None },
//!     serde_json::from_str("{}").unwrap(),
//! );
//!
//! assert_eq!(
//!     Client { units: Some(Units { access_token: "hours".to_owned() }) },
//!     serde_json::from_str(r#"{ "units": [{ "access_token": "hours" }] }"#).unwrap(),
//! );
//!
//! assert!(
//!     serde_json::from_str::<Client>(
//!         r#"{ "units": [{ "access_token": "hours" }, { "access_token": "days" }] }"#
//!     )
//!     .is_err()
//! );
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(block) => std::slice::from_ref(block).serialize(serializer),
        None => <[T]>::serialize(&[], serializer),
    }
}

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    let blocks = Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default();
    from_list(blocks).map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected at most one block, found {0}")]
pub struct TooManyBlocksError(pub usize);

/// Collapse a list of blocks into an optional block.
pub fn from_list<T>(blocks: Vec<T>) -> Result<Option<T>, TooManyBlocksError> {
    let count = blocks.len();
    let mut blocks = blocks.into_iter();
    match (blocks.next(), blocks.next()) {
        (None, _) => Ok(None),
        (Some(block), None) => Ok(Some(block)),
        (Some(_), Some(_)) => Err(TooManyBlocksError(count)),
    }
}
