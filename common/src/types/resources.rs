use std::num::NonZeroUsize;

use crate::caps;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub values: Vec<T>,
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new_empty() -> Self {
        Self {
            values: Vec::new(),
            next_token: None,
        }
    }

    pub fn new(values: impl Into<Vec<T>>, next_token: Option<String>) -> Self {
        Self {
            values: values.into(),
            next_token,
        }
    }

    pub fn is_last(&self) -> bool {
        self.next_token.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLimit(NonZeroUsize);

impl ListLimit {
    const MAX: NonZeroUsize = NonZeroUsize::new(caps::MAX_DESCRIBE_LOG_STREAMS_LIMIT).unwrap();

    pub fn get(&self) -> NonZeroUsize {
        self.0
    }

    pub fn as_usize(&self) -> usize {
        self.0.get()
    }
}

impl Default for ListLimit {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl From<usize> for ListLimit {
    fn from(value: usize) -> Self {
        Self(NonZeroUsize::new(value).unwrap_or(Self::MAX).min(Self::MAX))
    }
}

impl From<ListLimit> for usize {
    fn from(value: ListLimit) -> Self {
        value.as_usize()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("wrong format of import ID ({id}), use: '{expected}'")]
pub struct TwoPartIdError {
    pub id: String,
    pub expected: &'static str,
}

/// An identifier made of exactly two segments joined by a separator, such as
/// `us-east-1_abc/1example23456789`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoPartId<'a> {
    pub first: &'a str,
    pub second: &'a str,
}

impl<'a> TwoPartId<'a> {
    /// Split `id` on `separator`. `expected` names the format in the error message.
    pub fn parse(
        id: &'a str,
        separator: char,
        expected: &'static str,
    ) -> Result<Self, TwoPartIdError> {
        let mut parts = id.split(separator);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(first), Some(second), None) => Ok(Self { first, second }),
            _ => Err(TwoPartIdError {
                id: id.to_owned(),
                expected,
            }),
        }
    }
}
