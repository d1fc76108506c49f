use std::{marker::PhantomData, ops::Deref, str::FromStr};

use compact_str::{CompactString, ToCompactString};

use super::{
    ValidationError,
    strings::{NameProps, PrefixProps, StrProps, impl_validated_str},
};
use crate::caps;

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogGroupName(CompactString);

impl LogGroupName {
    const MAX_LENGTH: usize = caps::MAX_LOG_GROUP_NAME_LEN;
}

impl TryFrom<CompactString> for LogGroupName {
    type Error = ValidationError;

    fn try_from(name: CompactString) -> Result<Self, Self::Error> {
        if name.is_empty() {
            return Err("Log group name must not be empty".into());
        }

        if name.chars().count() > Self::MAX_LENGTH {
            return Err(format!(
                "Log group name must not exceed {} characters in length",
                Self::MAX_LENGTH
            )
            .into());
        }

        Ok(Self(name))
    }
}

impl_validated_str!(LogGroupName);

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogStreamNameStr<T: StrProps>(CompactString, PhantomData<T>);

impl<T: StrProps> serde::Serialize for LogStreamNameStr<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de, T: StrProps> serde::Deserialize<'de> for LogStreamNameStr<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = CompactString::deserialize(deserializer)?;
        s.try_into().map_err(serde::de::Error::custom)
    }
}

impl<T: StrProps> LogStreamNameStr<T> {
    pub const MAX_LENGTH: usize = caps::MAX_LOG_STREAM_NAME_LEN;
}

impl<T: StrProps> AsRef<str> for LogStreamNameStr<T> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<T: StrProps> Deref for LogStreamNameStr<T> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: StrProps> TryFrom<CompactString> for LogStreamNameStr<T> {
    type Error = ValidationError;

    fn try_from(name: CompactString) -> Result<Self, Self::Error> {
        if name.contains(':') {
            return Err(format!("Log stream {} must not contain colons", T::FIELD_NAME).into());
        }

        if !T::IS_PREFIX && name.is_empty() {
            return Err(format!("Log stream {} must not be empty", T::FIELD_NAME).into());
        }

        if name.chars().count() > Self::MAX_LENGTH {
            return Err(format!(
                "Log stream {} must not exceed {} characters in length",
                T::FIELD_NAME,
                Self::MAX_LENGTH
            )
            .into());
        }

        Ok(Self(name, PhantomData))
    }
}

impl<T: StrProps> FromStr for LogStreamNameStr<T> {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.to_compact_string().try_into()
    }
}

impl<T: StrProps> std::fmt::Debug for LogStreamNameStr<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<T: StrProps> std::fmt::Display for LogStreamNameStr<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<T: StrProps> From<LogStreamNameStr<T>> for CompactString {
    fn from(value: LogStreamNameStr<T>) -> Self {
        value.0
    }
}

impl<T: StrProps> From<LogStreamNameStr<T>> for String {
    fn from(value: LogStreamNameStr<T>) -> Self {
        value.0.into()
    }
}

pub type LogStreamName = LogStreamNameStr<NameProps>;

pub type LogStreamNamePrefix = LogStreamNameStr<PrefixProps>;

impl Default for LogStreamNamePrefix {
    fn default() -> Self {
        LogStreamNameStr(CompactString::default(), PhantomData)
    }
}

impl From<LogStreamName> for LogStreamNamePrefix {
    fn from(value: LogStreamName) -> Self {
        Self(value.0, PhantomData)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::shortest("a")]
    #[case::typical("i-0123456789abcdef/application")]
    #[case::longest(&"x".repeat(512))]
    #[case::longest_multibyte(&"é".repeat(512))]
    fn accepts_stream_names(#[case] name: &str) {
        assert!(name.parse::<LogStreamName>().is_ok());
    }

    #[rstest]
    #[case::empty("")]
    #[case::colon("app:stream")]
    #[case::too_long(&"x".repeat(513))]
    fn rejects_stream_names(#[case] name: &str) {
        assert!(name.parse::<LogStreamName>().is_err());
    }

    #[test]
    fn prefix_may_be_empty_but_not_contain_colons() {
        assert!("".parse::<LogStreamNamePrefix>().is_ok());
        assert!("a:".parse::<LogStreamNamePrefix>().is_err());
    }

    #[rstest]
    #[case::slashes("/aws/lambda/handler")]
    #[case::hash("team#prod.api_v2")]
    #[case::space("my group")]
    #[case::longest_multibyte(&"é".repeat(512))]
    fn accepts_group_names(#[case] name: &str) {
        assert!(name.parse::<LogGroupName>().is_ok());
    }

    #[rstest]
    #[case::empty("")]
    #[case::too_long(&"x".repeat(513))]
    #[case::too_long_multibyte(&"é".repeat(513))]
    fn rejects_group_names(#[case] name: &str) {
        assert!(name.parse::<LogGroupName>().is_err());
    }

    proptest! {
        #[test]
        fn stream_name_validity(name in "[a-z:]{0,600}") {
            let valid = !name.is_empty() && name.len() <= 512 && !name.contains(':');
            prop_assert_eq!(name.parse::<LogStreamName>().is_ok(), valid);
        }
    }
}
