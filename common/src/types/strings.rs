pub trait StrProps: std::fmt::Debug + Clone {
    const IS_PREFIX: bool;
    const FIELD_NAME: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NameProps;

impl StrProps for NameProps {
    const IS_PREFIX: bool = false;
    const FIELD_NAME: &'static str = "name";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrefixProps;

impl StrProps for PrefixProps {
    const IS_PREFIX: bool = true;
    const FIELD_NAME: &'static str = "prefix";
}

/// Implements the conversions shared by every validated string newtype.
///
/// The type must be a tuple struct over `CompactString` and provide its own
/// `TryFrom<CompactString, Error = ValidationError>`.
macro_rules! impl_validated_str {
    ($name:ident) => {
        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = compact_str::CompactString::deserialize(deserializer)?;
                s.try_into().map_err(serde::de::Error::custom)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::types::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                compact_str::CompactString::from(s).try_into()
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for compact_str::CompactString {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.into()
            }
        }
    };
}

pub(crate) use impl_validated_str;
