use compact_str::CompactString;

use super::{ValidationError, strings::impl_validated_str};

/// An Amazon Resource Name: `arn:partition:service:region:account-id:resource`.
///
/// The resource part may itself contain colons.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Arn(CompactString);

impl Arn {
    fn sections(&self) -> [&str; 6] {
        let mut it = self.0.splitn(6, ':');
        std::array::from_fn(|_| it.next().unwrap_or_default())
    }

    pub fn partition(&self) -> &str {
        self.sections()[1]
    }

    pub fn service(&self) -> &str {
        self.sections()[2]
    }

    pub fn region(&self) -> &str {
        self.sections()[3]
    }

    pub fn account_id(&self) -> &str {
        self.sections()[4]
    }

    pub fn resource(&self) -> &str {
        self.sections()[5]
    }
}

impl TryFrom<CompactString> for Arn {
    type Error = ValidationError;

    fn try_from(arn: CompactString) -> Result<Self, Self::Error> {
        let sections: Vec<&str> = arn.splitn(6, ':').collect();
        if sections.len() != 6 {
            return Err(format!("ARN `{arn}` must have at least 6 colon-separated sections").into());
        }
        if sections[0] != "arn" {
            return Err(format!("ARN `{arn}` must begin with `arn:`").into());
        }
        if sections[1].is_empty() {
            return Err(format!("ARN `{arn}` is missing a partition").into());
        }
        if sections[2].is_empty() {
            return Err(format!("ARN `{arn}` is missing a service").into());
        }
        if sections[5].is_empty() {
            return Err(format!("ARN `{arn}` is missing a resource").into());
        }
        Ok(Self(arn))
    }
}

impl_validated_str!(Arn);
