//! Delivery stream identifiers
//!
//! Imports start from an ARN; only the trailing stream name is kept in state.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::bag::{AttributeBag, InstanceState};
use crate::migrator::CURRENT_SCHEMA_VERSION;

static DELIVERY_STREAM_ARN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^arn:(aws(?:-[a-z]+)*):firehose:([-a-z0-9]+):([0-9]+):deliverystream/(.+)$")
        .expect("delivery stream ARN pattern is valid")
});

/// Parsed `arn:<partition>:firehose:<region>:<account>:deliverystream/<name>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeliveryStreamArn {
    partition: String,
    region: String,
    account_id: String,
    name: String,
}

impl DeliveryStreamArn {
    /// Partition (`aws`, `aws-cn`, …)
    #[inline]
    #[must_use]
    pub fn partition(&self) -> &str {
        &self.partition
    }

    /// Region
    #[inline]
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Owning account
    #[inline]
    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Stream name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for DeliveryStreamArn {
    type Err = ArnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = DELIVERY_STREAM_ARN
            .captures(s)
            .ok_or_else(|| ArnError::Malformed(s.to_string()))?;
        let part = |i: usize| captures.get(i).map_or("", |m| m.as_str()).to_string();
        Ok(Self {
            partition: part(1),
            region: part(2),
            account_id: part(3),
            name: part(4),
        })
    }
}

impl Display for DeliveryStreamArn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:firehose:{}:{}:deliverystream/{}",
            self.partition, self.region, self.account_id, self.name
        )
    }
}

/// Build the state recorded for an imported stream
///
/// The identifier is kept as the state id and the stream name becomes the
/// `name` attribute; everything else is filled in by the next refresh.
///
/// # Errors
/// Returns [`ArnError::Malformed`] if `id` is not a delivery stream ARN
pub fn import_state(id: &str) -> Result<InstanceState, ArnError> {
    let arn: DeliveryStreamArn = id.parse()?;
    let mut attributes = AttributeBag::new();
    attributes.insert("name", arn.name);
    Ok(InstanceState::new(id, CURRENT_SCHEMA_VERSION, attributes))
}

/// Errors parsing delivery stream identifiers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArnError {
    /// Identifier does not have the delivery stream ARN shape
    #[error("the delivery stream ID must be a well formed ARN: '{0}'")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARN: &str = "arn:aws:firehose:us-west-2:123456789012:deliverystream/terraform-kinesis-firehose-test";

    #[test]
    fn parses_components() {
        let arn: DeliveryStreamArn = ARN.parse().unwrap();
        assert_eq!(arn.partition(), "aws");
        assert_eq!(arn.region(), "us-west-2");
        assert_eq!(arn.account_id(), "123456789012");
        assert_eq!(arn.name(), "terraform-kinesis-firehose-test");
        assert_eq!(arn.to_string(), ARN);
    }

    #[test]
    fn accepts_other_partitions() {
        let arn: DeliveryStreamArn = "arn:aws-cn:firehose:cn-north-1:1:deliverystream/s"
            .parse()
            .unwrap();
        assert_eq!(arn.partition(), "aws-cn");
    }

    #[test]
    fn rejects_malformed_ids() {
        for id in [
            "",
            "terraform-kinesis-firehose-test",
            "arn:aws:kinesis:us-west-2:1:stream/s",
            "arn:aws:firehose:us-west-2:acct:deliverystream/s",
            "arn:aws:firehose:us-west-2:1:deliverystream/",
            "prefix arn:aws:firehose:us-west-2:1:deliverystream/s",
        ] {
            assert_eq!(
                id.parse::<DeliveryStreamArn>().unwrap_err(),
                ArnError::Malformed(id.to_string())
            );
        }
    }

    #[test]
    fn import_sets_name_at_current_version() {
        let state = import_state(ARN).unwrap();
        assert_eq!(state.id, ARN);
        assert_eq!(state.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(state.attributes.get("name"), Some("terraform-kinesis-firehose-test"));
        assert_eq!(state.attributes.len(), 1);
    }
}
