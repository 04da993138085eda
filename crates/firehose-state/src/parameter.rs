//! Processor parameter names

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Processor parameter with a named field at the current schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessorParameter {
    /// ARN of the transformation function
    LambdaArn,
    /// Invocation retry count
    NumberOfRetries,
}

impl ProcessorParameter {
    /// Every recognized parameter
    pub const ALL: [Self; 2] = [Self::LambdaArn, Self::NumberOfRetries];

    /// Name as recorded in `parameter_name` values
    #[inline]
    #[must_use]
    pub fn symbolic_name(self) -> &'static str {
        match self {
            Self::LambdaArn => "LambdaArn",
            Self::NumberOfRetries => "NumberOfRetries",
        }
    }

    /// Leaf field the value is stored under
    #[inline]
    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            Self::LambdaArn => "lambda_arn",
            Self::NumberOfRetries => "number_of_retries",
        }
    }
}

impl Display for ProcessorParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbolic_name())
    }
}

impl FromStr for ProcessorParameter {
    type Err = UnknownParameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|parameter| parameter.symbolic_name() == s)
            .ok_or_else(|| UnknownParameter(s.to_string()))
    }
}

/// Symbolic name outside the parameter table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown processor parameter: {0}")]
pub struct UnknownParameter(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_map_to_snake_case_fields() {
        let lambda: ProcessorParameter = "LambdaArn".parse().unwrap();
        assert_eq!(lambda.field_name(), "lambda_arn");
        let retries: ProcessorParameter = "NumberOfRetries".parse().unwrap();
        assert_eq!(retries.field_name(), "number_of_retries");
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!("lambdaarn".parse::<ProcessorParameter>().is_err());
    }

    #[test]
    fn unknown_name_is_reported() {
        let err = "RoleArn".parse::<ProcessorParameter>().unwrap_err();
        assert_eq!(err, UnknownParameter("RoleArn".into()));
    }

    #[test]
    fn display_round_trips() {
        for parameter in ProcessorParameter::ALL {
            assert_eq!(parameter.to_string().parse::<ProcessorParameter>().unwrap(), parameter);
        }
    }
}
