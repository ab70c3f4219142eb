//! Validator configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ValidationResult;

/// Policy settings for a validator.
///
/// Loadable from TOML:
///
/// ```toml
/// strict_validation = true
/// validate_related = true
/// datasets_context = ["people", "companies"]
/// timeout_ms = 30000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorSettings {
    /// Reject properties and references no constraint in the schema declares.
    pub strict_validation: bool,
    /// Check referenced entities against the data provider.
    pub validate_related: bool,
    /// Datasets whose records count for referential checks. Empty accepts all.
    pub datasets_context: Vec<String>,
    /// Upper bound on the duration of one validation run.
    #[serde(rename = "timeout_ms", with = "timeout_ms")]
    pub timeout: Option<Duration>,
}

impl ValidatorSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> ValidationResult<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn with_strict_validation(mut self, strict: bool) -> Self {
        self.strict_validation = strict;
        self
    }

    pub fn with_validate_related(mut self, validate_related: bool) -> Self {
        self.validate_related = validate_related;
        self
    }

    pub fn with_datasets_context<I, S>(mut self, datasets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.datasets_context = datasets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

mod timeout_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(timeout) => serializer.serialize_u64(timeout.as_millis() as u64),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
