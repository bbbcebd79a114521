use serde::{Deserialize, Serialize};

use crate::model::ValueSetValues;

/// Name suffix appended to a copied definition unless configured otherwise
pub const DEFAULT_NAME_SUFFIX: &str = " - Copy";

/// What a clone does with the published values of a value set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishedValuePolicy {
    /// Keep the published array exactly as in the source
    #[default]
    CopyVerbatim,
    /// Fill the published array with the default value
    Reset,
}

impl PublishedValuePolicy {
    /// Values for a cloned value set
    pub fn apply(&self, values: &ValueSetValues) -> ValueSetValues {
        match self {
            PublishedValuePolicy::CopyVerbatim => values.clone(),
            PublishedValuePolicy::Reset => values.with_published_reset(),
        }
    }
}

/// Options for one copy call
///
/// Deserializes from a partial document; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyOptions {
    /// Also clone the usages nested in the definition, with their overrides
    pub include_usages: bool,
    pub published_values: PublishedValuePolicy,
    /// Appended to the copied definition's name; `None` keeps it verbatim
    pub name_suffix: Option<String>,
}

impl CopyOptions {
    /// Default options with nested usages included
    pub fn with_usages() -> Self {
        Self {
            include_usages: true,
            ..Self::default()
        }
    }

    pub(crate) fn copied_name(&self, name: &str) -> String {
        match &self.name_suffix {
            Some(suffix) => format!("{}{}", name, suffix),
            None => name.to_string(),
        }
    }
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            include_usages: false,
            published_values: PublishedValuePolicy::CopyVerbatim,
            name_suffix: Some(DEFAULT_NAME_SUFFIX.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_VALUE;

    #[test]
    fn test_defaults() {
        let options = CopyOptions::default();
        assert!(!options.include_usages);
        assert_eq!(options.published_values, PublishedValuePolicy::CopyVerbatim);
        assert_eq!(options.copied_name("Battery"), "Battery - Copy");
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let options: CopyOptions = serde_json::from_str(r#"{"include_usages":true}"#).unwrap();
        assert!(options.include_usages);
        assert_eq!(options.name_suffix.as_deref(), Some(DEFAULT_NAME_SUFFIX));

        let options: CopyOptions =
            serde_json::from_str(r#"{"published_values":"reset","name_suffix":null}"#).unwrap();
        assert_eq!(options.published_values, PublishedValuePolicy::Reset);
        assert_eq!(options.copied_name("Battery"), "Battery");
    }

    #[test]
    fn test_policy_apply() {
        let mut values = ValueSetValues::with_len(2);
        values.published = vec!["12".into(), "3".into()];
        values.manual = vec!["12".into(), "4".into()];

        let verbatim = PublishedValuePolicy::CopyVerbatim.apply(&values);
        assert_eq!(verbatim, values);

        let reset = PublishedValuePolicy::Reset.apply(&values);
        assert_eq!(reset.published, vec![DEFAULT_VALUE, DEFAULT_VALUE]);
        assert_eq!(reset.manual, values.manual);
    }
}
