use serde::{Deserialize, Serialize};

/// Placeholder written into a value array slot that has no value yet
pub const DEFAULT_VALUE: &str = "-";

/// Which of the candidate arrays is the actual value of a value set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterSwitchKind {
    #[default]
    Manual,
    Computed,
    Reference,
}

/// Candidate and actual value arrays of a parameter or override value set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSetValues {
    pub switch_kind: ParameterSwitchKind,
    pub manual: Vec<String>,
    pub computed: Vec<String>,
    pub reference: Vec<String>,
    pub formula: Vec<String>,
    pub published: Vec<String>,
}

impl ValueSetValues {
    /// Value arrays of `len` slots, all set to the default value
    pub fn with_len(len: usize) -> Self {
        let empty = vec![DEFAULT_VALUE.to_string(); len];
        Self {
            switch_kind: ParameterSwitchKind::Manual,
            manual: empty.clone(),
            computed: empty.clone(),
            reference: empty.clone(),
            formula: empty.clone(),
            published: empty,
        }
    }

    /// Values of the currently switched-on array
    pub fn actual(&self) -> &[String] {
        match self.switch_kind {
            ParameterSwitchKind::Manual => &self.manual,
            ParameterSwitchKind::Computed => &self.computed,
            ParameterSwitchKind::Reference => &self.reference,
        }
    }

    /// Copy of these values with the published array cleared to defaults
    ///
    /// The array keeps its length so the clone stays shape-compatible with
    /// its parameter type.
    pub fn with_published_reset(&self) -> Self {
        Self {
            published: vec![DEFAULT_VALUE.to_string(); self.published.len()],
            ..self.clone()
        }
    }
}

impl Default for ValueSetValues {
    fn default() -> Self {
        Self::with_len(1)
    }
}
