//! Synthesis options.

use serde::{Deserialize, Serialize};

/// Options recognized by [`crate::FilterCompiler::synthesize`].
///
/// Deserializes from any serde format; unknown keys are rejected and missing
/// keys take their defaults.
///
/// ```
/// use sieve_compiler::FilterOptions;
///
/// let options: FilterOptions = serde_json::from_str(r#"{"optimistic": true}"#).unwrap();
/// assert_eq!(options, FilterOptions::optimistic());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterOptions {
    /// Skip fields whose target model field does not exist, instead of
    /// failing with `MissingModelField`.
    pub optimistic: bool,
}

impl FilterOptions {
    /// Options with optimistic resolution enabled.
    pub fn optimistic() -> Self {
        FilterOptions { optimistic: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_strict() {
        assert!(!FilterOptions::default().optimistic);
        let options: FilterOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, FilterOptions::default());
    }

    #[test]
    fn rejects_unknown_options() {
        let err = serde_json::from_str::<FilterOptions>(r#"{"optimstic": true}"#).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }
}
