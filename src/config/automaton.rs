//! Automaton configuration module.
//!
//! Maps the serialized settings onto [`AutomatonOptions`] for the library.

use super::{ConfigResult, Validate};
use crate::data_structures::aho_corasick::{AutomatonOptions, StalePolicy};
use crate::data_structures::keyword_trie::KeywordTrieConfig;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Automaton configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AutomatonSettings {
    /// Declared alphabet as a string of symbols; unset means inferred from keywords
    pub alphabet: Option<String>,

    /// Optional cap on keyword length in symbols; unset means unbounded
    pub max_keyword_len: Option<usize>,

    /// Behaviour of a scan after keywords changed
    pub stale_policy: StalePolicy,
}

impl AutomatonSettings {
    /// Converts the settings into library options.
    pub fn to_options(&self) -> AutomatonOptions {
        let mut trie = KeywordTrieConfig::new();
        if let Some(max_keyword_len) = self.max_keyword_len {
            trie = trie.with_max_keyword_len(max_keyword_len);
        }
        if let Some(alphabet) = &self.alphabet {
            trie = trie.with_alphabet(alphabet.chars());
        }
        AutomatonOptions::new()
            .trie_config(trie)
            .stale_policy(self.stale_policy)
    }
}

impl Validate for AutomatonSettings {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_keyword_len == Some(0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "automaton.max_keyword_len".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        if matches!(&self.alphabet, Some(alphabet) if alphabet.is_empty()) {
            return Err(ConfigError::ValidationError(
                "alphabet must not be empty when set".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(AutomatonSettings::default().validate().is_ok());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = AutomatonSettings::default();
        settings.max_keyword_len = Some(0);
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ValueOutOfRange { .. })
        ));

        settings.max_keyword_len = Some(8);
        settings.alphabet = Some(String::new());
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_default_settings_do_not_cap_length() {
        let options = AutomatonSettings::default().to_options();
        assert_eq!(options.trie.max_keyword_len, None);
    }

    #[test]
    fn test_to_options() {
        let settings = AutomatonSettings {
            alphabet: Some("acgt".to_string()),
            max_keyword_len: Some(16),
            stale_policy: StalePolicy::Reject,
        };
        let options = settings.to_options();

        assert_eq!(options.stale_policy, StalePolicy::Reject);
        assert_eq!(options.trie.max_keyword_len, Some(16));
        assert_eq!(
            options.trie.alphabet,
            Some(['a', 'c', 'g', 't'].into_iter().collect())
        );
    }
}
