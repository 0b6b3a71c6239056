//! Explicit long/short interpretation of raw trade side strings.
//!
//! Exchanges disagree on side vocabulary ("long", "B", "BUY", "Open Long").
//! The mapping is driven by configured alias lists; anything that matches
//! neither list is `Unknown` and handled by the configured policy.

use trader_sentiment_core::{SideConfig, UnknownSidePolicy};

/// Interpreted direction of one trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideClass {
    Long,
    Short,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct SideMapping {
    long_aliases: Vec<String>,
    short_aliases: Vec<String>,
    policy: UnknownSidePolicy,
}

impl SideMapping {
    #[must_use]
    pub fn from_config(config: &SideConfig) -> Self {
        Self {
            long_aliases: normalize_all(&config.long_aliases),
            short_aliases: normalize_all(&config.short_aliases),
            policy: config.unknown,
        }
    }

    /// Classifies a side value, ignoring case and surrounding whitespace.
    /// A missing side is `Unknown`.
    #[must_use]
    pub fn classify(&self, side: Option<&str>) -> SideClass {
        let Some(side) = side else {
            return SideClass::Unknown;
        };
        let side = side.trim().to_lowercase();

        if self.long_aliases.contains(&side) {
            SideClass::Long
        } else if self.short_aliases.contains(&side) {
            SideClass::Short
        } else {
            SideClass::Unknown
        }
    }

    #[must_use]
    pub fn policy(&self) -> UnknownSidePolicy {
        self.policy
    }
}

impl Default for SideMapping {
    fn default() -> Self {
        Self::from_config(&SideConfig::default())
    }
}

fn normalize_all(aliases: &[String]) -> Vec<String> {
    aliases.iter().map(|a| a.trim().to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mapping_is_case_insensitive() {
        let mapping = SideMapping::default();

        assert_eq!(mapping.classify(Some("long")), SideClass::Long);
        assert_eq!(mapping.classify(Some("LONG")), SideClass::Long);
        assert_eq!(mapping.classify(Some(" Long ")), SideClass::Long);
        assert_eq!(mapping.classify(Some("Short")), SideClass::Short);
    }

    #[test]
    fn default_mapping_flags_exchange_vocabulary_as_unknown() {
        let mapping = SideMapping::default();

        assert_eq!(mapping.classify(Some("BUY")), SideClass::Unknown);
        assert_eq!(mapping.classify(Some("longish")), SideClass::Unknown);
        assert_eq!(mapping.classify(None), SideClass::Unknown);
    }

    #[test]
    fn configured_aliases_extend_vocabulary() {
        let mapping = SideMapping::from_config(&SideConfig {
            long_aliases: vec!["long".to_string(), "BUY".to_string()],
            short_aliases: vec!["short".to_string(), "sell".to_string()],
            unknown: UnknownSidePolicy::Error,
        });

        assert_eq!(mapping.classify(Some("buy")), SideClass::Long);
        assert_eq!(mapping.classify(Some("SELL")), SideClass::Short);
        assert_eq!(mapping.policy(), UnknownSidePolicy::Error);
    }
}
