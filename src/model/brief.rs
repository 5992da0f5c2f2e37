use serde::{Deserialize, Serialize};

pub const TRUNCATION_MARKER: &str = " [MESSAGE TRUNCATED";

/// Length rules applied to a brief before it is sent.
/// Lengths count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruncationLimits {
    pub trigger_len: usize,
    pub keep_len: usize,
    pub marker: String,
}

impl Default for TruncationLimits {
    fn default() -> Self {
        Self {
            trigger_len: 4000,
            keep_len: 3900,
            marker: TRUNCATION_MARKER.into(),
        }
    }
}

/// Text produced by the model for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brief(String);

impl Brief {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_text(self) -> String {
        self.0
    }

    /// Cut to `keep_len` characters plus the marker once the brief is
    /// longer than `trigger_len`. Shorter briefs come back unchanged.
    pub fn truncated(self, limits: &TruncationLimits) -> Self {
        if self.char_len() <= limits.trigger_len {
            return self;
        }

        let cut = self
            .0
            .char_indices()
            .nth(limits.keep_len)
            .map(|(idx, _)| idx)
            .unwrap_or(self.0.len());

        let mut text = self.0;
        text.truncate(cut);
        text.push_str(&limits.marker);
        Self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_brief_is_untouched() {
        let brief = Brief::new("Inflation is 3.2%.");
        let out = brief.clone().truncated(&TruncationLimits::default());
        assert_eq!(out, brief);
    }

    #[test]
    fn brief_at_trigger_length_is_untouched() {
        let text = "a".repeat(4000);
        let out = Brief::new(text.clone()).truncated(&TruncationLimits::default());
        assert_eq!(out.as_str(), text);
    }

    #[test]
    fn long_brief_is_cut_and_marked() {
        let out = Brief::new("b".repeat(5000)).truncated(&TruncationLimits::default());
        assert_eq!(out.char_len(), 3919);
        assert!(out.as_str().ends_with(TRUNCATION_MARKER));
        assert!(out.as_str().starts_with(&"b".repeat(3900)));
    }

    #[test]
    fn cut_respects_multibyte_characters() {
        let out = Brief::new("📊é".repeat(2500)).truncated(&TruncationLimits::default());
        assert_eq!(out.char_len(), 3900 + TRUNCATION_MARKER.chars().count());
        assert!(out.as_str().ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn one_over_trigger_is_truncated() {
        let out = Brief::new("c".repeat(4001)).truncated(&TruncationLimits::default());
        assert_eq!(out.char_len(), 3919);
    }

    #[test]
    fn custom_limits_apply() {
        let limits = TruncationLimits {
            trigger_len: 10,
            keep_len: 4,
            marker: "...".into(),
        };
        let out = Brief::new("abcdefghijkl").truncated(&limits);
        assert_eq!(out.as_str(), "abcd...");
    }
}
