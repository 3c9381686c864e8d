//! Page configuration: element ids, timings and the storage key.
//!
//! Every field has a default matching the stock page markup, so callers only
//! pass the fields they want to override (`start_site_with_config`).

use serde::Deserialize;

use crate::error::QuizError;

/// Longest accepted advance delay. Anything above this feels broken to the user.
pub const MAX_ADVANCE_DELAY_MS: u32 = 2_000;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub overlay_id: String,
    pub form_id: String,
    pub question_selector: String,
    pub progress_selector: String,
    pub result_id: String,
    pub start_button_id: String,
    pub skip_button_id: String,
    pub close_button_id: String,
    /// Anchor scrolled into view by "Enter" and the skip button.
    pub continue_anchor_id: String,
    /// Pause between a selection and the next question (or the result).
    pub advance_delay_ms: u32,
    pub storage_key: String,
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            overlay_id: "sorting-modal".into(),
            form_id: "sorting-form".into(),
            question_selector: ".q".into(),
            progress_selector: ".progress-fill".into(),
            result_id: "sorting-result".into(),
            start_button_id: "btn-start-quiz".into(),
            skip_button_id: "btn-skip-quiz".into(),
            close_button_id: "close-sorting".into(),
            continue_anchor_id: "main".into(),
            advance_delay_ms: 170,
            storage_key: "codecraft_profile".into(),
            log_level: "info".into(),
        }
    }
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self, QuizError> {
        let cfg: SiteConfig =
            serde_json::from_str(json).map_err(|e| QuizError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), QuizError> {
        if self.advance_delay_ms > MAX_ADVANCE_DELAY_MS {
            return Err(QuizError::Config(format!(
                "advance_delay_ms {} exceeds {MAX_ADVANCE_DELAY_MS}",
                self.advance_delay_ms
            )));
        }
        if self.storage_key.trim().is_empty() {
            return Err(QuizError::Config("storage_key must not be empty".into()));
        }
        self.level()?;
        Ok(())
    }

    pub fn level(&self) -> Result<log::Level, QuizError> {
        self.log_level
            .parse()
            .map_err(|_| QuizError::Config(format!("unknown log level '{}'", self.log_level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() {
        let cfg = SiteConfig::from_json(r#"{"advance_delay_ms": 0, "storage_key": "k"}"#).unwrap();
        assert_eq!(cfg.advance_delay_ms, 0);
        assert_eq!(cfg.storage_key, "k");
        assert_eq!(cfg.overlay_id, "sorting-modal");
        assert_eq!(cfg.level().unwrap(), log::Level::Info);
    }

    #[test]
    fn rejects_long_delay_and_blank_key() {
        assert!(matches!(
            SiteConfig::from_json(r#"{"advance_delay_ms": 5000}"#),
            Err(QuizError::Config(_))
        ));
        assert!(SiteConfig::from_json(r#"{"storage_key": "  "}"#).is_err());
        assert!(SiteConfig::from_json(r#"{"log_level": "loud"}"#).is_err());
        assert!(SiteConfig::from_json("not json").is_err());
    }
}
