//! Widget configuration.
//!
//! Defaults reproduce the stock listing page behaviour. A page can override
//! any field through a JSON object (camelCase keys); missing fields keep
//! their default.

use serde::Deserialize;

use crate::error::ConfigError;

// =============================================================================
// Defaults
// =============================================================================

/// Trailing debounce for text inputs, in milliseconds.
pub const DEFAULT_TEXT_DEBOUNCE_MS: u32 = 400;

/// Trailing debounce for checkbox toggles, in milliseconds.
pub const DEFAULT_CHECKBOX_DEBOUNCE_MS: u32 = 1000;

/// Label of the incremental "load more" control.
pub const DEFAULT_LOAD_MORE_LABEL: &str = "Voir plus";

/// Vertical travel of enter/exit transitions, in pixels.
pub const DEFAULT_OFFSET_PX: f64 = 20.0;

/// Delay added per item index for entering items, in milliseconds.
pub const DEFAULT_STAGGER_MS: u32 = 10;

/// Duration of a single transition, in milliseconds.
pub const DEFAULT_DURATION_MS: u32 = 500;

/// Easing curve approximating a gentle, lightly damped spring.
pub const DEFAULT_EASING: &str = "cubic-bezier(0.22, 1, 0.36, 1)";

// =============================================================================
// FilterConfig
// =============================================================================

/// Runtime configuration of one filter widget.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterConfig {
    /// Debounce applied to text input keystrokes.
    pub text_debounce_ms: u32,
    /// Debounce applied to checkbox changes.
    pub checkbox_debounce_ms: u32,
    /// Drop fragments that arrive after a newer request was issued.
    pub discard_stale_responses: bool,
    /// Abort waiting for a response after this many milliseconds.
    ///
    /// `None` waits forever.
    pub fetch_timeout_ms: Option<u32>,
    /// Text of the "load more" button.
    pub load_more_label: String,
    /// List transition tuning.
    pub animation: AnimationConfig,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            text_debounce_ms: DEFAULT_TEXT_DEBOUNCE_MS,
            checkbox_debounce_ms: DEFAULT_CHECKBOX_DEBOUNCE_MS,
            discard_stale_responses: true,
            fetch_timeout_ms: None,
            load_more_label: DEFAULT_LOAD_MORE_LABEL.to_string(),
            animation: AnimationConfig::default(),
        }
    }
}

impl FilterConfig {
    /// Parse a configuration object, falling back to defaults per field.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.text_debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce("text inputs"));
        }
        if self.checkbox_debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce("checkboxes"));
        }
        Ok(())
    }
}

/// Transition parameters for the animated list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
    pub offset_px: f64,
    pub stagger_ms: u32,
    pub duration_ms: u32,
    pub easing: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            offset_px: DEFAULT_OFFSET_PX,
            stagger_ms: DEFAULT_STAGGER_MS,
            duration_ms: DEFAULT_DURATION_MS,
            easing: DEFAULT_EASING.to_string(),
        }
    }
}
