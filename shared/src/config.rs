use serde::Deserialize;

use crate::error::{ConfigWarning, PickerError};

pub const DEFAULT_STEP: u32 = 30;
pub const DEFAULT_PLACEHOLDER: &str = "00:00";
pub const MIN_STEP: i64 = 1;
pub const MAX_STEP: i64 = 60;

/// Per-picker configuration, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerConfig {
    /// Minutes per minute-step. Out of range values fall back to 30.
    pub step: i64,
    pub placeholder: String,
    /// Close the popup when the page is clicked outside of it.
    pub autohide: bool,
    /// Element id of an external control disabled while the picker is invalid.
    pub confirm: Option<String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            step: i64::from(DEFAULT_STEP),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            autohide: true,
            confirm: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawOptions {
    step: Option<serde_json::Value>,
    placeholder: Option<String>,
    autohide: Option<bool>,
    confirm: Option<String>,
}

impl PickerConfig {
    pub fn with_step(mut self, step: i64) -> Self {
        self.step = step;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_autohide(mut self, autohide: bool) -> Self {
        self.autohide = autohide;
        self
    }

    pub fn with_confirm(mut self, element_id: impl Into<String>) -> Self {
        self.confirm = Some(element_id.into());
        self
    }

    /// Reads the JSON options form: `{"step": 15, "placeholder": "--:--", "autohide": false}`.
    ///
    /// Malformed JSON is an error; a bad `step` value is only a warning and is
    /// replaced when the config is validated.
    pub fn from_json(json: &str) -> Result<(Self, Vec<ConfigWarning>), PickerError> {
        let raw: RawOptions = serde_json::from_str(json)?;
        let mut config = Self::default();
        let mut warnings = Vec::new();

        if let Some(step) = raw.step {
            match step.as_i64() {
                Some(step) => config.step = step,
                None => warnings.push(ConfigWarning::InvalidStep(step.to_string())),
            }
        }
        if let Some(placeholder) = raw.placeholder {
            config.placeholder = placeholder;
        }
        if let Some(autohide) = raw.autohide {
            config.autohide = autohide;
        }
        config.confirm = raw.confirm;

        warnings.extend(config.validate());
        Ok((config, warnings))
    }

    /// Replaces invalid values with defaults and reports what was replaced.
    pub fn validate(&mut self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        if !(MIN_STEP..=MAX_STEP).contains(&self.step) {
            warnings.push(ConfigWarning::InvalidStep(self.step.to_string()));
            self.step = i64::from(DEFAULT_STEP);
        }
        warnings
    }

    /// The validated step. Only meaningful after `validate`.
    pub fn step_minutes(&self) -> u32 {
        u32::try_from(self.step)
            .ok()
            .filter(|step| (1..=60).contains(step))
            .unwrap_or(DEFAULT_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = PickerConfig::default();
        assert_eq!(config.step, 30);
        assert_eq!(config.placeholder, "00:00");
        assert!(config.autohide);
        assert!(config.confirm.is_none());
    }

    #[test]
    fn test_validate_keeps_valid_step() {
        let mut config = PickerConfig::default().with_step(15);
        assert!(config.validate().is_empty());
        assert_eq!(config.step_minutes(), 15);

        let mut config = PickerConfig::default().with_step(60);
        assert!(config.validate().is_empty());
        assert_eq!(config.step_minutes(), 60);
    }

    #[test]
    fn test_validate_replaces_out_of_range_step() {
        for bad in [0, -5, 61, 1000] {
            let mut config = PickerConfig::default().with_step(bad);
            let warnings = config.validate();
            assert_eq!(warnings, vec![ConfigWarning::InvalidStep(bad.to_string())]);
            assert_eq!(config.step, 30);
        }
    }

    #[test]
    fn test_from_json() {
        let (config, warnings) = PickerConfig::from_json(
            r#"{"step": 15, "placeholder": "--:--", "autohide": false, "confirm": "save"}"#,
        )
        .unwrap();
        assert!(warnings.is_empty());
        assert_eq!(config.step, 15);
        assert_eq!(config.placeholder, "--:--");
        assert!(!config.autohide);
        assert_eq!(config.confirm.as_deref(), Some("save"));
    }

    #[test]
    fn test_from_json_empty_object_uses_defaults() {
        let (config, warnings) = PickerConfig::from_json("{}").unwrap();
        assert!(warnings.is_empty());
        assert_eq!(config, PickerConfig::default());
    }

    #[test]
    fn test_from_json_non_integer_step_warns() {
        let (config, warnings) = PickerConfig::from_json(r#"{"step": 7.5}"#).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.step, 30);

        let (config, warnings) = PickerConfig::from_json(r#"{"step": "ten"}"#).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.step, 30);
    }

    #[test]
    fn test_from_json_malformed_is_error() {
        assert!(matches!(
            PickerConfig::from_json("{step: 15"),
            Err(PickerError::Config(_))
        ));
    }
}
