//! Pipeline configuration.
//!
//! Configuration is supplied once and is immutable afterwards. It can be
//! built in code or deserialized from JSON, where patterns are bit strings
//! and a named preset may stand in for either or both patterns:
//!
//! ```json
//! { "one_seq": "10", "zero_seq": "01", "display": "hex" }
//! { "preset": "manchester-ieee" }
//! ```

use serde::{Deserialize, Serialize};

use crate::line::{ConfigError, LinePreset, Symbol, SymbolPattern};
use crate::render::DisplayMode;

/// Validated decoder configuration.
///
/// # Examples
/// ```
/// use linecode_core::PipelineConfig;
///
/// let config: PipelineConfig =
///     serde_json::from_str(r#"{"one_seq": "1110", "zero_seq": "1000"}"#).unwrap();
/// assert_eq!(config.one_seq.to_string(), "1110");
/// assert!(config.display.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPipelineConfig")]
pub struct PipelineConfig {
    pub one_seq: SymbolPattern,
    pub zero_seq: SymbolPattern,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayMode>,
}

impl PipelineConfig {
    pub fn new(one_seq: SymbolPattern, zero_seq: SymbolPattern) -> Self {
        Self {
            one_seq,
            zero_seq,
            display: None,
        }
    }

    pub fn from_preset(preset: LinePreset) -> Self {
        let (one, zero) = preset.patterns();
        Self::new(one, zero)
    }

    /// Build from optional textual patterns over an optional preset.
    /// Explicit patterns override the preset's.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingPattern` when a pattern is given neither
    /// explicitly nor through the preset, and the usual pattern parse errors.
    pub fn resolve(
        preset: Option<LinePreset>,
        one_seq: Option<&str>,
        zero_seq: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let (preset_one, preset_zero) = match preset {
            Some(preset) => {
                let (one, zero) = preset.patterns();
                (Some(one), Some(zero))
            }
            None => (None, None),
        };
        let one_seq = resolve_pattern(Symbol::One, one_seq, preset_one)?;
        let zero_seq = resolve_pattern(Symbol::Zero, zero_seq, preset_zero)?;
        Ok(Self::new(one_seq, zero_seq))
    }

    pub fn with_display(mut self, display: DisplayMode) -> Self {
        self.display = Some(display);
        self
    }
}

fn resolve_pattern(
    symbol: Symbol,
    text: Option<&str>,
    fallback: Option<SymbolPattern>,
) -> Result<SymbolPattern, ConfigError> {
    match (text, fallback) {
        (Some(text), _) => SymbolPattern::parse(symbol, text),
        (None, Some(pattern)) => Ok(pattern),
        (None, None) => Err(ConfigError::MissingPattern { symbol }),
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPipelineConfig {
    #[serde(default)]
    preset: Option<LinePreset>,
    #[serde(default)]
    one_seq: Option<String>,
    #[serde(default)]
    zero_seq: Option<String>,
    #[serde(default)]
    display: Option<DisplayMode>,
}

impl TryFrom<RawPipelineConfig> for PipelineConfig {
    type Error = ConfigError;

    fn try_from(raw: RawPipelineConfig) -> Result<Self, Self::Error> {
        let mut config =
            PipelineConfig::resolve(raw.preset, raw.one_seq.as_deref(), raw.zero_seq.as_deref())?;
        config.display = raw.display;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineConfig;
    use crate::line::{ConfigError, LinePreset, Symbol};
    use crate::render::DisplayMode;

    #[test]
    fn preset_with_override() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"preset": "manchester", "zero_seq": "00"}"#).unwrap();
        assert_eq!(config.one_seq.to_string(), "10");
        assert_eq!(config.zero_seq.to_string(), "00");
    }

    #[test]
    fn display_mode_is_parsed() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"preset": "nrz", "display": "both"}"#).unwrap();
        assert_eq!(config.display, Some(DisplayMode::Both));
    }

    #[test]
    fn with_display_overrides_file_value() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"preset": "nrz", "display": "both"}"#).unwrap();
        let config = config.with_display(DisplayMode::Hex);
        assert_eq!(config.display, Some(DisplayMode::Hex));
        assert_eq!(config.one_seq.to_string(), "1");
    }

    #[test]
    fn empty_pattern_is_rejected() {
        let err = serde_json::from_str::<PipelineConfig>(r#"{"one_seq": "", "zero_seq": "01"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("one pattern must not be empty"));
    }

    #[test]
    fn missing_pattern_is_rejected() {
        let err = PipelineConfig::resolve(None, Some("10"), None).unwrap_err();
        assert_eq!(err, ConfigError::MissingPattern { symbol: Symbol::Zero });
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<PipelineConfig>(r#"{"preset": "nrz", "speed": 9600}"#).is_err());
    }

    #[test]
    fn serializes_patterns_as_strings() {
        let config = PipelineConfig::from_preset(LinePreset::ManchesterIeee);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value, serde_json::json!({"one_seq": "01", "zero_seq": "10"}));
    }
}
