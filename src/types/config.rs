use serde::{Deserialize, Serialize};

use crate::error::{LogviewError, Result};
use crate::highlight::Rgb;

/// Default number of decoded records kept in memory.
///
/// Sized for a visible page of rows plus scroll margin on a tall display.
pub const DEFAULT_DECODE_CACHE_CAPACITY: usize = 512;

/// Payload text beyond this many characters is cut to keep scrolling fast.
pub const DEFAULT_PAYLOAD_CHAR_LIMIT: usize = 1000;

/// Default background of the last completed text search match.
pub const DEFAULT_SEARCH_RESULT_COLOR: &str = "#00AAFF";

/// Light or dark user interface.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum UiTheme {
    #[default]
    Light,
    Dark,
}

/// Independently switchable automatic row marking.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoMark {
    /// Mark fatal and error records
    pub fatal_error: bool,
    /// Mark warning records
    pub warn: bool,
    /// Mark marker control responses
    pub marker: bool,
}

impl Default for AutoMark {
    fn default() -> Self {
        Self {
            fatal_error: true,
            warn: true,
            marker: true,
        }
    }
}

/// Viewer settings snapshot.
///
/// Passed explicitly to the table model; nothing in the crate reads settings
/// from global state.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerConfig {
    /// Number of decoded records memoized by the decode cache
    pub decode_cache_capacity: usize,
    pub theme: UiTheme,
    pub auto_mark: AutoMark,
    /// Background of the last completed search match ("#RRGGBB")
    pub search_result_color: String,
    /// Maximum payload characters returned for display
    pub payload_char_limit: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            decode_cache_capacity: DEFAULT_DECODE_CACHE_CAPACITY,
            theme: UiTheme::Light,
            auto_mark: AutoMark::default(),
            search_result_color: DEFAULT_SEARCH_RESULT_COLOR.to_string(),
            payload_char_limit: DEFAULT_PAYLOAD_CHAR_LIMIT,
        }
    }
}

impl ViewerConfig {
    /// Parse a JSON settings document; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the core cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.decode_cache_capacity == 0 {
            return Err(LogviewError::InvalidCacheCapacity(0));
        }
        self.search_result_rgb()?;
        Ok(())
    }

    /// Parsed `search_result_color`.
    pub fn search_result_rgb(&self) -> Result<Rgb> {
        Rgb::from_hex(&self.search_result_color)
            .ok_or_else(|| LogviewError::InvalidColor(self.search_result_color.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = ViewerConfig::from_json("{}").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.decode_cache_capacity, DEFAULT_DECODE_CACHE_CAPACITY);
        assert!(config.auto_mark.fatal_error);
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{"theme":"dark","autoMark":{"warn":false},"decodeCacheCapacity":64}"#;
        let config = ViewerConfig::from_json(json).unwrap();
        assert_eq!(config.theme, UiTheme::Dark);
        assert!(!config.auto_mark.warn);
        assert!(config.auto_mark.marker);
        assert_eq!(config.decode_cache_capacity, 64);
    }

    #[test]
    fn test_bad_search_color_rejected() {
        let err = ViewerConfig::from_json(r##"{"searchResultColor":"#12"}"##).unwrap_err();
        assert!(matches!(err, LogviewError::InvalidColor(ref c) if c == "#12"));

        let config = ViewerConfig::from_json(r##"{"searchResultColor":"#102030"}"##).unwrap();
        assert_eq!(config.search_result_rgb().unwrap(), Rgb::new(0x10, 0x20, 0x30));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = ViewerConfig::from_json(r#"{"decodeCacheCapacity":0}"#).unwrap_err();
        assert!(matches!(err, LogviewError::InvalidCacheCapacity(0)));
    }

    #[test]
    fn test_malformed_json() {
        let err = ViewerConfig::from_json("{theme").unwrap_err();
        assert!(matches!(err, LogviewError::Config(_)));
    }
}
