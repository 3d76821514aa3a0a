use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SketchError, SketchResult};
use crate::tools::parse_color;

/// Environment variable the native binary reads the config path from.
pub const CONFIG_ENV_VAR: &str = "SKETCHPAD_CONFIG";

/// Startup settings for the sketchpad.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing keys fall back to the defaults below
pub struct SketchConfig {
    /// Drawing surface size in surface-local units
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Pixel size of exported PNGs
    pub export_width: u32,
    pub export_height: u32,
    /// Initial tool color
    pub default_color: String,
    /// Canvas wash color on screen
    pub background_color: String,
    pub default_thickness: f32,
    pub min_thickness: f32,
    pub max_thickness: f32,
    pub default_stamp: String,
    /// Stamp palette shown at startup
    pub stamps: Vec<String>,
    /// Where native exports are written
    pub export_dir: PathBuf,
    /// Outline font used to rasterise stamps on export
    pub export_font: Option<PathBuf>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            canvas_width: 500,
            canvas_height: 500,
            export_width: 1024,
            export_height: 1024,
            default_color: "#000000".to_owned(),
            background_color: "#ffffff".to_owned(),
            default_thickness: 1.0,
            min_thickness: 1.0,
            max_thickness: 50.0,
            default_stamp: "🎲".to_owned(),
            stamps: vec!["😂".to_owned(), "🚀".to_owned(), "🎲".to_owned()],
            export_dir: PathBuf::from("."),
            export_font: None,
        }
    }
}

impl SketchConfig {
    pub fn from_json_str(json: &str) -> SketchResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> SketchResult<Self> {
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `SKETCHPAD_CONFIG` if set. A missing or broken file is logged and
    /// the defaults are used instead.
    pub fn from_env_or_default() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Ignoring configuration {}: {}", Path::new(&path).display(), err);
                Self::default()
            }
        }
    }

    pub fn to_json_string(&self) -> SketchResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> SketchResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(SketchError::InvalidConfig(format!(
                "canvas size must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.export_width == 0 || self.export_height == 0 {
            return Err(SketchError::InvalidConfig(format!(
                "export size must be positive, got {}x{}",
                self.export_width, self.export_height
            )));
        }
        if !(self.min_thickness > 0.0 && self.min_thickness <= self.max_thickness) {
            return Err(SketchError::InvalidConfig(format!(
                "thickness range {}..={} is empty or not positive",
                self.min_thickness, self.max_thickness
            )));
        }
        if !self.default_thickness.is_finite() || self.default_thickness <= 0.0 {
            return Err(SketchError::InvalidThickness(self.default_thickness));
        }
        parse_color(&self.default_color)?;
        parse_color(&self.background_color)?;
        if self.default_stamp.trim().is_empty() {
            return Err(SketchError::EmptyGlyph);
        }
        if self.stamps.iter().all(|s| s.trim().is_empty()) {
            return Err(SketchError::InvalidConfig(
                "stamp palette must contain at least one glyph".to_owned(),
            ));
        }
        Ok(())
    }

    /// File name used for exports, e.g. `sketchpad_1024x1024.png`
    pub fn export_file_name(&self) -> String {
        format!("sketchpad_{}x{}.png", self.export_width, self.export_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SketchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.export_file_name(), "sketchpad_1024x1024.png");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SketchConfig::from_json_str(r##"{ "default_color": "#ff0000", "max_thickness": 20.0 }"##)
            .unwrap();
        assert_eq!(config.default_color, "#ff0000");
        assert_eq!(config.max_thickness, 20.0);
        assert_eq!(config.canvas_width, 500);
        assert_eq!(config.stamps.len(), 3);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(matches!(
            SketchConfig::from_json_str(r#"{ "canvas_width": 0 }"#),
            Err(SketchError::InvalidConfig(_))
        ));
        assert!(matches!(
            SketchConfig::from_json_str(r#"{ "default_color": "blue" }"#),
            Err(SketchError::InvalidColor(_))
        ));
        assert!(matches!(
            SketchConfig::from_json_str(r#"{ "min_thickness": 10.0, "max_thickness": 5.0 }"#),
            Err(SketchError::InvalidConfig(_))
        ));
        assert!(matches!(
            SketchConfig::from_json_str("not json"),
            Err(SketchError::Config(_))
        ));
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = SketchConfig {
            export_font: Some(PathBuf::from("fonts/NotoEmoji-Regular.ttf")),
            ..SketchConfig::default()
        };
        let json = config.to_json_string().unwrap();
        assert_eq!(SketchConfig::from_json_str(&json).unwrap(), config);
    }
}
