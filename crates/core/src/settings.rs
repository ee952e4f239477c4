//! Per-level generation settings and the progression catalog they are selected from.

use std::error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Seconds removed from the time bonus for every level played past the end of the catalog.
pub const EXCESS_LEVEL_TIME_PENALTY: f32 = 30.0;
/// Upper bound on the time bonus once excess-level penalties apply.
pub const MAX_TIME_BONUS: f32 = 150.0;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub blocks_x: u32,
    pub blocks_y: u32,
    pub min_prize: u32,
    pub max_prize: u32,
    pub min_utility: u32,
    pub max_utility: u32,
    pub info_text: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            blocks_x: 2,
            blocks_y: 3,
            min_prize: 6,
            max_prize: 9,
            min_utility: 2,
            max_utility: 4,
            info_text: String::new(),
        }
    }
}

impl GenerationSettings {
    /// Info text with `{level}` replaced by the 1-based level number.
    pub fn render_info(&self, progression_index: usize) -> String {
        self.info_text.replace("{level}", &(progression_index + 1).to_string())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.min_prize > self.max_prize {
            return Err(SettingsError::InvalidRange {
                field: "prize",
                min: self.min_prize,
                max: self.max_prize,
            });
        }
        if self.min_utility > self.max_utility {
            return Err(SettingsError::InvalidRange {
                field: "utility",
                min: self.min_utility,
                max: self.max_utility,
            });
        }
        Ok(())
    }
}

/// Settings chosen for one run, plus how far past the catalog's end the run is.
#[derive(Clone, Debug, PartialEq)]
pub struct SettingsSelection {
    pub settings: GenerationSettings,
    pub excess_levels: u32,
}

impl SettingsSelection {
    /// Shrinks `time_bonus` for excess levels; untouched when still inside the catalog.
    pub fn adjust_time_bonus(&self, time_bonus: f32) -> f32 {
        if self.excess_levels == 0 {
            return time_bonus;
        }
        (time_bonus - self.excess_levels as f32 * EXCESS_LEVEL_TIME_PENALTY).min(MAX_TIME_BONUS)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsCatalog {
    pub free_play: GenerationSettings,
    pub levels: Vec<GenerationSettings>,
}

impl SettingsCatalog {
    /// `None` selects free play; indices past the last level reuse it and count the excess.
    pub fn select(&self, progression_index: Option<usize>) -> SettingsSelection {
        let Some(index) = progression_index else {
            return SettingsSelection { settings: self.free_play.clone(), excess_levels: 0 };
        };
        let Some(last) = self.levels.last() else {
            return SettingsSelection { settings: self.free_play.clone(), excess_levels: 0 };
        };
        if let Some(settings) = self.levels.get(index) {
            return SettingsSelection { settings: settings.clone(), excess_levels: 0 };
        }
        let excess_levels = (1 + index - self.levels.len()) as u32;
        SettingsSelection { settings: last.clone(), excess_levels }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let catalog: Self =
            toml::from_str(text).map_err(|e| SettingsError::Parse(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        let catalog: Self =
            serde_json::from_str(text).map_err(|e| SettingsError::Parse(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads a `.json` catalog as JSON and anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(SettingsError::Io)?;
        if path.extension().is_some_and(|extension| extension == "json") {
            Self::from_json_str(&text)
        } else {
            Self::from_toml_str(&text)
        }
    }

    fn validate(&self) -> Result<(), SettingsError> {
        self.free_play.validate()?;
        self.levels.iter().try_for_each(GenerationSettings::validate)
    }
}

#[derive(Debug)]
pub enum SettingsError {
    /// Underlying I/O failure.
    Io(io::Error),
    /// The catalog text is not valid TOML/JSON for the schema.
    Parse(String),
    /// A `[min, max]` count range is reversed.
    InvalidRange { field: &'static str, min: u32, max: u32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "settings I/O error: {e}"),
            Self::Parse(message) => write!(f, "invalid settings catalog: {message}"),
            Self::InvalidRange { field, min, max } => {
                write!(f, "{field} count range is reversed: min {min} > max {max}")
            }
        }
    }
}

impl error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_level_catalog() -> SettingsCatalog {
        let level = |blocks_y| GenerationSettings { blocks_y, ..GenerationSettings::default() };
        SettingsCatalog {
            free_play: GenerationSettings::default(),
            levels: vec![level(1), level(2), level(3)],
        }
    }

    #[test]
    fn free_play_ignores_catalog_levels() {
        let selection = three_level_catalog().select(None);
        assert_eq!(selection.settings, GenerationSettings::default());
        assert_eq!(selection.adjust_time_bonus(200.0), 200.0);
    }

    #[test]
    fn indices_inside_catalog_select_their_level() {
        let selection = three_level_catalog().select(Some(1));
        assert_eq!(selection.settings.blocks_y, 2);
        assert_eq!(selection.excess_levels, 0);
    }

    #[test]
    fn indices_past_catalog_reuse_last_level_and_cut_time_bonus() {
        let selection = three_level_catalog().select(Some(4));
        assert_eq!(selection.settings.blocks_y, 3);
        assert_eq!(selection.excess_levels, 2);
        assert_eq!(selection.adjust_time_bonus(100.0), 40.0);
        assert_eq!(selection.adjust_time_bonus(400.0), MAX_TIME_BONUS);
    }

    #[test]
    fn info_text_uses_one_based_level() {
        let settings = GenerationSettings {
            info_text: "Level {level}: find them all".to_string(),
            ..GenerationSettings::default()
        };
        assert_eq!(settings.render_info(0), "Level 1: find them all");
    }

    #[test]
    fn toml_catalog_fills_missing_fields_with_defaults() {
        let catalog = SettingsCatalog::from_toml_str(
            r#"
            [[levels]]
            blocks_x = 3
            min_prize = 4
            max_prize = 5
            "#,
        )
        .expect("catalog should parse");
        assert_eq!(catalog.levels.len(), 1);
        assert_eq!(catalog.levels[0].blocks_x, 3);
        assert_eq!(catalog.levels[0].blocks_y, 3);
        assert_eq!(catalog.levels[0].min_utility, 2);
        assert_eq!(catalog.free_play, GenerationSettings::default());
    }

    #[test]
    fn reversed_ranges_are_rejected() {
        let error = SettingsCatalog::from_toml_str(
            r#"
            [free_play]
            min_utility = 5
            max_utility = 1
            "#,
        )
        .expect_err("reversed range must fail");
        assert!(matches!(error, SettingsError::InvalidRange { field: "utility", .. }));
        assert_eq!(error.to_string(), "utility count range is reversed: min 5 > max 1");
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        assert!(matches!(
            SettingsCatalog::from_json_str("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }
}
