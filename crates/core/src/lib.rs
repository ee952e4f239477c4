pub mod content;
pub mod mapgen;
pub mod settings;
pub mod types;

pub use content::{BoothLookOptions, ContentPack, ItemDef, ItemTier};
pub use mapgen::{GeneratedLevel, LevelGenerator, generate_level};
pub use settings::{GenerationSettings, SettingsCatalog, SettingsError, SettingsSelection};
pub use types::*;
