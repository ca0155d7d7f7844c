//! Track tuning
//!
//! Fixed for the lifetime of a run. Loaded from JSON or built from a preset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    Relaxed,
    #[default]
    Normal,
    Brutal,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Relaxed => "Relaxed",
            DifficultyPreset::Normal => "Normal",
            DifficultyPreset::Brutal => "Brutal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "easy" => Some(DifficultyPreset::Relaxed),
            "normal" => Some(DifficultyPreset::Normal),
            "brutal" | "hard" => Some(DifficultyPreset::Brutal),
            _ => None,
        }
    }

    /// Height random-walk amplitude for this preset
    pub fn height_variation(&self) -> f32 {
        match self {
            DifficultyPreset::Relaxed => HEIGHT_VARIATION * 0.5,
            DifficultyPreset::Normal => HEIGHT_VARIATION,
            DifficultyPreset::Brutal => HEIGHT_VARIATION * 1.25,
        }
    }

    /// Probability of a difficulty spike per segment
    pub fn extreme_difficulty_chance(&self) -> f32 {
        match self {
            DifficultyPreset::Relaxed => 0.05,
            DifficultyPreset::Normal => EXTREME_DIFFICULTY_CHANCE,
            DifficultyPreset::Brutal => 0.35,
        }
    }

    /// Extra distance added to every fuel gap
    pub fn fuel_gap_increment(&self) -> f32 {
        match self {
            DifficultyPreset::Relaxed => FUEL_GAP_INCREMENT * 0.5,
            DifficultyPreset::Normal => FUEL_GAP_INCREMENT,
            DifficultyPreset::Brutal => FUEL_GAP_INCREMENT * 1.5,
        }
    }
}

/// Track generation, pickup pacing and streaming window tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackSettings {
    // === Path geometry ===
    /// Horizontal distance between consecutive path points
    pub segment_length: f32,
    pub min_height: f32,
    pub max_height: f32,
    /// Random-walk amplitude per segment
    pub height_variation: f32,
    /// Depth of the ribbon's bottom edge below the top edge
    pub bottom_depth: f32,
    /// Blend factor toward the target height, in (0, 1]
    pub smoothness: f32,
    /// Chance of drawing from the widened (1.5x) variation range
    pub extreme_difficulty_chance: f32,
    /// Segments generated at most per tick
    pub max_segments_per_tick: u32,

    // === Run start ===
    /// Length of the flat launch corridor measured from the start position
    pub flat_start_distance: f32,
    pub initial_ground_height: f32,
    /// How far behind the start position the road begins
    pub backfill_distance: f32,

    // === Coins ===
    pub coins_per_cluster: u32,
    pub coin_spacing: f32,
    pub coin_cluster_distance: f32,
    /// First cluster position relative to the start position
    pub first_coin_offset: f32,

    // === Fuel ===
    pub initial_fuel_gap: f32,
    pub fuel_gap_increment: f32,

    // === Streaming window ===
    pub lookahead_distance: f32,
    pub trailing_distance: f32,
    /// Generated road required past a pickup before it is placed
    pub safety_buffer: f32,
    /// Extra distance pickups survive beyond the trailing distance
    pub item_clearance: f32,

    // === Placement ===
    pub pickup_height_offset: f32,
    pub fuel_visual_correction: f32,

    // === Run economy ===
    pub max_fuel: f32,
    /// Fuel burned per second while throttling
    pub fuel_consumption_rate: f32,
    pub coins_per_collectible: u32,
}

impl Default for TrackSettings {
    fn default() -> Self {
        Self {
            segment_length: SEGMENT_LENGTH,
            min_height: MIN_HEIGHT,
            max_height: MAX_HEIGHT,
            height_variation: HEIGHT_VARIATION,
            bottom_depth: BOTTOM_DEPTH,
            smoothness: SMOOTHNESS,
            extreme_difficulty_chance: EXTREME_DIFFICULTY_CHANCE,
            max_segments_per_tick: 1,

            flat_start_distance: FLAT_START_DISTANCE,
            initial_ground_height: INITIAL_GROUND_HEIGHT,
            backfill_distance: BACKFILL_DISTANCE,

            coins_per_cluster: COINS_PER_CLUSTER,
            coin_spacing: COIN_SPACING,
            coin_cluster_distance: COIN_CLUSTER_DISTANCE,
            first_coin_offset: FIRST_COIN_OFFSET,

            initial_fuel_gap: INITIAL_FUEL_GAP,
            fuel_gap_increment: FUEL_GAP_INCREMENT,

            lookahead_distance: LOOKAHEAD_DISTANCE,
            trailing_distance: TRAILING_DISTANCE,
            safety_buffer: SAFETY_BUFFER,
            item_clearance: ITEM_CLEARANCE,

            pickup_height_offset: PICKUP_HEIGHT_OFFSET,
            fuel_visual_correction: FUEL_VISUAL_CORRECTION,

            max_fuel: MAX_FUEL,
            fuel_consumption_rate: FUEL_CONSUMPTION_RATE,
            coins_per_collectible: COINS_PER_COLLECTIBLE,
        }
    }
}

impl TrackSettings {
    /// Create settings from a difficulty preset (applies preset defaults)
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a difficulty preset (updates difficulty-dependent settings)
    pub fn apply_preset(&mut self, preset: DifficultyPreset) {
        self.height_variation = preset.height_variation();
        self.extreme_difficulty_chance = preset.extreme_difficulty_chance();
        self.fuel_gap_increment = preset.fuel_gap_increment();
    }

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded track settings from {}", path.display());
        Ok(settings)
    }

    /// Reject tunings that would produce undefined geometry or stall pacing
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("segment_length", self.segment_length)?;
        require_non_negative("height_variation", self.height_variation)?;
        require_finite("min_height", self.min_height)?;
        require_finite("max_height", self.max_height)?;
        if self.min_height > self.max_height {
            return Err(ConfigError::EmptyHeightRange {
                min: self.min_height,
                max: self.max_height,
            });
        }
        require_finite("initial_ground_height", self.initial_ground_height)?;
        if !(self.min_height..=self.max_height).contains(&self.initial_ground_height) {
            return Err(ConfigError::invalid(
                "initial_ground_height",
                format!(
                    "{} lies outside [{}, {}]",
                    self.initial_ground_height, self.min_height, self.max_height
                ),
            ));
        }
        require_non_negative("bottom_depth", self.bottom_depth)?;
        if !(self.smoothness > 0.0 && self.smoothness <= 1.0) {
            return Err(ConfigError::invalid(
                "smoothness",
                format!("{} is not in (0, 1]", self.smoothness),
            ));
        }
        require_probability("extreme_difficulty_chance", self.extreme_difficulty_chance)?;
        if self.max_segments_per_tick == 0 {
            return Err(ConfigError::invalid("max_segments_per_tick", "must be at least 1"));
        }

        require_non_negative("flat_start_distance", self.flat_start_distance)?;
        require_non_negative("backfill_distance", self.backfill_distance)?;

        if self.coins_per_cluster == 0 {
            return Err(ConfigError::invalid("coins_per_cluster", "must be at least 1"));
        }
        require_non_negative("coin_spacing", self.coin_spacing)?;
        require_positive("coin_cluster_distance", self.coin_cluster_distance)?;
        require_non_negative("first_coin_offset", self.first_coin_offset)?;

        require_positive("initial_fuel_gap", self.initial_fuel_gap)?;
        require_non_negative("fuel_gap_increment", self.fuel_gap_increment)?;

        require_non_negative("lookahead_distance", self.lookahead_distance)?;
        require_finite("trailing_distance", self.trailing_distance)?;
        if self.trailing_distance <= self.lookahead_distance {
            return Err(ConfigError::WindowTooShort {
                trailing: self.trailing_distance,
                lookahead: self.lookahead_distance,
            });
        }
        require_non_negative("safety_buffer", self.safety_buffer)?;
        require_non_negative("item_clearance", self.item_clearance)?;
        require_finite("pickup_height_offset", self.pickup_height_offset)?;
        require_finite("fuel_visual_correction", self.fuel_visual_correction)?;

        require_positive("max_fuel", self.max_fuel)?;
        require_non_negative("fuel_consumption_rate", self.fuel_consumption_rate)?;
        Ok(())
    }
}

fn require_finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, format!("{value} is not finite")))
    }
}

fn require_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, format!("{value} must be positive")))
    }
}

fn require_non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    require_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, format!("{value} must not be negative")))
    }
}

fn require_probability(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, format!("{value} is not in [0, 1]")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(TrackSettings::default().validate().is_ok());
        for preset in [
            DifficultyPreset::Relaxed,
            DifficultyPreset::Normal,
            DifficultyPreset::Brutal,
        ] {
            assert!(TrackSettings::from_preset(preset).validate().is_ok(), "{}", preset.as_str());
        }
    }

    #[test]
    fn test_rejects_non_positive_segment_length() {
        let settings = TrackSettings {
            segment_length: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidParameter { name: "segment_length", .. })
        ));
    }

    #[test]
    fn test_rejects_negative_variation() {
        let settings = TrackSettings {
            height_variation: -1.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_short_window() {
        let settings = TrackSettings {
            trailing_distance: 20.0,
            lookahead_distance: 20.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::WindowTooShort { .. })
        ));
    }

    #[test]
    fn test_rejects_ground_outside_range() {
        let settings = TrackSettings {
            initial_ground_height: -10.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let settings = TrackSettings::from_json(r#"{ "segment_length": 2.5 }"#).unwrap();
        assert_eq!(settings.segment_length, 2.5);
        assert_eq!(settings.trailing_distance, TRAILING_DISTANCE);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = TrackSettings::from_preset(DifficultyPreset::Brutal);
        let json = settings.to_json().unwrap();
        assert_eq!(TrackSettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_json_invalid_is_rejected() {
        assert!(matches!(
            TrackSettings::from_json(r#"{ "smoothness": 0.0 }"#),
            Err(ConfigError::InvalidParameter { name: "smoothness", .. })
        ));
        assert!(matches!(
            TrackSettings::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(DifficultyPreset::from_str("HARD"), Some(DifficultyPreset::Brutal));
        assert_eq!(DifficultyPreset::from_str("meh"), None);
    }
}
