//! Game settings
//!
//! Chosen by the host before a game starts. Storing them between sessions
//! is up to the host; this module only (de)serializes them.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_LIVES, DEFAULT_MAX_RESULT, MAX_SLOTS};
use crate::quiz::Operation;

/// Result limits offered in the settings menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MaxResultPreset {
    Ten,
    #[default]
    Twenty,
    Fifty,
    Hundred,
}

impl MaxResultPreset {
    pub const ALL: [MaxResultPreset; 4] = [
        MaxResultPreset::Ten,
        MaxResultPreset::Twenty,
        MaxResultPreset::Fifty,
        MaxResultPreset::Hundred,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaxResultPreset::Ten => "10",
            MaxResultPreset::Twenty => "20",
            MaxResultPreset::Fifty => "50",
            MaxResultPreset::Hundred => "100",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "10" | "ten" => Some(MaxResultPreset::Ten),
            "20" | "twenty" => Some(MaxResultPreset::Twenty),
            "50" | "fifty" => Some(MaxResultPreset::Fifty),
            "100" | "hundred" => Some(MaxResultPreset::Hundred),
            _ => None,
        }
    }

    /// Largest result for this preset
    pub fn value(&self) -> u32 {
        match self {
            MaxResultPreset::Ten => 10,
            MaxResultPreset::Twenty => 20,
            MaxResultPreset::Fifty => 50,
            MaxResultPreset::Hundred => 100,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Arithmetic operation asked about (unknown tags become the fallback)
    pub operation: Operation,
    /// Largest result a round may ask for
    pub max_result: u32,
    /// Answer blocks in the scene
    pub slot_count: usize,
    /// Lives at game start
    pub lives: u8,
    /// Fixed RNG seed for reproducible games
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            operation: Operation::Addition,
            max_result: DEFAULT_MAX_RESULT,
            slot_count: MAX_SLOTS,
            lives: DEFAULT_LIVES,
            seed: None,
        }
    }
}

impl GameSettings {
    /// Settings for an operation at a preset result limit
    pub fn from_preset(operation: Operation, preset: MaxResultPreset) -> Self {
        Self {
            operation,
            max_result: preset.value(),
            ..Default::default()
        }
    }

    /// Settings from raw menu values.
    ///
    /// An unparsable or zero limit falls back to the default of 20.
    pub fn from_tags(operation: &str, max_result: &str) -> Self {
        let max_result = match max_result.trim().parse::<u32>() {
            Ok(v) if v > 0 => v,
            _ => {
                log::warn!("Invalid max result {:?}, using {}", max_result, DEFAULT_MAX_RESULT);
                DEFAULT_MAX_RESULT
            }
        };
        Self {
            operation: Operation::from_tag(operation),
            max_result,
            ..Default::default()
        }
    }

    /// Matching menu preset, if the limit is one of them
    pub fn preset(&self) -> Option<MaxResultPreset> {
        MaxResultPreset::ALL
            .into_iter()
            .find(|p| p.value() == self.max_result)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
