use crate::error::{Result, SlotbookError};
use crate::model::BookingPolicy;
use crate::registry::providers::slot_label_problem;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const CONFIG_DIR_ENV: &str = "SLOTBOOK_CONFIG_DIR";

/// A provider registered when the coordinator starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedProvider {
    pub name: String,
    /// Falls back to the config's `default_slots` when omitted.
    #[serde(default)]
    pub slots: Option<Vec<String>>,
}

/// Configuration for slotbook, stored as `config.json` in the config dir.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotbookConfig {
    /// Slots given to providers added without an explicit list
    #[serde(default = "default_slots")]
    pub default_slots: Vec<String>,

    #[serde(default)]
    pub booking_policy: BookingPolicy,

    #[serde(default)]
    pub seed_providers: Vec<SeedProvider>,
}

fn default_slots() -> Vec<String> {
    vec!["10:00".to_string(), "11:00".to_string(), "12:00".to_string()]
}

impl Default for SlotbookConfig {
    fn default() -> Self {
        Self {
            default_slots: default_slots(),
            booking_policy: BookingPolicy::default(),
            seed_providers: Vec::new(),
        }
    }
}

impl SlotbookConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: SlotbookConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Slot lists must not contain empty or repeated labels.
    pub fn validate(&self) -> Result<()> {
        check_slots("default_slots", &self.default_slots)?;
        for seed in &self.seed_providers {
            if seed.name.trim().is_empty() {
                return Err(SlotbookError::Config(
                    "seed provider name cannot be empty".to_string(),
                ));
            }
            if let Some(slots) = &seed.slots {
                check_slots(&format!("slots of {}", seed.name), slots)?;
            }
        }
        Ok(())
    }

    /// The slot list a seed provider starts with.
    pub fn slots_for(&self, seed: &SeedProvider) -> Vec<String> {
        seed.slots
            .clone()
            .unwrap_or_else(|| self.default_slots.clone())
    }
}

fn check_slots(what: &str, slots: &[String]) -> Result<()> {
    match slot_label_problem(slots) {
        Some(problem) => Err(SlotbookError::Config(format!("{} {}", what, problem))),
        None => Ok(()),
    }
}

/// Where config lives: the explicit dir, then `$SLOTBOOK_CONFIG_DIR`, then the
/// platform config dir.
pub fn resolve_config_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "slotbook", "slotbook")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SlotbookError::Config("Could not determine config dir".to_string()))
}
