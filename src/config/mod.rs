//! Configuration management for the hub

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::navigation::ModuleNavigator;
use crate::progress::DEFAULT_RESUME_AFTER_MS;
use crate::scoring::{Questionnaire, ScoringEngine};
use crate::store::JsonFileStore;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Module ids in page order
    #[serde(default = "default_modules")]
    pub modules: Vec<String>,

    /// Minimum gap between visits (ms) before offering to resume
    #[serde(default = "default_resume_after")]
    pub resume_after_ms: i64,

    /// Number of questions in the readiness calculator
    #[serde(default = "default_question_count")]
    pub question_count: usize,

    /// Score awarded by each option, shared by every question
    #[serde(default = "default_option_scores")]
    pub option_scores: Vec<u32>,
}

fn default_modules() -> Vec<String> {
    (1..=8).map(|n| format!("module-{n}")).collect()
}

fn default_resume_after() -> i64 {
    DEFAULT_RESUME_AFTER_MS
}

fn default_question_count() -> usize {
    Questionnaire::READINESS_QUESTIONS
}

fn default_option_scores() -> Vec<u32> {
    Questionnaire::READINESS_SCORES.to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            modules: default_modules(),
            resume_after_ms: default_resume_after(),
            question_count: default_question_count(),
            option_scores: default_option_scores(),
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "enablement-hub")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "enablement-hub")
            .context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Get the path to the durable progress store
    pub fn store_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("storage.json"))
    }

    /// Open the durable progress store
    pub fn open_store() -> Result<JsonFileStore> {
        Ok(JsonFileStore::open(Self::store_path()?))
    }

    /// Build the readiness questionnaire described by this config
    pub fn questionnaire(&self) -> Result<Questionnaire> {
        Questionnaire::uniform(self.question_count, &self.option_scores)
            .with_context(|| "Invalid readiness calculator settings")
    }

    /// Start a fresh readiness calculator session
    pub fn scoring_engine(&self) -> Result<ScoringEngine> {
        Ok(ScoringEngine::new(self.questionnaire()?))
    }

    /// Navigator over the configured modules
    pub fn navigator(&self) -> ModuleNavigator {
        ModuleNavigator::new(self.modules.iter().cloned())
    }
}
