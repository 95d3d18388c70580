use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use lese_config::Config;
use serde::{Deserialize, Serialize};

const MAIN_PROFILE: &str = "main";

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Directory of `<name>.json` profiles
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    /// `<config dir>/lese/profiles`, or `./profiles` when the platform has no config dir
    pub fn user() -> Self {
        let root = dirs::config_dir()
            .map(|dir| dir.join("lese"))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::at(root.join("profiles"))
    }

    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Create the profile folder and the main profile if missing
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let main_profile = self.path(MAIN_PROFILE);
        if !main_profile.exists() {
            self.write(MAIN_PROFILE, &Config::new())?;
            tracing::info!("Created main profile in {}", self.dir.display());
        }

        Ok(())
    }

    /// Load a profile by name, falling back to main, then to environment defaults
    pub fn load(&self, name: &str) -> anyhow::Result<Config> {
        let mut config = match self.read(name)? {
            Some(config) => config,
            None => {
                tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
                match self.read(MAIN_PROFILE)? {
                    Some(config) => config,
                    None => Config::new(),
                }
            }
        };

        config.translator.load_api_key();
        Ok(config)
    }

    /// New profile cloned from main (or defaults if main is missing)
    pub fn add_from_main(&self, new_name: &str) -> anyhow::Result<PathBuf> {
        anyhow::ensure!(
            !new_name.is_empty() && !new_name.contains(['/', '\\', '.']),
            "invalid profile name '{new_name}'"
        );
        let config = self.load(MAIN_PROFILE)?;
        let file = self.write(new_name, &config)?;
        tracing::info!("Created new profile: {new_name}");
        Ok(file)
    }

    fn read(&self, name: &str) -> anyhow::Result<Option<Config>> {
        let file = self.path(name);
        if !file.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&file).with_context(|| format!("Failed to read {}", file.display()))?;
        let profile: Profile =
            serde_json::from_str(&data).with_context(|| format!("Invalid profile {}", file.display()))?;
        Ok(Some(profile.value))
    }

    fn write(&self, name: &str, config: &Config) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let profile = Profile {
            name: name.to_string(),
            value: config.clone(),
        };
        let file = self.path(name);
        fs::write(&file, serde_json::to_string_pretty(&profile)?)
            .with_context(|| format!("Failed to write {}", file.display()))?;
        Ok(file)
    }
}
