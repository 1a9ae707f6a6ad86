use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunnerKind {
    Simulated,
    Subprocess,
}

impl RunnerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RunnerKind::Simulated => "simulated",
            RunnerKind::Subprocess => "subprocess",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "simulated" => Some(RunnerKind::Simulated),
            "subprocess" => Some(RunnerKind::Subprocess),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_path: Option<String>,
    #[serde(default = "default_example_runner")]
    pub example_runner: String,
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    #[serde(default = "default_interpreter_args")]
    pub interpreter_args: Vec<String>,
    /// Go back to the module list after a lesson instead of the main menu.
    #[serde(default)]
    pub return_to_module_list: bool,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_example_runner() -> String {
    RunnerKind::Simulated.as_str().to_string()
}
fn default_interpreter() -> String {
    "python3".to_string()
}
fn default_interpreter_args() -> Vec<String> {
    // isolated mode, program read from stdin
    vec!["-I".to_string(), "-".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            data_dir: None,
            content_path: None,
            example_runner: default_example_runner(),
            interpreter: default_interpreter(),
            interpreter_args: default_interpreter_args(),
            return_to_module_list: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ekomcode")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Where the progress file and the log live.
    pub fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("ekomcode"),
        }
    }

    pub fn content_path(&self) -> Option<PathBuf> {
        self.content_path.as_ref().map(PathBuf::from)
    }

    pub fn runner_kind(&self) -> RunnerKind {
        RunnerKind::from_key(&self.example_runner).unwrap_or(RunnerKind::Simulated)
    }

    /// Reset values that don't name anything known back to their defaults.
    /// Call after deserialization.
    pub fn normalize(&mut self, valid_themes: &[String]) {
        if RunnerKind::from_key(&self.example_runner).is_none() {
            tracing::warn!(value = %self.example_runner, "unknown example_runner, using simulated");
            self.example_runner = default_example_runner();
        }
        if self.interpreter.trim().is_empty() {
            self.interpreter = default_interpreter();
        }
        if !valid_themes.is_empty() && !valid_themes.contains(&self.theme) {
            tracing::warn!(value = %self.theme, "unknown theme, using default");
            self.theme = default_theme();
        }
    }
}
