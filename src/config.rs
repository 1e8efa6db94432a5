use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level DEDI configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DediConfig {
    /// Study period.
    #[serde(default)]
    pub years: YearsToml,

    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsToml,

    /// NetCDF variable names in the input files.
    #[serde(default)]
    pub variables: VariablesToml,

    /// Output file settings.
    #[serde(default)]
    pub output: OutputToml,
}

impl DediConfig {
    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YearsToml {
    #[serde(default = "default_start")]
    pub start: i32,
    #[serde(default = "default_end")]
    pub end: i32,
}

impl Default for YearsToml {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
        }
    }
}

fn default_start() -> i32 {
    1979
}
fn default_end() -> i32 {
    2021
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsToml {
    #[serde(default = "default_aet_dir")]
    pub aet_dir: PathBuf,
    #[serde(default = "default_pet_dir")]
    pub pet_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    pub aet_template: Option<String>,
    pub pet_template: Option<String>,
    pub output_template: Option<String>,
    pub climatology_file: Option<String>,
}

impl Default for PathsToml {
    fn default() -> Self {
        Self {
            aet_dir: default_aet_dir(),
            pet_dir: default_pet_dir(),
            output_dir: default_output_dir(),
            aet_template: None,
            pet_template: None,
            output_template: None,
            climatology_file: None,
        }
    }
}

fn default_aet_dir() -> PathBuf {
    PathBuf::from("./aet")
}
fn default_pet_dir() -> PathBuf {
    PathBuf::from("./pet")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./DEDI")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariablesToml {
    #[serde(default = "default_aet_var")]
    pub aet: String,
    #[serde(default = "default_pet_var")]
    pub pet: String,
}

impl Default for VariablesToml {
    fn default() -> Self {
        Self {
            aet: default_aet_var(),
            pet: default_pet_var(),
        }
    }
}

fn default_aet_var() -> String {
    "e".to_string()
}
fn default_pet_var() -> String {
    "pev".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    #[serde(default = "default_true")]
    pub compress: bool,
    #[serde(default = "default_deflate_level")]
    pub deflate_level: i32,
    pub title: Option<String>,
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            compress: true,
            deflate_level: default_deflate_level(),
            title: None,
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_deflate_level() -> i32 {
    4
}
