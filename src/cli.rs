// cli.rs - Command-line interface configuration
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::config::{self, ClusterConfig};
use crate::loaders::DEFAULT_TEMPLATE_CAPACITY;

/// Asset directory used when neither `--assets` nor `PENDANTS_DIR` is set
pub const DEFAULT_ASSETS_DIR: &str = "models/pendants";

#[derive(Parser, Debug, Clone)]
#[command(name = "pendant-cluster")]
#[command(about = "Pendant cluster GLB generator", long_about = None)]
pub struct Cli {
    /// Compact configuration code, e.g. C11.L114020.B0.P3-6,1-6,1-13,0.G42
    #[arg(long, required_unless_present = "config", conflicts_with = "config")]
    pub code: Option<String>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory of pendant .glb assets (falls back to $PENDANTS_DIR)
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Output path; defaults to <canonical code>.glb
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Number of pendant models kept in memory
    #[arg(long = "template-cache", default_value_t = DEFAULT_TEMPLATE_CAPACITY)]
    pub template_cache: usize,

    /// Print the canonical code for the configuration and exit
    #[arg(long, default_value = "false")]
    pub canonical: bool,
}

impl Cli {
    /// Reads and validates the configuration from `--code` or `--config`
    pub fn load_config(&self) -> Result<ClusterConfig> {
        if let Some(code) = &self.code {
            return config::decode(code).with_context(|| format!("Failed to decode code '{}'", code));
        }

        let path = self
            .config
            .as_ref()
            .context("Either --code or --config is required")?;
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: ClusterConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.assets
            .clone()
            .or_else(|| std::env::var_os("PENDANTS_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR))
    }
}
