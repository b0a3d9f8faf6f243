// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "noise-scene")]
#[command(about = "Procedurally animated smoke scene (wgpu)", long_about = None)]
pub struct Cli {
    /// Hide the parameter panel
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// glTF model loaded asynchronously into the orbit slot
    #[arg(long)]
    pub model: Option<String>,

    /// JSON file with initial parameter values
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Wait for vertical sync when presenting
    #[arg(long, default_value = "false")]
    pub vsync: bool,
}
