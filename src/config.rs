//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::preferences::{JsonFilePreferences, MemoryPreferences, PreferenceStore};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "egg-timer")]
#[command(about = "A countdown timer controlled over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Selected countdown duration in seconds, used when no preferences file is given
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// JSON file holding the selected duration across restarts
    #[arg(long)]
    pub prefs_file: Option<PathBuf>,

    /// Shell command to run when a countdown finishes
    #[arg(long)]
    pub on_finish: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Build the preference store selected by the flags
    pub fn preferences(&self) -> Box<dyn PreferenceStore> {
        match (&self.prefs_file, self.duration) {
            (Some(path), _) => Box::new(JsonFilePreferences::open(path)),
            (None, Some(seconds)) => Box::new(MemoryPreferences::with_selected(seconds)),
            (None, None) => Box::new(MemoryPreferences::new()),
        }
    }
}
