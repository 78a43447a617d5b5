use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "everhour-tui")]
#[command(about = "Terminal UI for Everhour time tracking")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the timer UI (default)
    Run,
    /// Store an Everhour API token
    Login,
    /// Remove the stored token and cached data
    Logout,
    /// Print config path and create default file if missing
    ConfigPath,
}
