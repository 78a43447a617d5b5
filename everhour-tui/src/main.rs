mod app;
mod cli;
mod config;
mod login;
mod runtime;
mod search;
mod store;
mod sync;
mod time_utils;
mod ui;

use anyhow::{bail, Result};
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::EverhourConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use everhour::{ApiKey, EverhourClient};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = EverhourConfig::load()?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(&cfg).await,
        Commands::Login => login::run_login(&cfg).await,
        Commands::Logout => {
            store::clear_token()?;
            store::clear_cache()?;
            println!("Logged out. Token and cache removed.");
            Ok(())
        }
        Commands::ConfigPath => {
            let path = EverhourConfig::config_path()?;
            if !path.exists() {
                EverhourConfig::default().save()?;
                println!("Created default config.");
            }
            println!("{}", path.display());
            Ok(())
        }
    }
}

async fn run(cfg: &EverhourConfig) -> Result<()> {
    let Some(token) = store::load_token()? else {
        bail!("No API token found. Run `everhour-tui login` first.");
    };
    let api_key = ApiKey::new(token)?;
    let client = EverhourClient::new(&cfg.api_url, api_key);

    let mut app = App::new();
    // Cached lists make the picker usable before the first fetch lands.
    app.apply_cache(store::load_cache());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, &client, cfg).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(save_err) = store::save_cache(&app.to_cache()) {
        eprintln!("Warning: could not save cache: {}", save_err);
    }

    res
}
