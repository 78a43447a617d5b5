use anyhow::{Context, Result};
use everhour::{ApiKey, EverhourClient};

use crate::config::EverhourConfig;
use crate::store::{self, DomainCache};

/// Run the interactive login flow:
/// 1. Prompt for the API token (no echo)
/// 2. Validate it against `GET /users/me`
/// 3. Persist the token and seed the domain cache with the user
pub async fn run_login(cfg: &EverhourConfig) -> Result<()> {
    println!("Create a token on your Everhour profile page (https://app.everhour.com/#/account/profile).");
    let raw = rpassword::prompt_password("Everhour API token: ")?;
    let api_key = ApiKey::new(raw.as_str()).context("Unable to authorize")?;

    let client = EverhourClient::new(&cfg.api_url, api_key.clone());
    let user = client
        .me()
        .await
        .context("Unable to authorize, check the API token")?;

    store::save_token(api_key.as_header_value())?;
    store::save_cache(&DomainCache {
        user: Some(user.clone()),
        ..DomainCache::default()
    })?;

    println!("Welcome {}. Token saved.", user.display_name());
    Ok(())
}
