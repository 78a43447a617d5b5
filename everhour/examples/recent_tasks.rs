use everhour::{ApiKey, EverhourClient, DEFAULT_BASE_URL};
use std::collections::HashMap;
use std::env;
use std::error::Error;

const RECENT_LIMIT: u32 = 20;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let api_key = ApiKey::new(env::var("EVERHOUR_API_KEY").expect("EVERHOUR_API_KEY must be set"))?;
    let base_url = env::var("EVERHOUR_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let client = EverhourClient::new(&base_url, api_key);

    let user = client.me().await?;
    println!("Recent tasks for {}:", user.display_name());

    // Project names for display enrichment
    let projects: HashMap<String, String> = client
        .projects("", 0)
        .await?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();

    for task in client.recent_tasks(user.id, RECENT_LIMIT).await? {
        let project_name = task
            .primary_project()
            .and_then(|id| projects.get(id))
            .map(String::as_str)
            .unwrap_or("-");
        println!("{} | {}", task.name, project_name);
    }

    Ok(())
}
