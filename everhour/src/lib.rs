mod auth;
mod client;
mod everhour_url;
pub mod domain;

pub use auth::*;
pub use client::*;
pub use everhour_url::*;
