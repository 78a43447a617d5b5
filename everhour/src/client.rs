use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::{
    domain::{self, Project, Task, Timer, User},
    ApiKey, EverhourUrl,
};

const API_KEY_HEADER: &str = "X-Api-Key";

/// How much of an error response body is kept for diagnostics.
const BODY_SNIPPET_LEN: usize = 200;

pub struct EverhourClient {
    http: reqwest::Client,
    base: EverhourUrl,
    api_key: ApiKey,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("unauthorized, check your API key")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("response error: {status} {body}")]
    Response { status: u16, body: String },
    #[error("parsing error: {0}")]
    Parsing(String),
    #[error("transport error: {0}")]
    Transport(String),
}

impl EverhourClient {
    pub fn new(base_url: &str, api_key: ApiKey) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: EverhourUrl::new(base_url),
            api_key,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, url: impl AsRef<str>) -> Result<T, ApiError> {
        tracing::debug!(url = url.as_ref(), "GET");
        let resp = self
            .http
            .get(url.as_ref())
            .header(API_KEY_HEADER, self.api_key.as_header_value())
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Self::decode(resp).await
    }

    /// POST/DELETE with a JSON body. GET requests never carry a body.
    async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        url: impl AsRef<str>,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!(url = url.as_ref(), method = %method, "request");
        let resp = self
            .http
            .request(method, url.as_ref())
            .header(API_KEY_HEADER, self.api_key.as_header_value())
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(status = status.as_u16(), "unauthorized response");
            return Err(ApiError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            // Expected for e.g. stopping when nothing runs; callers decide.
            return Err(ApiError::NotFound);
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "non-success response");
            return Err(ApiError::Response {
                status: status.as_u16(),
                body: body.chars().take(BODY_SNIPPET_LEN).collect(),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ApiError::Parsing(format!("failed to parse response as JSON: {}", e)))
    }

    /// `GET /users/me` — the account behind the API key.
    pub async fn me(&self) -> Result<User, ApiError> {
        let url = self.base.append_path("/users/me");
        self.fetch(url).await
    }

    /// `GET /users/{id}/time` — recent time entries, collapsed into their
    /// distinct tasks, most recent first.
    pub async fn recent_tasks(&self, user_id: i64, limit: u32) -> Result<Vec<Task>, ApiError> {
        let url = self
            .base
            .append_path(&format!("/users/{}/time", user_id))
            .with_param("limit", limit);
        let records: Vec<domain::TimeRecord> = self.fetch(url).await?;
        Ok(domain::distinct_tasks(records))
    }

    /// `GET /tasks/search` — server-side ranked match on the task name,
    /// closed tasks excluded.
    pub async fn search_tasks(&self, query: &str, limit: u32) -> Result<Vec<Task>, ApiError> {
        let url = self
            .base
            .append_path("/tasks/search")
            .with_param("query", query)
            .with_param("limit", limit)
            .with_param("searchInClosed", false);
        self.fetch(url).await
    }

    /// `GET /timers/current` — the running timer, or a bare
    /// `{"status":"stopped"}` when nothing is tracked.
    pub async fn current_timer(&self) -> Result<Timer, ApiError> {
        let url = self
            .base
            .append_path("/timers/current")
            .with_param("status", "active");
        self.fetch(url).await
    }

    /// `POST /timers` — start tracking the given task. Starting while another
    /// timer runs stops that one server-side.
    pub async fn start_timer(&self, task_id: &str) -> Result<Timer, ApiError> {
        let url = self.base.append_path("/timers");
        self.send(Method::POST, url, &StartTimerBody { task: task_id })
            .await
    }

    /// `DELETE /timers/current` — stop the running timer. Returns
    /// [`ApiError::NotFound`] when no timer is running; callers may treat
    /// that as already stopped.
    pub async fn stop_timer(&self) -> Result<Timer, ApiError> {
        let url = self.base.append_path("/timers/current");
        self.send(Method::DELETE, url, &serde_json::json!({})).await
    }

    /// `GET /projects` — projects matching the query. A limit of 0 leaves the
    /// result count to the server.
    pub async fn projects(&self, query: &str, limit: u32) -> Result<Vec<Project>, ApiError> {
        let url = self
            .base
            .append_path("/projects")
            .with_param("query", query)
            .with_param("limit", limit);
        self.fetch(url).await
    }
}

#[derive(Debug, Serialize)]
struct StartTimerBody<'a> {
    task: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_timer_body_serializes_to_task_field() {
        let body = serde_json::to_value(StartTimerBody { task: "ev:42" }).unwrap();
        assert_eq!(body, serde_json::json!({"task": "ev:42"}));
    }
}
