use std::env;

/// Base endpoint of the Everhour API.
pub const DEFAULT_BASE_URL: &str = "https://api.everhour.com";

#[derive(Debug, Clone)]
pub struct EverhourUrl(String);

impl AsRef<str> for EverhourUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl EverhourUrl {
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into().trim_end_matches('/').to_string())
    }

    /// Creates a new EverhourUrl from the environment variable `EVERHOUR_URL`,
    /// falling back to the public API endpoint.
    pub fn from_env() -> Self {
        Self::new(env::var("EVERHOUR_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()))
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// Append a query parameter, percent-encoding the value. Only primitive
    /// values are supported; arrays and objects are not flattened.
    pub fn with_param(&self, key: &str, value: impl ToString) -> Self {
        let encoded = urlencoding::encode(&value.to_string()).into_owned();
        if self.0.contains('?') {
            Self(format!("{}&{}={}", self.0, key, encoded))
        } else {
            Self(format!("{}?{}={}", self.0, key, encoded))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_path_joins_with_single_slash() {
        let url = EverhourUrl::new("https://api.everhour.com/").append_path("/users/me");
        assert_eq!(url.as_ref(), "https://api.everhour.com/users/me");
    }

    #[test]
    fn first_param_uses_question_mark_then_ampersand() {
        let url = EverhourUrl::new("https://api.everhour.com")
            .append_path("/tasks/search")
            .with_param("query", "fix bug")
            .with_param("limit", 30)
            .with_param("searchInClosed", false);
        assert_eq!(
            url.as_ref(),
            "https://api.everhour.com/tasks/search?query=fix%20bug&limit=30&searchInClosed=false"
        );
    }
}
