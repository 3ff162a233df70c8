//! Build-time configuration for the backend location.
//!
//! Both values can be overridden when compiling (`API_BASE_URL=... trunk build`),
//! otherwise the hosted backend is used.

pub const DEFAULT_API_BASE_URL: &str = "https://expense-backend-ygjj.onrender.com";
pub const DEFAULT_API_BASE_PATH: &str = "/expense/backend/api/v1";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_base_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, DEFAULT_API_BASE_PATH)
    }
}

impl AppConfig {
    pub fn new(base_url: &str, base_path: &str) -> Self {
        Self {
            api_base_url: base_url.trim_end_matches('/').to_string(),
            api_base_path: normalize_path(base_path),
        }
    }

    pub fn from_env() -> Self {
        let base_url = option_env!("API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL);
        let base_path = option_env!("API_BASE_PATH").unwrap_or(DEFAULT_API_BASE_PATH);
        Self::new(base_url, base_path)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{}/{}",
            self.api_base_url,
            self.api_base_path,
            path.trim_start_matches('/')
        )
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url_path_and_route() {
        let config = AppConfig::default();
        assert_eq!(
            config.endpoint("/signin"),
            "https://expense-backend-ygjj.onrender.com/expense/backend/api/v1/signin"
        );
    }

    #[test]
    fn stray_slashes_are_normalized() {
        let config = AppConfig::new("http://localhost:8080/", "api/v1/");
        assert_eq!(config.endpoint("u1/readexpense"), "http://localhost:8080/api/v1/u1/readexpense");

        let bare = AppConfig::new("http://localhost:8080", "");
        assert_eq!(bare.endpoint("/signup"), "http://localhost:8080/signup");
    }
}
