//! Thin REST client for the expense backend.
//!
//! The client never touches storage or navigation: a 401/403 comes back as
//! [`ApiError::Unauthorized`] and the caller decides what to do with it.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::ApiError;

pub mod paths {
    pub fn signup() -> String {
        "/signup".to_string()
    }

    pub fn signin() -> String {
        "/signin".to_string()
    }

    pub fn profile(user_id: &str) -> String {
        format!("/{}/getprofile", user_id)
    }

    pub fn update_profile(user_id: &str) -> String {
        format!("/{}/updateprofile", user_id)
    }

    pub fn signout(user_id: &str) -> String {
        format!("/{}/signout", user_id)
    }

    pub fn create_expense(user_id: &str) -> String {
        format!("/{}/createexpense", user_id)
    }

    pub fn read_expenses(user_id: &str) -> String {
        format!("/{}/readexpense", user_id)
    }

    pub fn update_expense(user_id: &str, expense_id: &str) -> String {
        format!("/{}/{}/updateexpense", user_id, expense_id)
    }

    pub fn delete_expense(user_id: &str, expense_id: &str) -> String {
        format!("/{}/{}/deleteexpense", user_id, expense_id)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    config: AppConfig,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: AppConfig, token: Option<String>) -> Self {
        Self { config, token }
    }

    pub fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {}", token))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("Content-Type", "application/json");
        match self.bearer() {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorize(Request::get(&self.url(path))).build()?;
        let response = self.send("GET", path, request).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.authorize(Request::post(&self.url(path))).json(body)?;
        let response = self.send("POST", path, request).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        let request = self.authorize(Request::post(&self.url(path))).build()?;
        self.send("POST", path, request).await?;
        Ok(())
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.authorize(Request::patch(&self.url(path))).json(body)?;
        let response = self.send("PATCH", path, request).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.authorize(Request::delete(&self.url(path))).build()?;
        self.send("DELETE", path, request).await?;
        Ok(())
    }

    async fn send(&self, method: &str, path: &str, request: Request) -> Result<Response, ApiError> {
        tracing::debug!(method, path, "sending request");
        let response = request.send().await.map_err(|err| {
            tracing::warn!(method, path, error = %err, "request failed");
            ApiError::Network(err.to_string())
        })?;

        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(method, path, status, "request rejected");
        Err(ApiError::from_status(status, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths_match_backend_routes() {
        assert_eq!(paths::read_expenses("u1"), "/u1/readexpense");
        assert_eq!(paths::update_expense("u1", "e9"), "/u1/e9/updateexpense");
        assert_eq!(paths::delete_expense("u1", "e9"), "/u1/e9/deleteexpense");
        assert_eq!(paths::profile("u1"), "/u1/getprofile");
    }

    #[test]
    fn bearer_header_only_with_token() {
        let anonymous = ApiClient::new(AppConfig::default(), None);
        assert_eq!(anonymous.bearer(), None);

        let signed_in = ApiClient::new(AppConfig::default(), Some("abc".into()));
        assert_eq!(signed_in.bearer().as_deref(), Some("Bearer abc"));
        assert!(signed_in.url(&paths::signout("u1")).ends_with("/expense/backend/api/v1/u1/signout"));
    }
}
