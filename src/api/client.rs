//! reqwest-backed implementation of [`TourismApi`].
//!
//! Every endpoint hangs off one configurable base URL. Paths are appended
//! segment by segment so ids are percent-encoded rather than spliced in.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::backend::{ApiError, TourismApi};
use super::types::{Credentials, LoginResponse, NewTouristPoint, TouristPoint, User};

const LOGIN_PATH: &[&str] = &["api", "auth", "login"];
const REGISTER_PATH: &[&str] = &["api", "users", "register"];
const USERS_PATH: &[&str] = &["api", "usuarios"];
const POINTS_PATH: &[&str] = &["api", "pontosturisticos"];

pub struct ApiClient {
    base_url: Url,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "base URL cannot carry paths: {base_url}"
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins `segments` onto the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::Config(format!("base URL cannot carry paths: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, token: Option<&str>) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and turns non-success statuses into [`ApiError::Api`].
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!("Backend response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Backend error: {} - {}", status, err_body);
            return Err(ApiError::Api {
                status,
                message: err_body,
            });
        }

        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!("Backend response body: {} bytes", bytes.len());
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        info!("GET {}", url);
        let response = self.send(self.request(Method::GET, url, token)).await?;
        Self::read_json(response).await
    }

    pub async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        info!("POST {}", url);
        let response = self
            .send(self.request(Method::POST, url, token).json(body))
            .await?;
        Self::read_json(response).await
    }

    /// DELETE ignores the response body; success is the status alone.
    pub async fn delete(&self, segments: &[&str], token: Option<&str>) -> Result<(), ApiError> {
        let url = self.endpoint(segments)?;
        info!("DELETE {}", url);
        self.send(self.request(Method::DELETE, url, token)).await?;
        Ok(())
    }
}

fn with_id<'a>(base: &[&'a str], id: &'a str) -> Vec<&'a str> {
    let mut segments = base.to_vec();
    segments.push(id);
    segments
}

#[async_trait]
impl TourismApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let response: LoginResponse = self.post(LOGIN_PATH, credentials, None).await?;
        match response.token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(ApiError::Parse("login response carried no token".to_string())),
        }
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let url = self.endpoint(REGISTER_PATH)?;
        info!("POST {}", url);
        self.send(self.request(Method::POST, url, None).json(credentials))
            .await?;
        Ok(())
    }

    async fn list_users(&self, token: &str) -> Result<Vec<User>, ApiError> {
        self.get(USERS_PATH, Some(token)).await
    }

    async fn delete_user(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.delete(&with_id(USERS_PATH, id), Some(token)).await
    }

    async fn list_points(&self, token: &str) -> Result<Vec<TouristPoint>, ApiError> {
        self.get(POINTS_PATH, Some(token)).await
    }

    async fn create_point(
        &self,
        token: &str,
        point: &NewTouristPoint,
    ) -> Result<TouristPoint, ApiError> {
        self.post(POINTS_PATH, point, Some(token)).await
    }

    async fn get_point(&self, token: &str, id: &str) -> Result<TouristPoint, ApiError> {
        self.get(&with_id(POINTS_PATH, id), Some(token)).await
    }
}
