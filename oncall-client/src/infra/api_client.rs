use log::{debug, info, warn};
use parking_lot::RwLock;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;

use crate::infra::config::{ClientConfig, normalize_base_url};
use crate::infra::error::{ClientError, ClientResult};
use crate::infra::notifications::{Notification, Notifier};

/// Per-request switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Do not publish a notification when the request fails.
    pub skip_error_handling: bool,
}

impl RequestOptions {
    pub const SILENT: Self = Self {
        skip_error_handling: true,
    };

    pub fn skip(skip_error_handling: bool) -> Self {
        Self {
            skip_error_handling,
        }
    }
}

/// HTTP client for the OnCall internal API
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_path: String,
    token_store: Arc<RwLock<Option<String>>>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("api_path", &self.api_path)
            .field("has_token", &self.token_store.read().is_some())
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &ClientConfig, notifier: Arc<dyn Notifier>) -> ClientResult<Self> {
        let base_url = normalize_base_url(&config.base_url);
        url::Url::parse(&base_url)
            .map_err(|e| ClientError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Config(format!("failed to create HTTP client: {}", e)))?;

        info!(
            "[ApiClient] Creating new API client with base URL: {}",
            base_url
        );

        Ok(Self {
            client,
            base_url,
            api_path: config.api_path.trim_matches('/').to_string(),
            token_store: Arc::new(RwLock::new(config.api_token.clone())),
            notifier,
        })
    }

    /// Build a full URL for an API path such as `/channel_filters/`
    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let p = path.as_ref();
        if p.starts_with("http://") || p.starts_with("https://") {
            return p.to_string();
        }
        let path = p.trim_start_matches('/');
        if self.api_path.is_empty() {
            format!("{}/{}", self.base_url, path)
        } else {
            format!("{}/{}/{}", self.base_url, self.api_path, path)
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token_store.write() = token;
    }

    pub fn has_token(&self) -> bool {
        self.token_store.read().is_some()
    }

    fn build_request(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token_store.read().as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<Q: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        query: &Q,
        options: RequestOptions,
    ) -> ClientResult<R> {
        let url = self.build_url(path);
        debug!("[ApiClient] GET {}", url);
        let request = self.build_request(self.client.get(&url).query(query));
        self.execute_request(request, &url, options).await
    }

    pub async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ClientResult<R> {
        let url = self.build_url(path);
        debug!("[ApiClient] POST {}", url);
        let request = self.build_request(self.client.post(&url).json(body));
        self.execute_request(request, &url, options).await
    }

    pub async fn put<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ClientResult<R> {
        let url = self.build_url(path);
        debug!("[ApiClient] PUT {}", url);
        let request = self.build_request(self.client.put(&url).json(body));
        self.execute_request(request, &url, options).await
    }

    /// PUT without a body, ignoring whatever the server answers with.
    pub async fn put_no_content(&self, path: &str, options: RequestOptions) -> ClientResult<()> {
        let url = self.build_url(path);
        debug!("[ApiClient] PUT {}", url);
        let request = self.build_request(self.client.put(&url));
        self.send(request, &url, options).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str, options: RequestOptions) -> ClientResult<()> {
        let url = self.build_url(path);
        debug!("[ApiClient] DELETE {}", url);
        let request = self.build_request(self.client.delete(&url));
        self.send(request, &url, options).await.map(|_| ())
    }

    /// GET that only reports the success status code.
    pub async fn get_status(&self, path: &str, options: RequestOptions) -> ClientResult<u16> {
        let url = self.build_url(path);
        let request = self.build_request(self.client.get(&url));
        self.send(request, &url, options)
            .await
            .map(|response| response.status().as_u16())
    }

    /// POST that only reports the success status code.
    pub async fn post_status<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ClientResult<u16> {
        let url = self.build_url(path);
        let request = self.build_request(self.client.post(&url).json(body));
        self.send(request, &url, options)
            .await
            .map(|response| response.status().as_u16())
    }

    /// Execute a request and decode a JSON body
    async fn execute_request<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
        options: RequestOptions,
    ) -> ClientResult<R> {
        let response = self.send(request, url, options).await?;
        let status = response.status();
        let text = response.text().await.map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })?;

        // 204 and empty bodies decode as JSON null, which is fine for `()` and `Option`.
        let body = if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            "null"
        } else {
            text.as_str()
        };
        serde_json::from_str(body).map_err(|source| {
            warn!("[ApiClient] Failed to decode response from {}: {}", url, source);
            ClientError::Decode {
                url: url.to_string(),
                source,
            }
        })
    }

    /// Send a request, turning transport failures and non-2xx statuses into
    /// [`ClientError`]s and publishing them unless suppressed.
    async fn send(
        &self,
        request: RequestBuilder,
        url: &str,
        options: RequestOptions,
    ) -> ClientResult<Response> {
        let result = match request.send().await {
            Ok(response) if response.status().is_success() => return Ok(response),
            Ok(response) => Err(Self::error_from_response(response).await),
            Err(source) => Err(ClientError::Transport {
                url: url.to_string(),
                source,
            }),
        };

        if let Err(err) = &result {
            warn!("[ApiClient] Request to {} failed: {}", url, err);
            if !options.skip_error_handling {
                self.notifier.notify(Notification::error(err.user_message()));
            }
        }
        result
    }

    async fn error_from_response(response: Response) -> ClientError {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return ClientError::Unauthorized;
        }
        let text = response.text().await.unwrap_or_default();
        ClientError::Status {
            status: status.as_u16(),
            message: normalize_error_message(status, &text),
        }
    }
}

/// Extracts a readable message from an error body: the `detail` field when
/// present, otherwise the first field error, otherwise the raw text.
pub fn normalize_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return detail.to_string();
        }
        if let Some((field, errors)) = value.as_object().and_then(|map| map.iter().next()) {
            let message = match errors {
                serde_json::Value::Array(items) => items
                    .first()
                    .and_then(|item| item.as_str())
                    .map(str::to_string),
                serde_json::Value::String(text) => Some(text.clone()),
                _ => None,
            };
            if let Some(message) = message {
                return format!("{}: {}", field, message);
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}
