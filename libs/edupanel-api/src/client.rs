use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url, multipart::Form};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{ApiError, Result, error_message};
use crate::session::SessionStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Auth {
    /// Attach the session token; 401/403 ends the session.
    Session,
    /// Login and other public calls: auth failures are ordinary HTTP errors.
    Anonymous,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        let mut base_url = base_url.into().trim().to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            base_url = format!("https://{}", base_url);
        }
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            client: Client::new(),
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url =
            Url::parse(&raw).map_err(|e| ApiError::Validation(format!("invalid API URL {}: {}", raw, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn execute(&self, builder: RequestBuilder, auth: Auth) -> Result<Response> {
        let builder = match auth {
            Auth::Session => match self.session.token().await {
                Some(token) => builder.bearer_auth(token),
                None => builder,
            },
            Auth::Anonymous => builder,
        };

        let request = builder.build()?;
        debug!("{} {}", request.method(), request.url());
        let resp = self.client.execute(request).await?;
        let status = resp.status();

        if auth == Auth::Session && matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            warn!("API answered {}, dropping the stored session", status);
            if let Err(e) = self.session.clear().await {
                warn!("Failed to remove session file: {}", e);
            }
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status,
                message: error_message(status, &body),
            });
        }

        Ok(resp)
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(String, String)]) -> Result<T> {
        let url = self.url(path, query)?;
        let resp = self.execute(self.request(Method::GET, url), Auth::Session).await?;
        Self::decode(resp).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path, &[])?;
        let resp = self
            .execute(self.request(Method::POST, url).json(body), Auth::Session)
            .await?;
        Self::decode(resp).await
    }

    pub async fn post_anonymous<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path, &[])?;
        let resp = self
            .execute(self.request(Method::POST, url).json(body), Auth::Anonymous)
            .await?;
        Self::decode(resp).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path, &[])?;
        let resp = self
            .execute(self.request(Method::PUT, url).json(body), Auth::Session)
            .await?;
        Self::decode(resp).await
    }

    /// Response bodies of deletes are ignored.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path, &[])?;
        self.execute(self.request(Method::DELETE, url), Auth::Session).await?;
        Ok(())
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let url = self.url(path, &[])?;
        let resp = self
            .execute(self.request(Method::POST, url).multipart(form), Auth::Session)
            .await?;
        Self::decode(resp).await
    }
}
