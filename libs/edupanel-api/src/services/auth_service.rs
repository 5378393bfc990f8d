use chrono::Utc;
use tracing::info;

use edupanel_shared::models::{LoginRequest, LoginResponse};

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::session::Session;

#[derive(Clone, Debug)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchanges admin credentials for a token and stores a 7-day session.
    pub async fn login(&self, login: &str, password: &str) -> Result<Session> {
        if login.trim().is_empty() || password.is_empty() {
            return Err(ApiError::Validation("login and password are required".into()));
        }

        let req = LoginRequest {
            login: login.trim().to_string(),
            password: password.to_string(),
        };
        let resp: LoginResponse = self.api.post_anonymous("auth/admin/login", &req).await?;
        let session = Session::from_login(resp, Utc::now());
        self.api.session().replace(session.clone()).await?;

        info!("Logged in as admin #{}", session.admin_id);
        Ok(session)
    }

    pub async fn logout(&self) -> Result<()> {
        self.api.session().clear().await
    }

    pub async fn current(&self) -> Option<Session> {
        self.api.session().current().await
    }
}
