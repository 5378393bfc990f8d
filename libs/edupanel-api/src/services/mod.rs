pub mod auth_service;
pub mod dashboard_service;
pub mod permission_service;
pub mod upload_service;

use crate::client::ApiClient;
use crate::resource::{Resource, ResourceService};

pub use auth_service::AuthService;
pub use dashboard_service::DashboardService;
pub use permission_service::PermissionService;
pub use upload_service::UploadService;

/// Every service the console talks to, sharing one client and session.
#[derive(Clone, Debug)]
pub struct Services {
    pub api: ApiClient,
    pub auth: AuthService,
    pub uploads: UploadService,
    pub dashboard: DashboardService,
    pub permissions: PermissionService,
}

impl Services {
    pub fn new(api: ApiClient) -> Self {
        Self {
            auth: AuthService::new(api.clone()),
            uploads: UploadService::new(api.clone()),
            dashboard: DashboardService::new(api.clone()),
            permissions: PermissionService::new(api.clone()),
            api,
        }
    }

    pub fn resource<R: Resource>(&self) -> ResourceService<R> {
        ResourceService::new(self.api.clone())
    }
}
