use edupanel_shared::models::{CoursePermission, Id, NewCoursePermission};
use edupanel_shared::{ListQuery, Page};

use crate::client::ApiClient;
use crate::error::Result;
use crate::resource::{Resource, ResourceService};

/// Page size used when sweeping a user's permissions.
const SWEEP_LIMIT: u32 = 100;

#[derive(Clone, Debug)]
pub struct PermissionService {
    api: ApiClient,
    resource: ResourceService<CoursePermission>,
}

impl PermissionService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: ResourceService::new(api.clone()),
            api,
        }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<CoursePermission>> {
        self.resource.list(query).await
    }

    /// Every permission of `user_id`, across all pages. Rows for other users
    /// are dropped in case the backend ignores the filter.
    pub async fn for_user(&self, user_id: Id) -> Result<Vec<CoursePermission>> {
        let query = ListQuery::new(1, SWEEP_LIMIT).with_filter("user_id", user_id);
        let mut rows = self.resource.list_all(&query).await?;
        rows.retain(|p| p.user_id == user_id);
        Ok(rows)
    }

    pub async fn grant(&self, grant: &NewCoursePermission) -> Result<CoursePermission> {
        self.api.post(CoursePermission::PATH, grant).await
    }

    pub async fn revoke(&self, id: Id) -> Result<()> {
        self.resource.delete(id).await
    }
}
