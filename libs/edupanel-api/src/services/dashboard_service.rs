use edupanel_shared::dashboard::{DashboardStats, DateRange};
use edupanel_shared::models::day;

use crate::client::ApiClient;
use crate::error::Result;

#[derive(Clone, Debug)]
pub struct DashboardService {
    api: ApiClient,
}

impl DashboardService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn statistics(&self, range: DateRange) -> Result<DashboardStats> {
        let query = [
            ("from".to_string(), range.from.format(day::FORMAT).to_string()),
            ("to".to_string(), range.to.format(day::FORMAT).to_string()),
        ];
        self.api.get("dashboard/statistics", &query).await
    }
}
