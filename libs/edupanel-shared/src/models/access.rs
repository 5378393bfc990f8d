use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Id, day};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoursePermission {
    pub id: Id,
    pub user_id: Id,
    pub course_id: Id,
    #[serde(default)]
    pub tariff_id: Option<Id>,
    #[serde(with = "day")]
    pub started_at: NaiveDate,
    #[serde(with = "day")]
    pub ended_at: NaiveDate,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl CoursePermission {
    /// Active while the end of `ended_at` (23:59:59.999) is later than `now`.
    pub fn is_active_at(&self, now: NaiveDateTime) -> bool {
        self.ended_at
            .and_hms_milli_opt(23, 59, 59, 999)
            .is_some_and(|end| end > now)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCoursePermission {
    pub user_id: Id,
    pub course_id: Id,
    pub tariff_id: Id,
    #[serde(with = "day")]
    pub started_at: NaiveDate,
    #[serde(with = "day")]
    pub ended_at: NaiveDate,
}
