use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Id, day};
use crate::localized::Localized;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoCode {
    pub id: Id,
    pub code: String,
    /// Percent off, 1..=100.
    pub discount: u32,
    #[serde(with = "day")]
    pub started_at: NaiveDate,
    #[serde(with = "day")]
    pub ended_at: NaiveDate,
    #[serde(default)]
    pub max_uses: Option<u32>,
    #[serde(default)]
    pub used_count: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub course_id: Option<Id>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Cancelled,
    Refunded,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
            OrderStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Id,
    pub user_id: Id,
    pub course_id: Id,
    #[serde(default)]
    pub tariff_id: Option<Id>,
    #[serde(default)]
    pub promocode_id: Option<Id>,
    #[serde(default)]
    pub amount: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    pub id: Id,
    pub title: Localized,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Id,
    pub title: Localized,
    #[serde(default)]
    pub body: Localized,
    /// `None` for broadcasts.
    #[serde(default)]
    pub user_id: Option<Id>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
