use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;
use crate::localized::Localized;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: Id,
    pub name: Localized,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A purchasable duration of a course. `duration` is in months and is
/// matched against `Tariff::duration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoursePriceOption {
    pub duration: u32,
    pub price: f64,
    #[serde(default)]
    pub tariff_id: Option<Id>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: Id,
    #[serde(default)]
    pub subject_id: Option<Id>,
    #[serde(default)]
    pub teacher_id: Option<Id>,
    pub name: Localized,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub price: Vec<CoursePriceOption>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Course {
    pub fn price_option(&self, months: u32) -> Option<&CoursePriceOption> {
        self.price.iter().find(|option| option.duration == months)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub id: Id,
    pub course_id: Id,
    pub name: Localized,
    #[serde(default, rename = "order")]
    pub position: Option<i32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: Id,
    pub module_id: Id,
    pub name: Localized,
    #[serde(default)]
    pub description: Localized,
    /// Minutes.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    pub id: Id,
    pub lesson_id: Id,
    #[serde(default)]
    pub name: Localized,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub url: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tariff {
    pub id: Id,
    pub name: Localized,
    /// Months of access granted.
    pub duration: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
