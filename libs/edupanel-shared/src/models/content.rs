use serde::{Deserialize, Serialize};

use super::Id;
use crate::localized::Localized;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub id: Id,
    pub question: Localized,
    pub answer: Localized,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct About {
    pub id: Id,
    pub title: Localized,
    #[serde(default)]
    pub content: Localized,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: Id,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Localized,
    #[serde(default)]
    pub telegram: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUpload {
    pub url: String,
    pub filename: String,
    pub size: u64,
    pub mime_type: String,
}
