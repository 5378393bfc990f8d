pub mod dashboard;
pub mod localized;
pub mod models;
pub mod pagination;
pub mod permission;
pub mod promo;

pub use localized::{Lang, Localized};
pub use pagination::{ListQuery, Page, Paginator};
