pub mod access;
pub mod auth;
pub mod catalog;
pub mod commerce;
pub mod content;
pub mod people;

pub use access::{CoursePermission, NewCoursePermission};
pub use auth::{LoginRequest, LoginResponse};
pub use catalog::{Course, CoursePriceOption, Lesson, Module, Source, Subject, Tariff};
pub use commerce::{Banner, Notification, Order, OrderStatus, PromoCode};
pub use content::{About, Contact, Faq, FileUpload};
pub use people::{Teacher, User};

pub type Id = i64;

/// Calendar days on the wire. Accepts `YYYY-MM-DD` as well as full RFC 3339
/// timestamps, keeping only the date part; always writes `YYYY-MM-DD`.
pub mod day {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        let head = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(head, FORMAT).ok()
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw)))
    }
}
