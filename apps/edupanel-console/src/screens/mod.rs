pub mod auth;
pub mod catalog;
pub mod commerce;
pub mod content;
pub mod crud;
pub mod dashboard;
pub mod people;
pub mod permissions;
pub mod sales;
pub mod upload;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;

use edupanel_api::{Resource, Services};
use edupanel_shared::Lang;
use edupanel_shared::models::day;

use crate::config::ConsoleConfig;
use crate::ui::form::FormValues;
use crate::ui::table::Column;

/// Everything a command needs: the API services, resolved configuration and
/// the operator's language.
pub struct Console {
    pub services: Services,
    pub config: ConsoleConfig,
    pub lang: Lang,
}

/// A resource with a list/detail/form screen.
pub trait Screen: Resource + Serialize {
    const TITLE: &'static str;
    /// Multilingual fields that must be filled in every language.
    const LOCALIZED_FIELDS: &'static [&'static str] = &[];
    /// Fields whose `--set` values are decoded as JSON (ids, numbers, flags,
    /// arrays). Everything else is sent as text.
    const TYPED_FIELDS: &'static [&'static str] = &[];

    fn columns() -> Vec<Column<Self>>;

    /// Extra checks on the form before it is sent. `creating` is false for
    /// updates, where absent fields are left unchanged.
    fn validate_form(_form: &FormValues, _creating: bool) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Subject,
    Course,
    Module,
    Lesson,
    Source,
    Tariff,
    Teacher,
    User,
    Promocode,
    Order,
    Banner,
    Notification,
    Faq,
    About,
    Contact,
}

/// Runs `$body` with `$screen` bound to the entity type of `$kind`.
macro_rules! with_screen {
    ($kind:expr, $screen:ident => $body:expr) => {{
        use edupanel_shared::models::*;
        use $crate::screens::ResourceKind;
        match $kind {
            ResourceKind::Subject => { type $screen = Subject; $body }
            ResourceKind::Course => { type $screen = Course; $body }
            ResourceKind::Module => { type $screen = Module; $body }
            ResourceKind::Lesson => { type $screen = Lesson; $body }
            ResourceKind::Source => { type $screen = Source; $body }
            ResourceKind::Tariff => { type $screen = Tariff; $body }
            ResourceKind::Teacher => { type $screen = Teacher; $body }
            ResourceKind::User => { type $screen = User; $body }
            ResourceKind::Promocode => { type $screen = PromoCode; $body }
            ResourceKind::Order => { type $screen = Order; $body }
            ResourceKind::Banner => { type $screen = Banner; $body }
            ResourceKind::Notification => { type $screen = Notification; $body }
            ResourceKind::Faq => { type $screen = Faq; $body }
            ResourceKind::About => { type $screen = About; $body }
            ResourceKind::Contact => { type $screen = Contact; $body }
        }
    }};
}
pub(crate) use with_screen;

/// Fails when `field` is required (on create) but absent, or present but blank.
pub(crate) fn require_text(form: &FormValues, field: &str, creating: bool) -> Result<()> {
    match form.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(()),
        None if !creating => Ok(()),
        _ => bail!("{} is required", field),
    }
}

pub(crate) fn optional_date(form: &FormValues, field: &str) -> Result<Option<NaiveDate>> {
    match form.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => match day::parse(raw) {
            Some(date) => Ok(Some(date)),
            None => bail!("{} must be a date like 2026-01-31, got '{}'", field, raw),
        },
        Some(other) => bail!("{} must be a date, got {}", field, other),
    }
}

pub(crate) fn optional_u32(form: &FormValues, field: &str) -> Result<Option<u32>> {
    match form.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(n) => Ok(Some(n)),
            None => bail!("{} must be a whole non-negative number, got {}", field, value),
        },
    }
}
