use anyhow::{Result, bail};
use chrono::Local;

use edupanel_shared::models::{Banner, Notification, Order, PromoCode};
use edupanel_shared::promo::{self, PromoError};

use super::{Screen, optional_date, optional_u32};
use crate::ui::form::FormValues;
use crate::ui::table::{Column, money, or_dash, timestamp, yes_no};

fn uses(p: &PromoCode) -> String {
    match p.max_uses {
        Some(max) => format!("{}/{}", p.used_count, max),
        None => p.used_count.to_string(),
    }
}

impl Screen for PromoCode {
    const TITLE: &'static str = "Promocodes";
    const TYPED_FIELDS: &'static [&'static str] = &["discount", "max_uses", "used_count", "is_active", "course_id"];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |p: &PromoCode, _| p.id.to_string()),
            Column::new("Code", |p: &PromoCode, _| p.code.clone()),
            Column::new("Discount", |p: &PromoCode, _| format!("{}%", p.discount)),
            Column::new("Starts", |p: &PromoCode, _| p.started_at.to_string()),
            Column::new("Ends", |p: &PromoCode, _| p.ended_at.to_string()),
            Column::new("Uses", |p: &PromoCode, _| uses(p)),
            Column::new("Course", |p: &PromoCode, _| or_dash(p.course_id)),
            Column::new("Status", |p: &PromoCode, _| p.status(Local::now().date_naive()).to_string()),
        ]
    }

    fn validate_form(form: &FormValues, creating: bool) -> Result<()> {
        let code = form.get("code").map(|v| v.as_str().unwrap_or_default());
        let discount = optional_u32(form, "discount")?;
        let started_at = optional_date(form, "started_at")?;
        let ended_at = optional_date(form, "ended_at")?;

        if creating {
            let (Some(code), Some(discount), Some(started_at), Some(ended_at)) = (code, discount, started_at, ended_at)
            else {
                bail!("a promocode needs code, discount, started_at and ended_at");
            };
            promo::validate_form(code, discount, started_at, ended_at)?;
            return Ok(());
        }

        if code.is_some_and(|c| c.trim().is_empty()) {
            return Err(PromoError::EmptyCode.into());
        }
        if let Some(discount) = discount.filter(|d| !(1..=100).contains(d)) {
            return Err(PromoError::DiscountOutOfRange(discount).into());
        }
        if let (Some(started_at), Some(ended_at)) = (started_at, ended_at) {
            if started_at > ended_at {
                return Err(PromoError::InvertedDates { started_at, ended_at }.into());
            }
        }
        Ok(())
    }
}

impl Screen for Order {
    const TITLE: &'static str = "Orders";
    const TYPED_FIELDS: &'static [&'static str] = &["user_id", "course_id", "tariff_id", "promocode_id", "amount"];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |o: &Order, _| o.id.to_string()),
            Column::new("User", |o: &Order, _| o.user_id.to_string()),
            Column::new("Course", |o: &Order, _| o.course_id.to_string()),
            Column::new("Tariff", |o: &Order, _| or_dash(o.tariff_id)),
            Column::new("Promocode", |o: &Order, _| or_dash(o.promocode_id)),
            Column::new("Amount", |o: &Order, _| money(o.amount)),
            Column::new("Status", |o: &Order, _| o.status.as_str().to_string()),
            Column::new("Created", |o: &Order, _| timestamp(o.created_at)),
        ]
    }
}

impl Screen for Banner {
    const TITLE: &'static str = "Banners";
    const LOCALIZED_FIELDS: &'static [&'static str] = &["title"];
    const TYPED_FIELDS: &'static [&'static str] = &["is_active"];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |b: &Banner, _| b.id.to_string()),
            Column::new("Title", |b: &Banner, lang| b.title.text(lang).to_string()),
            Column::new("Link", |b: &Banner, _| or_dash(b.link.as_deref())).width(40),
            Column::new("Active", |b: &Banner, _| yes_no(b.is_active)),
        ]
    }
}

impl Screen for Notification {
    const TITLE: &'static str = "Notifications";
    const LOCALIZED_FIELDS: &'static [&'static str] = &["title", "body"];
    const TYPED_FIELDS: &'static [&'static str] = &["user_id"];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |n: &Notification, _| n.id.to_string()),
            Column::new("To", |n: &Notification, _| match n.user_id {
                Some(id) => format!("user #{}", id),
                None => "everyone".to_string(),
            }),
            Column::new("Title", |n: &Notification, lang| n.title.text(lang).to_string()),
            Column::new("Body", |n: &Notification, lang| n.body.text(lang).to_string()).width(48),
            Column::new("Sent", |n: &Notification, _| timestamp(n.created_at)),
        ]
    }
}
