//! Promocode checks and order quotes.

use anyhow::{Context, Result, bail};
use chrono::Local;
use console::style;

use edupanel_shared::ListQuery;
use edupanel_shared::models::{Course, Id, PromoCode, Tariff};
use edupanel_shared::promo::{self, PromoStatus};

use super::Console;
use crate::ui::alert;
use crate::ui::table::{money, or_dash};

/// Looks a promocode up by its code, ignoring case.
async fn find_promocode(console: &Console, code: &str) -> Result<Option<PromoCode>> {
    let query = ListQuery::new(1, 100).with_filter("search", code.trim());
    let candidates = console
        .services
        .resource::<PromoCode>()
        .list_all(&query)
        .await
        .context("Failed to load promocodes")?;
    Ok(pick_code(candidates, code))
}

fn pick_code(candidates: Vec<PromoCode>, code: &str) -> Option<PromoCode> {
    let code = code.trim();
    candidates.into_iter().find(|p| p.code.trim().eq_ignore_ascii_case(code))
}

pub async fn check(console: &Console, code: &str) -> Result<()> {
    let Some(promo) = find_promocode(console, code).await? else {
        bail!("promocode '{}' not found", code.trim());
    };

    let status = promo.status(Local::now().date_naive());
    let label = match status {
        PromoStatus::Active => style(status.to_string()).green(),
        PromoStatus::Scheduled => style(status.to_string()).yellow(),
        _ => style(status.to_string()).red(),
    };
    alert::heading(&format!("Promocode {}", promo.code));
    println!("status    {}", label);
    println!("discount  {}%", promo.discount);
    println!("valid     {} .. {}", promo.started_at, promo.ended_at);
    println!(
        "uses      {} of {}",
        promo.used_count,
        or_dash(promo.max_uses)
    );
    println!("course    {}", or_dash(promo.course_id));
    Ok(())
}

pub async fn quote(console: &Console, course_id: Id, tariff_id: Id, promocode: Option<&str>) -> Result<()> {
    let course = console
        .services
        .resource::<Course>()
        .get(course_id)
        .await
        .with_context(|| format!("Failed to load course #{}", course_id))?;
    let tariff = console
        .services
        .resource::<Tariff>()
        .get(tariff_id)
        .await
        .with_context(|| format!("Failed to load tariff #{}", tariff_id))?;
    let promo = match promocode {
        Some(code) => match find_promocode(console, code).await? {
            Some(promo) => Some(promo),
            None => bail!("promocode '{}' not found", code.trim()),
        },
        None => None,
    };

    let quote = promo::quote(&course, &tariff, promo.as_ref(), Local::now().date_naive())?;

    alert::heading(&format!(
        "{} · {}",
        course.name.text(console.lang),
        tariff.name.text(console.lang)
    ));
    println!("months    {}", quote.months);
    println!("price     {}", money(quote.base_price));
    if quote.discount > 0 {
        println!("discount  {}%", quote.discount);
    }
    println!("total     {}", style(money(quote.total)).bold());
    Ok(())
}
