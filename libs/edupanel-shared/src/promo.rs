use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::models::{Course, Id, PromoCode, Tariff};
use crate::permission::matching_price_option;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromoStatus {
    Inactive,
    Scheduled,
    Active,
    Expired,
    Exhausted,
}

impl fmt::Display for PromoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PromoStatus::Inactive => "inactive",
            PromoStatus::Scheduled => "scheduled",
            PromoStatus::Active => "active",
            PromoStatus::Expired => "expired",
            PromoStatus::Exhausted => "exhausted",
        })
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum PromoError {
    #[error("promocode must not be empty")]
    EmptyCode,
    #[error("discount must be between 1 and 100 percent, got {0}")]
    DiscountOutOfRange(u32),
    #[error("promocode starts {started_at} but ends {ended_at}")]
    InvertedDates {
        started_at: NaiveDate,
        ended_at: NaiveDate,
    },
    #[error("promocode {code} is {status}")]
    NotApplicable { code: String, status: PromoStatus },
    #[error("promocode {code} only applies to course #{course_id}")]
    WrongCourse { code: String, course_id: Id },
    #[error("course #{course_id} has no price option for {months} month(s)")]
    NoMatchingPriceOption { course_id: Id, months: u32 },
}

/// Checks run on the promocode form before it is submitted.
pub fn validate_form(
    code: &str,
    discount: u32,
    started_at: NaiveDate,
    ended_at: NaiveDate,
) -> Result<(), PromoError> {
    if code.trim().is_empty() {
        return Err(PromoError::EmptyCode);
    }
    if !(1..=100).contains(&discount) {
        return Err(PromoError::DiscountOutOfRange(discount));
    }
    if started_at > ended_at {
        return Err(PromoError::InvertedDates { started_at, ended_at });
    }
    Ok(())
}

impl PromoCode {
    pub fn status(&self, today: NaiveDate) -> PromoStatus {
        if !self.is_active {
            PromoStatus::Inactive
        } else if today < self.started_at {
            PromoStatus::Scheduled
        } else if today > self.ended_at {
            PromoStatus::Expired
        } else if self.max_uses.is_some_and(|max| self.used_count >= max) {
            PromoStatus::Exhausted
        } else {
            PromoStatus::Active
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub course_id: Id,
    pub tariff_id: Id,
    pub months: u32,
    pub base_price: f64,
    pub discount: u32,
    pub total: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Price an order the way the backend would: the course option matching the
/// tariff duration, minus an optional active promocode.
pub fn quote(
    course: &Course,
    tariff: &Tariff,
    promo: Option<&PromoCode>,
    today: NaiveDate,
) -> Result<Quote, PromoError> {
    let option = matching_price_option(course, tariff).ok_or(PromoError::NoMatchingPriceOption {
        course_id: course.id,
        months: tariff.duration,
    })?;

    let discount = match promo {
        Some(promo) => {
            let status = promo.status(today);
            if status != PromoStatus::Active {
                return Err(PromoError::NotApplicable {
                    code: promo.code.clone(),
                    status,
                });
            }
            if let Some(course_id) = promo.course_id.filter(|id| *id != course.id) {
                return Err(PromoError::WrongCourse {
                    code: promo.code.clone(),
                    course_id,
                });
            }
            promo.discount.min(100)
        }
        None => 0,
    };

    let total = round2(option.price * f64::from(100 - discount) / 100.0);
    Ok(Quote {
        course_id: course.id,
        tariff_id: tariff.id,
        months: tariff.duration,
        base_price: option.price,
        discount,
        total,
    })
}
