//! Rules for granting a user timed access to a course.
//!
//! Everything here is pure: callers supply the cached lists and the current
//! moment, and get back either the request to submit or the reason it was
//! refused.

use chrono::{Months, NaiveDate, NaiveDateTime};

use crate::models::{Course, CoursePermission, CoursePriceOption, Id, NewCoursePermission, Tariff};

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum GrantRejection {
    #[error("course #{0} not found")]
    CourseNotFound(Id),
    #[error("tariff #{0} not found")]
    TariffNotFound(Id),
    #[error("course #{course_id} has no price option for {months} month(s)")]
    NoMatchingPriceOption { course_id: Id, months: u32 },
    #[error("tariff #{0} has no duration")]
    InvalidDuration(Id),
    #[error("user #{user_id} already has access to course #{course_id} until {ended_at}")]
    AlreadyActive {
        user_id: Id,
        course_id: Id,
        ended_at: NaiveDate,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrantInput {
    pub user_id: Id,
    pub course_id: Id,
    pub tariff_id: Id,
}

pub fn matching_price_option<'a>(course: &'a Course, tariff: &Tariff) -> Option<&'a CoursePriceOption> {
    course.price_option(tariff.duration)
}

/// `[today, today + months]`, clamping the end day to the target month's length.
pub fn grant_window(today: NaiveDate, months: u32) -> Option<(NaiveDate, NaiveDate)> {
    if months == 0 {
        return None;
    }
    today
        .checked_add_months(Months::new(months))
        .map(|end| (today, end))
}

/// First permission of `user_id` on `course_id` that is still active at `now`.
pub fn find_active<'a, I>(existing: I, user_id: Id, course_id: Id, now: NaiveDateTime) -> Option<&'a CoursePermission>
where
    I: IntoIterator<Item = &'a CoursePermission>,
{
    existing
        .into_iter()
        .filter(|p| p.user_id == user_id && p.course_id == course_id)
        .find(|p| p.is_active_at(now))
}

/// Steps that only need the cached catalog: lookup and price matching.
pub fn resolve<'a>(
    courses: &'a [Course],
    tariffs: &'a [Tariff],
    input: GrantInput,
) -> Result<(&'a Course, &'a Tariff, &'a CoursePriceOption), GrantRejection> {
    let course = courses
        .iter()
        .find(|c| c.id == input.course_id)
        .ok_or(GrantRejection::CourseNotFound(input.course_id))?;
    let tariff = tariffs
        .iter()
        .find(|t| t.id == input.tariff_id)
        .ok_or(GrantRejection::TariffNotFound(input.tariff_id))?;
    let option = matching_price_option(course, tariff).ok_or(GrantRejection::NoMatchingPriceOption {
        course_id: course.id,
        months: tariff.duration,
    })?;
    Ok((course, tariff, option))
}

pub fn ensure_not_active<'a, I>(existing: I, input: GrantInput, now: NaiveDateTime) -> Result<(), GrantRejection>
where
    I: IntoIterator<Item = &'a CoursePermission>,
{
    match find_active(existing, input.user_id, input.course_id, now) {
        Some(active) => Err(GrantRejection::AlreadyActive {
            user_id: input.user_id,
            course_id: input.course_id,
            ended_at: active.ended_at,
        }),
        None => Ok(()),
    }
}

/// Full client-side check against one set of known permissions.
pub fn plan_grant(
    courses: &[Course],
    tariffs: &[Tariff],
    existing: &[CoursePermission],
    input: GrantInput,
    now: NaiveDateTime,
) -> Result<NewCoursePermission, GrantRejection> {
    let (_, tariff, _) = resolve(courses, tariffs, input)?;
    ensure_not_active(existing, input, now)?;
    let (started_at, ended_at) =
        grant_window(now.date(), tariff.duration).ok_or(GrantRejection::InvalidDuration(tariff.id))?;
    Ok(NewCoursePermission {
        user_id: input.user_id,
        course_id: input.course_id,
        tariff_id: tariff.id,
        started_at,
        ended_at,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::localized::Localized;

    pub fn course(id: Id, durations: &[u32]) -> Course {
        Course {
            id,
            subject_id: None,
            teacher_id: None,
            name: Localized::new(format!("Kurs {}", id), format!("Курс {}", id), format!("Course {}", id)),
            description: Localized::default(),
            image: None,
            price: durations
                .iter()
                .map(|&duration| CoursePriceOption {
                    duration,
                    price: 100_000.0 * duration as f64,
                    tariff_id: None,
                })
                .collect(),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn tariff(id: Id, duration: u32) -> Tariff {
        Tariff {
            id,
            name: Localized::new("Standart".into(), "Стандарт".into(), "Standard".into()),
            duration,
            price: 0.0,
            description: Localized::default(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn permission(id: Id, user_id: Id, course_id: Id, ended_at: NaiveDate) -> CoursePermission {
        CoursePermission {
            id,
            user_id,
            course_id,
            tariff_id: None,
            started_at: ended_at - chrono::Days::new(30),
            ended_at,
            created_at: None,
        }
    }
}
