use anyhow::{Result, bail};

use edupanel_shared::models::{Course, Lesson, Module, Source, Subject, Tariff};

use super::{Screen, optional_u32, require_text};
use crate::ui::form::FormValues;
use crate::ui::table::{Column, money, or_dash, timestamp, yes_no};

impl Screen for Subject {
    const TITLE: &'static str = "Subjects";
    const LOCALIZED_FIELDS: &'static [&'static str] = &["name"];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |s: &Subject, _| s.id.to_string()),
            Column::new("Name", |s: &Subject, lang| s.name.text(lang).to_string()),
            Column::new("Description", |s: &Subject, lang| s.description.text(lang).to_string()).width(48),
            Column::new("Created", |s: &Subject, _| timestamp(s.created_at)),
        ]
    }
}

fn price_summary(course: &Course) -> String {
    if course.price.is_empty() {
        return "—".to_string();
    }
    course
        .price
        .iter()
        .map(|option| format!("{}m {}", option.duration, money(option.price)))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Screen for Course {
    const TITLE: &'static str = "Courses";
    const LOCALIZED_FIELDS: &'static [&'static str] = &["name"];
    const TYPED_FIELDS: &'static [&'static str] = &["subject_id", "teacher_id", "price", "is_active"];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |c: &Course, _| c.id.to_string()),
            Column::new("Name", |c: &Course, lang| c.name.text(lang).to_string()),
            Column::new("Subject", |c: &Course, _| or_dash(c.subject_id)),
            Column::new("Teacher", |c: &Course, _| or_dash(c.teacher_id)),
            Column::new("Prices", |c: &Course, _| price_summary(c)).width(40),
            Column::new("Active", |c: &Course, _| yes_no(c.is_active)),
        ]
    }

    fn validate_form(form: &FormValues, _creating: bool) -> Result<()> {
        let Some(options) = form.get("price") else {
            return Ok(());
        };
        let Some(options) = options.as_array() else {
            bail!("price must be a list of {{duration, price}} options");
        };
        let mut seen = Vec::new();
        for option in options {
            let duration = option.get("duration").and_then(|d| d.as_u64()).unwrap_or(0);
            if duration == 0 {
                bail!("every price option needs a duration of at least one month");
            }
            if option.get("price").and_then(|p| p.as_f64()).is_none_or(|p| p < 0.0) {
                bail!("price option for {} month(s) needs a non-negative price", duration);
            }
            if seen.contains(&duration) {
                bail!("duplicate price option for {} month(s)", duration);
            }
            seen.push(duration);
        }
        Ok(())
    }
}

impl Screen for Module {
    const TITLE: &'static str = "Modules";
    const LOCALIZED_FIELDS: &'static [&'static str] = &["name"];
    const TYPED_FIELDS: &'static [&'static str] = &["course_id", "position"];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |m: &Module, _| m.id.to_string()),
            Column::new("Course", |m: &Module, _| m.course_id.to_string()),
            Column::new("Order", |m: &Module, _| or_dash(m.position)),
            Column::new("Name", |m: &Module, lang| m.name.text(lang).to_string()),
        ]
    }
}

impl Screen for Lesson {
    const TITLE: &'static str = "Lessons";
    const LOCALIZED_FIELDS: &'static [&'static str] = &["name"];
    const TYPED_FIELDS: &'static [&'static str] = &["module_id", "duration", "is_free"];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |l: &Lesson, _| l.id.to_string()),
            Column::new("Module", |l: &Lesson, _| l.module_id.to_string()),
            Column::new("Name", |l: &Lesson, lang| l.name.text(lang).to_string()),
            Column::new("Minutes", |l: &Lesson, _| or_dash(l.duration)),
            Column::new("Free", |l: &Lesson, _| yes_no(l.is_free)),
        ]
    }
}

impl Screen for Source {
    const TITLE: &'static str = "Sources";
    const TYPED_FIELDS: &'static [&'static str] = &["lesson_id"];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |s: &Source, _| s.id.to_string()),
            Column::new("Lesson", |s: &Source, _| s.lesson_id.to_string()),
            Column::new("Type", |s: &Source, _| s.kind.clone()),
            Column::new("Name", |s: &Source, lang| s.name.text(lang).to_string()),
            Column::new("URL", |s: &Source, _| s.url.clone()).width(48),
        ]
    }

    fn validate_form(form: &FormValues, creating: bool) -> Result<()> {
        require_text(form, "url", creating)
    }
}

impl Screen for Tariff {
    const TITLE: &'static str = "Tariffs";
    const LOCALIZED_FIELDS: &'static [&'static str] = &["name"];
    const TYPED_FIELDS: &'static [&'static str] = &["duration", "price"];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |t: &Tariff, _| t.id.to_string()),
            Column::new("Name", |t: &Tariff, lang| t.name.text(lang).to_string()),
            Column::new("Months", |t: &Tariff, _| t.duration.to_string()),
            Column::new("Price", |t: &Tariff, _| money(t.price)),
        ]
    }

    /// A tariff without a duration could never be granted.
    fn validate_form(form: &FormValues, creating: bool) -> Result<()> {
        match optional_u32(form, "duration")? {
            Some(0) => bail!("duration must be at least one month"),
            None if creating => bail!("duration is required"),
            _ => Ok(()),
        }
    }
}
