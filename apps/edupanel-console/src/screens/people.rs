use anyhow::Result;

use edupanel_shared::models::{Teacher, User};

use super::{Screen, require_text};
use crate::ui::form::FormValues;
use crate::ui::table::{Column, or_dash, timestamp, yes_no};

impl Screen for Teacher {
    const TITLE: &'static str = "Teachers";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |t: &Teacher, _| t.id.to_string()),
            Column::new("Full name", |t: &Teacher, _| t.full_name.clone()),
            Column::new("Phone", |t: &Teacher, _| or_dash(t.phone.as_deref())),
            Column::new("Bio", |t: &Teacher, lang| t.bio.text(lang).to_string()).width(48),
        ]
    }

    fn validate_form(form: &FormValues, creating: bool) -> Result<()> {
        require_text(form, "full_name", creating)
    }
}

impl Screen for User {
    const TITLE: &'static str = "Users";
    const TYPED_FIELDS: &'static [&'static str] = &["is_active"];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |u: &User, _| u.id.to_string()),
            Column::new("Name", |u: &User, _| u.display_name()),
            Column::new("Phone", |u: &User, _| or_dash(u.phone.as_deref())),
            Column::new("Email", |u: &User, _| or_dash(u.email.as_deref())),
            Column::new("Role", |u: &User, _| or_dash(u.role.as_deref())),
            Column::new("Active", |u: &User, _| yes_no(u.is_active)),
            Column::new("Joined", |u: &User, _| timestamp(u.created_at)),
        ]
    }
}
