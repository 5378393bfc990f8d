use edupanel_shared::models::{About, Contact, Faq};

use super::Screen;
use crate::ui::table::{Column, or_dash};

impl Screen for Faq {
    const TITLE: &'static str = "FAQ";
    const LOCALIZED_FIELDS: &'static [&'static str] = &["question", "answer"];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |f: &Faq, _| f.id.to_string()),
            Column::new("Question", |f: &Faq, lang| f.question.text(lang).to_string()).width(40),
            Column::new("Answer", |f: &Faq, lang| f.answer.text(lang).to_string()).width(60),
        ]
    }
}

impl Screen for About {
    const TITLE: &'static str = "About";
    const LOCALIZED_FIELDS: &'static [&'static str] = &["title", "content"];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |a: &About, _| a.id.to_string()),
            Column::new("Title", |a: &About, lang| a.title.text(lang).to_string()),
            Column::new("Content", |a: &About, lang| a.content.text(lang).to_string()).width(60),
        ]
    }
}

impl Screen for Contact {
    const TITLE: &'static str = "Contacts";
    const LOCALIZED_FIELDS: &'static [&'static str] = &["address"];

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |c: &Contact, _| c.id.to_string()),
            Column::new("Phone", |c: &Contact, _| or_dash(c.phone.as_deref())),
            Column::new("Email", |c: &Contact, _| or_dash(c.email.as_deref())),
            Column::new("Address", |c: &Contact, lang| c.address.text(lang).to_string()).width(40),
            Column::new("Telegram", |c: &Contact, _| or_dash(c.telegram.as_deref())),
            Column::new("Instagram", |c: &Contact, _| or_dash(c.instagram.as_deref())),
        ]
    }
}
