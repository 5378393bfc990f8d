use anyhow::Result;
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;

use edupanel_shared::{Lang, Localized};

/// Asks for one multilingual field, one language at a time. Every language is
/// required; current values are offered as editable defaults.
pub fn prompt_localized(field: &str, current: &Localized) -> Result<Localized> {
    let theme = ColorfulTheme::default();
    let mut value = current.clone();
    for lang in Lang::FALLBACK {
        let text: String = Input::with_theme(&theme)
            .with_prompt(format!("{} [{}]", field, lang.label()))
            .with_initial_text(current.get(lang).clone())
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("this translation is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        *value.get_mut(lang) = text.trim().to_string();
    }
    value.require_complete(field)?;
    Ok(value)
}
