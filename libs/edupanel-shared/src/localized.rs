use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Uz,
    Ru,
    En,
}

impl Lang {
    /// Fallback order used when the preferred language slot is blank.
    pub const FALLBACK: [Lang; 3] = [Lang::Uz, Lang::Ru, Lang::En];

    pub fn code(self) -> &'static str {
        match self {
            Lang::Uz => "uz",
            Lang::Ru => "ru",
            Lang::En => "en",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Lang::Uz => "O'zbekcha",
            Lang::Ru => "Русский",
            Lang::En => "English",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LocalizedError {
    #[error("unknown language code '{0}' (expected uz, ru or en)")]
    UnknownLang(String),
    #[error("field '{field}' is missing translations: {}", join_langs(.missing))]
    Incomplete { field: String, missing: Vec<Lang> },
}

fn join_langs(langs: &[Lang]) -> String {
    langs.iter().map(|l| l.code()).collect::<Vec<_>>().join(", ")
}

impl FromStr for Lang {
    type Err = LocalizedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uz" => Ok(Lang::Uz),
            "ru" => Ok(Lang::Ru),
            "en" => Ok(Lang::En),
            other => Err(LocalizedError::UnknownLang(other.to_string())),
        }
    }
}

/// Values that can be empty in a translation slot.
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Blank for &str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl<T: Blank> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().is_none_or(Blank::is_blank)
    }
}

/// The same value in every supported locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized<T = String> {
    #[serde(default)]
    pub uz: T,
    #[serde(default)]
    pub ru: T,
    #[serde(default)]
    pub en: T,
}

impl<T> Localized<T> {
    pub fn new(uz: T, ru: T, en: T) -> Self {
        Self { uz, ru, en }
    }

    pub fn get(&self, lang: Lang) -> &T {
        match lang {
            Lang::Uz => &self.uz,
            Lang::Ru => &self.ru,
            Lang::En => &self.en,
        }
    }

    pub fn get_mut(&mut self, lang: Lang) -> &mut T {
        match lang {
            Lang::Uz => &mut self.uz,
            Lang::Ru => &mut self.ru,
            Lang::En => &mut self.en,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Lang, &T)> {
        Lang::FALLBACK.into_iter().map(move |lang| (lang, self.get(lang)))
    }
}

impl<T: Blank> Localized<T> {
    /// First non-blank value: `preferred`, then the fallback order.
    pub fn display(&self, preferred: Lang) -> Option<&T> {
        std::iter::once(preferred)
            .chain(Lang::FALLBACK.into_iter().filter(|l| *l != preferred))
            .map(|lang| self.get(lang))
            .find(|value| !value.is_blank())
    }

    pub fn missing(&self) -> Vec<Lang> {
        self.iter()
            .filter(|(_, value)| value.is_blank())
            .map(|(lang, _)| lang)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    pub fn require_complete(&self, field: &str) -> Result<(), LocalizedError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(LocalizedError::Incomplete {
                field: field.to_string(),
                missing,
            })
        }
    }
}

impl Localized<String> {
    pub fn text(&self, preferred: Lang) -> &str {
        self.display(preferred).map(String::as_str).unwrap_or("")
    }
}

impl Localized<&'static str> {
    pub fn text(&self, preferred: Lang) -> &'static str {
        self.display(preferred).copied().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(uz: &str, ru: &str, en: &str) -> Localized {
        Localized::new(uz.to_string(), ru.to_string(), en.to_string())
    }

    #[test]
    fn display_prefers_requested_language() {
        let field = name("Matematika", "Математика", "Mathematics");
        assert_eq!(field.text(Lang::Ru), "Математика");
        assert_eq!(field.text(Lang::En), "Mathematics");
    }

    #[test]
    fn display_falls_back_in_fixed_order() {
        let field = name("", "Математика", "Mathematics");
        assert_eq!(field.text(Lang::Uz), "Математика");

        let field = name("Matematika", "  ", "Mathematics");
        assert_eq!(field.text(Lang::Ru), "Matematika");

        let field = name("", "", "");
        assert_eq!(field.display(Lang::En), None);
        assert_eq!(field.text(Lang::En), "");
    }

    #[test]
    fn missing_lists_blank_slots() {
        let field = name("Fizika", "", " ");
        assert_eq!(field.missing(), vec![Lang::Ru, Lang::En]);
        assert!(!field.is_complete());

        let err = field.require_complete("name").unwrap_err();
        assert_eq!(err.to_string(), "field 'name' is missing translations: ru, en");
    }

    #[test]
    fn optional_slots_are_blank_when_absent() {
        let field: Localized<Option<String>> = Localized::new(Some("a".into()), None, Some("".into()));
        assert_eq!(field.missing(), vec![Lang::Ru, Lang::En]);
    }

    #[test]
    fn deserializes_partial_objects() {
        let field: Localized = serde_json::from_str(r#"{"uz":"Kimyo"}"#).unwrap();
        assert_eq!(field.uz, "Kimyo");
        assert!(field.ru.is_empty());
    }

    #[test]
    fn parses_language_codes() {
        assert_eq!(" RU ".parse::<Lang>().unwrap(), Lang::Ru);
        assert!("de".parse::<Lang>().is_err());
    }
}
