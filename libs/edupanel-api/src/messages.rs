//! Operator-facing alert texts in every console language.

use edupanel_shared::{Lang, Localized};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    NoPriceOption,
    AlreadyActive,
    CourseNotFound,
    TariffNotFound,
    InvalidDuration,
    PermissionGranted,
    SessionExpired,
    Saved,
    Deleted,
    NoData,
}

impl Alert {
    fn texts(self) -> Localized<&'static str> {
        match self {
            Alert::NoPriceOption => Localized::new(
                "Kursda ushbu tarif muddatiga mos narx varianti topilmadi",
                "У курса нет варианта цены с длительностью этого тарифа",
                "The course has no price option matching this tariff's duration",
            ),
            Alert::AlreadyActive => Localized::new(
                "Foydalanuvchida bu kurs uchun faol ruxsat allaqachon mavjud",
                "У пользователя уже есть активный доступ к этому курсу",
                "The user already has active access to this course",
            ),
            Alert::CourseNotFound => Localized::new("Kurs topilmadi", "Курс не найден", "Course not found"),
            Alert::TariffNotFound => Localized::new("Tarif topilmadi", "Тариф не найден", "Tariff not found"),
            Alert::InvalidDuration => Localized::new(
                "Tarif muddati ko'rsatilmagan",
                "У тарифа не указана длительность",
                "The tariff has no duration",
            ),
            Alert::PermissionGranted => Localized::new(
                "Kursga ruxsat berildi",
                "Доступ к курсу выдан",
                "Course access granted",
            ),
            Alert::SessionExpired => Localized::new(
                "Sessiya tugadi, qaytadan kiring",
                "Сессия истекла, войдите снова",
                "Session expired, please log in again",
            ),
            Alert::Saved => Localized::new("Saqlandi", "Сохранено", "Saved"),
            Alert::Deleted => Localized::new("O'chirildi", "Удалено", "Deleted"),
            Alert::NoData => Localized::new(
                "Tanlangan davr uchun ma'lumot yo'q",
                "Нет данных за выбранный период",
                "No data for the selected period",
            ),
        }
    }

    pub fn text(self, lang: Lang) -> &'static str {
        self.texts().text(lang)
    }
}

/// Known backend error messages that have a dedicated operator text.
pub fn recognize_backend_message(message: &str) -> Option<Alert> {
    let lower = message.to_lowercase();
    if lower.contains("price option not found") {
        Some(Alert::NoPriceOption)
    } else if lower.contains("course is still active") {
        Some(Alert::AlreadyActive)
    } else {
        None
    }
}
