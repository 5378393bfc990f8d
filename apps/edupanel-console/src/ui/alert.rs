use console::style;

use edupanel_api::messages::Alert;
use edupanel_shared::Lang;

pub fn success(message: &str) {
    println!("{} {}", style("✔").green().bold(), style(message).green());
}

pub fn info(message: &str) {
    println!("{} {}", style("ℹ").cyan(), message);
}

pub fn error(message: &str) {
    eprintln!("{} {}", style("✘").red().bold(), style(message).red());
}

pub fn notify(alert: Alert, lang: Lang) {
    match alert {
        Alert::PermissionGranted | Alert::Saved | Alert::Deleted => success(alert.text(lang)),
        Alert::NoData => info(alert.text(lang)),
        _ => error(alert.text(lang)),
    }
}

pub fn heading(title: &str) {
    println!("{}", style(title).bold().underlined());
}
