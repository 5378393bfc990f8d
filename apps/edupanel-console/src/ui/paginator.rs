use console::style;

use edupanel_shared::Paginator;

/// One-line pagination bar: `‹ prev  1 [2] 3  next ›  11–20 of 25`.
/// Disabled controls are dimmed.
pub fn render(p: &Paginator) -> String {
    let prev = if p.has_previous() {
        style("‹ prev").to_string()
    } else {
        style("‹ prev").dim().to_string()
    };
    let next = if p.has_next() {
        style("next ›").to_string()
    } else {
        style("next ›").dim().to_string()
    };
    let current = p.current_page();
    let pages = p
        .window()
        .into_iter()
        .map(|n| {
            if n == current {
                style(format!("[{}]", n)).bold().to_string()
            } else {
                n.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!("{}  {}  {}   {}", prev, pages, next, p.label())
}
