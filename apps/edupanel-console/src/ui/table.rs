use console::{Alignment, measure_text_width, pad_str, style};

use edupanel_shared::Lang;

const DEFAULT_MAX_WIDTH: usize = 36;
const GAP: &str = "  ";

pub type Render<R> = fn(&R, Lang) -> String;

pub struct Column<R> {
    pub title: &'static str,
    pub render: Render<R>,
    pub max_width: usize,
}

impl<R> Column<R> {
    pub fn new(title: &'static str, render: Render<R>) -> Self {
        Self {
            title,
            render,
            max_width: DEFAULT_MAX_WIDTH,
        }
    }

    pub fn width(mut self, max_width: usize) -> Self {
        self.max_width = max_width.max(3);
        self
    }
}

/// Renders rows as a fixed-width text table. Cells wider than their column's
/// `max_width` are cut with an ellipsis; newlines inside cells are flattened.
pub fn render<R>(rows: &[R], columns: &[Column<R>], lang: Lang) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|col| (col.render)(row, lang).replace(['\n', '\r'], " "))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let content = cells.iter().map(|r| measure_text_width(&r[i])).max().unwrap_or(0);
            content.max(measure_text_width(col.title)).min(col.max_width)
        })
        .collect();

    let line = |values: Vec<&str>| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| {
                let tail = (measure_text_width(v) > *w).then_some("…");
                pad_str(v, *w, Alignment::Left, tail).into_owned()
            })
            .collect::<Vec<_>>()
            .join(GAP)
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(style(line(columns.iter().map(|c| c.title).collect())).bold().to_string());
    out.push(
        widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join(GAP),
    );
    if cells.is_empty() {
        out.push(style("(no records)").dim().to_string());
    }
    for row in &cells {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

pub fn or_dash(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "—".to_string())
}

pub fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

pub fn money(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn timestamp(value: Option<chrono::DateTime<chrono::Utc>>) -> String {
    or_dash(value.map(|v| v.format("%Y-%m-%d %H:%M")))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        id: i64,
        name: &'static str,
    }

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::new("ID", |r: &Row, _| r.id.to_string()),
            Column::new("Name", |r: &Row, _| r.name.to_string()).width(8),
        ]
    }

    fn plain(s: &str) -> String {
        console::strip_ansi_codes(s).into_owned()
    }

    #[test]
    fn aligns_columns() {
        let rows = [Row { id: 1, name: "Algebra" }, Row { id: 120, name: "Fizika" }];
        let out = plain(&render(&rows, &columns(), Lang::Uz));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID   Name");
        assert_eq!(lines[2], "1    Algebra");
        assert_eq!(lines[3], "120  Fizika");
    }

    #[test]
    fn truncates_long_cells() {
        let rows = [Row { id: 1, name: "Oliy matematika asoslari" }];
        let out = plain(&render(&rows, &columns(), Lang::Uz));
        let last = out.lines().last().unwrap();
        assert!(last.ends_with('…'), "{}", last);
        assert_eq!(measure_text_width(last), 2 + GAP.len() + 8);
    }

    #[test]
    fn cells_filling_their_column_stay_whole() {
        let columns = vec![
            Column::new("Discount", |r: &Row, _| r.id.to_string()),
            Column::new("Name", |r: &Row, _| r.name.to_string()).width(8),
        ];
        let rows = [Row { id: 15, name: "Geometry" }];
        let out = plain(&render(&rows, &columns, Lang::Uz));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Discount  Name");
        assert_eq!(lines[2], "15        Geometry");
        assert!(!out.contains('…'), "{}", out);
    }

    #[test]
    fn empty_table_says_so() {
        let out = plain(&render::<Row>(&[], &columns(), Lang::Uz));
        assert!(out.contains("(no records)"));
    }

    #[test]
    fn helpers() {
        assert_eq!(or_dash(None::<u32>), "—");
        assert_eq!(or_dash(Some(3)), "3");
        assert_eq!(money(1500.5), "1500.50");
    }
}
