use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of page links shown at once.
pub const PAGE_WINDOW: u32 = 5;

/// List response envelope returned by every collection endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(default)]
    pub total_page: u32,
    #[serde(default)]
    pub has_previous: bool,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T> Page<T> {
    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.total, self.limit, self.page)
    }
}

/// `page`/`limit` plus free-form filters, in the order they go on the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            filters: BTreeMap::new(),
        }
    }
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            filters: BTreeMap::new(),
        }
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.filters.insert(key.into(), value.to_string());
        self
    }

    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        pairs.extend(
            self.filters
                .iter()
                .filter(|(_, v)| !v.trim().is_empty())
                .map(|(k, v)| (k.clone(), v.trim().to_string())),
        );
        pairs
    }
}

/// Page-number arithmetic behind the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    pub total_items: u64,
    pub per_page: u32,
    current_page: u32,
}

impl Paginator {
    pub fn new(total_items: u64, per_page: u32, current_page: u32) -> Self {
        Self {
            total_items,
            per_page: per_page.max(1),
            current_page,
        }
    }

    pub fn total_pages(&self) -> u32 {
        u32::try_from(self.total_items.div_ceil(self.per_page as u64)).unwrap_or(u32::MAX)
    }

    /// Current page clamped into `1..=total_pages` (1 when there is nothing to show).
    pub fn current_page(&self) -> u32 {
        self.current_page.clamp(1, self.total_pages().max(1))
    }

    pub fn has_previous(&self) -> bool {
        self.current_page() > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page() < self.total_pages()
    }

    /// Up to `PAGE_WINDOW` consecutive page numbers around the current page.
    pub fn window(&self) -> Vec<u32> {
        let total = self.total_pages();
        if total == 0 {
            return Vec::new();
        }
        let current = self.current_page();
        let half = PAGE_WINDOW / 2;
        let mut start = current.saturating_sub(half).max(1);
        let end = (start + PAGE_WINDOW - 1).min(total);
        start = end.saturating_sub(PAGE_WINDOW - 1).max(1);
        (start..=end).collect()
    }

    /// 1-based inclusive item range shown on the current page, `(0, 0)` if empty.
    pub fn item_range(&self) -> (u64, u64) {
        if self.total_items == 0 {
            return (0, 0);
        }
        let per_page = self.per_page as u64;
        let start = (self.current_page() as u64 - 1) * per_page + 1;
        let end = (start + per_page - 1).min(self.total_items);
        (start, end)
    }

    pub fn label(&self) -> String {
        let (start, end) = self.item_range();
        format!("{}–{} of {}", start, end, self.total_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_partial_page() {
        let p = Paginator::new(25, 10, 3);
        assert_eq!(p.total_pages(), 3);
        assert_eq!(p.label(), "21–25 of 25");
        assert!(p.has_previous());
        assert!(!p.has_next());
    }

    #[test]
    fn first_page_disables_previous() {
        let p = Paginator::new(25, 10, 1);
        assert!(!p.has_previous());
        assert!(p.has_next());
        assert_eq!(p.label(), "1–10 of 25");
    }

    #[test]
    fn total_pages_is_ceiling() {
        for (total, per_page, expected) in [(0, 10, 0), (1, 10, 1), (10, 10, 1), (11, 10, 2), (99, 7, 15)] {
            assert_eq!(Paginator::new(total, per_page, 1).total_pages(), expected);
        }
    }

    #[test]
    fn page_count_saturates_instead_of_wrapping() {
        let p = Paginator::new(u64::MAX, 1, 1);
        assert_eq!(p.total_pages(), u32::MAX);
        assert!(p.has_next());

        let p = Paginator::new(u64::from(u32::MAX) + 5, 1, u32::MAX);
        assert_eq!(p.total_pages(), u32::MAX);
        assert_eq!(p.current_page(), u32::MAX);
    }

    #[test]
    fn window_is_bounded_and_contains_current() {
        for total_items in [1u64, 9, 30, 47, 120] {
            let pages = Paginator::new(total_items, 10, 1).total_pages();
            for current in 1..=pages {
                let p = Paginator::new(total_items, 10, current);
                let window = p.window();
                assert!(window.len() <= PAGE_WINDOW as usize);
                assert!(window.contains(&current), "page {} of {}", current, pages);
                assert!(window.windows(2).all(|w| w[1] == w[0] + 1));
            }
        }
    }

    #[test]
    fn window_centers_when_possible() {
        assert_eq!(Paginator::new(200, 10, 10).window(), vec![8, 9, 10, 11, 12]);
        assert_eq!(Paginator::new(200, 10, 1).window(), vec![1, 2, 3, 4, 5]);
        assert_eq!(Paginator::new(200, 10, 20).window(), vec![16, 17, 18, 19, 20]);
    }

    #[test]
    fn empty_list() {
        let p = Paginator::new(0, 10, 1);
        assert!(p.window().is_empty());
        assert_eq!(p.label(), "0–0 of 0");
        assert!(!p.has_next());
        assert!(!p.has_previous());
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let p = Paginator::new(25, 10, 9);
        assert_eq!(p.current_page(), 3);
        assert_eq!(p.label(), "21–25 of 25");
    }

    #[test]
    fn query_pairs_drop_blank_filters() {
        let query = ListQuery::new(2, 20)
            .with_filter("search", "  algebra ")
            .with_filter("subject_id", "");
        assert_eq!(
            query.pairs(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "20".to_string()),
                ("search".to_string(), "algebra".to_string()),
            ]
        );
    }

    #[test]
    fn page_envelope_deserializes() {
        let page: Page<serde_json::Value> = serde_json::from_str(
            r#"{"data":[{"id":1}],"total":1,"page":1,"limit":10,"total_page":1,"has_previous":false,"has_next":false}"#,
        )
        .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.paginator().label(), "1–1 of 1");
    }
}
