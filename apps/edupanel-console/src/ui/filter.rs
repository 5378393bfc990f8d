use std::collections::BTreeMap;

use edupanel_shared::ListQuery;

/// Parses a `key=value` filter argument.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Page number, page size and filters of a list screen.
///
/// Any filter change moves back to page 1 in the same update, so a filter
/// edit and a page change can never issue two competing loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    page: u32,
    limit: u32,
    filters: BTreeMap<String, String>,
}

impl ListState {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            filters: BTreeMap::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    pub fn go_to(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_filter(&mut self, key: &str, value: &str) {
        let value = value.trim();
        let changed = if value.is_empty() {
            self.filters.remove(key).is_some()
        } else {
            self.filters.insert(key.to_string(), value.to_string()).as_deref() != Some(value)
        };
        if changed {
            self.page = 1;
        }
    }

    pub fn set_search(&mut self, text: &str) {
        self.set_filter("search", text);
    }

    pub fn clear_filters(&mut self) {
        if !self.filters.is_empty() {
            self.filters.clear();
            self.page = 1;
        }
    }

    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            limit: self.limit,
            filters: self.filters.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filters() {
        assert_eq!(parse_key_value("subject_id=4"), Ok(("subject_id".into(), "4".into())));
        assert_eq!(parse_key_value(" name = ona tili "), Ok(("name".into(), "ona tili".into())));
        assert!(parse_key_value("broken").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn filter_change_resets_page() {
        let mut state = ListState::new(10);
        state.go_to(4);
        state.set_filter("subject_id", "2");
        assert_eq!(state.page(), 1);

        state.go_to(3);
        state.set_filter("subject_id", "2");
        assert_eq!(state.page(), 3, "same value is not a change");

        state.set_search("  ");
        assert_eq!(state.page(), 3, "blank search on no search is not a change");

        state.set_filter("subject_id", "");
        assert_eq!(state.page(), 1);
        assert!(state.filters().is_empty());
    }

    #[test]
    fn query_reflects_state() {
        let mut state = ListState::new(20);
        state.set_search("fizika");
        state.go_to(2);
        let query = state.query();
        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 20);
        assert_eq!(query.filters.get("search").map(String::as_str), Some("fizika"));
    }
}
