//! Client-side search, sorting, and pagination for in-memory tables.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};

/// Sort direction of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Comparable value of one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(DateTime<Utc>),
    Day(NaiveDate),
}

impl SortKey {
    pub fn text(s: &str) -> Self {
        SortKey::Text(s.to_lowercase())
    }

    pub fn opt_text(s: Option<&str>) -> Self {
        s.map(Self::text).unwrap_or(SortKey::Empty)
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Empty => 0,
            SortKey::Bool(_) => 1,
            SortKey::Number(_) => 2,
            SortKey::Day(_) => 3,
            SortKey::Date(_) => 4,
            SortKey::Text(_) => 5,
        }
    }

    /// Total order used by the table. Mixed kinds order by kind, empty first.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Day(a), SortKey::Day(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// A record that can be shown in a searchable, sortable table.
pub trait TableRow {
    /// Text the search box matches against.
    fn search_text(&self) -> String;

    /// Sort key for a column index.
    fn sort_key(&self, column: usize) -> SortKey;
}

/// Search, sort, and page state of one table.
#[derive(Debug, Clone)]
pub struct TableState {
    search: String,
    sort: Option<(usize, SortDirection)>,
    page: usize,
    page_size: usize,
}

/// Visible slice of a table after filtering, sorting, and paging.
pub struct TableView<'a, T> {
    pub rows: Vec<&'a T>,
    pub filtered: usize,
    pub total: usize,
    pub page: usize,
    pub page_count: usize,
}

impl<T> TableView<'_, T> {
    /// 1-based index range of the visible rows, `None` when nothing matches.
    pub fn range(&self, page_size: usize) -> Option<(usize, usize)> {
        if self.rows.is_empty() {
            return None;
        }
        let start = self.page * page_size + 1;
        Some((start, start + self.rows.len() - 1))
    }
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(20)
    }
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 0,
            page_size: page_size.max(1),
        }
    }

    /// Table sorted by a column from the start.
    pub fn sorted_by(mut self, column: usize, direction: SortDirection) -> Self {
        self.sort = Some((column, direction));
        self
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Mutable search text for a text box; call `search_changed` after edits.
    pub fn search_mut(&mut self) -> &mut String {
        &mut self.search
    }

    /// Replace the search text and go back to the first page.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 0;
    }

    pub fn search_changed(&mut self) {
        self.page = 0;
    }

    pub fn sort(&self) -> Option<(usize, SortDirection)> {
        self.sort
    }

    /// Sort by a column, flipping direction when it is already the sort column.
    pub fn toggle_sort(&mut self, column: usize) {
        self.sort = match self.sort {
            Some((current, dir)) if current == column => Some((column, dir.flip())),
            _ => Some((column, SortDirection::Ascending)),
        };
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn next_page(&mut self, page_count: usize) {
        if self.page + 1 < page_count {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn first_page(&mut self) {
        self.page = 0;
    }

    pub fn last_page(&mut self, page_count: usize) {
        self.page = page_count.saturating_sub(1);
    }

    /// Number of pages for a filtered row count, never less than one.
    pub fn page_count(&self, filtered: usize) -> usize {
        filtered.div_ceil(self.page_size).max(1)
    }

    /// Filter, sort, and page `rows`.
    ///
    /// Clamps the current page when the filtered set shrank.
    pub fn view<'a, T: TableRow>(&mut self, rows: &'a [T]) -> TableView<'a, T> {
        let total = rows.len();
        let needle = self.search.trim().to_lowercase();

        let mut matched: Vec<&T> = rows
            .iter()
            .filter(|row| needle.is_empty() || row.search_text().to_lowercase().contains(&needle))
            .collect();

        if let Some((column, direction)) = self.sort {
            matched.sort_by(|a, b| {
                let ord = a.sort_key(column).compare(&b.sort_key(column));
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }

        let filtered = matched.len();
        let page_count = self.page_count(filtered);
        if self.page >= page_count {
            self.page = page_count - 1;
        }

        let visible = matched
            .into_iter()
            .skip(self.page * self.page_size)
            .take(self.page_size)
            .collect();

        TableView {
            rows: visible,
            filtered,
            total,
            page: self.page,
            page_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: &'static str,
        score: Option<f64>,
    }

    impl TableRow for Item {
        fn search_text(&self) -> String {
            self.name.to_string()
        }

        fn sort_key(&self, column: usize) -> SortKey {
            match column {
                0 => SortKey::text(self.name),
                _ => self.score.map(SortKey::Number).unwrap_or(SortKey::Empty),
            }
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item { name: "Oak Primary", score: Some(3.0) },
            Item { name: "birch academy", score: None },
            Item { name: "Cedar High", score: Some(1.0) },
            Item { name: "Oakridge", score: Some(2.0) },
        ]
    }

    fn names<'a>(view: &TableView<'a, Item>) -> Vec<&'static str> {
        view.rows.iter().map(|i| i.name).collect()
    }

    #[test]
    fn test_search_case_insensitive() {
        let rows = items();
        let mut state = TableState::new(10);
        state.set_search("OAK");

        let view = state.view(&rows);
        assert_eq!(names(&view), vec!["Oak Primary", "Oakridge"]);
        assert_eq!(view.filtered, 2);
        assert_eq!(view.total, 4);
    }

    #[test]
    fn test_empty_search_matches_all() {
        let rows = items();
        let mut state = TableState::new(10);
        state.set_search("   ");
        assert_eq!(state.view(&rows).filtered, 4);
    }

    #[test]
    fn test_toggle_sort() {
        let rows = items();
        let mut state = TableState::new(10);

        state.toggle_sort(0);
        assert_eq!(
            names(&state.view(&rows)),
            vec!["birch academy", "Cedar High", "Oak Primary", "Oakridge"]
        );

        state.toggle_sort(0);
        assert_eq!(state.sort(), Some((0, SortDirection::Descending)));
        assert_eq!(
            names(&state.view(&rows)),
            vec!["Oakridge", "Oak Primary", "Cedar High", "birch academy"]
        );

        state.toggle_sort(1);
        assert_eq!(state.sort(), Some((1, SortDirection::Ascending)));
    }

    #[test]
    fn test_missing_values_sort_first() {
        let rows = items();
        let mut state = TableState::new(10).sorted_by(1, SortDirection::Ascending);
        assert_eq!(
            names(&state.view(&rows)),
            vec!["birch academy", "Cedar High", "Oakridge", "Oak Primary"]
        );
    }

    #[test]
    fn test_pagination() {
        let rows = items();
        let mut state = TableState::new(3);

        let view = state.view(&rows);
        assert_eq!(view.page_count, 2);
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.range(3), Some((1, 3)));

        state.next_page(view.page_count);
        let view = state.view(&rows);
        assert_eq!(view.page, 1);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.range(3), Some((4, 4)));

        state.next_page(view.page_count);
        assert_eq!(state.page(), 1);

        state.prev_page();
        state.prev_page();
        assert_eq!(state.page(), 0);
    }

    #[test]
    fn test_page_clamped_when_filter_shrinks() {
        let rows = items();
        let mut state = TableState::new(1);
        state.set_page(3);
        assert_eq!(state.view(&rows).page, 3);

        // Search resets to the first page
        state.set_search("cedar");
        assert_eq!(state.page(), 0);

        // Direct edits keep the page until the next view clamps it
        state.set_page(3);
        let view = state.view(&rows);
        assert_eq!(view.page, 0);
        assert_eq!(view.page_count, 1);
    }

    #[test]
    fn test_empty_table() {
        let rows: Vec<Item> = Vec::new();
        let mut state = TableState::new(10);
        let view = state.view(&rows);

        assert_eq!(view.page_count, 1);
        assert_eq!(view.range(10), None);
    }

    #[test]
    fn test_page_size_minimum() {
        let state = TableState::new(0);
        assert_eq!(state.page_size(), 1);
        assert_eq!(state.page_count(0), 1);
        assert_eq!(state.page_count(5), 5);
    }
}
