use chrono::{Datelike, NaiveDate, NaiveDateTime};

use super::grouping::Granularity;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    None,
    DateRange,
    YearMonthDay,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [
        FilterMode::None,
        FilterMode::DateRange,
        FilterMode::YearMonthDay,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::None => "none",
            FilterMode::DateRange => "dateRange",
            FilterMode::YearMonthDay => "yearMonthDay",
        }
    }

    pub fn from_value(s: &str) -> Self {
        match s {
            "dateRange" => FilterMode::DateRange,
            "yearMonthDay" => FilterMode::YearMonthDay,
            _ => FilterMode::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterMode::None => "No Filter",
            FilterMode::DateRange => "Date Range",
            FilterMode::YearMonthDay => "Year/Month/Day",
        }
    }
}

/// Ephemeral filter selection of the expenses page, including the refinement
/// picked by clicking a chart bar.
///
/// All mutation goes through the methods below so that changing the mode or
/// a filter value always drops any stale refinement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    pub mode: FilterMode,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub range_from: Option<NaiveDate>,
    pub range_to: Option<NaiveDate>,
    pub show_range_table: bool,
    pub selected_key: Option<String>,
    pub selected_ids: Vec<String>,
}

impl FilterState {
    pub fn with_mode(mode: FilterMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Switching mode resets every value and refinement.
    pub fn set_mode(&mut self, mode: FilterMode) {
        *self = Self::with_mode(mode);
    }

    pub fn set_year(&mut self, year: Option<i32>) {
        self.year = year;
        self.month = None;
        self.day = None;
        self.clear_selection();
    }

    pub fn set_month(&mut self, month: Option<u32>) {
        self.month = month.filter(|_| self.year.is_some());
        self.day = None;
        self.clear_selection();
    }

    pub fn set_day(&mut self, day: Option<u32>) {
        self.day = day.filter(|_| self.month.is_some());
        self.clear_selection();
    }

    pub fn set_range_from(&mut self, from: Option<NaiveDate>) {
        self.range_from = from;
        self.clear_selection();
    }

    pub fn set_range_to(&mut self, to: Option<NaiveDate>) {
        self.range_to = to;
        self.clear_selection();
    }

    /// "Clear Filters": every value goes, the mode stays.
    pub fn clear(&mut self) {
        *self = Self::with_mode(self.mode);
    }

    /// The close button on the summary card.
    pub fn clear_refinement(&mut self) {
        self.clear_selection();
        self.show_range_table = false;
    }

    pub fn show_range_table(&mut self) {
        self.show_range_table = true;
        self.clear_selection();
    }

    pub fn select_key(&mut self, key: String) {
        self.selected_key = Some(key);
        self.selected_ids.clear();
    }

    pub fn select_ids(&mut self, ids: Vec<String>) {
        self.selected_ids = ids;
        self.selected_key = None;
        if self.mode == FilterMode::DateRange {
            self.show_range_table = true;
        }
    }

    fn clear_selection(&mut self) {
        self.selected_key = None;
        self.selected_ids.clear();
    }

    pub fn has_range(&self) -> bool {
        self.range_from.is_some() || self.range_to.is_some()
    }

    pub fn has_refinement(&self) -> bool {
        self.selected_key.is_some() || !self.selected_ids.is_empty()
    }

    pub fn granularity(&self) -> Granularity {
        match self.mode {
            FilterMode::YearMonthDay => Granularity::for_selection(self.year, self.month, self.day),
            FilterMode::None | FilterMode::DateRange => Granularity::Date,
        }
    }

    /// Inclusive at day granularity; a missing bound is open.
    pub fn range_contains(&self, date: NaiveDate) -> bool {
        self.range_from.map_or(true, |from| date >= from)
            && self.range_to.map_or(true, |to| date <= to)
    }

    pub fn ymd_matches(&self, at: &NaiveDateTime) -> bool {
        self.year.map_or(true, |y| at.year() == y)
            && self.month.map_or(true, |m| at.month() == m)
            && self.day.map_or(true, |d| at.day() == d)
    }

    pub fn table_includes(&self, at: &NaiveDateTime) -> bool {
        match self.mode {
            FilterMode::DateRange => self.range_contains(at.date()),
            FilterMode::None | FilterMode::YearMonthDay => true,
        }
    }

    /// Whether an expense at `at` belongs to the bar labelled `key`.
    pub fn key_matches(&self, at: &NaiveDateTime, key: &str) -> bool {
        if self.mode == FilterMode::YearMonthDay && !self.ymd_matches(at) {
            return false;
        }
        self.granularity().key(at) == key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn refined() -> FilterState {
        let mut state = FilterState::with_mode(FilterMode::YearMonthDay);
        state.set_year(Some(2024));
        state.set_month(Some(1));
        state.select_key("5 Jan".into());
        state
    }

    #[test]
    fn switching_mode_clears_everything() {
        let mut state = refined();
        state.range_from = Some(date(2024, 1, 1));
        state.show_range_table = true;
        state.selected_ids = vec!["a".into()];

        state.set_mode(FilterMode::DateRange);
        assert_eq!(state, FilterState::with_mode(FilterMode::DateRange));
    }

    #[test]
    fn changing_a_value_drops_refinements() {
        let mut state = refined();
        state.set_day(Some(5));
        assert!(!state.has_refinement());
        assert_eq!(state.day, Some(5));

        state.select_ids(vec!["x".into()]);
        state.set_year(Some(2023));
        assert!(!state.has_refinement());
        assert_eq!((state.month, state.day), (None, None));
    }

    #[test]
    fn month_and_day_need_their_parent() {
        let mut state = FilterState::with_mode(FilterMode::YearMonthDay);
        state.set_month(Some(3));
        assert_eq!(state.month, None);
        state.set_year(Some(2024));
        state.set_day(Some(4));
        assert_eq!(state.day, None);
    }

    #[test]
    fn key_and_id_selection_are_exclusive() {
        let mut state = FilterState::with_mode(FilterMode::DateRange);
        state.select_key("Jan 5, 2024".into());
        state.select_ids(vec!["a".into(), "b".into()]);
        assert_eq!(state.selected_key, None);
        assert!(state.show_range_table);

        state.select_key("Jan 6, 2024".into());
        assert!(state.selected_ids.is_empty());
    }

    #[test]
    fn range_is_inclusive_and_open_ended() {
        let mut state = FilterState::with_mode(FilterMode::DateRange);
        state.set_range_from(Some(date(2024, 1, 6)));
        state.set_range_to(Some(date(2024, 1, 6)));
        assert!(state.range_contains(date(2024, 1, 6)));
        assert!(!state.range_contains(date(2024, 1, 5)));
        assert!(!state.range_contains(date(2024, 1, 7)));

        state.set_range_from(None);
        assert!(state.range_contains(date(1999, 1, 1)));
        assert!(!state.range_contains(date(2024, 1, 7)));
    }

    #[test]
    fn clear_keeps_the_mode() {
        let mut state = refined();
        state.clear();
        assert_eq!(state, FilterState::with_mode(FilterMode::YearMonthDay));
    }
}
