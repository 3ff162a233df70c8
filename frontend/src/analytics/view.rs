use chrono::{NaiveDate, NaiveDateTime, TimeZone};

use super::chart::{stacked_by_purpose, totals_by_key, ChartData};
use super::filter::{FilterMode, FilterState};
use super::grouping::Granularity;
use super::local_datetime;
use super::sort::SortState;
use crate::models::Expense;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseView {
    pub chart: ChartData,
    pub rows: Vec<Expense>,
    /// Sum of `total_amount` over `rows`.
    pub total: f64,
}

pub fn build_view<Tz: TimeZone>(
    expenses: &[Expense],
    filter: &FilterState,
    sort: &SortState,
    tz: &Tz,
) -> ExpenseView {
    let dated: Vec<(&Expense, NaiveDateTime)> =
        expenses.iter().map(|e| (e, local_datetime(e, tz))).collect();

    let chart = match filter.mode {
        FilterMode::None => totals_by_key(&dated, Granularity::Date),
        FilterMode::DateRange => {
            let in_range: Vec<_> = dated
                .iter()
                .filter(|(_, at)| filter.range_contains(at.date()))
                .copied()
                .collect();
            stacked_by_purpose(&in_range)
        }
        FilterMode::YearMonthDay => {
            let matching: Vec<_> = dated
                .iter()
                .filter(|(_, at)| filter.ymd_matches(at))
                .copied()
                .collect();
            totals_by_key(&matching, filter.granularity())
        }
    };

    let mut rows: Vec<Expense> = dated
        .iter()
        .filter(|(_, at)| filter.table_includes(at))
        .filter(|(expense, at)| {
            if !filter.selected_ids.is_empty() {
                filter.selected_ids.contains(&expense.id)
            } else if let Some(key) = &filter.selected_key {
                filter.key_matches(at, key)
            } else {
                true
            }
        })
        .map(|(expense, _)| (*expense).clone())
        .collect();

    sort.apply(&mut rows);
    let total = rows.iter().map(|e| e.total_amount).sum();

    ExpenseView { chart, rows, total }
}

pub fn summary_heading(filter: &FilterState) -> String {
    if let Some(key) = &filter.selected_key {
        return format!("Expenses for {}", key);
    }
    if filter.show_range_table && filter.has_range() {
        let bound = |date: Option<NaiveDate>, open: &str| {
            date.map(|d| d.format("%-m/%-d/%Y").to_string())
                .unwrap_or_else(|| open.to_string())
        };
        return format!(
            "Expenses from {} to {}",
            bound(filter.range_from, "start"),
            bound(filter.range_to, "end")
        );
    }
    "Total Expenses".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::BarClick;
    use chrono::{FixedOffset, Utc};

    fn expense(id: &str, purpose: &str, amount: f64, rfc3339: &str) -> Expense {
        Expense {
            id: id.to_string(),
            name: id.to_string(),
            purpose: purpose.to_string(),
            description: String::new(),
            quantity: 1.0,
            price: amount,
            total_amount: amount,
            expense_date: rfc3339.parse().unwrap(),
        }
    }

    #[test]
    fn total_follows_the_displayed_rows() {
        let list = vec![
            expense("a", "Food", 10.0, "2024-01-05T09:00:00Z"),
            expense("b", "Rent", 500.0, "2024-02-01T09:00:00Z"),
            expense("c", "Food", 7.5, "2024-02-03T09:00:00Z"),
        ];
        let mut filter = FilterState::with_mode(FilterMode::YearMonthDay);
        filter.set_year(Some(2024));
        filter.select_key("February 2024".into());

        let view = build_view(&list, &filter, &SortState::default(), &Utc);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.total, 507.5);
    }

    #[test]
    fn day_of_month_key_does_not_leak_across_years() {
        let list = vec![
            expense("old", "Food", 10.0, "2023-01-05T09:00:00Z"),
            expense("new", "Food", 20.0, "2024-01-05T09:00:00Z"),
        ];
        let mut filter = FilterState::with_mode(FilterMode::YearMonthDay);
        filter.set_year(Some(2024));
        filter.set_month(Some(1));
        let chart = build_view(&list, &filter, &SortState::default(), &Utc).chart;
        assert_eq!(chart.labels, vec!["5 Jan"]);

        match chart.click(0, 0) {
            Some(BarClick::Key(key)) => filter.select_key(key),
            other => panic!("unexpected click result {:?}", other),
        }
        let view = build_view(&list, &filter, &SortState::default(), &Utc);
        let ids: Vec<_> = view.rows.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["new"]);
        assert_eq!(view.total, chart.datasets[0].values[0]);
    }

    #[test]
    fn ids_take_precedence_over_key() {
        let list = vec![
            expense("a", "Food", 10.0, "2024-01-05T09:00:00Z"),
            expense("b", "Food", 20.0, "2024-01-06T09:00:00Z"),
        ];
        let mut filter = FilterState::default();
        filter.selected_key = Some("Jan 5, 2024".into());
        filter.selected_ids = vec!["b".into()];
        let view = build_view(&list, &filter, &SortState::default(), &Utc);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].id, "b");
    }

    #[test]
    fn calendar_math_uses_the_given_zone() {
        // 20:30 UTC on Jan 5 is already Jan 6 in India.
        let list = vec![expense("a", "Food", 10.0, "2024-01-05T20:30:00Z")];
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();

        let mut filter = FilterState::with_mode(FilterMode::DateRange);
        filter.set_range_from(NaiveDate::from_ymd_opt(2024, 1, 6));
        filter.set_range_to(NaiveDate::from_ymd_opt(2024, 1, 6));

        assert_eq!(build_view(&list, &filter, &SortState::default(), &ist).rows.len(), 1);
        assert!(build_view(&list, &filter, &SortState::default(), &Utc).rows.is_empty());
    }

    #[test]
    fn empty_list_is_not_an_error() {
        let view = build_view(&[], &FilterState::default(), &SortState::default(), &Utc);
        assert!(view.chart.is_empty());
        assert!(view.rows.is_empty());
        assert_eq!(view.total, 0.0);
    }

    #[test]
    fn headings() {
        let mut filter = FilterState::with_mode(FilterMode::DateRange);
        assert_eq!(summary_heading(&filter), "Total Expenses");

        filter.set_range_from(NaiveDate::from_ymd_opt(2024, 1, 6));
        filter.show_range_table();
        assert_eq!(summary_heading(&filter), "Expenses from 1/6/2024 to end");

        filter.select_key("Jan 6, 2024".into());
        assert_eq!(summary_heading(&filter), "Expenses for Jan 6, 2024");
    }
}
