//! Filtering, grouping and sorting of the expense list.
//!
//! Everything in here is pure: [`build_view`] turns the raw list plus the
//! current filter and sort state into the chart series, the table rows and
//! the displayed total. Calendar math happens in the time zone passed in,
//! which is the browser's local zone at runtime.

pub mod chart;
pub mod filter;
pub mod grouping;
pub mod sort;
pub mod view;

use chrono::{NaiveDateTime, TimeZone};

use crate::models::Expense;

pub use chart::{
    available_days, available_months, available_years, purpose_breakdown, BarClick, ChartData,
    Dataset, PurposeSlice,
};
pub use filter::{FilterMode, FilterState};
pub use grouping::Granularity;
pub use sort::{SortColumn, SortDirection, SortState};
pub use view::{build_view, summary_heading, ExpenseView};

pub fn local_datetime<Tz: TimeZone>(expense: &Expense, tz: &Tz) -> NaiveDateTime {
    expense.expense_date.with_timezone(tz).naive_local()
}
