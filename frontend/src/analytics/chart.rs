use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, NaiveDateTime, TimeZone};

use super::grouping::Granularity;
use super::local_datetime;
use crate::format::{format_amount, format_quantity};
use crate::models::Expense;

pub const TOTAL_SERIES_LABEL: &str = "Total Amount (₹)";

const FILL_PALETTE: [&str; 10] = [
    "rgba(54, 162, 235, 0.6)",
    "rgba(255, 99, 132, 0.6)",
    "rgba(255, 206, 86, 0.6)",
    "rgba(75, 192, 192, 0.6)",
    "rgba(153, 102, 255, 0.6)",
    "rgba(255, 159, 64, 0.6)",
    "rgba(199, 199, 199, 0.6)",
    "rgba(83, 102, 255, 0.6)",
    "rgba(255, 99, 255, 0.6)",
    "rgba(99, 255, 132, 0.6)",
];

const BORDER_PALETTE: [&str; 10] = [
    "rgba(54, 162, 235, 1)",
    "rgba(255, 99, 132, 1)",
    "rgba(255, 206, 86, 1)",
    "rgba(75, 192, 192, 1)",
    "rgba(153, 102, 255, 1)",
    "rgba(255, 159, 64, 1)",
    "rgba(199, 199, 199, 1)",
    "rgba(83, 102, 255, 1)",
    "rgba(255, 99, 255, 1)",
    "rgba(99, 255, 132, 1)",
];

pub fn fill_color(index: usize) -> &'static str {
    FILL_PALETTE[index % FILL_PALETTE.len()]
}

pub fn border_color(index: usize) -> &'static str {
    BORDER_PALETTE[index % BORDER_PALETTE.len()]
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<f64>,
    pub color_index: usize,
}

impl Dataset {
    pub fn fill(&self) -> &'static str {
        fill_color(self.color_index)
    }

    pub fn border(&self) -> &'static str {
        border_color(self.color_index)
    }
}

/// Bar chart series plus, for every label on the axis, the expenses that
/// make up that bar.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    /// One series per purpose, stacked on each date.
    pub stacked: bool,
    pub groups: HashMap<String, Vec<Expense>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BarClick {
    Key(String),
    Ids(Vec<String>),
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn group(&self, label: &str) -> &[Expense] {
        self.groups.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn cell(&self, label_index: usize, dataset_index: usize) -> Vec<&Expense> {
        let Some(label) = self.labels.get(label_index) else {
            return Vec::new();
        };
        let group = self.group(label);
        if !self.stacked {
            return group.iter().collect();
        }
        match self.datasets.get(dataset_index) {
            Some(dataset) => group.iter().filter(|e| e.purpose == dataset.label).collect(),
            None => Vec::new(),
        }
    }

    pub fn value(&self, label_index: usize, dataset_index: usize) -> f64 {
        self.datasets
            .get(dataset_index)
            .and_then(|d| d.values.get(label_index))
            .copied()
            .unwrap_or_default()
    }

    pub fn column_total(&self, label_index: usize) -> f64 {
        self.datasets
            .iter()
            .filter_map(|d| d.values.get(label_index))
            .sum()
    }

    pub fn max_column_total(&self) -> f64 {
        (0..self.labels.len())
            .map(|i| self.column_total(i))
            .fold(0.0, f64::max)
    }

    pub fn click(&self, label_index: usize, dataset_index: usize) -> Option<BarClick> {
        let label = self.labels.get(label_index)?;
        if self.stacked {
            let ids: Vec<String> = self
                .cell(label_index, dataset_index)
                .into_iter()
                .map(|e| e.id.clone())
                .collect();
            (!ids.is_empty()).then_some(BarClick::Ids(ids))
        } else {
            Some(BarClick::Key(label.clone()))
        }
    }

    pub fn tooltip(&self, label_index: usize, dataset_index: usize) -> Vec<String> {
        let Some(label) = self.labels.get(label_index) else {
            return Vec::new();
        };
        let value = self.value(label_index, dataset_index);
        let cell = self.cell(label_index, dataset_index);

        if self.stacked {
            let purpose = self
                .datasets
                .get(dataset_index)
                .map(|d| d.label.as_str())
                .unwrap_or_default();
            if cell.is_empty() {
                return vec![format!("{}: {}", purpose, format_amount(0.0))];
            }
            let mut lines = vec![
                format!("Date: {}", label),
                format!("Purpose: {}", purpose),
                format!("Total: {}", format_amount(value)),
            ];
            for expense in &cell {
                lines.push(String::new());
                lines.push(format!("Name: {}", expense.name));
                lines.push(format!("Quantity: {}", format_quantity(expense.quantity)));
                lines.push(format!("Amount: {}", format_amount(expense.total_amount)));
            }
            if cell.len() > 1 {
                lines.push(String::new());
                lines.push("(Click to view all)".to_string());
            }
            return lines;
        }

        let mut lines = vec![format!("Total: {}", format_amount(value))];
        if let Some(first) = cell.first() {
            lines.push(String::new());
            lines.push(format!("Name: {}", first.name));
            lines.push(format!("Purpose: {}", first.purpose));
            lines.push(format!("Quantity: {}", format_quantity(first.quantity)));
            lines.push(format!("Amount: {}", format_amount(first.total_amount)));
        }
        if cell.len() > 1 {
            lines.push(String::new());
            lines.push(format!("{}+ expenses are there", cell.len() - 1));
            lines.push("(Click anywhere on bar to view all)".to_string());
        }
        lines
    }
}

/// Group rows by key, ordering keys by the earliest timestamp in each group.
fn group_in_order(
    rows: &[(&Expense, NaiveDateTime)],
    granularity: Granularity,
) -> (Vec<String>, HashMap<String, Vec<Expense>>) {
    let mut groups: HashMap<String, Vec<Expense>> = HashMap::new();
    for (expense, at) in rows {
        groups
            .entry(granularity.key(at))
            .or_default()
            .push((*expense).clone());
    }

    let mut order: Vec<(String, i64)> = groups
        .iter()
        .map(|(key, members)| {
            let earliest = members
                .iter()
                .map(|e| e.expense_date.timestamp_millis())
                .min()
                .unwrap_or_default();
            (key.clone(), earliest)
        })
        .collect();
    order.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    let labels = order.into_iter().map(|(key, _)| key).collect();
    (labels, groups)
}

pub(crate) fn totals_by_key(rows: &[(&Expense, NaiveDateTime)], granularity: Granularity) -> ChartData {
    if rows.is_empty() {
        return ChartData::default();
    }
    let (labels, groups) = group_in_order(rows, granularity);
    let values = labels
        .iter()
        .map(|label| groups[label].iter().map(|e| e.total_amount).sum())
        .collect();

    ChartData {
        labels,
        datasets: vec![Dataset {
            label: TOTAL_SERIES_LABEL.to_string(),
            values,
            color_index: 0,
        }],
        stacked: false,
        groups,
    }
}

pub(crate) fn stacked_by_purpose(rows: &[(&Expense, NaiveDateTime)]) -> ChartData {
    if rows.is_empty() {
        return ChartData::default();
    }
    let (labels, groups) = group_in_order(rows, Granularity::Date);

    let mut purposes: Vec<&str> = Vec::new();
    for (expense, _) in rows {
        if !purposes.contains(&expense.purpose.as_str()) {
            purposes.push(expense.purpose.as_str());
        }
    }

    let datasets = purposes
        .iter()
        .enumerate()
        .map(|(index, purpose)| Dataset {
            label: purpose.to_string(),
            values: labels
                .iter()
                .map(|label: &String| {
                    groups[label]
                        .iter()
                        .filter(|e| e.purpose == *purpose)
                        .map(|e| e.total_amount)
                        .sum()
                })
                .collect(),
            color_index: index,
        })
        .collect();

    ChartData {
        labels,
        datasets,
        stacked: true,
        groups,
    }
}

/// Years present in the list, newest first.
pub fn available_years<Tz: TimeZone>(expenses: &[Expense], tz: &Tz) -> Vec<i32> {
    let years: BTreeSet<i32> = expenses
        .iter()
        .map(|e| local_datetime(e, tz).year())
        .collect();
    years.into_iter().rev().collect()
}

/// Months present within `year`, or across all years when none is chosen.
pub fn available_months<Tz: TimeZone>(expenses: &[Expense], year: Option<i32>, tz: &Tz) -> Vec<u32> {
    let months: BTreeSet<u32> = expenses
        .iter()
        .map(|e| local_datetime(e, tz))
        .filter(|at| year.map_or(true, |y| at.year() == y))
        .map(|at| at.month())
        .collect();
    months.into_iter().collect()
}

/// Days present within `year` + `month`; all days unless both are chosen.
pub fn available_days<Tz: TimeZone>(
    expenses: &[Expense],
    year: Option<i32>,
    month: Option<u32>,
    tz: &Tz,
) -> Vec<u32> {
    let scope = year.zip(month);
    let days: BTreeSet<u32> = expenses
        .iter()
        .map(|e| local_datetime(e, tz))
        .filter(|at| scope.map_or(true, |(y, m)| at.year() == y && at.month() == m))
        .map(|at| at.day())
        .collect();
    days.into_iter().collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct PurposeSlice {
    pub purpose: String,
    pub total: f64,
    /// Fraction of the grand total, 0.0..=1.0.
    pub share: f64,
    pub color_index: usize,
}

pub fn purpose_breakdown(expenses: &[Expense]) -> Vec<PurposeSlice> {
    let mut slices: Vec<PurposeSlice> = Vec::new();
    for expense in expenses {
        match slices.iter_mut().find(|s| s.purpose == expense.purpose) {
            Some(slice) => slice.total += expense.total_amount,
            None => slices.push(PurposeSlice {
                purpose: expense.purpose.clone(),
                total: expense.total_amount,
                share: 0.0,
                color_index: slices.len(),
            }),
        }
    }
    let grand: f64 = slices.iter().map(|s| s.total).sum();
    if grand > 0.0 {
        for slice in &mut slices {
            slice.share = slice.total / grand;
        }
    }
    slices
}
