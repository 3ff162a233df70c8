use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::Expense;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Purpose,
    Quantity,
    Price,
    TotalAmount,
    #[default]
    Date,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Name,
        SortColumn::Purpose,
        SortColumn::Quantity,
        SortColumn::Price,
        SortColumn::TotalAmount,
        SortColumn::Date,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortColumn::Name => "Name",
            SortColumn::Purpose => "Purpose",
            SortColumn::Quantity => "Quantity",
            SortColumn::Price => "Price",
            SortColumn::TotalAmount => "Total Amount",
            SortColumn::Date => "Date",
        }
    }

    pub fn compare(self, a: &Expense, b: &Expense) -> Ordering {
        match self {
            SortColumn::Name => compare_text(&a.name, &b.name),
            SortColumn::Purpose => compare_text(&a.purpose, &b.purpose),
            SortColumn::Quantity => a.quantity.total_cmp(&b.quantity),
            SortColumn::Price => a.price.total_cmp(&b.price),
            SortColumn::TotalAmount => a.total_amount.total_cmp(&b.total_amount),
            SortColumn::Date => a.expense_date.cmp(&b.expense_date),
        }
    }
}

// Primary key ignores case and accents; the tie-break puts the accented
// form after the plain one.
fn compare_text(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
}

fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Asc => "Ascending",
            SortDirection::Desc => "Descending",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortState {
    /// Header click: toggle the active column, otherwise switch to `column`
    /// ascending.
    pub fn clicked(self, column: SortColumn) -> Self {
        if self.column == column {
            Self {
                column,
                direction: self.direction.toggle(),
            }
        } else {
            Self {
                column,
                direction: SortDirection::Asc,
            }
        }
    }

    pub fn is_active(&self, column: SortColumn) -> bool {
        self.column == column
    }

    pub fn indicator(&self, column: SortColumn) -> &'static str {
        if !self.is_active(column) {
            return "";
        }
        match self.direction {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }

    pub fn describe(&self) -> String {
        format!("{} ({})", self.column.label(), self.direction.label())
    }

    pub fn apply(&self, rows: &mut [Expense]) {
        let column = self.column;
        match self.direction {
            SortDirection::Asc => rows.sort_by(|a, b| column.compare(a, b)),
            SortDirection::Desc => rows.sort_by(|a, b| column.compare(b, a)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn expense(id: &str, name: &str, amount: f64, day: u32) -> Expense {
        Expense {
            id: id.to_string(),
            name: name.to_string(),
            purpose: "Misc".to_string(),
            description: String::new(),
            quantity: day as f64,
            price: amount,
            total_amount: amount,
            expense_date: Utc.with_ymd_and_hms(2024, 2, day, 8, 0, 0).unwrap(),
        }
    }

    fn ids(rows: &[Expense]) -> Vec<&str> {
        rows.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn header_clicks_toggle_or_switch() {
        let state = SortState::default();
        assert_eq!(state.column, SortColumn::Date);

        let toggled = state.clicked(SortColumn::Date);
        assert_eq!(toggled.direction, SortDirection::Desc);

        let switched = toggled.clicked(SortColumn::Name);
        assert_eq!(switched, SortState { column: SortColumn::Name, direction: SortDirection::Asc });
        assert_eq!(switched.indicator(SortColumn::Name), "↑");
        assert_eq!(switched.indicator(SortColumn::Price), "");
    }

    #[test]
    fn names_compare_case_insensitively() {
        let mut rows = vec![
            expense("1", "banana", 1.0, 1),
            expense("2", "Apple", 1.0, 2),
            expense("3", "cherry", 1.0, 3),
        ];
        SortState { column: SortColumn::Name, direction: SortDirection::Asc }.apply(&mut rows);
        assert_eq!(ids(&rows), vec!["2", "1", "3"]);
    }

    #[test]
    fn accented_names_sort_with_their_base_letter() {
        let mut rows = vec![
            expense("1", "Zebra", 1.0, 1),
            expense("2", "Éclair", 1.0, 2),
            expense("3", "apple", 1.0, 3),
            expense("4", "eclair", 1.0, 4),
        ];
        SortState { column: SortColumn::Name, direction: SortDirection::Asc }.apply(&mut rows);
        assert_eq!(ids(&rows), vec!["3", "4", "2", "1"]);
    }

    #[test]
    fn descending_is_the_reverse_of_ascending() {
        let base = vec![
            expense("1", "a", 30.0, 4),
            expense("2", "b", 10.0, 1),
            expense("3", "c", 20.0, 9),
            expense("4", "d", 15.5, 2),
        ];
        for column in SortColumn::ALL.into_iter().filter(|c| *c != SortColumn::Purpose) {
            let asc_state = SortState { column, direction: SortDirection::Asc };
            let mut asc = base.clone();
            asc_state.apply(&mut asc);
            let mut desc = base.clone();
            asc_state.clicked(column).apply(&mut desc);
            desc.reverse();
            assert_eq!(ids(&asc), ids(&desc), "column {:?}", column);
        }
    }

    #[test]
    fn amounts_sort_numerically() {
        let mut rows = vec![
            expense("1", "a", 100.0, 1),
            expense("2", "b", 9.0, 2),
            expense("3", "c", 20.0, 3),
        ];
        SortState { column: SortColumn::TotalAmount, direction: SortDirection::Desc }
            .apply(&mut rows);
        assert_eq!(ids(&rows), vec!["1", "3", "2"]);
    }
}
