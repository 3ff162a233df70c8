use chrono::NaiveDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Granularity {
    /// "2024"
    Year,
    /// "January 2024"
    Month,
    /// "5 Jan", only meaningful inside one month
    DayOfMonth,
    /// "Jan 5, 2024"
    Date,
}

impl Granularity {
    /// Pick the granularity from the year/month/day choices: the finer the
    /// selection, the finer the bars.
    pub fn for_selection(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Self {
        match (year, month, day) {
            (Some(_), Some(_), Some(_)) => Granularity::Date,
            (Some(_), Some(_), None) => Granularity::DayOfMonth,
            (Some(_), None, _) => Granularity::Month,
            (None, _, _) => Granularity::Year,
        }
    }

    pub fn key(self, at: &NaiveDateTime) -> String {
        let pattern = match self {
            Granularity::Year => "%Y",
            Granularity::Month => "%B %Y",
            Granularity::DayOfMonth => "%-d %b",
            Granularity::Date => "%b %-d, %Y",
        };
        at.format(pattern).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 30, 0).unwrap()
    }

    #[test]
    fn keys_follow_granularity() {
        let t = at(2024, 1, 5, 14);
        assert_eq!(Granularity::Year.key(&t), "2024");
        assert_eq!(Granularity::Month.key(&t), "January 2024");
        assert_eq!(Granularity::DayOfMonth.key(&t), "5 Jan");
        assert_eq!(Granularity::Date.key(&t), "Jan 5, 2024");
        assert_eq!(Granularity::Date.key(&at(2023, 12, 25, 0)), "Dec 25, 2023");
    }

    #[test]
    fn time_of_day_does_not_change_the_key() {
        for granularity in [
            Granularity::Year,
            Granularity::Month,
            Granularity::DayOfMonth,
            Granularity::Date,
        ] {
            assert_eq!(granularity.key(&at(2024, 3, 9, 0)), granularity.key(&at(2024, 3, 9, 23)));
        }
    }

    #[test]
    fn selection_precedence() {
        assert_eq!(Granularity::for_selection(Some(2024), Some(1), Some(5)), Granularity::Date);
        assert_eq!(Granularity::for_selection(Some(2024), Some(1), None), Granularity::DayOfMonth);
        assert_eq!(Granularity::for_selection(Some(2024), None, None), Granularity::Month);
        assert_eq!(Granularity::for_selection(Some(2024), None, Some(5)), Granularity::Month);
        assert_eq!(Granularity::for_selection(None, Some(1), Some(5)), Granularity::Year);
    }
}
