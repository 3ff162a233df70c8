use chrono::{DateTime, NaiveDate, TimeZone, Utc};

pub const RUPEE: &str = "₹";

/// Digit grouping as used for Indian rupees: the last three digits, then
/// pairs ("12,34,567").
fn group_digits(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    if chars.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = chars.split_at(chars.len() - 3);
    let mut out = Vec::new();
    for (i, ch) in head.iter().rev().enumerate() {
        if i > 0 && i % 2 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    let head: String = out.into_iter().rev().collect();
    format!("{},{}", head, tail.iter().collect::<String>())
}

pub fn format_plain_amount(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, group_digits(int_part), dec_part)
}

pub fn format_amount(amount: f64) -> String {
    let plain = format_plain_amount(amount);
    match plain.strip_prefix('-') {
        Some(rest) => format!("-{}{}", RUPEE, rest),
        None => format!("{}{}", RUPEE, plain),
    }
}

pub fn format_quantity(quantity: f64) -> String {
    let fixed = format!("{:.2}", quantity);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

pub fn format_local_date<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> String {
    format_date(at.with_timezone(tz).date_naive())
}

pub fn date_input_value(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    month
        .checked_sub(1)
        .and_then(|i| NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_use_indian_grouping() {
        assert_eq!(format_amount(175.0), "₹175.00");
        assert_eq!(format_amount(1234.5), "₹1,234.50");
        assert_eq!(format_amount(1234567.0), "₹12,34,567.00");
        assert_eq!(format_plain_amount(100000.0), "1,00,000.00");
        assert_eq!(format_amount(-2500.0), "-₹2,500.00");
        assert_eq!(format_amount(-0.001), "₹0.00");
    }

    #[test]
    fn quantities_drop_trailing_zeros() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(format_quantity(0.25), "0.25");
        assert_eq!(format_quantity(0.0), "0");
    }

    #[test]
    fn date_inputs() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        assert_eq!(date_input_value(date), "2024-01-06");
        assert_eq!(parse_date_input("2024-01-06"), Some(date));
        assert_eq!(parse_date_input(""), None);
        assert_eq!(format_date(date), "1/6/2024");
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
    }
}
