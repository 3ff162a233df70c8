use chrono::{DateTime, LocalResult, NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ApiError;
use crate::format::{date_input_value, parse_date_input};
use crate::models::{Expense, ExpensePayload};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

pub const REQUIRED_FIELDS: &str = "Please fill in all required fields.";
pub const INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const SHORT_USERNAME: &str = "Username must be at least 3 characters long.";
pub const SHORT_PASSWORD: &str = "Password must be at least 6 characters long.";

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn invalid(message: &str) -> ApiError {
    ApiError::Validation(message.to_string())
}

pub fn validate_signup(username: &str, email: &str, password: &str) -> Result<(), ApiError> {
    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(invalid(REQUIRED_FIELDS));
    }
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(invalid(SHORT_USERNAME));
    }
    if !is_valid_email(email) {
        return Err(invalid(INVALID_EMAIL));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(invalid(SHORT_PASSWORD));
    }
    Ok(())
}

pub fn validate_signin(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(invalid(REQUIRED_FIELDS));
    }
    if !is_valid_email(email) {
        return Err(invalid(INVALID_EMAIL));
    }
    Ok(())
}

/// Profile edits only check what was filled in.
pub fn validate_profile_update(username: &str, email: &str, password: &str) -> Result<(), ApiError> {
    let username = username.trim();
    if !username.is_empty() && username.chars().count() < MIN_USERNAME_LEN {
        return Err(invalid(SHORT_USERNAME));
    }
    let email = email.trim();
    if !email.is_empty() && !is_valid_email(email) {
        return Err(invalid(INVALID_EMAIL));
    }
    if !password.is_empty() && password.chars().count() < MIN_PASSWORD_LEN {
        return Err(invalid(SHORT_PASSWORD));
    }
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub name: String,
    pub purpose: String,
    pub description: String,
    pub quantity: String,
    pub price: String,
    pub date: String,
}

impl ExpenseForm {
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            date: date_input_value(today),
            ..Self::default()
        }
    }

    pub fn from_expense<Tz: TimeZone>(expense: &Expense, tz: &Tz) -> Self {
        Self {
            name: expense.name.clone(),
            purpose: expense.purpose.clone(),
            description: expense.description.clone(),
            quantity: expense.quantity.to_string(),
            price: expense.price.to_string(),
            date: date_input_value(expense.expense_date.with_timezone(tz).date_naive()),
        }
    }

    /// Validate the fields and build the request body. The date is sent as
    /// local midnight of the chosen day.
    pub fn to_payload<Tz: TimeZone>(&self, tz: &Tz) -> Result<ExpensePayload, ApiError> {
        let required = [
            &self.name,
            &self.purpose,
            &self.description,
            &self.quantity,
            &self.price,
            &self.date,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(invalid(REQUIRED_FIELDS));
        }

        let quantity = parse_amount(&self.quantity, "Quantity")?;
        let price = parse_amount(&self.price, "Price")?;
        let date = parse_date_input(&self.date)
            .ok_or_else(|| invalid("Please enter a valid date."))?;

        Ok(ExpensePayload {
            name: self.name.trim().to_string(),
            purpose: self.purpose.trim().to_string(),
            description: self.description.trim().to_string(),
            quantity,
            price,
            expense_date: local_midnight(date, tz)?,
        })
    }
}

fn parse_amount(raw: &str, field: &str) -> Result<f64, ApiError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ApiError::Validation(format!(
            "{} must be a non-negative number.",
            field
        ))),
    }
}

fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Result<DateTime<Utc>, ApiError> {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(at) | LocalResult::Ambiguous(at, _) => Ok(at.with_timezone(&Utc)),
        LocalResult::None => Err(invalid("Please enter a valid date.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn message(result: Result<impl std::fmt::Debug, ApiError>) -> String {
        match result {
            Err(ApiError::Validation(message)) => message,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("asha@example.com"));
        assert!(!is_valid_email("asha@example"));
        assert!(!is_valid_email("asha example@x.io"));
        assert!(!is_valid_email("@x.io"));
    }

    #[test]
    fn signup_checks_in_order() {
        assert_eq!(message(validate_signup("", "a@x.io", "secret")), REQUIRED_FIELDS);
        assert_eq!(message(validate_signup("as", "a@x.io", "secret")), SHORT_USERNAME);
        assert_eq!(message(validate_signup("asha", "a@x", "secret")), INVALID_EMAIL);
        assert_eq!(message(validate_signup("asha", "a@x.io", "12345")), SHORT_PASSWORD);
        assert!(validate_signup("asha", "a@x.io", "123456").is_ok());
    }

    #[test]
    fn signin_does_not_check_password_length() {
        assert!(validate_signin("a@x.io", "1").is_ok());
        assert_eq!(message(validate_signin("a@x.io", "")), REQUIRED_FIELDS);
        assert_eq!(message(validate_signin("nope", "pw")), INVALID_EMAIL);
    }

    #[test]
    fn profile_update_ignores_blank_fields() {
        assert!(validate_profile_update("", "", "").is_ok());
        assert_eq!(message(validate_profile_update("", "bad", "")), INVALID_EMAIL);
        assert_eq!(message(validate_profile_update("", "", "abc")), SHORT_PASSWORD);
    }

    fn filled() -> ExpenseForm {
        ExpenseForm {
            name: "Lunch".into(),
            purpose: "Food".into(),
            description: "Team lunch".into(),
            quantity: "2".into(),
            price: "150.50".into(),
            date: "2024-01-05".into(),
        }
    }

    #[test]
    fn payload_uses_local_midnight() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let payload = filled().to_payload(&ist).unwrap();
        assert_eq!(payload.quantity, 2.0);
        assert_eq!(payload.price, 150.5);
        assert_eq!(payload.expense_date.to_rfc3339(), "2024-01-04T18:30:00+00:00");
    }

    #[test]
    fn numbers_must_be_non_negative() {
        let mut form = filled();
        form.quantity = "-1".into();
        assert_eq!(message(form.to_payload(&Utc)), "Quantity must be a non-negative number.");
        form.quantity = "1".into();
        form.price = "abc".into();
        assert_eq!(message(form.to_payload(&Utc)), "Price must be a non-negative number.");
        form.price = "   ".into();
        assert_eq!(message(form.to_payload(&Utc)), REQUIRED_FIELDS);
    }

    #[test]
    fn editing_prefills_local_date() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let payload = filled().to_payload(&ist).unwrap();
        let expense = Expense {
            id: "e1".into(),
            name: payload.name,
            purpose: payload.purpose,
            description: payload.description,
            quantity: payload.quantity,
            price: payload.price,
            total_amount: 301.0,
            expense_date: payload.expense_date,
        };
        let form = ExpenseForm::from_expense(&expense, &ist);
        assert_eq!(form.date, "2024-01-05");
        assert_eq!(form.price, "150.5");
    }
}
