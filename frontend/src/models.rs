use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(rename = "expname")]
    pub name: String,
    #[serde(rename = "exppurpose")]
    pub purpose: String,
    #[serde(rename = "expdescription", default)]
    pub description: String,
    #[serde(rename = "expquantity")]
    pub quantity: f64,
    #[serde(rename = "expprice")]
    pub price: f64,
    #[serde(rename = "exptotalAmount", default)]
    pub total_amount: f64,
    #[serde(rename = "expexpenseDate")]
    pub expense_date: DateTime<Utc>,
}

/// Body for the create and update expense endpoints. The total is computed
/// by the server.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExpensePayload {
    #[serde(rename = "expname")]
    pub name: String,
    #[serde(rename = "exppurpose")]
    pub purpose: String,
    #[serde(rename = "expdescription")]
    pub description: String,
    #[serde(rename = "expquantity")]
    pub quantity: f64,
    #[serde(rename = "expprice")]
    pub price: f64,
    #[serde(rename = "expexpenseDate")]
    pub expense_date: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(rename = "useremail")]
    pub email: String,
    #[serde(rename = "userprofileImage", default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub id: String,
    pub username: String,
    pub useremail: String,
    #[serde(rename = "userprofileImage", default)]
    pub profile_image: Option<String>,
}

impl AuthResponse {
    pub fn into_session(self) -> (User, String) {
        let user = User {
            id: self.id,
            username: self.username,
            email: self.useremail,
            profile_image: self.profile_image.filter(|s| !s.is_empty()),
        };
        (user, self.token)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProfileResponse {
    pub userid: String,
    pub username: String,
    pub useremail: String,
    #[serde(rename = "userprofileImage", default)]
    pub profile_image: Option<String>,
}

impl ProfileResponse {
    pub fn into_user(self) -> User {
        User {
            id: self.userid,
            username: self.username,
            email: self.useremail,
            profile_image: self.profile_image.filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub useremail: String,
    pub userpassword: String,
    #[serde(rename = "userprofileImage", skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SigninRequest {
    pub useremail: String,
    pub userpassword: String,
}

/// Partial profile update; empty form fields are left out of the body.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub useremail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userpassword: Option<String>,
    #[serde(rename = "userprofileImage", skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl ProfileUpdate {
    pub fn from_form(username: &str, email: &str, password: &str, profile_image: &str) -> Self {
        fn non_empty(value: &str) -> Option<String> {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Self {
            username: non_empty(username),
            useremail: non_empty(email),
            // passwords are sent as typed
            userpassword: (!password.is_empty()).then(|| password.to_string()),
            profile_image: non_empty(profile_image),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn expense_reads_backend_field_names() {
        let raw = r#"{
            "id": "e1",
            "userId": "u1",
            "expname": "Lunch",
            "exppurpose": "Food",
            "expdescription": "Team lunch",
            "expquantity": 2.0,
            "expprice": 150.5,
            "exptotalAmount": 301.0,
            "expexpenseDate": "2024-01-05T00:00:00.000+00:00",
            "createdAt": "2024-01-05T10:00:00.000+00:00"
        }"#;
        let expense: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(expense.id, "e1");
        assert_eq!(expense.purpose, "Food");
        assert_eq!(expense.total_amount, 301.0);
        assert_eq!(expense.expense_date, Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn payload_writes_backend_field_names() {
        let payload = ExpensePayload {
            name: "Taxi".into(),
            purpose: "Travel".into(),
            description: "Airport".into(),
            quantity: 1.0,
            price: 200.0,
            expense_date: Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["expname"], "Taxi");
        assert_eq!(json["expprice"], 200.0);
        assert_eq!(json["expexpenseDate"], "2024-01-06T00:00:00Z");
        assert!(json.get("exptotalAmount").is_none());
    }

    #[test]
    fn auth_response_becomes_user_and_token() {
        let raw = r#"{"token":"t0k","id":"u1","username":"asha","useremail":"a@x.io","userprofileImage":""}"#;
        let (user, token) = serde_json::from_str::<AuthResponse>(raw).unwrap().into_session();
        assert_eq!(token, "t0k");
        assert_eq!(user.email, "a@x.io");
        assert_eq!(user.profile_image, None);
    }

    #[test]
    fn profile_update_skips_blank_fields() {
        let update = ProfileUpdate::from_form("asha", "  ", "", "https://img/1.png");
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["username"], "asha");
        assert_eq!(json["userprofileImage"], "https://img/1.png");
        assert!(json.get("useremail").is_none());
        assert!(json.get("userpassword").is_none());
    }
}
