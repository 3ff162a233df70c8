use thiserror::Error;

pub const NETWORK_MESSAGE: &str =
    "Network error. Please check your internet connection and try again.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Could not decode response: {0}")]
    Decode(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

impl ApiError {
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_message(body);
        match status {
            401 | 403 => ApiError::Unauthorized { status, message },
            409 => ApiError::Conflict(message),
            400 => ApiError::BadRequest(message),
            _ => ApiError::Server { status, message },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status, .. } | ApiError::Server { status, .. } => Some(*status),
            ApiError::Conflict(_) => Some(409),
            ApiError::BadRequest(_) => Some(400),
            _ => None,
        }
    }

    /// Message sent back by the server, if it sent a non-empty one.
    pub fn server_message(&self) -> Option<&str> {
        let message = match self {
            ApiError::Unauthorized { message, .. } | ApiError::Server { message, .. } => message,
            ApiError::Conflict(message) | ApiError::BadRequest(message) => message,
            _ => return None,
        };
        (!message.is_empty()).then_some(message.as_str())
    }

    pub fn user_message(&self, operation: Operation) -> String {
        match self {
            ApiError::Validation(message) => return message.clone(),
            ApiError::Network(_) => return NETWORK_MESSAGE.to_string(),
            _ => {}
        }

        let server = self.server_message().map(str::to_string);
        match (operation, self) {
            (Operation::Signup, ApiError::Conflict(_)) => {
                "Email is already registered! Please use a different email address.".to_string()
            }
            (Operation::Signup, ApiError::BadRequest(_)) => server
                .unwrap_or_else(|| "Please check your input fields and try again.".to_string()),
            (Operation::Signin, ApiError::Unauthorized { .. }) => server.unwrap_or_else(|| {
                "Invalid email or password. Please check your credentials and try again."
                    .to_string()
            }),
            (Operation::Signin, ApiError::BadRequest(_)) => server
                .unwrap_or_else(|| "Please check your email and password format.".to_string()),
            (Operation::Signup | Operation::Signin, ApiError::Server { status: 500, .. }) => {
                server.unwrap_or_else(|| "Server error. Please try again later.".to_string())
            }
            (Operation::Signup | Operation::Signin, ApiError::Decode(_)) => {
                "An unexpected error occurred. Please try again.".to_string()
            }
            (Operation::Signup | Operation::Signin, err) => server.unwrap_or_else(|| {
                format!("Error: {}. Please try again.", err.status().unwrap_or_default())
            }),
            (op, _) => server.unwrap_or_else(|| op.fallback_message().to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Signup,
    Signin,
    GetProfile,
    UpdateProfile,
    CreateExpense,
    ReadExpenses,
    UpdateExpense,
    DeleteExpense,
}

impl Operation {
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::Signup => "Signup failed. Please try again.",
            Operation::Signin => "Sign in failed. Please try again.",
            Operation::GetProfile => "Failed to fetch profile.",
            Operation::UpdateProfile => "Failed to update profile.",
            Operation::CreateExpense => "Failed to create expense.",
            Operation::ReadExpenses => "Failed to fetch expenses.",
            Operation::UpdateExpense => "Failed to update expense.",
            Operation::DeleteExpense => "Failed to delete expense.",
        }
    }
}

/// Servers answer with a bare string, `{"message": ..}`, or a list of
/// validation messages.
fn extract_message(body: &str) -> String {
    let trimmed = body.trim();
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(serde_json::Value::Object(map)) => map
            .get("message")
            .or_else(|| map.get("error"))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        Ok(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        Ok(_) => String::new(),
        Err(_) => trimmed.to_string(),
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("Download failed: {0}")]
    Download(String),
}
