use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    InvalidEmailAddress { input: String },
    InvalidBaseUrl { input: String, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidEmailAddress { input } => write!(f, "invalid email address: {input}"),
            Self::InvalidBaseUrl { input, reason } => {
                write!(f, "invalid base url {input:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
