use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    MissingSender,
    InvalidPhoneNumber { input: String },
    InvalidUrl { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::MissingSender => {
                write!(
                    f,
                    "no sender id: the message has none and the client has no default"
                )
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidUrl { input } => write!(f, "invalid gateway url: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}
