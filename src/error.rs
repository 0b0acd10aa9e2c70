use std::{error::Error, fmt::Debug};

#[derive(thiserror::Error)]
pub enum CustomError {
    #[error("ENV '{0}' Not Found")]
    EnvError(String, #[source] std::env::VarError),

    #[error("ENV '{0}' has invalid value '{1}'")]
    InvalidConfig(String, String),

    #[error("Failed to read dataset")]
    DatasetError(#[source] csv::Error),

    #[error("Dataset has no records")]
    EmptyDataset,

    #[error("Dataset column '{0}' has no values")]
    MissingColumnValues(&'static str),

    #[error("Failed to read model artifact")]
    ModelReadError(#[source] std::io::Error),

    #[error("Failed to parse model artifact")]
    ModelParseError(#[source] serde_json::Error),

    #[error("Model artifact is invalid: {0}")]
    InvalidModel(String),

    #[error("Model was not trained on {column} = '{value}'")]
    UnknownCategory { column: &'static str, value: String },

    #[error("Database query")]
    DBError(#[source] sqlx::Error),

    #[error("Email already registered")]
    EmailExists,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Error hashing password")]
    HashError(#[source] bcrypt::BcryptError),

    #[error("Error encoding session token")]
    TokenError(#[source] jsonwebtoken::errors::Error),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Login required")]
    Unauthenticated,

    #[error("Missing form field '{0}'")]
    MissingField(&'static str),

    #[error("Connection error")]
    ConnectionError(#[source] std::io::Error),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Request body too large")]
    PayloadTooLarge,
}

impl Debug for CustomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        if let Some(source) = self.source() {
            write!(f, " (Caused by: {})", source)?;
        }
        Ok(())
    }
}
