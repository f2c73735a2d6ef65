use thiserror::Error;

#[derive(Error, Debug)]
pub enum BudgetGridError {
    #[error("Invalid fiscal year start month {0}: must be between 1 and 12")]
    InvalidFiscalStartMonth(u32),

    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    #[error("Unknown period '{period}' for account '{account}'")]
    UnknownPeriod { account: String, period: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BudgetGridError>;
