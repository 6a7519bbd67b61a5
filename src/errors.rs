use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("historical snapshot unavailable for pupil {pupil_id}, term {term_id}, year {academic_year_id}")]
    SnapshotUnavailable {
        pupil_id: String,
        term_id: String,
        academic_year_id: String,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount { amount: Money },

    #[error("amount exceeds outstanding balance: balance {balance}, requested {requested}")]
    AmountExceedsBalance {
        balance: Money,
        requested: Money,
    },

    #[error("target breakdown item not found: fee {fee_structure_id}, term {term_id}")]
    TargetItemNotFound {
        fee_structure_id: String,
        term_id: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
