pub mod distribution;
pub mod reconcile;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::{AcademicYearId, FeeStructureId, PupilId, TermId};

pub use distribution::{
    build_carry_forward_payments, distribute_carry_forward_payment, Allocation, BreakdownKey,
    DistributionMode,
};
pub use reconcile::{reconcile_fee_payments, Reconciliation};

/// unique identifier for a payment record
pub type PaymentId = Uuid;

/// the fee id carry-forward payments are persisted under
pub const PREVIOUS_BALANCE_FEE_ID: &str = "previous-balance";

/// reversal marker; a reverted payment contributes zero to every balance
/// but is retained for audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reversal {
    pub reverted_by: String,
    pub reverted_at: DateTime<Utc>,
}

/// what a payment was recorded against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentKind {
    /// a payment against a concrete fee in its own term
    Regular {
        fee_structure_id: FeeStructureId,
        /// legacy dual-write artifact: the record was written against
        /// the original fee even though it settled carry-forward debt
        carry_forward_artifact: bool,
    },
    /// a payment against the consolidated previous balance, keyed back
    /// to the historical obligation it settles
    CarryForward {
        original_fee_structure_id: FeeStructureId,
        original_term: String,
        original_year: String,
        original_term_id: TermId,
        original_academic_year_id: AcademicYearId,
    },
}

/// a single recorded payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub pupil_id: PupilId,
    pub amount: Money,
    pub payment_date: DateTime<Utc>,
    pub reversal: Option<Reversal>,
    pub kind: PaymentKind,
}

impl PaymentRecord {
    pub fn is_reverted(&self) -> bool {
        self.reversal.is_some()
    }

    /// the fee id this record is persisted under
    pub fn persisted_fee_id(&self) -> &str {
        match &self.kind {
            PaymentKind::Regular {
                fee_structure_id, ..
            } => fee_structure_id,
            PaymentKind::CarryForward { .. } => PREVIOUS_BALANCE_FEE_ID,
        }
    }

    /// the concrete fee this record logically settles
    pub fn fee_reference(&self) -> &str {
        match &self.kind {
            PaymentKind::Regular {
                fee_structure_id, ..
            } => fee_structure_id,
            PaymentKind::CarryForward {
                original_fee_structure_id,
                ..
            } => original_fee_structure_id,
        }
    }

    /// whether the record carries carry-forward tagging of either form
    pub fn is_carry_forward_tagged(&self) -> bool {
        match &self.kind {
            PaymentKind::Regular {
                carry_forward_artifact,
                ..
            } => *carry_forward_artifact,
            PaymentKind::CarryForward { .. } => true,
        }
    }
}
