use serde::{Deserialize, Serialize};

use crate::applicability::applicable_fees;
use crate::carry_forward::{BreakdownLine, PreviousTermBalance};
use crate::decimal::Money;
use crate::discount::{resolve_discounts, AppliedDiscount};
use crate::payments::{reconcile_fee_payments, PaymentRecord, PREVIOUS_BALANCE_FEE_ID};use crate::period::AcademicYear;
use crate::types::{FeeStructure, FeeStructureId, Pupil};

/// one fee as it stands for a pupil in the current period; derived, never
/// persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PupilFee {
    pub fee_structure_id: FeeStructureId,
    pub name: String,
    pub category: String,
    /// the amount owed after discounts
    pub amount: Money,
    pub is_required: bool,
    pub is_recurring: bool,
    pub paid: Money,
    pub balance: Money,
    pub payments: Vec<PaymentRecord>,
    pub discount: Option<AppliedDiscount>,
    pub original_amount: Option<Money>,
    /// present only on the synthetic carry-forward fee
    pub breakdown: Option<Vec<BreakdownLine>>,
}

impl PupilFee {
    /// the consolidated previous balance presented as a fee line
    ///
    /// The carry-forward figure is already net of carry-forward payments
    /// (the calculator reconciles them against each historical fee), so
    /// the synthetic line carries no paid amount of its own.
    pub fn from_previous_balance(previous: &PreviousTermBalance) -> Self {
        PupilFee {
            fee_structure_id: PREVIOUS_BALANCE_FEE_ID.to_string(),
            name: "Previous Balance".to_string(),
            category: "Carry Forward".to_string(),
            amount: previous.amount,
            is_required: true,
            is_recurring: false,
            paid: Money::ZERO,
            balance: previous.amount,
            payments: Vec::new(),
            discount: None,
            original_amount: None,
            breakdown: Some(previous.breakdown.clone()),
        }
    }
}

/// derive the per-fee paid/balance state for the current period
///
/// Recomputed in full from raw records on every call; repeated invocation
/// with the same inputs yields identical output. No ordering among the
/// returned fees is guaranteed.
pub fn process_fees(
    pupil: &Pupil,
    fee_structures: &[FeeStructure],
    payments: &[PaymentRecord],
    term_id: &str,
    year: &AcademicYear,
    all_years: &[AcademicYear],
) -> Vec<PupilFee> {
    applicable_fees(fee_structures, pupil, term_id, year, all_years)
        .into_iter()
        .map(|fee| {
            let outcome = resolve_discounts(fee, pupil, fee_structures, term_id, year, all_years);
            let reconciled = reconcile_fee_payments(&fee.id, payments);
            let balance = (outcome.final_amount - reconciled.total_paid).max(Money::ZERO);
            PupilFee {
                fee_structure_id: fee.id.clone(),
                name: fee.name.clone(),
                category: fee.category.clone(),
                amount: outcome.final_amount,
                is_required: fee.is_required,
                is_recurring: fee.is_recurring,
                paid: reconciled.total_paid,
                balance,
                payments: reconciled.payments,
                discount: outcome.discount,
                original_amount: outcome.original_amount,
                breakdown: None,
            }
        })
        .collect()
}
