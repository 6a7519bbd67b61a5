use hourglass_rs::SafeTimeProvider;
use uuid::Uuid;

use crate::carry_forward::BreakdownLine;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::events::{EventStore, LedgerEvent};

use super::{PaymentKind, PaymentRecord};

/// identity of one breakdown line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownKey {
    pub fee_structure_id: String,
    pub term_id: String,
    pub academic_year_id: String,
}

impl BreakdownKey {
    fn matches(&self, line: &BreakdownLine) -> bool {
        self.fee_structure_id == line.fee_structure_id
            && self.term_id == line.term_id
            && self.academic_year_id == line.academic_year_id
    }
}

/// how an incoming payment spreads across the breakdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributionMode {
    /// proportional to each line's outstanding balance
    General,
    /// entirely to one line
    ItemSpecific(BreakdownKey),
}

/// one line's share of a distributed payment
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub line: BreakdownLine,
    pub amount: Money,
}

/// allocate a single payment across outstanding carry-forward items
///
/// Validation runs before any allocation: the amount must be positive,
/// an item-specific target must exist and cover the amount, and a general
/// payment must not exceed the total outstanding balance. A breakdown
/// with nothing outstanding yields an empty allocation, not an error.
/// Proportional shares round to the nearest whole unit, capped so the
/// running total never exceeds the payment.
pub fn distribute_carry_forward_payment(
    amount: Money,
    mode: &DistributionMode,
    breakdown: &[BreakdownLine],
) -> Result<Vec<Allocation>> {
    if !amount.is_positive() {
        return Err(LedgerError::InvalidPaymentAmount { amount });
    }

    match mode {
        DistributionMode::ItemSpecific(key) => {
            let Some(item) = breakdown.iter().find(|line| key.matches(line)) else {
                return Err(LedgerError::TargetItemNotFound {
                    fee_structure_id: key.fee_structure_id.clone(),
                    term_id: key.term_id.clone(),
                });
            };
            if amount > item.balance {
                return Err(LedgerError::AmountExceedsBalance {
                    balance: item.balance,
                    requested: amount,
                });
            }
            Ok(vec![Allocation {
                line: item.clone(),
                amount: amount.min(item.balance),
            }])
        }
        DistributionMode::General => {
            let total_balance: Money = breakdown.iter().map(|line| line.balance).sum();
            if total_balance.is_zero() {
                return Ok(Vec::new());
            }
            if amount > total_balance {
                return Err(LedgerError::AmountExceedsBalance {
                    balance: total_balance,
                    requested: amount,
                });
            }

            let mut remaining = amount;
            let mut allocations = Vec::new();
            for line in breakdown {
                let share = (amount * line.balance.as_decimal() / total_balance.as_decimal())
                    .round_unit()
                    .min(remaining);
                if share.is_zero() {
                    continue;
                }
                remaining -= share;
                allocations.push(Allocation {
                    line: line.clone(),
                    amount: share,
                });
            }
            Ok(allocations)
        }
    }
}

/// mint the payment records for a set of allocations
///
/// Each non-zero allocation becomes one carry-forward payment carrying
/// the originating line's identity, which the reconciler later keys off.
pub fn build_carry_forward_payments(
    pupil_id: &str,
    allocations: &[Allocation],
    time_provider: &SafeTimeProvider,
    events: &mut EventStore,
) -> Vec<PaymentRecord> {
    let now = time_provider.now();
    allocations
        .iter()
        .filter(|a| !a.amount.is_zero())
        .map(|a| {
            events.emit(LedgerEvent::CarryForwardPaymentAllocated {
                pupil_id: pupil_id.to_string(),
                fee_structure_id: a.line.fee_structure_id.clone(),
                term_id: a.line.term_id.clone(),
                academic_year_id: a.line.academic_year_id.clone(),
                amount: a.amount,
                timestamp: now,
            });
            PaymentRecord {
                id: Uuid::new_v4(),
                pupil_id: pupil_id.to_string(),
                amount: a.amount,
                payment_date: now,
                reversal: None,
                kind: PaymentKind::CarryForward {
                    original_fee_structure_id: a.line.fee_structure_id.clone(),
                    original_term: a.line.term.clone(),
                    original_year: a.line.year.clone(),
                    original_term_id: a.line.term_id.clone(),
                    original_academic_year_id: a.line.academic_year_id.clone(),
                },
            }
        })
        .collect()
}
