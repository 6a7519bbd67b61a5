use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::decimal::Money;

use super::{PaymentKind, PaymentRecord};

/// two records within this amount difference may be the same money
const AMOUNT_TOLERANCE: Decimal = dec!(0.01);
/// two records within this many seconds may be the same money
const TIME_WINDOW_SECONDS: i64 = 60;

/// reconciled paid state for one fee
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub total_paid: Money,
    /// deduplicated payments attributed to the fee
    pub payments: Vec<PaymentRecord>,
}

/// compute total-paid and a deduplicated payment list for one fee
///
/// A carry-forward payment is recorded once against the synthetic
/// previous-balance id but logically settles a historical fee; older data
/// also contains dual-write artifacts recorded against the original fee.
/// Matching between the two is by amount and timestamp proximity, a known
/// approximation carried over from the source records, which lack a
/// stable link between the pair.
pub fn reconcile_fee_payments(fee_id: &str, payments: &[PaymentRecord]) -> Reconciliation {
    let live = || payments.iter().filter(|p| !p.is_reverted());

    let direct = live().filter(|p| {
        matches!(
            &p.kind,
            PaymentKind::Regular { fee_structure_id, carry_forward_artifact: false }
                if fee_structure_id == fee_id
        )
    });

    let carry_forward: Vec<&PaymentRecord> = live()
        .filter(|p| {
            matches!(
                &p.kind,
                PaymentKind::CarryForward { original_fee_structure_id, .. }
                    if original_fee_structure_id == fee_id
            )
        })
        .collect();

    // dual-write artifacts only count when no carry-forward counterpart
    // exists for the same money
    let legacy = live().filter(|p| {
        let is_artifact = matches!(
            &p.kind,
            PaymentKind::Regular { fee_structure_id, carry_forward_artifact: true }
                if fee_structure_id == fee_id
        );
        is_artifact && !carry_forward.iter().any(|cf| same_money(cf, p))
    });

    let mut deduplicated: Vec<PaymentRecord> = Vec::new();
    for candidate in direct.chain(carry_forward.iter().copied()).chain(legacy) {
        if deduplicated.iter().any(|kept| kept.id == candidate.id) {
            continue;
        }
        if let Some(pos) = deduplicated.iter().position(|kept| near_duplicate(kept, candidate)) {
            // prefer the carry-forward-tagged record of the pair
            if candidate.is_carry_forward_tagged() && !deduplicated[pos].is_carry_forward_tagged() {
                deduplicated[pos] = candidate.clone();
            }
            continue;
        }
        deduplicated.push(candidate.clone());
    }

    let total_paid = deduplicated.iter().map(|p| p.amount).sum();
    Reconciliation {
        total_paid,
        payments: deduplicated,
    }
}

fn same_money(a: &PaymentRecord, b: &PaymentRecord) -> bool {
    a.amount.abs_diff(b.amount) <= Money::from_decimal(AMOUNT_TOLERANCE)
        && (a.payment_date - b.payment_date).num_seconds().abs() <= TIME_WINDOW_SECONDS
}

fn near_duplicate(a: &PaymentRecord, b: &PaymentRecord) -> bool {
    same_money(a, b)
        && (a.persisted_fee_id() == b.persisted_fee_id() || a.fee_reference() == b.fee_reference())
}
