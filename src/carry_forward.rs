use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::applicability::applicable_fees;
use crate::decimal::Money;
use crate::discount::resolve_discounts;
use crate::errors::Result;
use crate::events::{EventStore, LedgerEvent};
use crate::payments::{reconcile_fee_payments, PaymentRecord};
use crate::period::{
    periods_before, term_valid_for_registration, year_valid_for_registration, AcademicYear,
};
use crate::providers::{HistoricalSnapshotProvider, UniformFeeProvider};
use crate::types::{AcademicYearId, FeeStructure, FeeStructureId, Pupil, TermId};

/// synthetic term label on the consolidated obligation
pub const PREVIOUS_TERMS_LABEL: &str = "Previous Terms";
/// synthetic year label on the consolidated obligation
pub const MULTIPLE_YEARS_LABEL: &str = "Multiple Years";

/// one historical unpaid obligation underlying the carry-forward total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub name: String,
    /// the obligation after discounts, as it stood in its own period
    pub amount: Money,
    pub paid: Money,
    pub balance: Money,
    pub term: String,
    pub year: String,
    pub fee_structure_id: FeeStructureId,
    pub term_id: TermId,
    pub academic_year_id: AcademicYearId,
}

/// consolidated unpaid balance from all prior periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviousTermBalance {
    pub amount: Money,
    pub term_name: String,
    pub year_name: String,
    pub breakdown: Vec<BreakdownLine>,
}

/// walk every period before the current one and aggregate unpaid
/// required-fee balances into one consolidated obligation
///
/// Each historical period is recomputed through the full applicability,
/// discount, and reconciliation pipeline against the pupil's placement in
/// that period, so the figure always agrees with the live configuration.
/// Periods that ended before the pupil's registration are skipped. A
/// missing historical snapshot aborts the whole computation; guessing a
/// placement would misstate money owed.
#[allow(clippy::too_many_arguments)]
pub fn calculate_previous_balance(
    pupil: &Pupil,
    current_term_id: &str,
    current_year: &AcademicYear,
    all_years: &[AcademicYear],
    fee_structures: &[FeeStructure],
    payments: &[PaymentRecord],
    snapshots: &dyn HistoricalSnapshotProvider,
    uniforms: &dyn UniformFeeProvider,
    time_provider: &SafeTimeProvider,
    events: &mut EventStore,
) -> Result<Option<PreviousTermBalance>> {
    let mut breakdown: Vec<BreakdownLine> = Vec::new();

    for period in periods_before(current_term_id, current_year, all_years) {
        if !year_valid_for_registration(pupil.registration_date, period.year)
            || !term_valid_for_registration(pupil.registration_date, period.term)
        {
            continue;
        }

        let snapshot = snapshots.class_section_for(pupil, &period.term.id, period.year)?;
        let historical = pupil.with_historical_placement(snapshot.class_id, snapshot.section);

        let fees = applicable_fees(
            fee_structures,
            &historical,
            &period.term.id,
            period.year,
            all_years,
        );
        // only required fees carry forward
        for fee in fees.into_iter().filter(|f| f.is_required) {
            let outcome = resolve_discounts(
                fee,
                &historical,
                fee_structures,
                &period.term.id,
                period.year,
                all_years,
            );
            let reconciled = reconcile_fee_payments(&fee.id, payments);
            let balance = (outcome.final_amount - reconciled.total_paid).max(Money::ZERO);
            if balance.is_positive() {
                breakdown.push(BreakdownLine {
                    name: fee.name.clone(),
                    amount: outcome.final_amount,
                    paid: reconciled.total_paid,
                    balance,
                    term: period.term.name.clone(),
                    year: period.year.name.clone(),
                    fee_structure_id: fee.id.clone(),
                    term_id: period.term.id.clone(),
                    academic_year_id: period.year.id.clone(),
                });
            }
        }

        // uniform-tracking balances merge in under the same rule
        for line in uniforms.uniform_fees_for(&pupil.id, &period.term.id, &period.year.id) {
            if line.is_required && line.balance.is_positive() {
                breakdown.push(BreakdownLine {
                    name: line.name,
                    amount: line.amount,
                    paid: line.paid,
                    balance: line.balance,
                    term: period.term.name.clone(),
                    year: period.year.name.clone(),
                    fee_structure_id: line.id,
                    term_id: line.term_id,
                    academic_year_id: line.academic_year_id,
                });
            }
        }
    }

    if breakdown.is_empty() {
        return Ok(None);
    }

    let amount: Money = breakdown.iter().map(|l| l.balance).sum();
    events.emit(LedgerEvent::CarryForwardComputed {
        pupil_id: pupil.id.clone(),
        amount,
        line_count: breakdown.len(),
        timestamp: time_provider.now(),
    });

    Ok(Some(PreviousTermBalance {
        amount,
        term_name: PREVIOUS_TERMS_LABEL.to_string(),
        year_name: MULTIPLE_YEARS_LABEL.to_string(),
        breakdown,
    }))
}
