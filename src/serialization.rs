/// serialization support for fee statements
use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::carry_forward::{BreakdownLine, PreviousTermBalance};
use crate::decimal::Money;
use crate::events::{EventStore, LedgerEvent};
use crate::processor::PupilFee;
use crate::types::{Pupil, PupilId};

/// serializable view of a pupil's computed fee state
#[derive(Debug, Serialize, Deserialize)]
pub struct StatementView {
    pub pupil_id: PupilId,
    pub class_id: String,
    pub section: String,
    pub generated_at: DateTime<Utc>,
    pub fees: Vec<FeeLineView>,
    pub previous_balance: Option<PreviousBalanceView>,
    pub totals: TotalsView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeeLineView {
    pub name: String,
    pub category: String,
    pub amount: Money,
    pub paid: Money,
    pub balance: Money,
    pub discount_name: Option<String>,
    pub discount_amount: Option<Money>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreviousBalanceView {
    pub amount: Money,
    pub term: String,
    pub year: String,
    pub breakdown: Vec<BreakdownLine>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TotalsView {
    pub total_due: Money,
    pub total_paid: Money,
    pub total_balance: Money,
}

impl StatementView {
    pub fn from_ledger(
        pupil: &Pupil,
        fees: &[PupilFee],
        previous_balance: Option<&PreviousTermBalance>,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Self {
        let fee_lines: Vec<FeeLineView> = fees
            .iter()
            .map(|f| FeeLineView {
                name: f.name.clone(),
                category: f.category.clone(),
                amount: f.amount,
                paid: f.paid,
                balance: f.balance,
                discount_name: f.discount.as_ref().map(|d| d.name.clone()),
                discount_amount: f.discount.as_ref().map(|d| d.amount),
            })
            .collect();

        let carried: Money = previous_balance.map(|p| p.amount).unwrap_or(Money::ZERO);
        let total_due: Money = fee_lines.iter().map(|f| f.amount).sum::<Money>() + carried;
        let total_paid: Money = fee_lines.iter().map(|f| f.paid).sum();
        let total_balance: Money = fee_lines.iter().map(|f| f.balance).sum::<Money>() + carried;

        let generated_at = time_provider.now();
        events.emit(LedgerEvent::StatementRendered {
            pupil_id: pupil.id.clone(),
            total_due,
            total_balance,
            timestamp: generated_at,
        });

        StatementView {
            pupil_id: pupil.id.clone(),
            class_id: pupil.class_id.clone(),
            section: pupil.section.clone(),
            generated_at,
            fees: fee_lines,
            previous_balance: previous_balance.map(|p| PreviousBalanceView {
                amount: p.amount,
                term: p.term_name.clone(),
                year: p.year_name.clone(),
                breakdown: p.breakdown.clone(),
            }),
            totals: TotalsView {
                total_due,
                total_paid,
                total_balance,
            },
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
