use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{AcademicYearId, FeeStructureId, PupilId, TermId};

/// audit events emitted during ledger operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerEvent {
    CarryForwardComputed {
        pupil_id: PupilId,
        amount: Money,
        line_count: usize,
        timestamp: DateTime<Utc>,
    },
    CarryForwardPaymentAllocated {
        pupil_id: PupilId,
        fee_structure_id: FeeStructureId,
        term_id: TermId,
        academic_year_id: AcademicYearId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    StatementRendered {
        pupil_id: PupilId,
        total_due: Money,
        total_balance: Money,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<LedgerEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_events_drains_store() {
        let mut store = EventStore::new();
        store.emit(LedgerEvent::CarryForwardComputed {
            pupil_id: "p1".to_string(),
            amount: Money::from_major(40_000),
            line_count: 2,
            timestamp: Utc::now(),
        });

        assert_eq!(store.events().len(), 1);
        let drained = store.take_events();
        assert_eq!(drained.len(), 1);
        assert!(store.events().is_empty());
    }
}
