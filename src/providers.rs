use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::period::AcademicYear;
use crate::types::{AcademicYearId, ClassId, Pupil, PupilId, TermId};

/// a pupil's class/section as it stood in a prior period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PupilSnapshot {
    pub class_id: ClassId,
    pub section: String,
}

/// supplies historical class/section placements
///
/// Implementations must never fall back to the pupil's current placement:
/// a missing snapshot is an error, because a guessed placement produces a
/// plausible-looking but incorrect balance.
pub trait HistoricalSnapshotProvider {
    fn class_section_for(
        &self,
        pupil: &Pupil,
        term_id: &str,
        year: &AcademicYear,
    ) -> Result<PupilSnapshot>;
}

/// a uniform-tracking balance line, shaped like a fee fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformFeeLine {
    pub id: String,
    pub name: String,
    pub amount: Money,
    pub paid: Money,
    pub balance: Money,
    pub term_id: TermId,
    pub academic_year_id: AcademicYearId,
    pub is_required: bool,
}

/// supplies uniform-tracking fee balances
pub trait UniformFeeProvider {
    fn uniform_fees_for(
        &self,
        pupil_id: &str,
        term_id: &str,
        academic_year_id: &str,
    ) -> Vec<UniformFeeLine>;

    fn all_uniform_fees_for(&self, pupil_id: &str) -> Vec<UniformFeeLine>;
}

/// deterministic in-memory snapshot provider
#[derive(Debug, Default)]
pub struct StaticSnapshotProvider {
    snapshots: HashMap<(PupilId, TermId, AcademicYearId), PupilSnapshot>,
}

impl StaticSnapshotProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        pupil_id: &str,
        term_id: &str,
        academic_year_id: &str,
        snapshot: PupilSnapshot,
    ) {
        self.snapshots.insert(
            (
                pupil_id.to_string(),
                term_id.to_string(),
                academic_year_id.to_string(),
            ),
            snapshot,
        );
    }
}

impl HistoricalSnapshotProvider for StaticSnapshotProvider {
    fn class_section_for(
        &self,
        pupil: &Pupil,
        term_id: &str,
        year: &AcademicYear,
    ) -> Result<PupilSnapshot> {
        self.snapshots
            .get(&(pupil.id.clone(), term_id.to_string(), year.id.clone()))
            .cloned()
            .ok_or_else(|| LedgerError::SnapshotUnavailable {
                pupil_id: pupil.id.clone(),
                term_id: term_id.to_string(),
                academic_year_id: year.id.clone(),
            })
    }
}

/// deterministic in-memory uniform fee provider
#[derive(Debug, Default)]
pub struct StaticUniformFees {
    lines: HashMap<PupilId, Vec<UniformFeeLine>>,
}

impl StaticUniformFees {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pupil_id: &str, line: UniformFeeLine) {
        self.lines
            .entry(pupil_id.to_string())
            .or_default()
            .push(line);
    }
}

impl UniformFeeProvider for StaticUniformFees {
    fn uniform_fees_for(
        &self,
        pupil_id: &str,
        term_id: &str,
        academic_year_id: &str,
    ) -> Vec<UniformFeeLine> {
        self.all_uniform_fees_for(pupil_id)
            .into_iter()
            .filter(|l| l.term_id == term_id && l.academic_year_id == academic_year_id)
            .collect()
    }

    fn all_uniform_fees_for(&self, pupil_id: &str) -> Vec<UniformFeeLine> {
        self.lines.get(pupil_id).cloned().unwrap_or_default()
    }
}
