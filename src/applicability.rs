use crate::assignment::is_assignment_active;
use crate::period::AcademicYear;
use crate::types::{ClassScope, FeeStructure, Pupil, SectionScope};

/// select the fee structures that apply to a pupil in a period
///
/// Year and term matching is strict equality with no fallback; a fee
/// attributable to more than one period would corrupt carry-forward
/// figures. The pupil may be a historical reconstruction.
pub fn applicable_fees<'a>(
    fee_structures: &'a [FeeStructure],
    pupil: &Pupil,
    term_id: &str,
    year: &AcademicYear,
    all_years: &[AcademicYear],
) -> Vec<&'a FeeStructure> {
    fee_structures
        .iter()
        .filter(|fee| fee_applies(fee, pupil, term_id, year, all_years))
        .collect()
}

fn fee_applies(
    fee: &FeeStructure,
    pupil: &Pupil,
    term_id: &str,
    year: &AcademicYear,
    all_years: &[AcademicYear],
) -> bool {
    if fee.is_assignment_fee {
        let assigned = pupil
            .assignment_for(&fee.id)
            .map(|a| is_assignment_active(a, term_id, year, all_years))
            .unwrap_or(false);
        if !assigned {
            return false;
        }
    }

    // discounts are never independent line items
    if fee.is_discount() {
        return false;
    }

    if let Some(fee_year) = &fee.academic_year_id {
        if *fee_year != year.id {
            return false;
        }
    }

    if let Some(fee_term) = &fee.term_id {
        if *fee_term != term_id {
            return false;
        }
    }

    if let ClassScope::Specific(class_ids) = &fee.class_scope {
        if !class_ids.iter().any(|c| *c == pupil.class_id) {
            return false;
        }
    }

    if let SectionScope::Specific(section) = &fee.section_scope {
        if *section != pupil.section {
            return false;
        }
    }

    true
}
