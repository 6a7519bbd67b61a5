use serde::{Deserialize, Serialize};

use crate::period::AcademicYear;
use crate::types::{AcademicYearId, FeeStructureId, TermId};

/// whether an assignment is in force at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentStatus {
    Active,
    Disabled,
}

/// which terms an assignment reaches, independent of its validity rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TermScope {
    #[default]
    AllTerms,
    SpecificTerms,
}

/// governs whether an assignment is live for a given period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ValidityRule {
    /// live when the target term is in the applicable list, or the
    /// assignment reaches all terms
    CurrentTerm,
    /// live for one year; no year set means any year
    CurrentYear {
        start_academic_year_id: Option<AcademicYearId>,
    },
    /// live for exactly one year
    SpecificYear { academic_year_id: AcademicYearId },
    /// live for every year whose start date falls inside the range
    YearRange {
        start_academic_year_id: AcademicYearId,
        end_academic_year_id: AcademicYearId,
    },
    /// live only for the listed terms
    SpecificTerms,
    /// always live
    #[default]
    Indefinite,
}

/// a pupil-specific activation of a fee or discount, with its own
/// validity window independent of the fee's year/term scoping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedFee {
    pub fee_structure_id: FeeStructureId,
    pub status: AssignmentStatus,
    pub validity: ValidityRule,
    pub term_scope: TermScope,
    pub applicable_term_ids: Vec<TermId>,
}

impl AssignedFee {
    fn applies_to_term(&self, term_id: &str) -> bool {
        self.applicable_term_ids.iter().any(|t| t == term_id)
    }
}

/// decide whether an assignment is active for the given term/year
///
/// The validity rule and the term scope are two independent gates; both
/// must pass. Unresolvable year ids are configuration inconsistency and
/// evaluate to false.
pub fn is_assignment_active(
    assignment: &AssignedFee,
    term_id: &str,
    year: &AcademicYear,
    all_years: &[AcademicYear],
) -> bool {
    if assignment.status == AssignmentStatus::Disabled {
        return false;
    }

    let rule_passes = match &assignment.validity {
        ValidityRule::CurrentTerm => {
            assignment.applies_to_term(term_id) || assignment.term_scope == TermScope::AllTerms
        }
        ValidityRule::CurrentYear {
            start_academic_year_id,
        } => match start_academic_year_id {
            None => true,
            Some(start) => *start == year.id,
        },
        ValidityRule::SpecificYear { academic_year_id } => *academic_year_id == year.id,
        ValidityRule::YearRange {
            start_academic_year_id,
            end_academic_year_id,
        } => {
            let start = all_years.iter().find(|y| y.id == *start_academic_year_id);
            let end = all_years.iter().find(|y| y.id == *end_academic_year_id);
            match (start, end) {
                (Some(start), Some(end)) => {
                    year.start_date >= start.start_date && year.start_date <= end.end_date
                }
                _ => false,
            }
        }
        ValidityRule::SpecificTerms => assignment.applies_to_term(term_id),
        ValidityRule::Indefinite => true,
    };

    if !rule_passes {
        return false;
    }

    // second gate: a specific-terms scope restricts every validity rule
    if assignment.term_scope == TermScope::SpecificTerms && !assignment.applies_to_term(term_id) {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn year(id: &str, start_year: i32) -> AcademicYear {
        AcademicYear {
            id: id.to_string(),
            name: id.to_string(),
            start_date: date(start_year, 1, 1),
            end_date: date(start_year, 12, 31),
            is_active: false,
            is_locked: false,
            terms: Vec::new(),
        }
    }

    fn assignment(validity: ValidityRule) -> AssignedFee {
        AssignedFee {
            fee_structure_id: "fee-1".to_string(),
            status: AssignmentStatus::Active,
            validity,
            term_scope: TermScope::AllTerms,
            applicable_term_ids: Vec::new(),
        }
    }

    #[test]
    fn test_disabled_assignment_never_active() {
        let years = vec![year("2024", 2024)];
        let mut a = assignment(ValidityRule::Indefinite);
        a.status = AssignmentStatus::Disabled;
        assert!(!is_assignment_active(&a, "t1", &years[0], &years));
    }

    #[test]
    fn test_indefinite_always_active() {
        let years = vec![year("2024", 2024)];
        let a = assignment(ValidityRule::Indefinite);
        assert!(is_assignment_active(&a, "t1", &years[0], &years));
    }

    #[test]
    fn test_current_term_rule() {
        let years = vec![year("2024", 2024)];
        let mut a = assignment(ValidityRule::CurrentTerm);
        a.term_scope = TermScope::SpecificTerms;
        a.applicable_term_ids = vec!["t2".to_string()];

        assert!(is_assignment_active(&a, "t2", &years[0], &years));
        assert!(!is_assignment_active(&a, "t1", &years[0], &years));
    }

    #[test]
    fn test_current_year_without_start_matches_any_year() {
        let years = vec![year("2024", 2024), year("2025", 2025)];
        let a = assignment(ValidityRule::CurrentYear {
            start_academic_year_id: None,
        });
        assert!(is_assignment_active(&a, "t1", &years[0], &years));
        assert!(is_assignment_active(&a, "t1", &years[1], &years));
    }

    #[test]
    fn test_specific_year_exact_match_only() {
        let years = vec![year("2024", 2024), year("2025", 2025)];
        let a = assignment(ValidityRule::SpecificYear {
            academic_year_id: "2024".to_string(),
        });
        assert!(is_assignment_active(&a, "t1", &years[0], &years));
        assert!(!is_assignment_active(&a, "t1", &years[1], &years));
    }

    #[test]
    fn test_year_range_inclusive() {
        let years = vec![year("2023", 2023), year("2024", 2024), year("2025", 2025)];
        let a = assignment(ValidityRule::YearRange {
            start_academic_year_id: "2023".to_string(),
            end_academic_year_id: "2024".to_string(),
        });
        assert!(is_assignment_active(&a, "t1", &years[0], &years));
        assert!(is_assignment_active(&a, "t1", &years[1], &years));
        assert!(!is_assignment_active(&a, "t1", &years[2], &years));
    }

    #[test]
    fn test_year_range_with_missing_year_is_inactive() {
        let years = vec![year("2024", 2024)];
        let a = assignment(ValidityRule::YearRange {
            start_academic_year_id: "gone".to_string(),
            end_academic_year_id: "2024".to_string(),
        });
        assert!(!is_assignment_active(&a, "t1", &years[0], &years));
    }

    #[test]
    fn test_specific_terms_scope_layers_on_top_of_rule() {
        let years = vec![year("2024", 2024)];
        let mut a = assignment(ValidityRule::Indefinite);
        a.term_scope = TermScope::SpecificTerms;
        a.applicable_term_ids = vec!["t3".to_string()];

        // rule passes, scope gate does not
        assert!(!is_assignment_active(&a, "t1", &years[0], &years));
        assert!(is_assignment_active(&a, "t3", &years[0], &years));
    }
}
