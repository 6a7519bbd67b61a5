use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::assignment::AssignedFee;
use crate::decimal::Money;

/// unique identifier for a fee structure definition
pub type FeeStructureId = String;
/// unique identifier for a pupil
pub type PupilId = String;
/// unique identifier for a class
pub type ClassId = String;
/// unique identifier for a term within an academic year
pub type TermId = String;
/// unique identifier for an academic year
pub type AcademicYearId = String;

/// sentinel category marking a fee structure as a discount definition
pub const DISCOUNT_CATEGORY: &str = "Discount";

/// which classes a fee applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClassScope {
    #[default]
    AllClasses,
    Specific(Vec<ClassId>),
}

/// which section a fee applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SectionScope {
    #[default]
    AllSections,
    Specific(String),
}

/// a billable obligation definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeStructure {
    pub id: FeeStructureId,
    pub name: String,
    /// ordinary category, or the sentinel [`DISCOUNT_CATEGORY`]
    pub category: String,
    /// positive for fees; for discounts, negative magnitude (fixed
    /// deduction) or non-negative percentage of the linked fee
    pub amount: Money,
    pub is_required: bool,
    pub is_recurring: bool,
    /// absence means the fee applies across all years
    pub academic_year_id: Option<AcademicYearId>,
    /// absence means the fee applies across all terms
    pub term_id: Option<TermId>,
    pub class_scope: ClassScope,
    pub section_scope: SectionScope,
    /// discounts only: the fee this discount reduces
    pub linked_fee_id: Option<FeeStructureId>,
    /// fee only applies when explicitly assigned to the pupil
    pub is_assignment_fee: bool,
}

impl FeeStructure {
    /// discounts are marked by the sentinel category or a negative amount
    pub fn is_discount(&self) -> bool {
        self.category == DISCOUNT_CATEGORY || self.amount.is_negative()
    }
}

/// a pupil, possibly a historical reconstruction with substituted
/// class/section for a prior period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pupil {
    pub id: PupilId,
    pub class_id: ClassId,
    pub section: String,
    /// lower bound for which periods are valid for this pupil
    pub registration_date: NaiveDate,
    pub assigned_fees: Vec<AssignedFee>,
}

impl Pupil {
    /// clone with the class/section of a prior period substituted in
    pub fn with_historical_placement(&self, class_id: ClassId, section: String) -> Pupil {
        Pupil {
            class_id,
            section,
            ..self.clone()
        }
    }

    /// the pupil's assignment for a fee structure, if any
    pub fn assignment_for(&self, fee_structure_id: &str) -> Option<&AssignedFee> {
        self.assigned_fees
            .iter()
            .find(|a| a.fee_structure_id == fee_structure_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;

    fn bare_fee(category: &str, amount: i64) -> FeeStructure {
        FeeStructure {
            id: "f1".to_string(),
            name: "Tuition".to_string(),
            category: category.to_string(),
            amount: Money::from_major(amount),
            is_required: true,
            is_recurring: true,
            academic_year_id: None,
            term_id: None,
            class_scope: ClassScope::AllClasses,
            section_scope: SectionScope::AllSections,
            linked_fee_id: None,
            is_assignment_fee: false,
        }
    }

    #[test]
    fn test_discount_detection() {
        assert!(bare_fee(DISCOUNT_CATEGORY, 10).is_discount());
        assert!(bare_fee("Tuition", -5_000).is_discount());
        assert!(!bare_fee("Tuition", 100_000).is_discount());
    }
}
