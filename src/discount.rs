use serde::{Deserialize, Serialize};

use crate::assignment::is_assignment_active;
use crate::decimal::Money;
use crate::period::AcademicYear;
use crate::types::{FeeStructure, Pupil};

/// how a discount deduction was expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountKind {
    Fixed,
    Percentage,
}

/// a discount as applied to one fee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    pub name: String,
    /// the deduction in currency units, regardless of kind
    pub amount: Money,
    pub kind: DiscountKind,
}

/// outcome of discount resolution for one fee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountOutcome {
    pub final_amount: Money,
    pub discount: Option<AppliedDiscount>,
    /// pre-discount amount, present only when a discount applied
    pub original_amount: Option<Money>,
}

impl DiscountOutcome {
    fn undiscounted(amount: Money) -> Self {
        DiscountOutcome {
            final_amount: amount,
            discount: None,
            original_amount: None,
        }
    }
}

/// compute the discounted amount for a fee
///
/// A discount takes effect when the pupil holds an active assignment for
/// a discount structure linked to this fee. A negative defining amount is
/// a fixed deduction of its magnitude; a non-negative one is a percentage
/// of the original fee amount. Discounts referencing missing structures
/// are configuration inconsistency and are skipped.
pub fn resolve_discounts(
    fee: &FeeStructure,
    pupil: &Pupil,
    fee_structures: &[FeeStructure],
    term_id: &str,
    year: &AcademicYear,
    all_years: &[AcademicYear],
) -> DiscountOutcome {
    let mut applied: Vec<AppliedDiscount> = Vec::new();

    for assignment in &pupil.assigned_fees {
        let Some(structure) = fee_structures
            .iter()
            .find(|s| s.id == assignment.fee_structure_id)
        else {
            continue;
        };
        if !structure.is_discount() {
            continue;
        }
        if structure.linked_fee_id.as_deref() != Some(fee.id.as_str()) {
            continue;
        }
        if !is_assignment_active(assignment, term_id, year, all_years) {
            continue;
        }

        let (deduction, kind) = if structure.amount.is_negative() {
            (structure.amount.abs(), DiscountKind::Fixed)
        } else {
            (
                fee.amount.percentage(structure.amount.as_decimal()),
                DiscountKind::Percentage,
            )
        };
        applied.push(AppliedDiscount {
            name: structure.name.clone(),
            amount: deduction,
            kind,
        });
    }

    if applied.is_empty() {
        return DiscountOutcome::undiscounted(fee.amount);
    }

    let total_deduction: Money = applied.iter().map(|d| d.amount).sum();
    let final_amount = (fee.amount - total_deduction).max(Money::ZERO);

    // individual attribution is not preserved across multiple discounts
    let descriptor = if applied.len() == 1 {
        applied.into_iter().next().unwrap()
    } else {
        AppliedDiscount {
            name: format!("{} Discounts Applied", applied.len()),
            amount: total_deduction,
            kind: DiscountKind::Fixed,
        }
    };

    DiscountOutcome {
        final_amount,
        discount: Some(descriptor),
        original_amount: Some(fee.amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::{AssignedFee, AssignmentStatus, TermScope, ValidityRule};
    use crate::types::{ClassScope, SectionScope, DISCOUNT_CATEGORY};
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

    fn tuition() -> FeeStructure {
        FeeStructure {
            id: "tuition".to_string(),
            name: "Tuition".to_string(),
            category: "Tuition".to_string(),
            amount: Money::from_major(100_000),
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

    fn discount_structure(id: &str, amount: i64) -> FeeStructure {
        FeeStructure {
            id: id.to_string(),
            name: id.to_string(),
            category: DISCOUNT_CATEGORY.to_string(),
            amount: Money::from_major(amount),
            linked_fee_id: Some("tuition".to_string()),
            ..tuition()
        }
    }

    fn assignment(fee_structure_id: &str) -> AssignedFee {
        AssignedFee {
            fee_structure_id: fee_structure_id.to_string(),
            status: AssignmentStatus::Active,
            validity: ValidityRule::Indefinite,
            term_scope: TermScope::AllTerms,
            applicable_term_ids: Vec::new(),
        }
    }

    fn pupil_with(assignments: Vec<AssignedFee>) -> Pupil {
        Pupil {
            id: "p1".to_string(),
            class_id: "class-5".to_string(),
            section: "Blue".to_string(),
            registration_date: date(2023, 1, 10),
            assigned_fees: assignments,
        }
    }

    #[test]
    fn test_no_discount_leaves_amount_unchanged() {
        let years = vec![year("2024", 2024)];
        let fee = tuition();
        let outcome = resolve_discounts(&fee, &pupil_with(vec![]), &[fee.clone()], "t1", &years[0], &years);

        assert_eq!(outcome.final_amount, fee.amount);
        assert!(outcome.discount.is_none());
        assert!(outcome.original_amount.is_none());
    }

    #[test]
    fn test_percentage_discount() {
        let years = vec![year("2024", 2024)];
        let fee = tuition();
        let structures = vec![fee.clone(), discount_structure("scholarship", 10)];
        let pupil = pupil_with(vec![assignment("scholarship")]);

        let outcome = resolve_discounts(&fee, &pupil, &structures, "t1", &years[0], &years);
        assert_eq!(outcome.final_amount, Money::from_major(90_000));
        let d = outcome.discount.unwrap();
        assert_eq!(d.amount, Money::from_major(10_000));
        assert_eq!(d.kind, DiscountKind::Percentage);
        assert_eq!(outcome.original_amount, Some(Money::from_major(100_000)));
    }

    #[test]
    fn test_fixed_discount_from_negative_amount() {
        let years = vec![year("2024", 2024)];
        let fee = tuition();
        let structures = vec![fee.clone(), discount_structure("bursary", -25_000)];
        let pupil = pupil_with(vec![assignment("bursary")]);

        let outcome = resolve_discounts(&fee, &pupil, &structures, "t1", &years[0], &years);
        assert_eq!(outcome.final_amount, Money::from_major(75_000));
        let d = outcome.discount.unwrap();
        assert_eq!(d.amount, Money::from_major(25_000));
        assert_eq!(d.kind, DiscountKind::Fixed);
    }

    #[test]
    fn test_multiple_discounts_combine_into_fixed_descriptor() {
        let years = vec![year("2024", 2024)];
        let fee = tuition();
        let structures = vec![
            fee.clone(),
            discount_structure("scholarship", 10),
            discount_structure("bursary", -15_000),
        ];
        let pupil = pupil_with(vec![assignment("scholarship"), assignment("bursary")]);

        let outcome = resolve_discounts(&fee, &pupil, &structures, "t1", &years[0], &years);
        assert_eq!(outcome.final_amount, Money::from_major(75_000));
        let d = outcome.discount.unwrap();
        assert_eq!(d.name, "2 Discounts Applied");
        assert_eq!(d.amount, Money::from_major(25_000));
        assert_eq!(d.kind, DiscountKind::Fixed);
    }

    #[test]
    fn test_final_amount_clamped_at_zero() {
        let years = vec![year("2024", 2024)];
        let fee = tuition();
        let structures = vec![fee.clone(), discount_structure("full-waiver", -150_000)];
        let pupil = pupil_with(vec![assignment("full-waiver")]);

        let outcome = resolve_discounts(&fee, &pupil, &structures, "t1", &years[0], &years);
        assert_eq!(outcome.final_amount, Money::ZERO);
    }

    #[test]
    fn test_discount_for_other_fee_ignored() {
        let years = vec![year("2024", 2024)];
        let fee = tuition();
        let mut other = discount_structure("bus-discount", 50);
        other.linked_fee_id = Some("bus-fee".to_string());
        let structures = vec![fee.clone(), other];
        let pupil = pupil_with(vec![assignment("bus-discount")]);

        let outcome = resolve_discounts(&fee, &pupil, &structures, "t1", &years[0], &years);
        assert!(outcome.discount.is_none());
    }

    #[test]
    fn test_missing_discount_structure_skipped() {
        let years = vec![year("2024", 2024)];
        let fee = tuition();
        let pupil = pupil_with(vec![assignment("no-longer-exists")]);

        let outcome = resolve_discounts(&fee, &pupil, &[fee.clone()], "t1", &years[0], &years);
        assert_eq!(outcome.final_amount, fee.amount);
        assert!(outcome.discount.is_none());
    }

    #[test]
    fn test_inactive_assignment_window_excludes_discount() {
        let years = vec![year("2024", 2024), year("2025", 2025)];
        let fee = tuition();
        let structures = vec![fee.clone(), discount_structure("scholarship", 10)];
        let mut a = assignment("scholarship");
        a.validity = ValidityRule::SpecificYear {
            academic_year_id: "2024".to_string(),
        };
        let pupil = pupil_with(vec![a]);

        let outcome = resolve_discounts(&fee, &pupil, &structures, "t1", &years[1], &years);
        assert!(outcome.discount.is_none());
        assert_eq!(outcome.final_amount, fee.amount);
    }
}
