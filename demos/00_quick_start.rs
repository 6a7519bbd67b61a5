/// quick start - derive a pupil's fee state for one term
use chrono::{NaiveDate, TimeZone, Utc};
use fee_ledger_rs::{
    process_fees, AcademicYear, ClassScope, FeeStructure, Money, PaymentKind, PaymentRecord,
    Pupil, SectionScope, Term, Uuid,
};

fn main() {
    let year = AcademicYear {
        id: "2024".to_string(),
        name: "2024".to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        is_active: true,
        is_locked: false,
        terms: vec![Term {
            id: "2024-t1".to_string(),
            name: "Term 1".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
            is_current: true,
        }],
    };
    let years = vec![year.clone()];

    let tuition = FeeStructure {
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
    };

    let pupil = Pupil {
        id: "p1".to_string(),
        class_id: "class-5".to_string(),
        section: "Blue".to_string(),
        registration_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        assigned_fees: Vec::new(),
    };

    // one partial payment of 60,000 against tuition
    let payments = vec![PaymentRecord {
        id: Uuid::new_v4(),
        pupil_id: pupil.id.clone(),
        amount: Money::from_major(60_000),
        payment_date: Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap(),
        reversal: None,
        kind: PaymentKind::Regular {
            fee_structure_id: "tuition".to_string(),
            carry_forward_artifact: false,
        },
    }];

    for fee in process_fees(&pupil, &[tuition], &payments, "2024-t1", &year, &years) {
        println!(
            "{}: due {} paid {} balance {}",
            fee.name, fee.amount, fee.paid, fee.balance
        );
    }
}
