/// carry-forward walk-through: consolidate prior-term debt, then
/// distribute a payment across the breakdown
use chrono::{NaiveDate, TimeZone, Utc};
use fee_ledger_rs::{
    build_carry_forward_payments, calculate_previous_balance, distribute_carry_forward_payment,
    AcademicYear, ClassScope, DistributionMode, EventStore, FeeStructure, Money, Pupil,
    PupilSnapshot, SafeTimeProvider, SectionScope, StaticSnapshotProvider, StaticUniformFees,
    Term, TimeSource,
};

fn term(id: &str, name: &str, start: NaiveDate, end: NaiveDate) -> Term {
    Term {
        id: id.to_string(),
        name: name.to_string(),
        start_date: start,
        end_date: end,
        is_current: false,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let year = AcademicYear {
        id: "2024".to_string(),
        name: "2024".to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        is_active: true,
        is_locked: false,
        terms: vec![
            term(
                "2024-t1",
                "Term 1",
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
            ),
            term(
                "2024-t2",
                "Term 2",
                NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 8, 31).unwrap(),
            ),
        ],
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

    let mut snapshots = StaticSnapshotProvider::new();
    snapshots.insert(
        "p1",
        "2024-t1",
        "2024",
        PupilSnapshot {
            class_id: "class-5".to_string(),
            section: "Blue".to_string(),
        },
    );
    let uniforms = StaticUniformFees::new();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
    ));
    let mut events = EventStore::new();

    // nothing was paid in term 1, so its tuition carries forward
    let previous = calculate_previous_balance(
        &pupil,
        "2024-t2",
        &year,
        &years,
        &[tuition],
        &[],
        &snapshots,
        &uniforms,
        &time,
        &mut events,
    )?
    .expect("term 1 tuition is outstanding");

    println!("previous balance: {}", previous.amount);
    for line in &previous.breakdown {
        println!("  {} {} {}: balance {}", line.year, line.term, line.name, line.balance);
    }

    // distribute a general payment of 40,000 proportionally
    let allocations = distribute_carry_forward_payment(
        Money::from_major(40_000),
        &DistributionMode::General,
        &previous.breakdown,
    )?;
    let records = build_carry_forward_payments(&pupil.id, &allocations, &time, &mut events);

    for record in &records {
        println!("minted payment {} for {}", record.id, record.amount);
    }
    for event in events.take_events() {
        println!("event: {:?}", event);
    }

    Ok(())
}
