pub mod applicability;
pub mod assignment;
pub mod carry_forward;
pub mod decimal;
pub mod discount;
pub mod errors;
pub mod events;
pub mod payments;
pub mod period;
pub mod processor;
pub mod providers;
pub mod serialization;
pub mod types;

// re-export key types
pub use applicability::applicable_fees;
pub use assignment::{
    is_assignment_active, AssignedFee, AssignmentStatus, TermScope, ValidityRule,
};
pub use carry_forward::{
    calculate_previous_balance, BreakdownLine, PreviousTermBalance, MULTIPLE_YEARS_LABEL,
    PREVIOUS_TERMS_LABEL,
};
pub use decimal::Money;
pub use discount::{resolve_discounts, AppliedDiscount, DiscountKind, DiscountOutcome};
pub use errors::{LedgerError, Result};
pub use events::{EventStore, LedgerEvent};
pub use payments::{
    build_carry_forward_payments, distribute_carry_forward_payment, reconcile_fee_payments,
    Allocation, BreakdownKey, DistributionMode, PaymentId, PaymentKind, PaymentRecord,
    Reconciliation, Reversal, PREVIOUS_BALANCE_FEE_ID,
};
pub use period::{periods_before, AcademicYear, PeriodRef, Term};
pub use processor::{process_fees, PupilFee};
pub use providers::{
    HistoricalSnapshotProvider, PupilSnapshot, StaticSnapshotProvider, StaticUniformFees,
    UniformFeeLine, UniformFeeProvider,
};
pub use serialization::{FeeLineView, PreviousBalanceView, StatementView, TotalsView};
pub use types::{
    AcademicYearId, ClassId, ClassScope, FeeStructure, FeeStructureId, Pupil, PupilId,
    SectionScope, TermId, DISCOUNT_CATEGORY,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
