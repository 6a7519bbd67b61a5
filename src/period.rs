use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{AcademicYearId, TermId};

/// a term within an academic year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_current: bool,
}

/// an academic year with its ordered, contiguous terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicYear {
    pub id: AcademicYearId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub is_locked: bool,
    pub terms: Vec<Term>,
}

impl AcademicYear {
    pub fn term(&self, term_id: &str) -> Option<&Term> {
        self.terms.iter().find(|t| t.id == term_id)
    }

    pub fn term_index(&self, term_id: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.id == term_id)
    }
}

/// a term is valid for a pupil unless it ended before registration
pub fn term_valid_for_registration(registration_date: NaiveDate, term: &Term) -> bool {
    registration_date <= term.end_date
}

/// a year is valid for a pupil unless it ended before registration
pub fn year_valid_for_registration(registration_date: NaiveDate, year: &AcademicYear) -> bool {
    registration_date <= year.end_date
}

/// a (year, term) pair referencing the shared academic calendar
#[derive(Debug, Clone, Copy)]
pub struct PeriodRef<'a> {
    pub year: &'a AcademicYear,
    pub term: &'a Term,
}

/// enumerate every period strictly before the current one, in
/// chronological order
///
/// Within the current year this is every term with a lower index; for any
/// other year whose start date is on or before the current year's start
/// date, it is all of that year's terms. Years starting after the current
/// year are never included.
pub fn periods_before<'a>(
    current_term_id: &str,
    current_year: &AcademicYear,
    all_years: &'a [AcademicYear],
) -> Vec<PeriodRef<'a>> {
    let mut prior_years: Vec<&AcademicYear> = all_years
        .iter()
        .filter(|y| y.id == current_year.id || y.start_date <= current_year.start_date)
        .collect();
    prior_years.sort_by_key(|y| y.start_date);

    let mut periods = Vec::new();
    for year in prior_years {
        if year.id == current_year.id {
            let current_index = year.term_index(current_term_id).unwrap_or(0);
            for term in &year.terms[..current_index] {
                periods.push(PeriodRef { year, term });
            }
        } else {
            for term in &year.terms {
                periods.push(PeriodRef { year, term });
            }
        }
    }
    periods
}
