use std::collections::BTreeMap;

use thiserror::Error;

use super::model::{PassengerTable, Survival};

// ---------------------------------------------------------------------------
// Survival proportion aggregation
// ---------------------------------------------------------------------------

/// Aggregation failure, surfaced to the UI instead of being caught ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BreakdownError {
    /// Proportions of an empty table are undefined.
    #[error("no rows to aggregate")]
    EmptyTable,
}

/// Percentage share per survival label, ascending by label.
#[derive(Debug, Clone, PartialEq)]
pub struct SurvivalBreakdown {
    shares: Vec<(Survival, f64)>,
}

impl SurvivalBreakdown {
    /// `(label, percentage)` pairs; percentages are in `0..=100` and sum to
    /// 100 up to rounding.
    pub fn shares(&self) -> &[(Survival, f64)] {
        &self.shares
    }
}

/// Normalized frequency of each survival label in `table`, as percentages.
/// Labels absent from the table are absent from the result.
pub fn survival_breakdown(table: &PassengerTable) -> Result<SurvivalBreakdown, BreakdownError> {
    if table.is_empty() {
        return Err(BreakdownError::EmptyTable);
    }

    let mut counts: BTreeMap<Survival, usize> = BTreeMap::new();
    for p in table.passengers() {
        *counts.entry(p.survived).or_insert(0) += 1;
    }

    let total = table.len() as f64;
    // BTreeMap iteration gives the ascending label order directly.
    let shares = counts
        .into_iter()
        .map(|(label, count)| (label, count as f64 / total * 100.0))
        .collect();

    Ok(SurvivalBreakdown { shares })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Passenger, PassengerClass, Sex};

    fn passenger(survived: Survival) -> Passenger {
        Passenger {
            class: PassengerClass::Third,
            sex: Sex::Female,
            age: 30.0,
            family: 0,
            fare: 8.05,
            embark_town: "Southampton".to_string(),
            survived,
            alone: true,
        }
    }

    #[test]
    fn empty_table_is_an_error() {
        let err = survival_breakdown(&PassengerTable::default()).unwrap_err();
        assert_eq!(err, BreakdownError::EmptyTable);
    }

    #[test]
    fn shares_are_percentages_in_label_order() {
        let table = PassengerTable::new(vec![
            passenger(Survival::Yes),
            passenger(Survival::No),
            passenger(Survival::No),
            passenger(Survival::No),
        ]);
        let breakdown = survival_breakdown(&table).unwrap();
        assert_eq!(
            breakdown.shares(),
            &[(Survival::No, 75.0), (Survival::Yes, 25.0)]
        );

        let total: f64 = breakdown.shares().iter().map(|(_, pct)| pct).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn single_label_table_has_one_full_share() {
        let table = PassengerTable::new(vec![
            passenger(Survival::Yes),
            passenger(Survival::Yes),
        ]);
        let breakdown = survival_breakdown(&table).unwrap();
        assert_eq!(breakdown.shares(), &[(Survival::Yes, 100.0)]);
    }
}
