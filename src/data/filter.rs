use std::collections::BTreeSet;

use super::model::{flag_label, Passenger, PassengerTable};

// ---------------------------------------------------------------------------
// Filter primitives
// ---------------------------------------------------------------------------

/// Sentinel entry meaning "no restriction" for a multi-select filter.
/// Its presence anywhere in a selection takes precedence over everything
/// else the user ticked.
pub const ALL_CATEGORIES: &str = "all";

/// Retain rows whose numeric value lies in the closed interval `[low, high]`.
/// Always returns a fresh table; the input is never mutated.
pub fn range_filter<F>(table: &PassengerTable, value: F, low: f64, high: f64) -> PassengerTable
where
    F: Fn(&Passenger) -> f64,
{
    let rows = table
        .passengers()
        .iter()
        .filter(|p| {
            let v = value(p);
            low <= v && v <= high
        })
        .cloned()
        .collect();
    PassengerTable::new(rows)
}

/// Retain rows whose category label is a member of `selected`. A selection
/// containing [`ALL_CATEGORIES`] is the identity.
pub fn multiselect_filter<F>(
    table: &PassengerTable,
    label: F,
    selected: &BTreeSet<String>,
) -> PassengerTable
where
    F: Fn(&Passenger) -> String,
{
    if selected.contains(ALL_CATEGORIES) {
        return table.clone();
    }
    let rows = table
        .passengers()
        .iter()
        .filter(|p| selected.contains(&label(p)))
        .cloned()
        .collect();
    PassengerTable::new(rows)
}

// ---------------------------------------------------------------------------
// FilterSelection – everything the form submits at once
// ---------------------------------------------------------------------------

/// The full set of criteria applied on submit. Ranges are closed intervals;
/// category selections hold display labels (plus possibly the `all`
/// sentinel).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    pub fare: (f64, f64),
    pub age: (f64, f64),
    pub family: (f64, f64),
    pub embark_town: BTreeSet<String>,
    pub sex: BTreeSet<String>,
    pub alone: BTreeSet<String>,
    pub class: BTreeSet<String>,
}

fn all_selected() -> BTreeSet<String> {
    BTreeSet::from([ALL_CATEGORIES.to_string()])
}

impl FilterSelection {
    /// A selection that keeps every row of `table`: ranges at the data
    /// bounds, every category on the `all` sentinel.
    pub fn unrestricted(table: &PassengerTable) -> Self {
        Self {
            fare: table.fare_bounds(),
            age: table.age_bounds(),
            family: table.family_bounds(),
            embark_town: all_selected(),
            sex: all_selected(),
            alone: all_selected(),
            class: all_selected(),
        }
    }

    /// Run the whole pipeline against `table`, producing a fresh table.
    ///
    /// The stages are independent row predicates, so the sequencing below is
    /// a convenience, not a semantic requirement; zero matching rows is a
    /// valid outcome.
    pub fn apply(&self, table: &PassengerTable) -> PassengerTable {
        let t = range_filter(table, |p| p.fare, self.fare.0, self.fare.1);
        let t = range_filter(&t, |p| p.age, self.age.0, self.age.1);
        let t = range_filter(&t, |p| p.family as f64, self.family.0, self.family.1);
        let t = multiselect_filter(&t, |p| p.embark_town.clone(), &self.embark_town);
        let t = multiselect_filter(&t, |p| p.sex.to_string(), &self.sex);
        let t = multiselect_filter(&t, |p| flag_label(p.alone).to_string(), &self.alone);
        multiselect_filter(&t, |p| p.class.to_string(), &self.class)
    }
}
