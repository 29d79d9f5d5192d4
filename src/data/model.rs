use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Categorical field types
// ---------------------------------------------------------------------------

/// Travel class, ordinal: 1st < 2nd < 3rd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PassengerClass {
    First,
    Second,
    Third,
}

impl PassengerClass {
    /// Parse from the raw `pclass` column (1, 2 or 3).
    pub fn from_raw(pclass: u8) -> Option<Self> {
        match pclass {
            1 => Some(PassengerClass::First),
            2 => Some(PassengerClass::Second),
            3 => Some(PassengerClass::Third),
            _ => None,
        }
    }
}

impl fmt::Display for PassengerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PassengerClass::First => "1st",
            PassengerClass::Second => "2nd",
            PassengerClass::Third => "3rd",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sex {
    Female,
    Male,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sex::Female => "female",
            Sex::Male => "male",
        };
        write!(f, "{s}")
    }
}

/// Survival label. Ordering is ascending by label (`no` < `yes`), which is
/// also the order the proportion breakdown reports in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Survival {
    No,
    Yes,
}

impl fmt::Display for Survival {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Survival::No => "no",
            Survival::Yes => "yes",
        };
        write!(f, "{s}")
    }
}

/// Render a boolean flag the way the tables and filters display it.
pub fn flag_label(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

// ---------------------------------------------------------------------------
// Passenger – one row of the table
// ---------------------------------------------------------------------------

/// A single passenger record after cleaning and imputation.
#[derive(Debug, Clone, PartialEq)]
pub struct Passenger {
    pub class: PassengerClass,
    pub sex: Sex,
    /// Age in years; never missing (median-imputed at load).
    pub age: f64,
    /// Number of accompanying family members.
    pub family: u32,
    /// Ticket price.
    pub fare: f64,
    /// Embarkation town; never missing (mode-imputed at load).
    pub embark_town: String,
    pub survived: Survival,
    pub alone: bool,
}

impl Passenger {
    /// One display cell per [`PassengerTable::COLUMNS`] entry, in order.
    pub fn display_cells(&self) -> [String; 8] {
        [
            self.class.to_string(),
            self.sex.to_string(),
            format_number(self.age),
            self.family.to_string(),
            format_number(self.fare),
            self.embark_town.clone(),
            self.survived.to_string(),
            flag_label(self.alone).to_string(),
        ]
    }
}

/// Format a numeric cell without a trailing `.0` for whole values.
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}

// ---------------------------------------------------------------------------
// PassengerTable – the loaded (or filtered) dataset
// ---------------------------------------------------------------------------

/// An owning, row-oriented passenger table. The loaded baseline instance is
/// shared read-only behind an `Arc`; filtering always produces a fresh table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassengerTable {
    passengers: Vec<Passenger>,
}

impl PassengerTable {
    /// Display header, in cell order.
    pub const COLUMNS: [&'static str; 8] = [
        "Class",
        "Sex",
        "Age",
        "Family Aboard",
        "Fare",
        "Embark Town",
        "Survived",
        "Alone",
    ];

    pub fn new(passengers: Vec<Passenger>) -> Self {
        Self { passengers }
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    /// Closed age interval covering every row, widened to whole numbers so
    /// the default picker range excludes nothing.
    pub fn age_bounds(&self) -> (f64, f64) {
        widened_bounds(self.passengers.iter().map(|p| p.age))
    }

    /// Closed family-count interval covering every row.
    pub fn family_bounds(&self) -> (f64, f64) {
        widened_bounds(self.passengers.iter().map(|p| p.family as f64))
    }

    /// Closed fare interval covering every row, widened to whole numbers.
    pub fn fare_bounds(&self) -> (f64, f64) {
        widened_bounds(self.passengers.iter().map(|p| p.fare))
    }

    /// Sorted unique embarkation towns present in the data.
    pub fn embark_towns(&self) -> BTreeSet<String> {
        self.passengers
            .iter()
            .map(|p| p.embark_town.clone())
            .collect()
    }

    /// Sorted unique sex labels present in the data.
    pub fn sex_labels(&self) -> BTreeSet<String> {
        self.passengers.iter().map(|p| p.sex.to_string()).collect()
    }

    /// Sorted unique alone-flag labels present in the data.
    pub fn alone_labels(&self) -> BTreeSet<String> {
        self.passengers
            .iter()
            .map(|p| flag_label(p.alone).to_string())
            .collect()
    }

    /// Sorted unique class labels present in the data.
    pub fn class_labels(&self) -> BTreeSet<String> {
        self.passengers
            .iter()
            .map(|p| p.class.to_string())
            .collect()
    }
}

/// `(floor(min), ceil(max))` over the values; `(0.0, 0.0)` for no rows.
fn widened_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min > max {
        return (0.0, 0.0);
    }
    (min.floor(), max.ceil())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger(age: f64, fare: f64) -> Passenger {
        Passenger {
            class: PassengerClass::Third,
            sex: Sex::Male,
            age,
            family: 0,
            fare,
            embark_town: "Southampton".to_string(),
            survived: Survival::No,
            alone: true,
        }
    }

    #[test]
    fn bounds_cover_every_row() {
        let table = PassengerTable::new(vec![
            passenger(22.0, 7.25),
            passenger(28.5, 512.3292),
            passenger(54.0, 0.0),
        ]);

        let (lo, hi) = table.age_bounds();
        assert_eq!((lo, hi), (22.0, 55.0));
        assert!(table.passengers().iter().all(|p| lo <= p.age && p.age <= hi));

        let (lo, hi) = table.fare_bounds();
        assert_eq!((lo, hi), (0.0, 513.0));
        assert!(table
            .passengers()
            .iter()
            .all(|p| lo <= p.fare && p.fare <= hi));
    }

    #[test]
    fn bounds_of_empty_table() {
        let table = PassengerTable::default();
        assert_eq!(table.age_bounds(), (0.0, 0.0));
    }

    #[test]
    fn ordinal_labels() {
        assert_eq!(PassengerClass::First.to_string(), "1st");
        assert_eq!(PassengerClass::from_raw(3), Some(PassengerClass::Third));
        assert_eq!(PassengerClass::from_raw(0), None);
        assert!(Survival::No < Survival::Yes);
    }

    #[test]
    fn display_cells_match_header_order() {
        let p = passenger(22.0, 7.25);
        let cells = p.display_cells();
        assert_eq!(cells.len(), PassengerTable::COLUMNS.len());
        assert_eq!(cells[0], "3rd");
        assert_eq!(cells[2], "22");
        assert_eq!(cells[4], "7.25");
        assert_eq!(cells[7], "yes");
    }
}
