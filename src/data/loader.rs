use std::collections::{BTreeMap, HashSet};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::model::{Passenger, PassengerClass, PassengerTable, Sex, Survival};

/// The dataset ships inside the binary; there is no runtime file input.
const BUNDLED_CSV: &str = include_str!("../../data/titanic.csv");

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse, deduplicate, clean and impute the bundled passenger dataset.
/// Runs once at startup; any failure here is fatal for the application.
pub fn load_bundled() -> Result<PassengerTable> {
    let table = parse_dataset(BUNDLED_CSV).context("parsing bundled passenger dataset")?;
    log::info!("loaded {} passengers from the bundled dataset", table.len());
    Ok(table)
}

// ---------------------------------------------------------------------------
// Raw schema
// ---------------------------------------------------------------------------

/// The raw columns kept for analysis. The remaining source columns
/// (`survived`, `sibsp`, `embarked`, `class`, `who`, `adult_male`, `deck`)
/// are dropped by simply not being listed here; the textual `alive` column
/// supplies the survival label.
#[derive(Debug, Deserialize)]
struct RawRecord {
    pclass: u8,
    sex: String,
    age: Option<f64>,
    parch: u32,
    fare: f64,
    embark_town: Option<String>,
    alive: String,
    alone: String,
}

fn parse_dataset(csv_text: &str) -> Result<PassengerTable> {
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let headers = reader.headers().context("reading CSV header")?.clone();

    // Duplicates are removed once, on the full raw row, before any column
    // is dropped.
    let mut seen: HashSet<String> = HashSet::new();
    let mut raws: Vec<RawRecord> = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let key = record.iter().collect::<Vec<_>>().join("\u{1f}");
        if !seen.insert(key) {
            continue;
        }
        let raw: RawRecord = record
            .deserialize(Some(&headers))
            .with_context(|| format!("CSV row {row_no}"))?;
        raws.push(raw);
    }

    if raws.is_empty() {
        bail!("dataset is empty");
    }

    let age_median = median(raws.iter().filter_map(|r| r.age));
    let town_mode = mode(raws.iter().filter_map(|r| r.embark_town.as_deref()))
        .context("every embarkation town is missing")?;

    let mut passengers = Vec::with_capacity(raws.len());
    for (row_no, raw) in raws.into_iter().enumerate() {
        passengers.push(
            clean_record(raw, age_median, &town_mode)
                .with_context(|| format!("cleaning row {row_no}"))?,
        );
    }

    Ok(PassengerTable::new(passengers))
}

fn clean_record(raw: RawRecord, age_median: f64, town_mode: &str) -> Result<Passenger> {
    let class = PassengerClass::from_raw(raw.pclass)
        .with_context(|| format!("unknown passenger class {}", raw.pclass))?;
    let sex = match raw.sex.as_str() {
        "female" => Sex::Female,
        "male" => Sex::Male,
        other => bail!("unknown sex label {other:?}"),
    };
    let survived = match raw.alive.as_str() {
        "yes" => Survival::Yes,
        "no" => Survival::No,
        other => bail!("unknown survival label {other:?}"),
    };
    let alone = parse_flag(&raw.alone)?;

    Ok(Passenger {
        class,
        sex,
        age: raw.age.unwrap_or(age_median),
        family: raw.parch,
        fare: raw.fare,
        embark_town: raw.embark_town.unwrap_or_else(|| town_mode.to_string()),
        survived,
        alone,
    })
}

/// Pandas-style booleans ("True"/"False") as written by the source dataset.
fn parse_flag(s: &str) -> Result<bool> {
    match s {
        "True" | "true" => Ok(true),
        "False" | "false" => Ok(false),
        other => bail!("unknown flag value {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Imputation helpers
// ---------------------------------------------------------------------------

/// Median of the values; 0.0 when none are present.
fn median(values: impl Iterator<Item = f64>) -> f64 {
    let mut sorted: Vec<f64> = values.collect();
    if sorted.is_empty() {
        return 0.0;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Most frequent value; ties resolve to the lexically smallest so the
/// result is deterministic.
fn mode<'a>(values: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .fold(None, |best: Option<(&str, usize)>, (v, n)| match best {
            Some((_, best_n)) if best_n >= n => best,
            _ => Some((v, n)),
        })
        .map(|(v, _)| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
survived,pclass,sex,age,sibsp,parch,fare,embarked,class,who,adult_male,deck,embark_town,alive,alone
0,3,male,22.0,1,0,7.25,S,Third,man,True,,Southampton,no,False
0,3,male,22.0,1,0,7.25,S,Third,man,True,,Southampton,no,False
1,1,female,,0,0,80.0,C,First,woman,False,B,Cherbourg,yes,True
1,2,female,30.0,0,1,13.0,S,Second,woman,False,,,yes,False
0,3,male,40.0,0,0,8.05,S,Third,man,True,,Southampton,no,True
";

    #[test]
    fn duplicates_collapse_once_at_load() {
        let table = parse_dataset(SAMPLE).unwrap();
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn missing_age_takes_the_median_of_present_ages() {
        let table = parse_dataset(SAMPLE).unwrap();
        // Present ages are 22, 30, 40.
        let imputed = &table.passengers()[1];
        assert_eq!(imputed.sex, Sex::Female);
        assert_eq!(imputed.age, 30.0);
    }

    #[test]
    fn missing_town_takes_the_most_frequent_town() {
        let table = parse_dataset(SAMPLE).unwrap();
        let imputed = &table.passengers()[2];
        assert_eq!(imputed.embark_town, "Southampton");
    }

    #[test]
    fn no_field_is_missing_after_imputation() {
        let table = parse_dataset(SAMPLE).unwrap();
        assert!(table
            .passengers()
            .iter()
            .all(|p| p.age.is_finite() && !p.embark_town.is_empty()));
    }

    #[test]
    fn header_only_input_is_an_error() {
        let header = SAMPLE.lines().next().unwrap();
        assert!(parse_dataset(header).is_err());
    }

    #[test]
    fn unknown_class_is_an_error() {
        let bad = "\
survived,pclass,sex,age,sibsp,parch,fare,embarked,class,who,adult_male,deck,embark_town,alive,alone
0,7,male,22.0,1,0,7.25,S,Third,man,True,,Southampton,no,False
";
        assert!(parse_dataset(bad).is_err());
    }

    #[test]
    fn bundled_dataset_loads_clean() {
        let table = load_bundled().unwrap();
        assert_eq!(table.len(), 49);
        assert_eq!(table.age_bounds(), (2.0, 66.0));
        assert_eq!(table.fare_bounds(), (0.0, 513.0));
        assert_eq!(table.embark_towns().len(), 3);
        assert!(table.passengers().iter().all(|p| !p.embark_town.is_empty()));
    }

    #[test]
    fn median_of_even_and_odd_counts() {
        assert_eq!(median([1.0, 3.0, 2.0].into_iter()), 2.0);
        assert_eq!(median([4.0, 1.0, 3.0, 2.0].into_iter()), 2.5);
        assert_eq!(median(std::iter::empty()), 0.0);
    }

    #[test]
    fn mode_prefers_highest_count_then_lexical_order() {
        assert_eq!(
            mode(["b", "a", "b"].into_iter()).as_deref(),
            Some("b")
        );
        assert_eq!(mode(["b", "a"].into_iter()).as_deref(), Some("a"));
        assert_eq!(mode(std::iter::empty()), None);
    }
}
