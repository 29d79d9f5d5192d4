use anyhow::{anyhow, Context, Result};
use rust_xlsxwriter::Workbook;

use super::model::{format_number, PassengerTable};
use super::stats::SurvivalBreakdown;

// ---------------------------------------------------------------------------
// ExportTable – the narrow shape both serializers consume
// ---------------------------------------------------------------------------

/// A single exportable cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Number(f64),
}

impl Cell {
    /// Delimited-text rendering of the cell.
    pub fn to_field(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Int(i) => i.to_string(),
            Cell::Number(v) => format_number(*v),
        }
    }
}

/// Header row plus data rows, ready for serialization. No index column is
/// ever included.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// The filtered (or baseline) passenger table as an export table.
pub fn passenger_export(table: &PassengerTable) -> ExportTable {
    let headers = PassengerTable::COLUMNS.iter().map(|c| c.to_string()).collect();
    let rows = table
        .passengers()
        .iter()
        .map(|p| {
            vec![
                Cell::Text(p.class.to_string()),
                Cell::Text(p.sex.to_string()),
                Cell::Number(p.age),
                Cell::Int(p.family as i64),
                Cell::Number(p.fare),
                Cell::Text(p.embark_town.clone()),
                Cell::Text(p.survived.to_string()),
                Cell::Text(super::model::flag_label(p.alone).to_string()),
            ]
        })
        .collect();
    ExportTable { headers, rows }
}

/// A survival-proportion breakdown as an export table.
pub fn breakdown_export(breakdown: &SurvivalBreakdown) -> ExportTable {
    let headers = vec!["Survived".to_string(), "Proportion (%)".to_string()];
    let rows = breakdown
        .shares()
        .iter()
        .map(|(label, pct)| vec![Cell::Text(label.to_string()), Cell::Number(*pct)])
        .collect();
    ExportTable { headers, rows }
}

// ---------------------------------------------------------------------------
// Serializers
// ---------------------------------------------------------------------------

/// UTF-8 delimited text: header row first, one record per data row.
pub fn to_csv_bytes(table: &ExportTable) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&table.headers)
        .context("writing CSV header")?;
    for row in &table.rows {
        let record: Vec<String> = row.iter().map(Cell::to_field).collect();
        writer.write_record(&record).context("writing CSV row")?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow!("finalizing CSV export: {e}"))
}

/// Workbook bytes with a single `Sheet1` worksheet: header row first, one
/// worksheet row per data row.
pub fn to_xlsx_bytes(table: &ExportTable) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name("Sheet1")
        .context("naming worksheet")?;

    for (col, header) in table.headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, header.as_str())
            .context("writing XLSX header")?;
    }
    for (row_no, row) in table.rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            let (r, c) = (row_no as u32 + 1, col as u16);
            match cell {
                Cell::Text(s) => worksheet.write_string(r, c, s.as_str()),
                Cell::Int(i) => worksheet.write_number(r, c, *i as f64),
                Cell::Number(v) => worksheet.write_number(r, c, *v),
            }
            .context("writing XLSX cell")?;
        }
    }

    workbook.save_to_buffer().context("serializing workbook")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Passenger, PassengerClass, Sex, Survival};
    use crate::data::stats::survival_breakdown;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use std::io::Write;

    fn sample_table() -> PassengerTable {
        PassengerTable::new(vec![
            Passenger {
                class: PassengerClass::Third,
                sex: Sex::Male,
                age: 22.0,
                family: 0,
                fare: 7.25,
                embark_town: "Southampton".to_string(),
                survived: Survival::No,
                alone: false,
            },
            Passenger {
                class: PassengerClass::First,
                sex: Sex::Female,
                age: 38.0,
                family: 2,
                fare: 71.2833,
                embark_town: "Cherbourg".to_string(),
                survived: Survival::Yes,
                alone: false,
            },
        ])
    }

    #[test]
    fn csv_round_trip_preserves_values() {
        let export = passenger_export(&sample_table());
        let bytes = to_csv_bytes(&export).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(|h| h.to_string())
            .collect();
        assert_eq!(headers, export.headers);

        let records: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect();
        assert_eq!(records.len(), export.rows.len());
        for (record, row) in records.iter().zip(&export.rows) {
            let expected: Vec<String> = row.iter().map(Cell::to_field).collect();
            assert_eq!(record, &expected);
        }
    }

    #[test]
    fn csv_has_header_and_no_index_column() {
        let export = passenger_export(&sample_table());
        let bytes = to_csv_bytes(&export).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let first_line = text.lines().next().unwrap();
        assert_eq!(
            first_line,
            "Class,Sex,Age,Family Aboard,Fare,Embark Town,Survived,Alone"
        );
    }

    #[test]
    fn xlsx_round_trip_preserves_values() {
        let export = passenger_export(&sample_table());
        let bytes = to_xlsx_bytes(&export).unwrap();

        // calamine reads from a path, so park the buffer in a temp file.
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(&bytes).unwrap();
        file.flush().unwrap();

        let mut workbook: Xlsx<_> = open_workbook(file.path()).unwrap();
        let range = workbook.worksheet_range("Sheet1").unwrap();
        assert_eq!(range.height(), export.rows.len() + 1);
        assert_eq!(range.width(), export.headers.len());

        for (col, header) in export.headers.iter().enumerate() {
            assert_eq!(
                range.get_value((0, col as u32)),
                Some(&Data::String(header.clone()))
            );
        }
        for (row_no, row) in export.rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                let got = range.get_value((row_no as u32 + 1, col as u32)).unwrap();
                match cell {
                    Cell::Text(s) => assert_eq!(got, &Data::String(s.clone())),
                    Cell::Int(i) => assert_eq!(got, &Data::Float(*i as f64)),
                    Cell::Number(v) => assert_eq!(got, &Data::Float(*v)),
                }
            }
        }
    }

    #[test]
    fn breakdown_export_shape() {
        let export = breakdown_export(&survival_breakdown(&sample_table()).unwrap());
        assert_eq!(export.headers, vec!["Survived", "Proportion (%)"]);
        assert_eq!(export.rows.len(), 2);
        assert_eq!(export.rows[0][0], Cell::Text("no".to_string()));
        assert_eq!(export.rows[0][1], Cell::Number(50.0));
        assert_eq!(export.rows[1][0], Cell::Text("yes".to_string()));
    }

    #[test]
    fn export_is_deterministic() {
        let export = passenger_export(&sample_table());
        assert_eq!(
            to_csv_bytes(&export).unwrap(),
            to_csv_bytes(&export).unwrap()
        );
    }
}
