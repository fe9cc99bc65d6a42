//! CSV export of per-cell value estimates

use std::{io::Write, path::Path};

use serde::Serialize;

use crate::{
    Result,
    grid::Cell,
    pipeline::LevelReport,
    q_learning::{CellEstimate, ValueDump},
};

/// A single row in the value CSV export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCsvRecord {
    pub level: usize,
    pub row: usize,
    pub col: usize,
    /// Empty for cells the table never saw
    pub best_action: Option<char>,
    pub best_value: Option<f64>,
    pub is_start: bool,
    pub is_goal: bool,
    pub is_hazard: bool,
}

/// Exporter for value CSV files
pub struct ValueCsvExporter;

impl ValueCsvExporter {
    /// Rows for one value dump, row-major
    pub fn records(level: usize, values: &ValueDump) -> Vec<ValueCsvRecord> {
        values
            .iter()
            .map(|(cell, estimate)| {
                let (best_action, best_value) = match estimate {
                    CellEstimate::Unvisited => (None, None),
                    CellEstimate::Estimate { action, value } => {
                        (Some(action.symbol()), Some(value))
                    }
                };
                ValueCsvRecord {
                    level,
                    row: cell.row,
                    col: cell.col,
                    best_action,
                    best_value,
                    is_start: false,
                    is_goal: false,
                    is_hazard: false,
                }
            })
            .collect()
    }

    /// Rows for a level report, with start/goal/hazard flags filled in
    pub fn report_records(report: &LevelReport) -> Vec<ValueCsvRecord> {
        let layout = &report.layout;
        let mut records = Self::records(report.level, &report.values);
        for record in &mut records {
            let cell = Cell::new(record.row, record.col);
            record.is_start = cell == layout.start();
            record.is_goal = cell == layout.goal();
            record.is_hazard = layout.hazards().contains(&cell);
        }
        records
    }

    /// Write every level's rows to any writer
    pub fn write<W: Write>(writer: W, reports: &[LevelReport]) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for report in reports {
            for record in Self::report_records(report) {
                csv_writer.serialize(record)?;
            }
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write every level's rows to `path`
    pub fn export<P: AsRef<Path>>(path: P, reports: &[LevelReport]) -> Result<()> {
        let file = std::fs::File::create(path)?;
        Self::write(file, reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grid::Action, q_learning::QTable};

    #[test]
    fn test_unvisited_cells_have_empty_columns() {
        let mut table = QTable::new();
        table.set(Cell::new(0, 0), Action::Right, 1.25);
        let dump = ValueDump::from_table(&table, 1, 2);

        let records = ValueCsvExporter::records(3, &dump);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].best_action, Some('R'));
        assert_eq!(records[0].best_value, Some(1.25));
        assert_eq!(records[1].best_action, None);

        let mut writer = csv::Writer::from_writer(Vec::new());
        for record in records {
            writer.serialize(record).unwrap();
        }
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "level,row,col,best_action,best_value,is_start,is_goal,is_hazard"
        );
        assert_eq!(lines[1], "3,0,0,R,1.25,false,false,false");
        assert_eq!(lines[2], "3,0,1,,,false,false,false");
    }
}
