//! Spreadsheet export of a payroll report.
//!
//! The export is one worksheet: a header row, one row per payroll line in
//! report order, and a `TOTAL` summary row. Total Pay and CPA are written as
//! live formulas so manual entries made after export are picked up.

mod columns;
mod formulas;
mod writer;

pub use columns::ReportColumn;
pub use formulas::{FIRST_DATA_ROW, FormulaTemplate};
pub use writer::{
    Cell, SUMMARY_LABEL, formula_table, inert_text, values_table, write_csv, write_values_csv,
};
