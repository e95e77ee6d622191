//! CSV rendering of a payroll report.

use std::fmt;
use std::io::Write;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{PayrollLine, PayrollReport};

use super::{FIRST_DATA_ROW, FormulaTemplate, ReportColumn};

/// Label of the summary row.
pub const SUMMARY_LABEL: &str = "TOTAL";

/// One exported cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// Free text.
    Text(String),
    /// A whole count.
    Count(u32),
    /// A money or hours value, rendered to 2 decimal places.
    Amount(Decimal),
    /// A live spreadsheet formula.
    Formula(String),
    /// A cell left for manual entry.
    Blank,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) | Cell::Formula(text) => write!(f, "{}", text),
            Cell::Count(count) => write!(f, "{}", count),
            Cell::Amount(amount) => write!(f, "{:.2}", amount.round_dp(2)),
            Cell::Blank => Ok(()),
        }
    }
}

/// Leading characters a spreadsheet reads as the start of a formula.
const FORMULA_TRIGGERS: [char; 4] = ['=', '+', '-', '@'];

/// Quotes text that a spreadsheet would otherwise evaluate as a formula.
///
/// # Example
///
/// ```
/// use payroll_engine::export::inert_text;
///
/// assert_eq!(inert_text("=HYPERLINK(\"x\")"), "'=HYPERLINK(\"x\")");
/// assert_eq!(inert_text("Ada Jones"), "Ada Jones");
/// ```
pub fn inert_text(text: &str) -> String {
    if text.starts_with(FORMULA_TRIGGERS) {
        format!("'{}", text)
    } else {
        text.to_string()
    }
}

/// Cells of an agent row up to (not including) Total Pay.
fn leading_cells(line: &PayrollLine, agent: Cell) -> Vec<Cell> {
    vec![
        agent,
        Cell::Count(line.deal_count),
        Cell::Amount(line.man_hours),
        Cell::Amount(line.hourly_rate),
        Cell::Amount(line.hourly_pay),
        Cell::Amount(line.regular_deals_pay),
        Cell::Amount(line.weekend_deals_pay),
        Cell::Amount(line.hours_bonus),
        Cell::Amount(line.first_deal_bonus),
        Cell::Blank,
        Cell::Blank,
        Cell::Blank,
    ]
}

fn summary_leading_cells(deal_count: Cell) -> Vec<Cell> {
    let mut cells = vec![Cell::Text(SUMMARY_LABEL.to_string()), deal_count];
    cells.resize(ReportColumn::TotalPay.index(), Cell::Blank);
    cells
}

/// Builds the export rows with formulas for Total Pay and CPA.
///
/// Agent rows come first in report order, followed by the summary row. The
/// header row is not included; see [`FormulaTemplate::headers`].
pub fn formula_table(report: &PayrollReport, template: &FormulaTemplate) -> Vec<Vec<Cell>> {
    let mut rows = Vec::with_capacity(report.lines.len() + 1);

    for (offset, line) in report.lines.iter().enumerate() {
        let row = FIRST_DATA_ROW + offset;
        let mut cells = leading_cells(line, Cell::Text(inert_text(&line.agent)));
        cells.push(Cell::Formula(template.total_pay(row)));
        cells.push(Cell::Formula(template.cpa(row)));
        rows.push(cells);
    }

    // No agent rows: a SUM range would be reversed and cover the summary row
    if report.lines.is_empty() {
        let mut summary = summary_leading_cells(Cell::Count(0));
        summary.push(Cell::Amount(Decimal::ZERO));
        summary.push(Cell::Amount(Decimal::ZERO));
        rows.push(summary);
        return rows;
    }

    let last_row = FIRST_DATA_ROW + report.lines.len() - 1;
    let summary_row = last_row + 1;
    let mut summary = summary_leading_cells(Cell::Formula(
        template.column_sum(ReportColumn::DealCount, last_row),
    ));
    summary.push(Cell::Formula(
        template.column_sum(ReportColumn::TotalPay, last_row),
    ));
    summary.push(Cell::Formula(template.summary_cpa(summary_row)));
    rows.push(summary);

    rows
}

/// Builds the export rows with computed values in place of formulas.
///
/// # Example
///
/// ```
/// use payroll_engine::export::{Cell, values_table};
/// use payroll_engine::models::{AuditTrace, WeekendPolicy};
/// use payroll_engine::calculation::assemble_report;
/// use chrono::Weekday;
///
/// let report = assemble_report(
///     vec![],
///     vec![],
///     WeekendPolicy::Weekday { weekday: Weekday::Sat },
///     AuditTrace::default(),
/// );
/// let rows = values_table(&report);
///
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0][0], Cell::Text("TOTAL".to_string()));
/// ```
pub fn values_table(report: &PayrollReport) -> Vec<Vec<Cell>> {
    let mut rows = Vec::with_capacity(report.lines.len() + 1);

    for line in &report.lines {
        let mut cells = leading_cells(line, Cell::Text(line.agent.clone()));
        cells.push(Cell::Amount(line.total_pay));
        cells.push(Cell::Amount(line.cpa));
        rows.push(cells);
    }

    let mut summary = summary_leading_cells(Cell::Count(report.summary.total_deals));
    summary.push(Cell::Amount(report.summary.total_pay));
    summary.push(Cell::Amount(report.summary.aggregate_cpa));
    rows.push(summary);

    rows
}

/// Writes the formula export as CSV: header, agent rows and the summary row.
pub fn write_csv<W: Write>(
    report: &PayrollReport,
    template: &FormulaTemplate,
    writer: W,
) -> PayrollResult<()> {
    write_rows(template.headers(), formula_table(report, template), writer)
}

/// Writes the values-only export as CSV.
pub fn write_values_csv<W: Write>(
    report: &PayrollReport,
    template: &FormulaTemplate,
    writer: W,
) -> PayrollResult<()> {
    write_rows(template.headers(), values_table(report), writer)
}

fn write_rows<W: Write>(headers: Vec<String>, rows: Vec<Vec<Cell>>, writer: W) -> PayrollResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(&headers).map_err(export_error)?;
    for row in rows {
        csv_writer
            .write_record(row.iter().map(|cell| cell.to_string()))
            .map_err(export_error)?;
    }
    csv_writer.flush().map_err(|e| PayrollError::ExportError {
        message: e.to_string(),
    })?;

    Ok(())
}

fn export_error(error: csv::Error) -> PayrollError {
    PayrollError::ExportError {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::assemble_report;
    use crate::config::{BonusSlot, BonusSlots};
    use crate::models::{AuditTrace, ManualAdjustments, Role, WeekendPolicy};
    use chrono::Weekday;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn template() -> FormulaTemplate {
        FormulaTemplate::from_slots(&BonusSlots {
            slot_one: BonusSlot {
                label: "Bonus Count x25".to_string(),
                multiplier: dec("25"),
            },
            slot_two: BonusSlot {
                label: "Bonus Count x50".to_string(),
                multiplier: dec("50"),
            },
        })
    }

    fn closer_line() -> PayrollLine {
        PayrollLine {
            agent: "John Smith".to_string(),
            role: Role::Closer,
            deal_count: 16,
            weekend_deals: 3,
            first_deal_count: 2,
            man_hours: dec("45"),
            hourly_rate: dec("22"),
            hourly_pay: dec("990"),
            regular_deals: 13,
            regular_deals_pay: dec("455"),
            weekend_deals_pay: dec("150"),
            hours_bonus: dec("50"),
            first_deal_bonus: dec("50"),
            adjustments: ManualAdjustments::default(),
            total_pay: dec("1695"),
            cpa: dec("105.9375"),
        }
    }

    fn report(lines: Vec<PayrollLine>) -> PayrollReport {
        assemble_report(
            lines,
            vec![],
            WeekendPolicy::Weekday {
                weekday: Weekday::Sat,
            },
            AuditTrace::default(),
        )
    }

    fn render(report: &PayrollReport) -> String {
        let mut buffer = Vec::new();
        write_csv(report, &template(), &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_amounts_render_to_two_places() {
        assert_eq!(Cell::Amount(dec("105.9375")).to_string(), "105.94");
        assert_eq!(Cell::Amount(dec("990")).to_string(), "990.00");
        assert_eq!(Cell::Blank.to_string(), "");
    }

    #[test]
    fn test_formula_export_layout() {
        let csv = render(&report(vec![closer_line()]));
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Agent,Deal Count,Man Hours,Hourly Rate,Hourly Pay,Regular Deals Pay,Saturday Deals Pay,Hours Bonus,First Deal Bonus,Manual Bonus,Bonus Count x25,Bonus Count x50,Total Pay,CPA"
        );
        assert_eq!(
            lines[1],
            "John Smith,16,45.00,22.00,990.00,455.00,150.00,50.00,50.00,,,,=E2+F2+G2+H2+I2+J2+K2*25+L2*50,\"=IF(B2>0,M2/B2,0)\""
        );
        assert_eq!(lines[2], "TOTAL,=SUM(B2:B2),,,,,,,,,,,=SUM(M2:M2),\"=IF(B3>0,M3/B3,0)\"");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_report_summary_uses_literal_zeros() {
        let csv = render(&report(vec![]));
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "TOTAL,0,,,,,,,,,,,0.00,0.00");
        assert!(!lines[1].contains("SUM"));
    }

    #[test]
    fn test_formula_like_agent_names_are_quoted() {
        let mut line = closer_line();
        line.agent = "=HYPERLINK(\"http://x\")".to_string();
        let rows = formula_table(&report(vec![line]), &template());

        assert_eq!(
            rows[0][ReportColumn::Agent.index()],
            Cell::Text("'=HYPERLINK(\"http://x\")".to_string())
        );
        for trigger in ["+1", "-1", "@SUM(A1)"] {
            assert!(inert_text(trigger).starts_with('\''));
        }
        assert_eq!(inert_text("O'Brien"), "O'Brien");
    }

    #[test]
    fn test_values_export_writes_numbers_not_formulas() {
        let mut buffer = Vec::new();
        write_values_csv(&report(vec![closer_line()]), &template(), &mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[1],
            "John Smith,16,45.00,22.00,990.00,455.00,150.00,50.00,50.00,,,,1695.00,105.94"
        );
        assert_eq!(lines[2], "TOTAL,16,,,,,,,,,,,1695.00,105.94");
        assert!(!csv.contains('='));
    }

    #[test]
    fn test_values_table_matches_computed_totals() {
        let rows = values_table(&report(vec![closer_line()]));

        assert_eq!(rows[0][ReportColumn::TotalPay.index()], Cell::Amount(dec("1695")));
        assert_eq!(rows[0][ReportColumn::Cpa.index()].to_string(), "105.94");
        assert_eq!(rows[1][ReportColumn::DealCount.index()], Cell::Count(16));
        assert_eq!(rows[1].len(), ReportColumn::ALL.len());
    }

    #[test]
    fn test_every_row_has_every_column() {
        let rows = formula_table(&report(vec![closer_line()]), &template());
        assert!(rows.iter().all(|row| row.len() == ReportColumn::ALL.len()));
    }

    #[test]
    fn test_manual_columns_export_blank() {
        let rows = values_table(&report(vec![closer_line()]));
        for column in [
            ReportColumn::ManualBonus,
            ReportColumn::BonusSlotOne,
            ReportColumn::BonusSlotTwo,
        ] {
            assert_eq!(rows[0][column.index()], Cell::Blank);
        }
    }
}
