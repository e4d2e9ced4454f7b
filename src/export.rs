//! Excel export functionality.

use crate::models::report::cell_text;
use crate::models::{AuditLogEntry, Report, School};
use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Sheet names are capped at 31 characters by Excel.
const MAX_SHEET_NAME: usize = 31;

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
}

/// Write a styled header row and set column widths.
fn write_headers(worksheet: &mut Worksheet, headers: &[&str], widths: &[f64]) -> Result<(), XlsxError> {
    let format = header_format();
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &format)?;
    }
    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }
    Ok(())
}

/// Autofilter over the data and a frozen header row.
fn finish_sheet(worksheet: &mut Worksheet, rows: usize, columns: usize) -> Result<(), XlsxError> {
    if rows > 0 && columns > 0 {
        worksheet.autofilter(0, 0, rows as u32, (columns - 1) as u16)?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

/// Export audit log entries to Excel file.
pub fn export_audit_logs_to_excel(entries: &[AuditLogEntry], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Audit Log")?;

    write_headers(
        worksheet,
        &["Timestamp", "Action", "User", "IP Address", "User Agent", "Risk", "Details"],
        &[20.0, 25.0, 20.0, 16.0, 40.0, 10.0, 50.0],
    )?;

    for (idx, entry) in entries.iter().enumerate() {
        let row = (idx + 1) as u32;

        let local = entry.timestamp.with_timezone(&Local);
        worksheet.write_string(row, 0, local.format("%Y-%m-%d %H:%M:%S").to_string())?;
        worksheet.write_string(row, 1, &entry.action)?;
        worksheet.write_string(row, 2, entry.user_id.as_deref().unwrap_or(""))?;
        worksheet.write_string(row, 3, entry.ip_address.as_deref().unwrap_or(""))?;
        worksheet.write_string(row, 4, entry.user_agent.as_deref().unwrap_or(""))?;
        worksheet.write_string(row, 5, entry.risk_level.name())?;
        worksheet.write_string(row, 6, entry.details_text())?;
    }

    finish_sheet(worksheet, entries.len(), 7)?;

    workbook.save(path)?;
    Ok(())
}

/// Export a generated report. Numeric cells stay numeric.
pub fn export_report_to_excel(report: &Report, path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let sheet_name = sheet_name(&report.title);
    worksheet.set_name(&sheet_name)?;

    let headers: Vec<&str> = report.columns.iter().map(String::as_str).collect();
    let widths = vec![18.0; headers.len()];
    write_headers(worksheet, &headers, &widths)?;

    let number_format = Format::new().set_num_format("#,##0.##");

    for (idx, cells) in report.rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        for (col, cell) in cells.iter().enumerate().take(headers.len()) {
            let col = col as u16;
            match cell {
                Value::Number(n) => match n.as_f64() {
                    Some(v) => {
                        worksheet.write_number_with_format(row, col, v, &number_format)?;
                    }
                    None => {
                        worksheet.write_string(row, col, n.to_string())?;
                    }
                },
                Value::Null => {}
                other => {
                    worksheet.write_string(row, col, cell_text(other))?;
                }
            }
        }
    }

    finish_sheet(worksheet, report.rows.len(), headers.len())?;

    workbook.save(path)?;
    Ok(())
}

/// Export school billing accounts.
pub fn export_schools_to_excel(schools: &[School], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Schools")?;

    write_headers(
        worksheet,
        &["School", "Plan", "Balance", "Status", "Created"],
        &[30.0, 15.0, 12.0, 12.0, 12.0],
    )?;

    let money_format = Format::new().set_num_format("0.00");

    for (idx, school) in schools.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_string(row, 0, &school.name)?;
        worksheet.write_string(row, 1, &school.plan)?;
        worksheet.write_number_with_format(row, 2, school.balance, &money_format)?;
        worksheet.write_string(row, 3, school.status.as_deref().unwrap_or(""))?;
        let created = school
            .created_at
            .map(|d| d.with_timezone(&Local).format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        worksheet.write_string(row, 4, created)?;
    }

    finish_sheet(worksheet, schools.len(), 5)?;

    workbook.save(path)?;
    Ok(())
}

/// Excel-safe sheet name from a report title.
fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(MAX_SHEET_NAME)
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').to_string();
    if cleaned.is_empty() { "Report".to_string() } else { cleaned }
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("Excel Files", &["xlsx"])
        .save_file()
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sheet_name() {
        assert_eq!(sheet_name("Revenue: Q1/Q2"), "Revenue Q1Q2");
        assert_eq!(sheet_name(""), "Report");
        assert_eq!(sheet_name(&"x".repeat(40)).len(), MAX_SHEET_NAME);
    }

    #[test]
    fn test_filename_prefix() {
        let name = generate_export_filename("audit_log");
        assert!(name.starts_with("audit_log_"));
        assert!(name.ends_with(".xlsx"));
    }

    #[test]
    fn test_export_report_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        let report = Report {
            title: "Revenue".to_string(),
            columns: vec!["School".to_string(), "Amount".to_string()],
            rows: vec![vec![json!("Oak"), json!(120.5)], vec![json!("Elm"), json!(null)]],
            generated_at: None,
        };

        export_report_to_excel(&report, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_export_empty_audit_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.xlsx");

        export_audit_logs_to_excel(&[], &path).unwrap();
        assert!(path.exists());
    }
}
