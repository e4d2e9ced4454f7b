//! Reports center: generate platform reports and export them to Excel.

use chrono::{Datelike, Duration, Local, NaiveDate};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{FILE_XLS, MAGNIFYING_GLASS};

use super::app::App;
use super::components::{
    back_button, date_input, pagination_bar, panel_header, primary_button_with_icon, search_box, sortable_headers,
    styled_button, styled_button_with_icon,
};
use crate::i18n::Msg;
use crate::models::report::cell_text;
use crate::models::{Report, ReportQuery, ReportType};
use crate::table::TableState;

pub struct ReportsState {
    pub report_type: ReportType,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub from_input: String,
    pub to_input: String,
    pub loading: bool,
    pub report: Option<Report>,
    pub table: TableState,
}

impl Default for ReportsState {
    fn default() -> Self {
        let today = Local::now().date_naive();
        let mut state = Self {
            report_type: ReportType::default(),
            from: None,
            to: None,
            from_input: String::new(),
            to_input: String::new(),
            loading: false,
            report: None,
            table: TableState::default(),
        };
        state.set_range(today.with_day(1).unwrap_or(today), today);
        state
    }
}

impl ReportsState {
    pub fn set_range(&mut self, from: NaiveDate, to: NaiveDate) {
        self.from = Some(from);
        self.to = Some(to);
        self.from_input = from.format("%Y-%m-%d").to_string();
        self.to_input = to.format("%Y-%m-%d").to_string();
    }

    /// Query for the current inputs, `None` until both dates are set and ordered.
    pub fn query(&self) -> Option<ReportQuery> {
        let (from, to) = (self.from?, self.to?);
        (from <= to).then_some(ReportQuery {
            report_type: self.report_type,
            from,
            to,
        })
    }

    /// Replace the shown report with a fresh table.
    pub fn set_report(&mut self, report: Report, page_size: usize) {
        self.table = TableState::new(page_size);
        self.report = Some(report);
    }
}

/// Show the reports center panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Reports Center");

    let no_data = app.tr(Msg::NoData);
    let state = &mut app.reports;

    ui.horizontal(|ui| {
        ui.label("Report:");
        egui::ComboBox::from_id_salt("report_type")
            .width(200.0)
            .selected_text(state.report_type.name())
            .show_ui(ui, |ui| {
                for kind in ReportType::ALL {
                    ui.selectable_value(&mut state.report_type, kind, kind.name());
                }
            });
    });

    ui.add_space(10.0);

    ui.horizontal(|ui| {
        ui.label("From:");
        date_input(ui, &mut state.from_input, &mut state.from, false);
        ui.add_space(10.0);
        ui.label("To:");
        date_input(ui, &mut state.to_input, &mut state.to, false);

        ui.add_space(20.0);

        let today = Local::now().date_naive();
        if styled_button(ui, "This Month").clicked() {
            state.set_range(today.with_day(1).unwrap_or(today), today);
        }
        if styled_button(ui, "Last 30 Days").clicked() {
            state.set_range(today - Duration::days(30), today);
        }
        if styled_button(ui, "This Year").clicked() {
            state.set_range(today.with_ordinal(1).unwrap_or(today), today);
        }
    });

    ui.label(RichText::new("Accepts: YYYY-MM-DD, YYYY/M/D, YYYY.M.D").small().weak());

    if let (Some(from), Some(to)) = (state.from, state.to)
        && from > to
    {
        ui.colored_label(Color32::from_rgb(220, 50, 50), "Start date is after end date");
    }

    ui.add_space(10.0);

    let mut generate = false;
    let mut export = false;

    ui.horizontal(|ui| {
        ui.add_enabled_ui(!state.loading, |ui| {
            if primary_button_with_icon(ui, MAGNIFYING_GLASS, "Generate Report").clicked() {
                generate = true;
            }
        });
        if state.loading {
            ui.spinner();
        }

        ui.add_space(10.0);

        ui.add_enabled_ui(state.report.is_some(), |ui| {
            if styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
                export = true;
            }
        });
    });

    ui.add_space(15.0);
    ui.separator();
    ui.add_space(10.0);

    match &state.report {
        Some(report) => show_report(ui, &mut state.table, report, no_data),
        None if !state.loading => {
            ui.label(RichText::new("No report yet. Pick a type and range, then click 'Generate Report'.").weak());
        }
        None => {}
    }

    if generate {
        app.generate_report();
    }
    if export {
        app.export_report();
    }

    go_back
}

fn show_report(ui: &mut Ui, table: &mut TableState, report: &Report, no_data: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(&report.title).strong());
        if let Some(at) = report.generated_at {
            ui.label(
                RichText::new(format!("generated {}", at.with_timezone(&Local).format("%Y-%m-%d %H:%M")))
                    .small()
                    .weak(),
            );
        }
    });
    ui.add_space(8.0);

    if report.rows.is_empty() {
        ui.label(RichText::new(no_data).weak());
        return;
    }

    ui.horizontal(|ui| search_box(ui, table, "Search rows..."));
    ui.add_space(8.0);

    let view = table.view(&report.rows);
    pagination_bar(ui, table, &view, "rows");
    ui.add_space(10.0);

    let titles: Vec<&str> = report.columns.iter().map(String::as_str).collect();

    ScrollArea::both().id_salt("report_scroll").show(ui, |ui| {
        egui::Grid::new("report_grid")
            .num_columns(titles.len())
            .striped(true)
            .min_col_width(80.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                sortable_headers(ui, table, &titles);
                ui.end_row();

                for row in &view.rows {
                    for column in 0..titles.len() {
                        ui.label(row.get(column).map(cell_text).unwrap_or_default());
                    }
                    ui.end_row();
                }
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_query_requires_ordered_dates() {
        let mut state = ReportsState::default();
        state.report_type = ReportType::Revenue;
        state.set_range(day(2025, 3, 1), day(2025, 3, 31));

        let query = state.query().unwrap();
        assert_eq!(query.report_type, ReportType::Revenue);
        assert_eq!(query.from, day(2025, 3, 1));

        state.set_range(day(2025, 4, 1), day(2025, 3, 1));
        assert!(state.query().is_none());

        state.from = None;
        assert!(state.query().is_none());
    }

    #[test]
    fn test_set_report_resets_table() {
        let mut state = ReportsState::default();
        state.table.set_search("oak");
        state.set_report(Report::default(), 5);
        assert!(state.table.search().is_empty());
        assert_eq!(state.table.page_size(), 5);
        assert!(state.report.is_some());
    }
}
