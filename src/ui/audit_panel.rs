//! Audit log viewer with server-side filters and Excel export.

use chrono::{Local, NaiveDate};
use eframe::egui::{self, Color32, ScrollArea, Ui};
use egui_phosphor::regular::{FILE_XLS, FUNNEL};

use super::app::App;
use super::components::{
    back_button, colors, date_input, loading_or_empty, pagination_bar, panel_header, primary_button_with_icon,
    search_box, sortable_headers, status_chip, styled_button, styled_button_with_icon,
};
use crate::i18n::Msg;
use crate::models::{AuditLogEntry, AuditQuery, RiskLevel};
use crate::table::{SortDirection, TableState};

pub struct AuditState {
    pub entries: Vec<AuditLogEntry>,
    pub loading: bool,
    pub risk_filter: Option<RiskLevel>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub from_input: String,
    pub to_input: String,
    pub table: TableState,
}

impl AuditState {
    pub fn new(page_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            loading: false,
            risk_filter: None,
            from: None,
            to: None,
            from_input: String::new(),
            to_input: String::new(),
            table: TableState::new(page_size).sorted_by(0, SortDirection::Descending),
        }
    }

    pub fn query(&self) -> AuditQuery {
        AuditQuery {
            from: self.from,
            to: self.to,
            risk_level: self.risk_filter,
        }
    }

    pub fn clear_filters(&mut self) {
        self.risk_filter = None;
        self.from = None;
        self.to = None;
        self.from_input.clear();
        self.to_input.clear();
    }
}

fn risk_color(risk: RiskLevel) -> Color32 {
    match risk {
        RiskLevel::Low => colors::SUCCESS,
        RiskLevel::Medium => colors::INFO,
        RiskLevel::High => colors::WARNING,
        RiskLevel::Critical => colors::ERROR,
        RiskLevel::Unknown => colors::NEUTRAL,
    }
}

/// Show the audit log panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Audit Logs");

    let mut apply = false;
    let mut export = false;

    {
        let state = &mut app.audit;

        ui.horizontal(|ui| {
            ui.label("Risk:");
            egui::ComboBox::from_id_salt("audit_risk")
                .width(110.0)
                .selected_text(state.risk_filter.map(|r| r.name()).unwrap_or("any"))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut state.risk_filter, None, "any");
                    for risk in RiskLevel::FILTERS {
                        ui.selectable_value(&mut state.risk_filter, Some(risk), risk.name());
                    }
                });

            ui.add_space(10.0);
            ui.label("From:");
            date_input(ui, &mut state.from_input, &mut state.from, true);
            ui.label("To:");
            date_input(ui, &mut state.to_input, &mut state.to, true);

            ui.add_space(10.0);
            ui.add_enabled_ui(!state.loading, |ui| {
                if primary_button_with_icon(ui, FUNNEL, "Apply").clicked() {
                    apply = true;
                }
            });
            if styled_button(ui, "Clear").clicked() {
                state.clear_filters();
                apply = true;
            }
            if state.loading {
                ui.spinner();
            }
        });

        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
                export = true;
            }
            ui.add_space(20.0);
            search_box(ui, &mut state.table, "Action, user, IP...");
        });
    }

    if apply {
        app.load_audit();
    }
    if export {
        app.export_audit();
    }

    ui.add_space(15.0);

    let no_data = app.tr(Msg::NoData);
    let state = &mut app.audit;
    if !loading_or_empty(ui, state.loading, state.entries.is_empty(), no_data) {
        return go_back;
    }

    let view = state.table.view(&state.entries);
    pagination_bar(ui, &mut state.table, &view, "entries");
    ui.add_space(10.0);

    ScrollArea::both().id_salt("audit_scroll").show(ui, |ui| {
        egui::Grid::new("audit_grid")
            .num_columns(AuditLogEntry::COLUMNS.len())
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                sortable_headers(ui, &mut state.table, &AuditLogEntry::COLUMNS);
                ui.end_row();

                for entry in &view.rows {
                    ui.label(
                        entry
                            .timestamp
                            .with_timezone(&Local)
                            .format("%Y-%m-%d %H:%M:%S")
                            .to_string(),
                    );
                    ui.label(&entry.action);
                    ui.label(entry.user_id.as_deref().unwrap_or("-"));
                    let ip = ui.label(entry.ip_address.as_deref().unwrap_or("-"));
                    if let Some(agent) = &entry.user_agent {
                        ip.on_hover_text(agent);
                    }
                    status_chip(ui, entry.risk_level.name(), risk_color(entry.risk_level));

                    let details = entry.details_text();
                    ui.add(egui::Label::new(&details).truncate()).on_hover_text(details);
                    ui.end_row();
                }
            });
    });

    go_back
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_from_filters() {
        let mut state = AuditState::new(20);
        assert!(state.query().to_params().is_empty());

        state.risk_filter = Some(RiskLevel::High);
        state.from = NaiveDate::from_ymd_opt(2025, 1, 1);
        let params = state.query().to_params();
        assert_eq!(params, vec![("from", "2025-01-01".to_string()), ("riskLevel", "high".to_string())]);

        state.clear_filters();
        assert!(state.query().risk_level.is_none());
        assert!(state.from_input.is_empty());
    }
}
