//! Billing panel: school plans and balances.

use chrono::Local;
use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, CREDIT_CARD, FILE_XLS, PENCIL};

use super::app::App;
use super::components::{
    action_button, back_button, colors, loading_or_empty, pagination_bar, panel_header, primary_button_with_icon,
    search_box, sortable_headers, styled_button, styled_button_with_icon,
};
use crate::i18n::Msg;
use crate::models::{BalanceCredit, Plan, School};
use crate::table::TableState;

/// Open edit dialog of the billing panel.
pub enum BillingDialog {
    ChangePlan {
        school_id: String,
        school_name: String,
        plan_id: String,
    },
    Credit {
        school_id: String,
        school_name: String,
        amount: String,
        note: String,
    },
}

pub struct BillingState {
    pub schools: Vec<School>,
    pub plans: Vec<Plan>,
    pub loading: bool,
    pub submitting: bool,
    pub table: TableState,
    pub dialog: Option<BillingDialog>,
}

impl BillingState {
    pub fn new(page_size: usize) -> Self {
        Self {
            schools: Vec::new(),
            plans: Vec::new(),
            loading: false,
            submitting: false,
            table: TableState::new(page_size),
            dialog: None,
        }
    }
}

/// Show the billing panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Billing");

    ui.horizontal(|ui| {
        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_billing();
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
            app.export_billing();
        }

        ui.add_space(20.0);
        search_box(ui, &mut app.billing.table, "School, plan or status...");
    });

    ui.add_space(15.0);

    let state = &app.billing;
    if loading_or_empty(ui, state.loading, state.schools.is_empty(), app.tr(Msg::NoData)) {
        show_table(app, ui);
    }

    if app.billing.dialog.is_some() {
        show_dialog(app, ui.ctx());
    }

    go_back
}

fn show_table(app: &mut App, ui: &mut Ui) {
    let state = &mut app.billing;
    let view = state.table.view(&state.schools);
    let mut open = None;

    pagination_bar(ui, &mut state.table, &view, "schools");
    ui.add_space(10.0);

    ScrollArea::vertical().id_salt("billing_scroll").show(ui, |ui| {
        egui::Grid::new("billing_grid")
            .num_columns(School::COLUMNS.len() + 1)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                sortable_headers(ui, &mut state.table, &School::COLUMNS);
                ui.strong("Actions");
                ui.end_row();

                for school in &view.rows {
                    ui.label(&school.name);
                    ui.label(&school.plan);

                    let balance = RichText::new(format!("{:.2}", school.balance));
                    if school.balance < 0.0 {
                        ui.label(balance.color(colors::ERROR));
                    } else {
                        ui.label(balance);
                    }

                    ui.label(school.status.as_deref().unwrap_or("-"));
                    ui.label(
                        school
                            .created_at
                            .map(|d| d.with_timezone(&Local).format("%Y-%m-%d").to_string())
                            .unwrap_or_else(|| "-".to_string()),
                    );

                    ui.horizontal(|ui| {
                        if action_button(ui, PENCIL, "Change plan").clicked() {
                            let plan_id = state
                                .plans
                                .iter()
                                .find(|p| p.name == school.plan)
                                .map(|p| p.id.clone())
                                .unwrap_or_default();
                            open = Some(BillingDialog::ChangePlan {
                                school_id: school.id.clone(),
                                school_name: school.name.clone(),
                                plan_id,
                            });
                        }
                        ui.add_space(4.0);
                        if action_button(ui, CREDIT_CARD, "Record credit").clicked() {
                            open = Some(BillingDialog::Credit {
                                school_id: school.id.clone(),
                                school_name: school.name.clone(),
                                amount: String::new(),
                                note: String::new(),
                            });
                        }
                    });

                    ui.end_row();
                }
            });
    });

    if open.is_some() {
        state.dialog = open;
    }
}

/// Amount typed into the credit dialog; a comma is accepted as decimal separator.
fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// What the dialog asked for this frame.
enum Submit {
    Plan(String, String),
    Credit(String, BalanceCredit),
}

fn show_dialog(app: &mut App, ctx: &egui::Context) {
    let submitting = app.billing.submitting;
    let plans = &app.billing.plans;
    let Some(dialog) = app.billing.dialog.as_mut() else {
        return;
    };

    let mut close = false;
    let mut submit = None;
    let mut error = None;

    let title = match dialog {
        BillingDialog::ChangePlan { .. } => "Change Plan",
        BillingDialog::Credit { .. } => "Record Credit",
    };

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .default_width(380.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            match dialog {
                BillingDialog::ChangePlan {
                    school_id,
                    school_name,
                    plan_id,
                } => {
                    ui.label(RichText::new(school_name.as_str()).strong());
                    ui.add_space(8.0);

                    let selected = plans
                        .iter()
                        .find(|p| p.id == *plan_id)
                        .map(Plan::label)
                        .unwrap_or_else(|| "Select plan...".to_string());
                    egui::ComboBox::from_id_salt("billing_plan")
                        .width(260.0)
                        .selected_text(selected)
                        .show_ui(ui, |ui| {
                            for plan in plans {
                                ui.selectable_value(plan_id, plan.id.clone(), plan.label());
                            }
                        });

                    if footer(ui, submitting, &mut close) {
                        if plan_id.is_empty() {
                            error = Some(Msg::SelectPlan);
                        } else {
                            submit = Some(Submit::Plan(school_id.clone(), plan_id.clone()));
                        }
                    }
                }
                BillingDialog::Credit {
                    school_id,
                    school_name,
                    amount,
                    note,
                } => {
                    ui.label(RichText::new(school_name.as_str()).strong());
                    ui.add_space(8.0);

                    egui::Grid::new("credit_grid")
                        .num_columns(2)
                        .spacing([20.0, 10.0])
                        .show(ui, |ui| {
                            ui.label("Amount:");
                            ui.add(egui::TextEdit::singleline(amount).desired_width(120.0).hint_text("0.00"));
                            ui.end_row();

                            ui.label("Note:");
                            ui.add(egui::TextEdit::singleline(note).desired_width(240.0).hint_text("Optional"));
                            ui.end_row();
                        });

                    if footer(ui, submitting, &mut close) {
                        match parse_amount(amount) {
                            Some(value) => {
                                submit = Some(Submit::Credit(
                                    school_id.clone(),
                                    BalanceCredit {
                                        amount: value,
                                        note: note.trim().to_string(),
                                    },
                                ));
                            }
                            None => error = Some(Msg::AmountRequired),
                        }
                    }
                }
            }
        });

    if close {
        app.billing.dialog = None;
    }
    if let Some(message) = error {
        app.toasts.warning(app.tr(message));
    }
    match submit {
        Some(Submit::Plan(school_id, plan_id)) => app.change_plan(school_id, plan_id),
        Some(Submit::Credit(school_id, credit)) => app.record_credit(school_id, credit),
        None => {}
    }
}

/// Cancel / Save row; returns true when Save was clicked.
fn footer(ui: &mut Ui, submitting: bool, close: &mut bool) -> bool {
    let mut save = false;

    ui.add_space(15.0);
    ui.separator();
    ui.add_space(10.0);

    ui.horizontal(|ui| {
        if styled_button(ui, "Cancel").clicked() {
            *close = true;
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_enabled_ui(!submitting, |ui| {
                if primary_button_with_icon(ui, "", "Save").clicked() {
                    save = true;
                }
            });
            if submitting {
                ui.spinner();
            }
        });
    });

    save
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 12,5 "), Some(12.5));
        assert_eq!(parse_amount("-40"), Some(-40.0));
        assert_eq!(parse_amount("0"), Some(0.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("ten"), None);
    }
}
