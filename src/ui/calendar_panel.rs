//! School calendar: month view with event creation and deletion.

use chrono::{Datelike, Local, Months, NaiveDate};
use eframe::egui::{self, Color32, CornerRadius, Margin, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, CARET_LEFT, CARET_RIGHT, PLUS, TRASH};

use super::app::{App, DeleteTarget};
use super::components::{
    back_button, colors, danger_action_button, panel_header, primary_button_with_icon, styled_button,
    styled_button_with_icon,
};
use crate::i18n::Msg;
use crate::models::calendar::is_valid_time;
use crate::models::{CreateEvent, EventType, SchoolEvent};

/// New event form.
pub struct EventForm {
    pub date: NaiveDate,
    pub title: String,
    pub time: String,
    pub event_type: EventType,
    pub school_id: String,
}

impl EventForm {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            title: String::new(),
            time: String::new(),
            event_type: EventType::default(),
            school_id: String::new(),
        }
    }

    /// Request body, or the first problem found.
    fn to_request(&self) -> Result<CreateEvent, Msg> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Msg::RequiredField);
        }
        let time = self.time.trim();
        if !time.is_empty() && !is_valid_time(time) {
            return Err(Msg::InvalidTime);
        }
        let school_id = self.school_id.trim();

        Ok(CreateEvent {
            date: self.date,
            title: title.to_string(),
            time: (!time.is_empty()).then(|| time.to_string()),
            event_type: self.event_type,
            school_id: (!school_id.is_empty()).then(|| school_id.to_string()),
        })
    }
}

pub struct CalendarState {
    /// First day of the visible month.
    pub month: NaiveDate,
    pub events: Vec<SchoolEvent>,
    pub loading: bool,
    pub submitting: bool,
    pub selected_day: Option<NaiveDate>,
    pub form: Option<EventForm>,
}

impl Default for CalendarState {
    fn default() -> Self {
        Self {
            month: first_of_month(Local::now().date_naive()),
            events: Vec::new(),
            loading: false,
            submitting: false,
            selected_day: None,
            form: None,
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First and last day of the month containing `month`.
pub fn month_bounds(month: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = first_of_month(month);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first);
    (first, last)
}

fn shift_month(month: NaiveDate, forward: bool) -> NaiveDate {
    let shifted = if forward {
        month.checked_add_months(Months::new(1))
    } else {
        month.checked_sub_months(Months::new(1))
    };
    first_of_month(shifted.unwrap_or(month))
}

fn event_color(event_type: EventType) -> Color32 {
    match event_type {
        EventType::Holiday => colors::SUCCESS,
        EventType::Exam => colors::ERROR,
        EventType::Meeting => colors::WARNING,
        EventType::Event => colors::INFO,
        EventType::Other => colors::NEUTRAL,
    }
}

/// Show the calendar panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Calendar");

    let mut reload = false;

    ui.horizontal(|ui| {
        let state = &mut app.calendar;

        if styled_button(ui, CARET_LEFT).on_hover_text("Previous month").clicked() {
            state.month = shift_month(state.month, false);
            state.selected_day = None;
            reload = true;
        }
        ui.label(RichText::new(state.month.format("%B %Y").to_string()).size(18.0).strong());
        if styled_button(ui, CARET_RIGHT).on_hover_text("Next month").clicked() {
            state.month = shift_month(state.month, true);
            state.selected_day = None;
            reload = true;
        }

        ui.add_space(20.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            reload = true;
        }

        ui.add_space(10.0);

        if primary_button_with_icon(ui, PLUS, "Add Event").clicked() {
            let date = state.selected_day.unwrap_or(state.month);
            state.form = Some(EventForm::new(date));
        }

        if state.loading {
            ui.spinner();
        }
    });

    if reload {
        app.calendar.events.clear();
        app.load_events();
    }

    ui.add_space(15.0);

    show_month_grid(app, ui);

    ui.add_space(15.0);
    ui.separator();
    ui.add_space(10.0);

    show_event_list(app, ui);

    if app.calendar.form.is_some() {
        show_form_dialog(app, ui.ctx());
    }

    go_back
}

fn show_month_grid(app: &mut App, ui: &mut Ui) {
    let state = &mut app.calendar;
    let (first, last) = month_bounds(state.month);
    let offset = first.weekday().num_days_from_monday() as usize;
    let days = last.day() as usize;
    let today = Local::now().date_naive();

    let cell_width = ((ui.available_width() - 6.0 * 6.0) / 7.0).clamp(80.0, 160.0);

    egui::Grid::new("calendar_grid")
        .num_columns(7)
        .spacing([6.0, 6.0])
        .show(ui, |ui| {
            for name in ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"] {
                ui.strong(name);
            }
            ui.end_row();

            let cells = (offset + days).div_ceil(7) * 7;
            for cell in 0..cells {
                if cell < offset || cell >= offset + days {
                    ui.label("");
                } else {
                    let day = first + chrono::Days::new((cell - offset) as u64);
                    let selected = state.selected_day == Some(day);
                    let events: Vec<&SchoolEvent> = state.events.iter().filter(|e| e.date == day).collect();

                    let fill = if selected {
                        ui.visuals().selection.bg_fill
                    } else {
                        ui.visuals().extreme_bg_color
                    };

                    let response = egui::Frame::new()
                        .fill(fill)
                        .inner_margin(Margin::same(4))
                        .corner_radius(CornerRadius::same(4))
                        .show(ui, |ui| {
                            ui.set_width(cell_width);
                            ui.set_min_height(56.0);

                            let number = RichText::new(day.day().to_string()).strong();
                            ui.label(if day == today { number.color(colors::INFO) } else { number });

                            for event in events.iter().take(2) {
                                ui.label(
                                    RichText::new(&event.title)
                                        .small()
                                        .color(event_color(event.event_type)),
                                );
                            }
                            if events.len() > 2 {
                                ui.label(RichText::new(format!("+{} more", events.len() - 2)).small().weak());
                            }
                        })
                        .response
                        .interact(egui::Sense::click());

                    if response.clicked() {
                        state.selected_day = if selected { None } else { Some(day) };
                    }
                }

                if cell % 7 == 6 {
                    ui.end_row();
                }
            }
        });
}

fn show_event_list(app: &mut App, ui: &mut Ui) {
    let no_data = app.tr(Msg::NoData);
    let state = &app.calendar;

    let mut events: Vec<&SchoolEvent> = state
        .events
        .iter()
        .filter(|e| state.selected_day.is_none_or(|day| e.date == day))
        .collect();
    events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));

    let heading = match state.selected_day {
        Some(day) => format!("Events on {}", day.format("%Y-%m-%d")),
        None => format!("Events in {}", state.month.format("%B %Y")),
    };
    ui.label(RichText::new(heading).strong());
    ui.add_space(8.0);

    if events.is_empty() {
        ui.label(RichText::new(no_data).weak());
        return;
    }

    let mut delete = None;

    ScrollArea::vertical().id_salt("calendar_events").show(ui, |ui| {
        egui::Grid::new("calendar_events_grid")
            .num_columns(5)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.strong("Date");
                ui.strong("Time");
                ui.strong("Title");
                ui.strong("Type");
                ui.strong("Actions");
                ui.end_row();

                for event in &events {
                    ui.label(event.date.format("%Y-%m-%d").to_string());
                    ui.label(event.time.as_deref().unwrap_or("-"));
                    ui.label(&event.title);
                    ui.colored_label(event_color(event.event_type), event.event_type.name());
                    if danger_action_button(ui, TRASH, "Delete").clicked() {
                        delete = Some(DeleteTarget::Event(event.id.clone(), event.title.clone()));
                    }
                    ui.end_row();
                }
            });
    });

    if delete.is_some() {
        app.delete_target = delete;
    }
}

fn show_form_dialog(app: &mut App, ctx: &egui::Context) {
    let submitting = app.calendar.submitting;
    let Some(form) = app.calendar.form.as_mut() else {
        return;
    };

    let mut close = false;
    let mut save = false;

    egui::Window::new("Add Event")
        .collapsible(false)
        .resizable(false)
        .default_width(400.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            egui::Grid::new("event_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Date:");
                    ui.add(egui_extras::DatePickerButton::new(&mut form.date).id_salt("event_date"));
                    ui.end_row();

                    ui.label("Title:");
                    ui.add(egui::TextEdit::singleline(&mut form.title).desired_width(250.0));
                    ui.end_row();

                    ui.label("Time:");
                    let valid = form.time.trim().is_empty() || is_valid_time(&form.time);
                    ui.add(
                        egui::TextEdit::singleline(&mut form.time)
                            .desired_width(80.0)
                            .hint_text("HH:MM")
                            .text_color(if valid {
                                ui.visuals().text_color()
                            } else {
                                colors::ERROR
                            }),
                    );
                    ui.end_row();

                    ui.label("Type:");
                    egui::ComboBox::from_id_salt("event_type")
                        .width(150.0)
                        .selected_text(form.event_type.name())
                        .show_ui(ui, |ui| {
                            for event_type in EventType::ALL {
                                ui.selectable_value(&mut form.event_type, event_type, event_type.name());
                            }
                        });
                    ui.end_row();

                    ui.label("School ID:");
                    ui.add(
                        egui::TextEdit::singleline(&mut form.school_id)
                            .desired_width(120.0)
                            .hint_text("All schools"),
                    );
                    ui.end_row();
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    close = true;
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
        });

    if close {
        app.calendar.form = None;
        return;
    }

    if save {
        let request = app.calendar.form.as_ref().map(EventForm::to_request);
        match request {
            Some(Ok(data)) => app.create_event(data),
            Some(Err(message)) => {
                app.toasts.warning(app.tr(message));
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_bounds(date(2024, 2, 17)), (date(2024, 2, 1), date(2024, 2, 29)));
        assert_eq!(month_bounds(date(2025, 12, 31)), (date(2025, 12, 1), date(2025, 12, 31)));
    }

    #[test]
    fn test_shift_month_across_year() {
        assert_eq!(shift_month(date(2025, 12, 1), true), date(2026, 1, 1));
        assert_eq!(shift_month(date(2025, 1, 1), false), date(2024, 12, 1));
    }

    #[test]
    fn test_event_form_validation() {
        let mut form = EventForm::new(date(2025, 9, 1));
        assert_eq!(form.to_request().unwrap_err(), Msg::RequiredField);

        form.title = " Parents evening ".to_string();
        form.time = "7pm".to_string();
        assert_eq!(form.to_request().unwrap_err(), Msg::InvalidTime);

        form.time = "19:00".to_string();
        let request = form.to_request().unwrap();
        assert_eq!(request.title, "Parents evening");
        assert_eq!(request.time.as_deref(), Some("19:00"));
        assert!(request.school_id.is_none());
    }
}
