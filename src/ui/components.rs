//! Shared UI components.

use std::time::Instant;

use chrono::NaiveDate;
use eframe::egui::{self, Color32, CornerRadius, Margin, Response, RichText, Sense, Stroke, StrokeKind, Ui};
use egui_phosphor::regular::{
    CARET_DOUBLE_LEFT, CARET_DOUBLE_RIGHT, CARET_DOWN, CARET_LEFT, CARET_RIGHT, CARET_UP, MAGNIFYING_GLASS,
};

use crate::table::{SortDirection, TableState, TableView};
use crate::toast::{ToastLevel, Toasts};

/// Render a clickable dashboard card with dynamic size.
///
/// Returns the response which can be checked for `.clicked()`.
pub fn dashboard_card(ui: &mut Ui, title: &str, description: &str, icon: &str, size: egui::Vec2) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact(&response);

        // Scale factor based on width (200 is the reference size)
        let scale = size.x / 200.0;

        ui.painter().rect_filled(rect, 8.0, visuals.bg_fill);
        ui.painter()
            .rect_stroke(rect, 8.0, visuals.bg_stroke, StrokeKind::Outside);

        let icon_pos = egui::pos2(rect.center().x, rect.top() + size.y * 0.25);
        ui.painter().text(
            icon_pos,
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(30.0 * scale),
            visuals.text_color(),
        );

        let title_pos = egui::pos2(rect.center().x, rect.center().y + size.y * 0.07);
        ui.painter().text(
            title_pos,
            egui::Align2::CENTER_CENTER,
            title,
            egui::FontId::proportional(16.0 * scale),
            visuals.text_color(),
        );

        let desc_pos = egui::pos2(rect.center().x, rect.bottom() - size.y * 0.17);
        ui.painter().text(
            desc_pos,
            egui::Align2::CENTER_CENTER,
            description,
            egui::FontId::proportional(11.0 * scale),
            ui.visuals().weak_text_color(),
        );
    }

    response
}

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const INFO: Color32 = Color32::from_rgb(100, 150, 230);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
}

/// Render a back button that returns true when clicked.
pub fn back_button(ui: &mut Ui) -> bool {
    ui.button(RichText::new("< Back to Dashboard").size(14.0)).clicked()
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

/// Plain toolbar button.
pub fn styled_button(ui: &mut Ui, text: &str) -> Response {
    ui.add(egui::Button::new(RichText::new(text).size(14.0)).min_size(egui::vec2(70.0, 28.0)))
}

/// Toolbar button with a leading icon.
pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    styled_button(ui, &format!("{icon} {text}"))
}

/// Accent-colored button for the main action of a panel.
pub fn primary_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    let label = if icon.is_empty() {
        text.to_string()
    } else {
        format!("{icon} {text}")
    };
    ui.add(
        egui::Button::new(RichText::new(label).size(14.0).color(Color32::WHITE))
            .fill(Color32::from_rgb(0x44, 0x72, 0xC4))
            .min_size(egui::vec2(90.0, 28.0)),
    )
}

/// Small icon button used in table rows.
pub fn action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.small_button(icon).on_hover_text(tooltip)
}

/// Small red icon button for destructive row actions.
pub fn danger_action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.small_button(RichText::new(icon).color(colors::ERROR))
        .on_hover_text(tooltip)
}

/// Colored text chip for a status value.
pub fn status_chip(ui: &mut Ui, text: &str, color: Color32) {
    egui::Frame::new()
        .stroke(Stroke::new(1.0, color))
        .inner_margin(Margin::symmetric(6, 1))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.label(RichText::new(text).small().color(color));
        });
}

/// Search box bound to a table; resets paging when edited.
pub fn search_box(ui: &mut Ui, table: &mut TableState, hint: &str) {
    ui.label(MAGNIFYING_GLASS);
    let response = ui.add(
        egui::TextEdit::singleline(table.search_mut())
            .desired_width(220.0)
            .hint_text(hint),
    );
    if response.changed() {
        table.search_changed();
    }
    if !table.search().is_empty() && ui.small_button("Clear").clicked() {
        table.set_search("");
    }
}

/// Clickable column header showing the sort arrow.
pub fn sortable_header(ui: &mut Ui, table: &mut TableState, column: usize, title: &str) {
    let arrow = match table.sort() {
        Some((c, SortDirection::Ascending)) if c == column => format!(" {CARET_UP}"),
        Some((c, SortDirection::Descending)) if c == column => format!(" {CARET_DOWN}"),
        _ => String::new(),
    };
    let label = RichText::new(format!("{title}{arrow}")).strong();
    if ui.add(egui::Label::new(label).sense(Sense::click())).clicked() {
        table.toggle_sort(column);
    }
}

/// Sortable header cells, one per title; the caller ends the row.
pub fn sortable_headers(ui: &mut Ui, table: &mut TableState, titles: &[&str]) {
    for (column, title) in titles.iter().enumerate() {
        sortable_header(ui, table, column, title);
    }
}

/// "Showing a-b of n" plus first/prev/next/last controls.
pub fn pagination_bar<T>(ui: &mut Ui, table: &mut TableState, view: &TableView<'_, T>, noun: &str) {
    ui.horizontal(|ui| {
        match view.range(table.page_size()) {
            Some((start, end)) if view.filtered < view.total => {
                ui.label(format!(
                    "Showing {start}-{end} of {filtered} {noun} ({total} total)",
                    filtered = view.filtered,
                    total = view.total
                ));
            }
            Some((start, end)) => {
                ui.label(format!("Showing {start}-{end} of {filtered} {noun}", filtered = view.filtered));
            }
            None => {
                ui.label(format!("0 {noun}"));
            }
        }

        ui.add_space(20.0);
        ui.separator();
        ui.add_space(10.0);

        let page = view.page;
        let pages = view.page_count;

        if ui
            .add_enabled(page > 0, egui::Button::new(CARET_DOUBLE_LEFT))
            .on_hover_text("First page")
            .clicked()
        {
            table.first_page();
        }
        if ui
            .add_enabled(page > 0, egui::Button::new(CARET_LEFT))
            .on_hover_text("Previous page")
            .clicked()
        {
            table.prev_page();
        }

        ui.label(format!("Page {} of {}", page + 1, pages));

        if ui
            .add_enabled(page + 1 < pages, egui::Button::new(CARET_RIGHT))
            .on_hover_text("Next page")
            .clicked()
        {
            table.next_page(pages);
        }
        if ui
            .add_enabled(page + 1 < pages, egui::Button::new(CARET_DOUBLE_RIGHT))
            .on_hover_text("Last page")
            .clicked()
        {
            table.last_page(pages);
        }
    });
}

/// Spinner or empty-state line shown in place of a table.
///
/// Returns `true` when the caller should render the table.
pub fn loading_or_empty(ui: &mut Ui, loading: bool, is_empty: bool, empty_text: &str) -> bool {
    if loading && is_empty {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading...");
        });
        return false;
    }
    if is_empty {
        ui.add_space(20.0);
        ui.label(RichText::new(empty_text).weak());
        return false;
    }
    true
}

/// Parse date from multiple formats: "2000-1-1", "2000/1/1", "2000 1 1", "2000.1.1"
pub fn parse_flexible_date(input: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = input
        .trim()
        .split(['-', '/', ' ', '.'])
        .filter(|s| !s.is_empty())
        .collect();

    if parts.len() != 3 {
        return None;
    }

    let year: i32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let day: u32 = parts[2].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Date text box that turns red on invalid input and normalizes on focus loss.
///
/// `date` is updated whenever the text parses; an empty box clears it when
/// `optional` is set.
pub fn date_input(ui: &mut Ui, text: &mut String, date: &mut Option<NaiveDate>, optional: bool) {
    let parsed = parse_flexible_date(text);
    let valid = parsed.is_some() || (optional && text.trim().is_empty());

    let response = ui.add(
        egui::TextEdit::singleline(text)
            .desired_width(100.0)
            .hint_text("YYYY-MM-DD")
            .text_color(if valid {
                ui.visuals().text_color()
            } else {
                colors::ERROR
            }),
    );

    if response.changed() {
        match parse_flexible_date(text) {
            Some(d) => *date = Some(d),
            None if optional && text.trim().is_empty() => *date = None,
            None => {}
        }
    }

    if response.lost_focus() {
        *text = date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
    }
}

/// Draw active toasts in the top-right corner; click one to dismiss it.
pub fn show_toasts(ctx: &egui::Context, toasts: &mut Toasts) {
    let now = Instant::now();
    toasts.prune(now);
    if toasts.is_empty() {
        return;
    }

    let mut dismissed = None;

    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_TOP, [-12.0, 36.0])
        .order(egui::Order::Foreground)
        .interactable(true)
        .show(ctx, |ui| {
            ui.set_max_width(360.0);
            for toast in toasts.iter() {
                let color = match toast.level {
                    ToastLevel::Info => colors::INFO,
                    ToastLevel::Success => colors::SUCCESS,
                    ToastLevel::Warning => colors::WARNING,
                    ToastLevel::Error => colors::ERROR,
                };

                let response = egui::Frame::new()
                    .fill(ui.visuals().window_fill)
                    .stroke(Stroke::new(1.5, color))
                    .inner_margin(Margin::same(10))
                    .corner_radius(CornerRadius::same(6))
                    .show(ui, |ui| {
                        ui.label(RichText::new(&toast.message).color(color));
                        ui.add(
                            egui::ProgressBar::new(toast.remaining(now))
                                .desired_height(2.0)
                                .fill(color),
                        );
                    })
                    .response
                    .interact(Sense::click());

                if response.clicked() {
                    dismissed = Some(toast.id);
                }
                ui.add_space(6.0);
            }
        });

    if let Some(id) = dismissed {
        toasts.dismiss(id);
    }

    ctx.request_repaint_after(std::time::Duration::from_millis(200));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flexible_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 7);
        assert_eq!(parse_flexible_date("2025-03-07"), expected);
        assert_eq!(parse_flexible_date("2025/3/7"), expected);
        assert_eq!(parse_flexible_date(" 2025.3.7 "), expected);
        assert_eq!(parse_flexible_date("2025 3 7"), expected);
        assert_eq!(parse_flexible_date("2025-02-30"), None);
        assert_eq!(parse_flexible_date("March 7"), None);
        assert_eq!(parse_flexible_date(""), None);
    }
}
