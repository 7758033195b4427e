use eframe::egui::{self, Align, Button, Color32, Layout, RichText, TextEdit, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::paginate::PageSize;
use crate::data::sort::SortDirection;
use crate::state::TableState;

const HEADER_HEIGHT: f32 = 26.0;
const ROW_HEIGHT: f32 = 22.0;

/// What the user asked for from the page footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Stay,
    Logout,
}

/// Shown for empty cells.
fn display_cell(value: &str) -> String {
    if value.is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// Central panel – heading, search, page size, table
// ---------------------------------------------------------------------------

pub fn table_page(ui: &mut Ui, state: &mut TableState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("Your Domain Data Insights").size(28.0).strong());
    });
    ui.add_space(8.0);

    controls(ui, state);
    ui.add_space(8.0);

    if state.loading {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.spinner();
            ui.label("Loading...");
        });
        return;
    }

    data_table(ui, state);
}

fn controls(ui: &mut Ui, state: &mut TableState) {
    ui.horizontal(|ui: &mut Ui| {
        let mut term = state.view.search_term.clone();
        let search = ui.add(
            TextEdit::singleline(&mut term)
                .hint_text("Search...")
                .desired_width(280.0),
        );
        if search.changed() {
            state.set_search(term);
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
            let mut size = state.view.page_size;
            egui::ComboBox::from_id_salt("page_size")
                .selected_text(size.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for option in PageSize::ALL {
                        ui.selectable_value(&mut size, option, option.to_string());
                    }
                });
            if size != state.view.page_size {
                state.set_page_size(size);
            }
        });
    });
}

fn data_table(ui: &mut Ui, state: &mut TableState) {
    let columns = state.dataset.columns.clone();
    if columns.is_empty() {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label("No data to show.");
        });
        return;
    }

    // Owned copy of the visible page so the header can mutate `state`.
    let rows: Vec<Vec<String>> = state
        .visible_rows()
        .into_iter()
        .map(|row| state.dataset.cells(row).map(display_cell).collect())
        .collect();

    let mut clicked: Option<String> = None;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(90.0).clip(true), columns.len())
        .header(HEADER_HEIGHT, |mut header| {
            for col in &columns {
                header.col(|ui: &mut Ui| {
                    let arrow = state
                        .sort
                        .direction_for(col)
                        .map_or("⬍", SortDirection::arrow);
                    let label = RichText::new(format!("{col} {arrow}")).strong();
                    if ui.add(Button::new(label).frame(false)).clicked() {
                        clicked = Some(col.clone());
                    }
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let cells = &rows[row.index()];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });

    if let Some(col) = clicked {
        state.sort_by(&col);
    }
}

// ---------------------------------------------------------------------------
// Bottom panel – pagination and logout
// ---------------------------------------------------------------------------

pub fn footer(ui: &mut Ui, state: &mut TableState) -> PageAction {
    let mut action = PageAction::Stay;

    ui.horizontal(|ui: &mut Ui| {
        if ui
            .add_enabled(!state.is_first_page(), Button::new("Previous"))
            .clicked()
        {
            state.prev_page();
        }
        ui.label(format!(
            "Page {} of {}",
            state.view.page_index,
            state.total_pages()
        ));
        if ui
            .add_enabled(!state.is_last_page(), Button::new("Next"))
            .clicked()
        {
            state.next_page();
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
            let logout = Button::new(RichText::new("Logout").color(Color32::WHITE))
                .fill(Color32::from_rgb(220, 38, 38));
            if ui.add(logout).clicked() {
                action = PageAction::Logout;
            }
        });
    });

    action
}
