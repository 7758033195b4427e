use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::TableState;

/// Menu commands the app has to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopBarAction {
    OpenFile(PathBuf),
    Reload,
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar of the table page.
pub fn top_bar(ui: &mut Ui, state: &TableState, user: Option<&str>) -> Option<TopBarAction> {
    let mut action = None;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                action = open_file_dialog().map(TopBarAction::OpenFile);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                action = Some(TopBarAction::Reload);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.loading {
            ui.spinner();
            ui.label("Loading…");
        } else {
            ui.label(format!(
                "{} rows loaded, {} matching",
                state.dataset.len(),
                state.filtered_indices().len()
            ));
        }

        if let Some(user) = user {
            ui.separator();
            ui.label(format!("Signed in as {user}"));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });

    action
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open domain data")
        .add_filter("CSV", &["csv"])
        .pick_file()
}
