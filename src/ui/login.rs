use eframe::egui::{self, Color32, TextEdit, Ui};

use crate::session::Session;

// ---------------------------------------------------------------------------
// Login form
// ---------------------------------------------------------------------------

/// Text typed into the login page, plus the last rejection message.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
}

impl LoginForm {
    /// Try the typed credentials against `session`. The password field is
    /// cleared either way.
    pub fn submit(&mut self, session: &mut Session) -> bool {
        let result = session.login(&self.username, &self.password);
        self.password.clear();
        match result {
            Ok(()) => {
                self.error = None;
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }
}

/// Render the login gate. Returns `true` once the session is authenticated.
pub fn login_page(ui: &mut Ui, form: &mut LoginForm, session: &mut Session) -> bool {
    let mut submitted = false;

    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(ui.available_height() * 0.25);
        ui.heading("Sign in");
        ui.add_space(12.0);

        ui.add(
            TextEdit::singleline(&mut form.username)
                .hint_text("Username")
                .desired_width(240.0),
        );
        let password = ui.add(
            TextEdit::singleline(&mut form.password)
                .password(true)
                .hint_text("Password")
                .desired_width(240.0),
        );
        let enter = password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.add_space(8.0);
        if ui.button("Log in").clicked() || enter {
            submitted = true;
        }

        if let Some(err) = &form.error {
            ui.add_space(8.0);
            ui.colored_label(Color32::RED, err);
        }
    });

    submitted && form.submit(session)
}
