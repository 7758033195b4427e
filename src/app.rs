use eframe::egui;

use crate::config::Config;
use crate::data::loader::{Normalization, Source};
use crate::session::Session;
use crate::state::TableState;
use crate::task::LoadTask;
use crate::ui::login::{self, LoginForm};
use crate::ui::panels::{self, TopBarAction};
use crate::ui::table::{self, PageAction};

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    DomainList,
}

/// Redirect unauthenticated visits of the data page to the login page.
pub fn guard(route: Route, session: &Session) -> Route {
    match route {
        Route::DomainList if !session.is_authenticated() => Route::Login,
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Table page – state plus its in-flight load
// ---------------------------------------------------------------------------

/// The mounted data page. Dropping it cancels any load still running.
pub struct TablePage {
    pub state: TableState,
    task: Option<LoadTask>,
    normalization: Normalization,
}

impl TablePage {
    /// Create the page and start loading the configured resource.
    pub fn mount(config: &Config, ctx: &egui::Context) -> Self {
        let mut page = Self {
            state: TableState::new(config.page_size),
            task: None,
            normalization: config.normalization(),
        };
        page.load(config.source(), ctx);
        page
    }

    /// Start a (re)load. Any previous load is cancelled.
    pub fn load(&mut self, source: Source, ctx: &egui::Context) {
        self.state.begin_load();
        let ctx = ctx.clone();
        self.task = Some(LoadTask::spawn(
            source,
            self.normalization.clone(),
            move || ctx.request_repaint(),
        ));
    }

    /// Apply a finished load, if there is one.
    pub fn poll(&mut self) {
        let Some(result) = self.task.as_mut().and_then(LoadTask::poll) else {
            return;
        };
        self.task = None;
        match result {
            Ok(dataset) => self.state.set_dataset(dataset),
            Err(e) => self.state.load_failed(&e),
        }
    }
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DomainInsightsApp {
    config: Config,
    session: Session,
    route: Route,
    login: LoginForm,
    table: Option<TablePage>,
}

impl DomainInsightsApp {
    pub fn new(config: Config) -> Self {
        let session = Session::new(config.credentials());
        Self {
            config,
            session,
            route: Route::Login,
            login: LoginForm::default(),
            table: None,
        }
    }

    /// Switch pages through the guard. Leaving the data page unmounts it.
    fn navigate(&mut self, route: Route) {
        let route = guard(route, &self.session);
        if route != Route::DomainList {
            self.table = None;
        }
        self.route = route;
    }

    fn logout(&mut self) {
        self.session.logout();
        self.navigate(Route::Login);
    }

    fn show_domain_list(&mut self, ctx: &egui::Context) {
        let config = &self.config;
        let page = self
            .table
            .get_or_insert_with(|| TablePage::mount(config, ctx));
        page.poll();

        let menu = egui::TopBottomPanel::top("top_bar")
            .show(ctx, |ui| panels::top_bar(ui, &page.state, self.session.user()))
            .inner;
        match menu {
            Some(TopBarAction::OpenFile(path)) => page.load(Source::Path(path), ctx),
            Some(TopBarAction::Reload) => page.load(config.source(), ctx),
            None => {}
        }

        let action = egui::TopBottomPanel::bottom("pager")
            .show(ctx, |ui| table::footer(ui, &mut page.state))
            .inner;

        egui::CentralPanel::default().show(ctx, |ui| {
            table::table_page(ui, &mut page.state);
        });

        if action == PageAction::Logout {
            self.logout();
        }
    }
}

impl eframe::App for DomainInsightsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if guard(self.route, &self.session) != self.route {
            log::warn!("Not signed in, redirecting to the login page");
            self.navigate(Route::Login);
        }

        match self.route {
            Route::Login => {
                let signed_in = egui::CentralPanel::default()
                    .show(ctx, |ui| {
                        login::login_page(ui, &mut self.login, &mut self.session)
                    })
                    .inner;
                if signed_in {
                    self.navigate(Route::DomainList);
                }
            }
            Route::DomainList => self.show_domain_list(ctx),
        }
    }
}
