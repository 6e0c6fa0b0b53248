// App state and main event loop.
// Maps keys to dashboard operations and runs backend requests as background tasks.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::{DashboardApi, WorkflowDetail, WorkflowRunRef};
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::state::{ActiveView, ListTicket, SummaryTicket};
use crate::store::KeyValueStore;
use crate::ui;

/// Completion of a background request.
#[derive(Debug)]
pub enum AppEvent {
    SessionChecked(u64, Result<bool>),
    LoggedOut(Result<()>),
    ListLoaded(ListTicket, Result<Vec<WorkflowRunRef>>),
    SummaryLoaded(SummaryTicket, Result<WorkflowDetail>),
}

/// Which input has keyboard focus on the list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Owner,
    Repo,
    #[default]
    Runs,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Owner => Focus::Repo,
            Focus::Repo => Focus::Runs,
            Focus::Runs => Focus::Owner,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Focus::Owner => Focus::Runs,
            Focus::Repo => Focus::Owner,
            Focus::Runs => Focus::Repo,
        }
    }

    pub fn is_editing(&self) -> bool {
        !matches!(self, Focus::Runs)
    }
}

/// Spawns backend requests and reports their completion as events.
#[derive(Clone)]
pub struct Requests {
    api: Arc<dyn DashboardApi>,
    tx: UnboundedSender<AppEvent>,
}

impl Requests {
    pub fn new(api: Arc<dyn DashboardApi>, tx: UnboundedSender<AppEvent>) -> Self {
        Self { api, tx }
    }

    pub fn check_session(&self, generation: u64) {
        let api = self.api.clone();
        self.spawn(async move {
            let result = api.auth_status().await;
            AppEvent::SessionChecked(generation, result)
        });
    }

    pub fn logout(&self) {
        let api = self.api.clone();
        self.spawn(async move { AppEvent::LoggedOut(api.logout().await) });
    }

    pub fn list(&self, ticket: ListTicket) {
        let api = self.api.clone();
        self.spawn(async move {
            let result = api
                .list_workflow_runs(&ticket.selection.owner, &ticket.selection.name)
                .await;
            AppEvent::ListLoaded(ticket, result)
        });
    }

    pub fn summary(&self, ticket: SummaryTicket) {
        let api = self.api.clone();
        self.spawn(async move {
            let result = api
                .workflow_summary(&ticket.selection.owner, &ticket.selection.name, ticket.run_id)
                .await;
            AppEvent::SummaryLoaded(ticket, result)
        });
    }

    fn spawn(&self, request: impl Future<Output = AppEvent> + Send + 'static) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if tx.send(request.await).is_err() {
                tracing::debug!("event channel closed; dropping response");
            }
        });
    }
}

/// Main application state.
pub struct App<S: KeyValueStore> {
    pub dashboard: Dashboard<S>,
    /// Keyboard focus on the list screen.
    pub focus: Focus,
    /// URL shown on the login gate.
    pub login_url: String,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    requests: Requests,
    events: UnboundedReceiver<AppEvent>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(dashboard: Dashboard<S>, api: Arc<dyn DashboardApi>, login_url: String) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let focus = if dashboard.view.selection.is_complete() {
            Focus::Runs
        } else {
            Focus::Owner
        };
        Self {
            dashboard,
            focus,
            login_url,
            show_help: false,
            should_quit: false,
            requests: Requests::new(api, tx),
            events,
        }
    }

    /// Kick off the startup session check.
    pub fn start(&mut self) {
        let generation = self.dashboard.begin_session_check();
        self.requests.check_session(generation);
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        self.start();
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_input()?;
            self.drain_events();
        }
        Ok(())
    }

    /// Apply every completed request.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.apply(event);
        }
    }

    /// Apply one completed request to the dashboard.
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::SessionChecked(generation, result) => {
                if let Some(ticket) = self.dashboard.finish_session_check(generation, result) {
                    self.requests.list(ticket);
                }
            }
            AppEvent::LoggedOut(result) => {
                self.dashboard.finish_logout(result);
                self.focus = Focus::Owner;
            }
            AppEvent::ListLoaded(ticket, result) => {
                self.dashboard.finish_list_fetch(ticket, result);
            }
            AppEvent::SummaryLoaded(ticket, result) => {
                self.dashboard.finish_summary_fetch(ticket, result);
            }
        }
    }

    #[allow(clippy::collapsible_if)]
    fn handle_input(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Route a key press according to the active view.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        match self.dashboard.view.active_view() {
            ActiveView::CheckingSession => {
                if key.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            ActiveView::LoginRequired => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('r') | KeyCode::Enter => self.start(),
                _ => {}
            },
            ActiveView::List if self.focus.is_editing() => self.handle_edit_key(key),
            ActiveView::List => self.handle_list_key(key),
            ActiveView::Summary => self.handle_summary_key(key),
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Esc => self.focus = Focus::Runs,
            KeyCode::Enter => {
                self.focus = Focus::Runs;
                self.fetch_workflows();
            }
            KeyCode::Backspace => {
                let mut value = self.focused_value();
                value.pop();
                self.edit_focused(value);
            }
            KeyCode::Char(c) if !c.is_whitespace() => {
                let mut value = self.focused_value();
                value.push(c);
                self.edit_focused(value);
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Char('o') => self.focus = Focus::Owner,
            KeyCode::Up | KeyCode::Char('k') => self.dashboard.view.workflows.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.dashboard.view.workflows.select_next(),
            KeyCode::Char('r') => self.fetch_workflows(),
            KeyCode::Char('L') => self.requests.logout(),
            KeyCode::Enter => {
                if let Some(ticket) = self.dashboard.open_selected_run() {
                    self.requests.summary(ticket);
                }
            }
            _ => {}
        }
    }

    fn handle_summary_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => self.dashboard.back(),
            KeyCode::Char('L') => self.requests.logout(),
            _ => {}
        }
    }

    fn fetch_workflows(&mut self) {
        if let Some(ticket) = self.dashboard.fetch_workflows() {
            self.requests.list(ticket);
        }
    }

    fn focused_value(&self) -> String {
        let selection = &self.dashboard.view.selection;
        match self.focus {
            Focus::Owner => selection.owner.clone(),
            Focus::Repo => selection.name.clone(),
            Focus::Runs => String::new(),
        }
    }

    fn edit_focused(&mut self, value: String) {
        let ticket = match self.focus {
            Focus::Owner => self.dashboard.set_owner(value),
            Focus::Repo => self.dashboard.set_name(value),
            Focus::Runs => None,
        };
        if let Some(ticket) = ticket {
            self.requests.list(ticket);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RunStatus;
    use crate::error::CinderError;
    use crate::store::{MemoryStore, OWNER_KEY, REPO_KEY};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    /// Backend double answering from fixed responses and recording calls.
    #[derive(Default)]
    struct FakeApi {
        authenticated: bool,
        list_status: Option<u16>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl DashboardApi for FakeApi {
        async fn auth_status(&self) -> Result<bool> {
            self.record("status".to_string());
            Ok(self.authenticated)
        }

        async fn logout(&self) -> Result<()> {
            self.record("logout".to_string());
            Err(CinderError::Timeout)
        }

        async fn list_workflow_runs(&self, owner: &str, repo: &str) -> Result<Vec<WorkflowRunRef>> {
            self.record(format!("list {}/{}", owner, repo));
            match self.list_status {
                Some(404) => Err(CinderError::NotFound(format!("/github/{}/{}", owner, repo))),
                Some(401) => Err(CinderError::Unauthorized),
                _ => Ok((0..12)
                    .map(|id| WorkflowRunRef {
                        id,
                        name: Some(format!("{} #{}", repo, id)),
                        status: RunStatus::Completed,
                        created_at: Utc::now(),
                        run_duration_seconds: Some(30.0),
                    })
                    .collect()),
            }
        }

        async fn workflow_summary(
            &self,
            _owner: &str,
            _repo: &str,
            run_id: u64,
        ) -> Result<WorkflowDetail> {
            self.record(format!("summary {}", run_id));
            Err(CinderError::Unauthorized)
        }
    }

    fn app_with(api: Arc<FakeApi>, store: MemoryStore) -> App<MemoryStore> {
        App::new(
            Dashboard::new(store),
            api,
            "http://localhost:3000/auth/github/login".to_string(),
        )
    }

    async fn settle(app: &mut App<MemoryStore>) {
        // Let spawned requests finish, then apply whatever arrived
        for _ in 0..20 {
            tokio::task::yield_now().await;
            tokio::time::sleep(Duration::from_millis(5)).await;
            app.drain_events();
        }
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App<MemoryStore>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[tokio::test]
    async fn test_startup_loads_restored_selection() {
        let api = Arc::new(FakeApi {
            authenticated: true,
            ..FakeApi::default()
        });
        let mut store = MemoryStore::new();
        store.set(OWNER_KEY, "octo").unwrap();
        store.set(REPO_KEY, "hello").unwrap();

        let mut app = app_with(api.clone(), store);
        app.start();
        settle(&mut app).await;

        assert_eq!(api.calls(), vec!["status", "list octo/hello"]);
        assert_eq!(app.dashboard.view.workflows.runs().len(), 10);
        assert_eq!(app.dashboard.view.active_view(), ActiveView::List);
    }

    #[tokio::test]
    async fn test_unauthenticated_startup_issues_no_fetch() {
        let api = Arc::new(FakeApi::default());
        let mut store = MemoryStore::new();
        store.set(OWNER_KEY, "octo").unwrap();
        store.set(REPO_KEY, "hello").unwrap();

        let mut app = app_with(api.clone(), store);
        app.start();
        settle(&mut app).await;

        assert_eq!(api.calls(), vec!["status"]);
        assert_eq!(app.dashboard.view.active_view(), ActiveView::LoginRequired);
    }

    #[tokio::test]
    async fn test_empty_reload_makes_no_request() {
        let api = Arc::new(FakeApi {
            authenticated: true,
            ..FakeApi::default()
        });
        let mut app = app_with(api.clone(), MemoryStore::new());
        app.start();
        settle(&mut app).await;

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('r'));
        settle(&mut app).await;

        assert_eq!(api.calls(), vec!["status"]);
        assert_eq!(
            app.dashboard.view.ui.error_message.as_deref(),
            Some("Please enter owner and repo")
        );
    }

    #[tokio::test]
    async fn test_typing_selects_repository() {
        let api = Arc::new(FakeApi {
            authenticated: true,
            list_status: Some(404),
            ..FakeApi::default()
        });
        let mut app = app_with(api.clone(), MemoryStore::new());
        app.start();
        settle(&mut app).await;

        assert_eq!(app.focus, Focus::Owner);
        type_text(&mut app, "octo");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "x");
        settle(&mut app).await;

        assert_eq!(api.calls(), vec!["status", "list octo/x"]);
        assert_eq!(
            app.dashboard.view.ui.error_message.as_deref(),
            Some("Repository not found")
        );
        assert!(app.dashboard.view.workflows.is_empty());
    }

    #[tokio::test]
    async fn test_summary_unauthorized_returns_to_gate() {
        let api = Arc::new(FakeApi {
            authenticated: true,
            ..FakeApi::default()
        });
        let mut store = MemoryStore::new();
        store.set(OWNER_KEY, "octo").unwrap();
        store.set(REPO_KEY, "hello").unwrap();

        let mut app = app_with(api.clone(), store);
        app.start();
        settle(&mut app).await;

        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert_eq!(app.dashboard.view.active_view(), ActiveView::LoginRequired);
        assert_eq!(
            app.dashboard.view.ui.error_message.as_deref(),
            Some("Session expired. Please login again.")
        );
    }

    #[tokio::test]
    async fn test_logout_clears_store_even_on_failure() {
        let api = Arc::new(FakeApi {
            authenticated: true,
            ..FakeApi::default()
        });
        let mut store = MemoryStore::new();
        store.set(OWNER_KEY, "octo").unwrap();
        store.set(REPO_KEY, "hello").unwrap();

        let mut app = app_with(api.clone(), store);
        app.start();
        settle(&mut app).await;

        press(&mut app, KeyCode::Char('L'));
        settle(&mut app).await;

        assert_eq!(app.dashboard.view.active_view(), ActiveView::LoginRequired);
        assert!(app.dashboard.store().is_empty());
        assert!(app.dashboard.view.ui.error_message.is_none());
    }

    #[test]
    fn test_focus_cycle() {
        assert_eq!(Focus::Owner.next(), Focus::Repo);
        assert_eq!(Focus::Runs.next(), Focus::Owner);
        assert_eq!(Focus::Owner.prev(), Focus::Runs);
        assert!(!Focus::Runs.is_editing());
    }
}
