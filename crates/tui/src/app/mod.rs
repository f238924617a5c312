mod list;

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use engine::{
    AuthProvider, Clipboard, ConfirmPrompt, CredentialSchema, CustomerSchema, ExpenseSchema,
    IncomeSchema, LocalAuth, Notice, NoticeLevel, Stores, UrlOpener,
};

use crate::{
    collab::{Osc52Clipboard, SystemUrlOpener, TerminalConfirm},
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

pub use list::{Collaborators, ListOutcome, ListPage, RowActions};

const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Customers,
    Credentials,
    Income,
    Expenses,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Dashboard,
        Section::Customers,
        Section::Credentials,
        Section::Income,
        Section::Expenses,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Customers => "Customers",
            Self::Credentials => "Credentials",
            Self::Income => "Income",
            Self::Expenses => "Expenses",
        }
    }

    /// Section bound to digit key `1`..`5`.
    pub fn from_digit(ch: char) -> Option<Self> {
        let index = ch.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(index as usize).copied()
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|section| *section == self)
            .unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Debug)]
pub struct LoginState {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl From<NoticeLevel> for ToastLevel {
    fn from(level: NoticeLevel) -> Self {
        match level {
            NoticeLevel::Info => Self::Info,
            NoticeLevel::Success => Self::Success,
            NoticeLevel::Error => Self::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub login: LoginState,
    pub user: Option<String>,
    pub section: Section,
    pub customers: ListPage<CustomerSchema>,
    pub credentials: ListPage<CredentialSchema>,
    pub income: ListPage<IncomeSchema>,
    pub expenses: ListPage<ExpenseSchema>,
    pub toast: Option<ToastState>,
    pub help: bool,
    pub currency_symbol: String,
    pub timezone: Tz,
    /// Wall clock used for every days-remaining value in the frame.
    pub now: DateTime<Utc>,
}

impl AppState {
    fn show_notice(&mut self, notice: Notice, at: Instant) {
        self.toast = Some(ToastState {
            message: notice.message,
            level: notice.level.into(),
            expires_at: at + TOAST_TTL,
        });
    }

    /// `true` when the active page is typing into a form or the search box.
    pub fn captures_text(&self) -> bool {
        match self.section {
            Section::Dashboard => false,
            Section::Customers => self.customers.captures_text(),
            Section::Credentials => self.credentials.captures_text(),
            Section::Income => self.income.captures_text(),
            Section::Expenses => self.expenses.captures_text(),
        }
    }

    fn reset_pages(&mut self) {
        self.customers.reset_modes();
        self.credentials.reset_modes();
        self.income.reset_modes();
        self.expenses.reset_modes();
    }
}

pub struct App {
    auth: LocalAuth,
    clipboard: Box<dyn Clipboard>,
    opener: Box<dyn UrlOpener>,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        Self::with_collaborators(
            config,
            stores,
            Box::new(Osc52Clipboard),
            Box::new(SystemUrlOpener),
        )
    }

    pub fn with_collaborators(
        config: AppConfig,
        stores: Stores,
        clipboard: Box<dyn Clipboard>,
        opener: Box<dyn UrlOpener>,
    ) -> Self {
        let timezone = config.timezone.parse::<Tz>().unwrap_or_else(|err| {
            tracing::warn!(timezone = %config.timezone, "unknown timezone, using UTC: {err}");
            Tz::UTC
        });
        let state = AppState {
            screen: Screen::Login,
            login: LoginState {
                username: config.username.clone(),
                password: String::new(),
                focus: if config.username.is_empty() {
                    LoginField::Username
                } else {
                    LoginField::Password
                },
                message: None,
            },
            user: None,
            section: Section::Dashboard,
            customers: ListPage::new(stores.customers),
            credentials: ListPage::new(stores.credentials),
            income: ListPage::new(stores.income),
            expenses: ListPage::new(stores.expenses),
            toast: None,
            help: false,
            currency_symbol: config.currency_symbol,
            timezone,
            now: Utc::now(),
        };

        Self {
            auth: LocalAuth::new(config.accounts),
            clipboard,
            opener,
            state,
            should_quit: false,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        ui::restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit() {
            self.tick(Utc::now(), Instant::now());
            let backdrop = terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?
                .buffer
                .clone();

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        let mut prompt = TerminalConfirm::new(terminal, &backdrop);
                        self.handle_key(key, &mut prompt);
                    }
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Advance the clock and drop an expired toast.
    pub fn tick(&mut self, now: DateTime<Utc>, instant: Instant) {
        self.state.now = now;
        if self
            .state
            .toast
            .as_ref()
            .is_some_and(|toast| instant >= toast.expires_at)
        {
            self.state.toast = None;
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_key(&mut self, key: KeyEvent, prompt: &mut dyn ConfirmPrompt) {
        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }
        match self.state.screen {
            Screen::Login => self.handle_login(action),
            Screen::Home => self.handle_home(action, prompt),
        }
    }

    fn handle_login(&mut self, action: AppAction) {
        match action {
            AppAction::NextField | AppAction::PrevField | AppAction::Up | AppAction::Down => {
                self.state.login.focus = match self.state.login.focus {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
            }
            AppAction::Submit => self.attempt_login(),
            AppAction::Backspace => {
                self.active_field_mut().pop();
            }
            AppAction::Input(ch) => self.active_field_mut().push(ch),
            AppAction::Cancel => self.state.login.message = None,
            _ => {}
        }
    }

    fn active_field_mut(&mut self) -> &mut String {
        match self.state.login.focus {
            LoginField::Username => &mut self.state.login.username,
            LoginField::Password => &mut self.state.login.password,
        }
    }

    fn attempt_login(&mut self) {
        let login = &mut self.state.login;
        if login.username.trim().is_empty() || login.password.is_empty() {
            login.message = Some("Enter username and password.".to_string());
            return;
        }

        match self.auth.sign_in(&login.username, &login.password) {
            Ok(user) => {
                login.password.clear();
                login.message = None;
                self.state.user = Some(user.username);
                self.state.screen = Screen::Home;
                self.state.section = Section::Dashboard;
            }
            Err(err) => {
                login.password.clear();
                login.message = Some(err.to_string());
            }
        }
    }

    fn logout(&mut self) {
        self.auth.sign_out();
        self.state.user = None;
        self.state.help = false;
        self.state.reset_pages();
        self.state.login.focus = LoginField::Password;
        self.state.screen = Screen::Login;
    }

    fn handle_home(&mut self, action: AppAction, prompt: &mut dyn ConfirmPrompt) {
        if self.state.help {
            if matches!(action, AppAction::Cancel | AppAction::Input('?')) {
                self.state.help = false;
            }
            return;
        }

        let now = self.state.now;
        let mut ctx = Collaborators {
            clipboard: self.clipboard.as_mut(),
            opener: self.opener.as_mut(),
            prompt,
        };
        let outcome = match self.state.section {
            Section::Dashboard => ListOutcome::Ignored,
            Section::Customers => self.state.customers.handle(action, now, &mut ctx),
            Section::Credentials => self.state.credentials.handle(action, now, &mut ctx),
            Section::Income => self.state.income.handle(action, now, &mut ctx),
            Section::Expenses => self.state.expenses.handle(action, now, &mut ctx),
        };

        match outcome {
            ListOutcome::Handled => {}
            ListOutcome::Notice(notice) => self.state.show_notice(notice, Instant::now()),
            ListOutcome::Ignored => self.handle_global(action),
        }
    }

    fn handle_global(&mut self, action: AppAction) {
        match action {
            AppAction::NextField => self.state.section = self.state.section.next(),
            AppAction::PrevField => self.state.section = self.state.section.prev(),
            AppAction::Input('q') => self.should_quit = true,
            AppAction::Input('x') => self.logout(),
            AppAction::Input('?') => self.state.help = true,
            AppAction::Input(ch) => {
                if let Some(section) = Section::from_digit(ch) {
                    self.state.section = section;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use engine::{EngineError, RecordId};

    use super::*;

    struct FailingClipboard;

    impl Clipboard for FailingClipboard {
        fn write_text(&mut self, _value: &str) -> std::result::Result<(), EngineError> {
            Err(EngineError::Clipboard("no terminal".to_string()))
        }
    }

    struct NoopOpener;

    impl UrlOpener for NoopOpener {
        fn open(&mut self, _url: &str) -> std::result::Result<(), EngineError> {
            Ok(())
        }
    }

    struct Answer(bool);

    impl ConfirmPrompt for Answer {
        fn confirm(&mut self, _message: &str) -> bool {
            self.0
        }
    }

    fn app() -> App {
        App::with_collaborators(
            AppConfig::default(),
            Stores::seeded().unwrap(),
            Box::new(FailingClipboard),
            Box::new(NoopOpener),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), &mut Answer(false));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn logged_in() -> App {
        let mut app = app();
        type_text(&mut app, "admin");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "admin");
        press(&mut app, KeyCode::Enter);
        app
    }

    #[test]
    fn wrong_password_stays_on_login() {
        let mut app = app();
        type_text(&mut app, "admin");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "nope");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.screen, Screen::Login);
        assert_eq!(
            app.state.login.message.as_deref(),
            Some("Invalid username or password")
        );
        assert!(app.state.login.password.is_empty());
    }

    #[test]
    fn login_then_switch_sections() {
        let mut app = logged_in();
        assert_eq!(app.state.screen, Screen::Home);
        assert_eq!(app.state.user.as_deref(), Some("admin"));

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.state.section, Section::Credentials);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.state.section, Section::Income);
    }

    #[test]
    fn q_types_inside_forms_and_quits_in_lists() {
        let mut app = logged_in();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "q");
        assert!(!app.should_quit());
        assert_eq!(
            app.state.customers.controller.form().unwrap().value("client_name"),
            "q"
        );

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn incomplete_form_stays_open() {
        let mut app = logged_in();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Mihir");
        press(&mut app, KeyCode::Enter);

        let form = app.state.customers.controller.form().unwrap();
        assert_eq!(form.error(), Some("Required: Company Name"));
        assert_eq!(app.state.customers.controller.store().len(), 7);
        assert!(app.state.toast.is_none());
    }

    #[test]
    fn search_narrows_and_escape_clears() {
        let mut app = logged_in();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "aws");
        let now = app.state.now;
        assert_eq!(app.state.credentials.controller.derived_view(now).len(), 1);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.credentials.controller.search_text(), "");
        assert!(!app.state.credentials.search_active);
    }

    #[test]
    fn declined_delete_keeps_the_row() {
        let mut app = logged_in();
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.state.income.controller.store().len(), 2);
        assert!(app.state.toast.is_none());

        app.handle_key(
            KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE),
            &mut Answer(true),
        );
        assert_eq!(app.state.income.controller.store().len(), 1);
        assert_eq!(app.state.toast.as_ref().unwrap().message, "Income deleted");
    }

    #[test]
    fn failed_copy_shows_error_toast_that_expires() {
        let mut app = logged_in();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('l'));

        let toast = app.state.toast.clone().unwrap();
        assert_eq!(toast.message, "Unable to copy");
        assert_eq!(toast.level, ToastLevel::Error);

        app.tick(Utc::now(), toast.expires_at);
        assert!(app.state.toast.is_none());
    }

    #[test]
    fn reveal_toggles_selected_password() {
        let mut app = logged_in();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('r'));
        let now = app.state.now;
        let id = app
            .state
            .credentials
            .selected_record(now)
            .map(|record| record.id.clone())
            .unwrap();
        assert!(app.state.credentials.controller.is_revealed(&id));
        assert!(!app.state.credentials.controller.is_revealed(&RecordId::from("missing")));
    }

    #[test]
    fn logout_returns_to_login() {
        let mut app = logged_in();
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.state.screen, Screen::Login);
        assert!(app.state.user.is_none());
    }

    fn screen_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn every_section_renders() {
        let mut app = logged_in();
        let backend = ratatui::backend::TestBackend::new(140, 40);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();

        terminal.draw(|frame| ui::render(frame, &app.state)).unwrap();
        assert!(screen_text(&terminal).contains("5 renewals upcoming"));

        for digit in ['2', '3', '4', '5'] {
            press(&mut app, KeyCode::Char(digit));
            terminal.draw(|frame| ui::render(frame, &app.state)).unwrap();
        }

        press(&mut app, KeyCode::Char('a'));
        terminal.draw(|frame| ui::render(frame, &app.state)).unwrap();
        assert!(screen_text(&terminal).contains("Add Expense"));
    }
}
