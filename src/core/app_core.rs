use super::{InputResult, Screen};
use crate::auth::{AuthEvent, AuthRequest, FederatedProvider, User};
use crate::config::Config;
use crate::profile::{Profile, GUEST};
use crate::puzzles::{Difficulty, PuzzleKind};
use crate::widgets::{
    FieldNavigable, LoginForm, LoginMode, MenuState, Navigable, PuzzleSession, SubmitResult,
    TextEditable,
};
use crossterm::event::{KeyCode, KeyModifiers};
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Entries on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeEntry {
    Puzzles,
    Profile,
    Account,
    SignUp,
    Quit,
}

impl HomeEntry {
    pub const ALL: [HomeEntry; 5] = [
        HomeEntry::Puzzles,
        HomeEntry::Profile,
        HomeEntry::Account,
        HomeEntry::SignUp,
        HomeEntry::Quit,
    ];

    pub fn label(&self, signed_in: bool) -> &'static str {
        match self {
            HomeEntry::Puzzles => "Play puzzles",
            HomeEntry::Profile => "My profile",
            HomeEntry::Account if signed_in => "Log out",
            HomeEntry::Account => "Log in",
            HomeEntry::SignUp => "Create an account",
            HomeEntry::Quit => "Quit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

/// One-line notification shown at the bottom of the screen
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    expires_at: Instant,
}

const HELP_TEXT: &str =
    ".new  .difficulty <easy|medium|hard>  .go <route>  .logout  .quit";

/// Core application state (frontend-agnostic)
///
/// Owns the current screen and every piece of per-screen state, applies key
/// presses, and folds finished rounds into the player's profile. Frontends
/// read it while drawing; the only change they make is dropping an expired
/// toast before a frame.
pub struct AppCore {
    pub config: Config,

    /// Where profiles are saved
    pub data_dir: PathBuf,

    /// Application running flag
    pub running: bool,

    pub screen: Screen,

    /// Tier used for the next puzzle opened
    pub difficulty: Difficulty,

    pub home_menu: MenuState<HomeEntry>,

    /// Puzzle list on `/all-puzzles`
    pub catalogue: MenuState<PuzzleKind>,

    /// The mounted puzzle; only present on a puzzle screen
    pub session: Option<PuzzleSession>,

    pub login: LoginForm,

    pub user: Option<User>,

    /// Stats for `user`, or the guest profile
    pub profile: Profile,

    pub toast: Option<Toast>,

    rng: StdRng,

    /// Requests to the account worker (None when accounts are unavailable)
    auth_tx: Option<mpsc::UnboundedSender<AuthRequest>>,
}

impl AppCore {
    pub fn new(config: Config, data_dir: PathBuf, rng: StdRng) -> Self {
        let profile = Self::load_profile(&data_dir, GUEST);
        Self {
            difficulty: config.game.default_difficulty,
            config,
            data_dir,
            running: true,
            screen: Screen::Home,
            home_menu: MenuState::new(HomeEntry::ALL.to_vec()),
            catalogue: MenuState::new(PuzzleKind::ALL.to_vec()),
            session: None,
            login: LoginForm::new(LoginMode::SignIn),
            user: None,
            profile,
            toast: None,
            rng,
            auth_tx: None,
        }
    }

    pub fn set_auth_sender(&mut self, tx: mpsc::UnboundedSender<AuthRequest>) {
        self.auth_tx = Some(tx);
    }

    fn load_profile(data_dir: &std::path::Path, user: &str) -> Profile {
        Profile::load(data_dir, user).unwrap_or_else(|e| {
            tracing::warn!("Failed to load profile for {}: {:#}", user, e);
            Profile::new(user)
        })
    }

    /// Name shown in the header
    pub fn display_name(&self) -> &str {
        self.user.as_ref().map_or(GUEST, |u| u.email.as_str())
    }

    /// Switch screens, mounting a fresh puzzle or form where needed
    pub fn navigate(&mut self, screen: Screen) {
        let screen = match screen {
            Screen::Login | Screen::SignUp if self.user.is_some() => {
                self.show_toast(
                    format!("Already signed in as {}", self.display_name()),
                    ToastKind::Info,
                );
                Screen::Profile
            }
            other => other,
        };

        self.session = match screen {
            Screen::Puzzle(kind) => {
                let limit = self.config.time_limit(kind, self.difficulty);
                self.catalogue.select_where(|k| *k == kind);
                Some(PuzzleSession::new(kind, self.difficulty, limit, &mut self.rng))
            }
            _ => None,
        };

        match screen {
            Screen::Login => self.login = LoginForm::new(LoginMode::SignIn),
            Screen::SignUp => self.login = LoginForm::new(LoginMode::SignUp),
            _ => {}
        }

        tracing::debug!("Navigate {} -> {}", self.screen, screen);
        self.screen = screen;
    }

    /// Navigate by route; false if the route names no screen
    pub fn navigate_route(&mut self, route: &str) -> bool {
        match Screen::from_route(route) {
            Some(screen) => {
                self.navigate(screen);
                true
            }
            None => false,
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        let message = message.into();
        tracing::debug!("Toast ({:?}): {}", kind, message);
        self.toast = Some(Toast {
            message,
            kind,
            expires_at: Instant::now() + Duration::from_secs(self.config.ui.toast_seconds),
        });
    }

    /// Drop the toast once its time is up
    pub fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
        }
    }

    /// One wall-clock second passed
    pub fn tick(&mut self) {
        let expired = self.session.as_mut().is_some_and(|s| s.tick());
        if expired {
            self.record_outcome();
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            self.running = false;
            return;
        }

        let result = match self.screen {
            Screen::Home => self.handle_home_key(code),
            Screen::AllPuzzles => self.handle_catalogue_key(code),
            Screen::Puzzle(_) => self.handle_puzzle_key(code, modifiers),
            Screen::Login | Screen::SignUp => self.handle_login_key(code, modifiers),
            Screen::Profile => match code {
                KeyCode::Esc | KeyCode::Enter => InputResult::Back,
                _ => InputResult::Ignored,
            },
        };

        if !result.is_handled() {
            tracing::trace!("Unhandled key {:?} on {}", code, self.screen);
            return;
        }
        self.apply(result);
    }

    pub fn handle_paste(&mut self, text: &str) {
        match self.screen {
            Screen::Puzzle(_) => {
                if let Some(session) = self.session.as_mut() {
                    session.insert_str(text);
                }
            }
            Screen::Login | Screen::SignUp if !self.login.pending => self.login.paste(text),
            _ => {}
        }
    }

    fn apply(&mut self, result: InputResult) {
        if result.is_transition() {
            tracing::debug!("Applying {:?} on {}", result, self.screen);
        }
        match result {
            InputResult::Continue | InputResult::Ignored => {}
            InputResult::Navigate(screen) => self.navigate(screen),
            InputResult::Back => self.navigate(self.screen.parent()),
            InputResult::Command(command) => self.handle_dot_command(&command),
            InputResult::Auth(request) => self.send_auth(request),
            InputResult::Quit => self.running = false,
        }
    }

    fn handle_home_key(&mut self, code: KeyCode) -> InputResult {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.home_menu.navigate_up(),
            KeyCode::Down | KeyCode::Char('j') => self.home_menu.navigate_down(),
            KeyCode::Home => self.home_menu.home(),
            KeyCode::End => self.home_menu.end(),
            KeyCode::Char('q') => return InputResult::Quit,
            KeyCode::Enter => {
                return match self.home_menu.selected_item().copied() {
                    Some(HomeEntry::Puzzles) => InputResult::Navigate(Screen::AllPuzzles),
                    Some(HomeEntry::Profile) => InputResult::Navigate(Screen::Profile),
                    Some(HomeEntry::Account) if self.user.is_some() => {
                        InputResult::Auth(AuthRequest::SignOut)
                    }
                    Some(HomeEntry::Account) => InputResult::Navigate(Screen::Login),
                    Some(HomeEntry::SignUp) => InputResult::Navigate(Screen::SignUp),
                    Some(HomeEntry::Quit) => InputResult::Quit,
                    None => InputResult::Continue,
                };
            }
            _ => return InputResult::Ignored,
        }
        InputResult::Continue
    }

    fn handle_catalogue_key(&mut self, code: KeyCode) -> InputResult {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.catalogue.navigate_up(),
            KeyCode::Down | KeyCode::Char('j') => self.catalogue.navigate_down(),
            KeyCode::Home => self.catalogue.home(),
            KeyCode::End => self.catalogue.end(),
            KeyCode::Char('d') => self.set_difficulty(self.difficulty.next()),
            KeyCode::Esc => return InputResult::Back,
            KeyCode::Enter => {
                return match self.catalogue.selected_item() {
                    Some(kind) => InputResult::Navigate(Screen::Puzzle(*kind)),
                    None => InputResult::Continue,
                };
            }
            _ => return InputResult::Ignored,
        }
        InputResult::Continue
    }

    fn handle_puzzle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> InputResult {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        match code {
            KeyCode::Char('n') if ctrl => {
                self.new_round();
                return InputResult::Continue;
            }
            KeyCode::Char('g') if ctrl => {
                self.give_up();
                return InputResult::Continue;
            }
            KeyCode::Esc => return InputResult::Back,
            KeyCode::Enter => return self.submit_answer(),
            _ => {}
        }

        let Some(session) = self.session.as_mut() else {
            return InputResult::Ignored;
        };
        match code {
            KeyCode::Char(c) if !ctrl => session.insert_char(c),
            KeyCode::Backspace => session.backspace(),
            KeyCode::Delete => session.delete(),
            KeyCode::Left => session.move_cursor_left(),
            KeyCode::Right => session.move_cursor_right(),
            _ => return InputResult::Ignored,
        }
        InputResult::Continue
    }

    /// Enter on a puzzle: run a dot command, start the next round, or check the answer
    fn submit_answer(&mut self) -> InputResult {
        let Some(session) = self.session.as_mut() else {
            return InputResult::Ignored;
        };

        let answer = session.answer.trim().to_string();
        if let Some(command) = answer.strip_prefix('.') {
            session.clear_answer();
            return InputResult::Command(command.to_string());
        }

        if session.outcome.is_over() {
            self.new_round();
            return InputResult::Continue;
        }

        match session.submit_answer() {
            SubmitResult::Correct { .. } | SubmitResult::Incorrect => self.record_outcome(),
            SubmitResult::Invalid(e) => self.show_toast(e.to_string(), ToastKind::Error),
            SubmitResult::RoundOver => {}
        }
        InputResult::Continue
    }

    fn handle_login_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> InputResult {
        if self.login.pending {
            // Waiting on the worker
            return match code {
                KeyCode::Esc => InputResult::Back,
                _ => InputResult::Continue,
            };
        }

        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        match code {
            KeyCode::Esc => return InputResult::Back,
            KeyCode::Enter => return self.submit_login(),
            KeyCode::Char('s') if ctrl => {
                let other = match self.login.mode {
                    LoginMode::SignIn => Screen::SignUp,
                    LoginMode::SignUp => Screen::Login,
                };
                return InputResult::Navigate(other);
            }
            KeyCode::Tab | KeyCode::Down => self.login.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.login.previous_field(),
            KeyCode::Backspace => self.login.pop_char(),
            KeyCode::Char(c) if !ctrl => self.login.push_char(c),
            _ => return InputResult::Ignored,
        }
        InputResult::Continue
    }

    fn submit_login(&mut self) -> InputResult {
        if self.login.federated_focused() {
            self.login.pending = true;
            return InputResult::Auth(AuthRequest::Federated(FederatedProvider::Google));
        }

        match self.login.credentials() {
            Ok((email, password)) => {
                self.login.pending = true;
                self.login.error = None;
                InputResult::Auth(match self.login.mode {
                    LoginMode::SignIn => AuthRequest::SignIn { email, password },
                    LoginMode::SignUp => AuthRequest::SignUp { email, password },
                })
            }
            Err(reason) => {
                self.login.error = Some(reason.to_string());
                InputResult::Continue
            }
        }
    }

    fn send_auth(&mut self, request: AuthRequest) {
        let sent = match &self.auth_tx {
            Some(tx) => tx.send(request).is_ok(),
            None => false,
        };
        if !sent {
            tracing::error!("Account worker is not running");
            self.login.finish(Some("Accounts are unavailable right now".to_string()));
            self.show_toast("Accounts are unavailable right now", ToastKind::Error);
        }
    }

    /// Apply everything the account worker has reported since the last frame
    pub fn drain_auth_events(&mut self, rx: &mut mpsc::UnboundedReceiver<AuthEvent>) {
        while let Ok(event) = rx.try_recv() {
            self.handle_auth_event(event);
        }
    }

    pub fn handle_auth_event(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(user) => {
                let message = format!("Welcome back, {}!", user.email);
                self.signed_in(user, message);
            }
            AuthEvent::SignedUp(user) => {
                let message = format!("Account created. Welcome, {}!", user.email);
                self.signed_in(user, message);
            }
            AuthEvent::SignedOut => {
                self.user = None;
                self.profile = Self::load_profile(&self.data_dir, GUEST);
                self.show_toast("Signed out", ToastKind::Info);
            }
            AuthEvent::Failed(error) => {
                if self.login.pending {
                    self.login.finish(Some(error.to_string()));
                }
                self.show_toast(error.to_string(), ToastKind::Error);
            }
        }
    }

    fn signed_in(&mut self, user: User, message: String) {
        self.login.finish(None);
        self.profile = Self::load_profile(&self.data_dir, &user.email);
        self.user = Some(user);
        self.show_toast(message, ToastKind::Success);
        if matches!(self.screen, Screen::Login | Screen::SignUp) {
            self.navigate(Screen::Home);
        }
    }

    /// Handle a dot command (without the leading dot)
    pub fn handle_dot_command(&mut self, command: &str) {
        let command = command.trim().trim_start_matches('.');
        let parts: Vec<&str> = command.split_whitespace().collect();
        let Some(name) = parts.first() else {
            return;
        };

        match *name {
            "quit" | "q" => self.running = false,
            "new" | "n" => {
                if self.session.is_some() {
                    self.new_round();
                } else {
                    self.show_toast("Open a puzzle first", ToastKind::Error);
                }
            }
            "difficulty" | "diff" | "d" => {
                let difficulty = match parts.get(1) {
                    Some(arg) => match arg.parse::<Difficulty>() {
                        Ok(d) => d,
                        Err(e) => {
                            self.show_toast(e, ToastKind::Error);
                            return;
                        }
                    },
                    None => self.difficulty.next(),
                };
                self.set_difficulty(difficulty);
            }
            "go" => match parts.get(1) {
                Some(route) => {
                    if !self.navigate_route(route) {
                        self.show_toast(format!("No page at {}", route), ToastKind::Error);
                    }
                }
                None => self.show_toast("Usage: .go <route>", ToastKind::Error),
            },
            "logout" => {
                if self.user.is_some() {
                    self.send_auth(AuthRequest::SignOut);
                } else {
                    self.show_toast("Nobody is signed in", ToastKind::Error);
                }
            }
            "help" | "?" => self.show_toast(HELP_TEXT, ToastKind::Info),
            other => {
                self.show_toast(
                    format!("Unknown command: .{} (try .help)", other),
                    ToastKind::Error,
                );
            }
        }
    }

    /// Change tier; a mounted puzzle restarts on the new tier
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        if let Some(session) = self.session.as_mut() {
            let limit = self.config.time_limit(session.kind, difficulty);
            session.set_difficulty(difficulty, limit, &mut self.rng);
        }
        self.show_toast(format!("Difficulty: {}", difficulty), ToastKind::Info);
    }

    pub fn new_round(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.regenerate(&mut self.rng);
        }
    }

    pub fn give_up(&mut self) {
        let gave_up = match self.session.as_mut() {
            Some(session) if !session.outcome.is_over() => {
                session.give_up();
                true
            }
            _ => false,
        };
        if gave_up {
            self.record_outcome();
        }
    }

    /// Fold the finished round into the profile and announce new achievements
    fn record_outcome(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let unlocked = self
            .profile
            .record_result(session.kind, session.difficulty, session.outcome);

        if let Err(e) = self.profile.save(&self.data_dir) {
            tracing::warn!("Failed to save profile: {:#}", e);
        }

        if !unlocked.is_empty() {
            let titles: Vec<&str> = unlocked.iter().map(|a| a.title()).collect();
            self.show_toast(
                format!("Achievement unlocked: {}", titles.join(", ")),
                ToastKind::Success,
            );
        }
    }
}
