//! App state - pure data structure with no I/O logic
//!
//! Owns the session and the one live screen. Every call goes out tagged
//! with the `ScreenId` of the screen that issued it, and answers are only
//! delivered to a screen that still carries that id.

use std::time::Instant;

use tokio::sync::broadcast;

use crate::messages::{ApiCall, ApiOutcome, NetworkCommand, NetworkResponse, RenderState, ScreenId};
use crate::screens::{CoursesScreen, LoginScreen, Notice, RegisterScreen};
use crate::session::{Session, SessionEvent};

pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";

/// The screen currently on display
#[derive(Clone, Debug)]
pub enum Screen {
    Login(LoginScreen),
    Register(RegisterScreen),
    /// The lesson manager lives inside the course list
    Courses(CoursesScreen),
}

impl Screen {
    pub fn id(&self) -> ScreenId {
        match self {
            Screen::Login(s) => s.id,
            Screen::Register(s) => s.id,
            Screen::Courses(s) => s.id,
        }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    session: Session,
    pub screen: Screen,
    next_screen_id: u64,
    pub show_help: bool,
    /// App-level message, shown above whatever screen is current
    pub banner: Option<Notice>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        AppState {
            session,
            screen: Screen::Login(LoginScreen::new(ScreenId(0))),
            next_screen_id: 1,
            show_help: false,
            banner: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.session.subscribe()
    }

    /// Generate a unique screen ID
    pub fn next_id(&mut self) -> ScreenId {
        let id = ScreenId(self.next_screen_id);
        self.next_screen_id += 1;
        id
    }

    /// Pick the first screen from the stored session
    pub fn start(&mut self) -> Option<NetworkCommand> {
        self.route()
    }

    /// Courses when a token is present, Login otherwise. Always builds a
    /// fresh screen, so anything still in flight for the old one is dropped.
    pub fn route(&mut self) -> Option<NetworkCommand> {
        let id = self.next_id();
        if self.session.is_authenticated() {
            let mut courses = CoursesScreen::new(id);
            let call = courses.load();
            self.screen = Screen::Courses(courses);
            Some(execute(id, call))
        } else {
            self.screen = Screen::Login(LoginScreen::new(id));
            None
        }
    }

    /// Re-route only when the screen disagrees with the session
    pub fn sync_with_session(&mut self) -> Option<NetworkCommand> {
        let on_courses = matches!(self.screen, Screen::Courses(_));
        if on_courses != self.session.is_authenticated() {
            self.route()
        } else {
            None
        }
    }

    pub fn handle_session_event(&mut self, event: SessionEvent) -> Option<NetworkCommand> {
        tracing::debug!(?event, "Session event");
        if event == SessionEvent::Expired {
            self.banner = Some(Notice::error(SESSION_EXPIRED));
        }
        self.sync_with_session()
    }

    pub fn show_register(&mut self) {
        let id = self.next_id();
        self.banner = None;
        self.screen = Screen::Register(RegisterScreen::new(id));
    }

    pub fn show_login(&mut self) {
        let id = self.next_id();
        self.screen = Screen::Login(LoginScreen::new(id));
    }

    pub fn logout(&mut self) -> Option<NetworkCommand> {
        self.session.logout();
        self.banner = None;
        self.route()
    }

    /// Deliver a network response to the screen that asked for it
    pub fn handle_response(&mut self, response: NetworkResponse, now: Instant) -> Option<NetworkCommand> {
        let NetworkResponse { screen, outcome } = response;

        if outcome.is_unauthorized() {
            tracing::info!("Request rejected as unauthorized, resetting session");
            self.banner = Some(Notice::error(SESSION_EXPIRED));
            return self.sync_with_session();
        }

        // An accepted login still counts once its screen is gone
        if let ApiOutcome::Login(Ok(token)) = &outcome {
            if self.screen.id() != screen {
                tracing::info!(?screen, "Login completed after leaving the login screen");
                self.session.login(token);
                self.banner = None;
                return self.route();
            }
        }

        let mut token = None;
        let follow_up = match &mut self.screen {
            Screen::Login(login) if login.id == screen => {
                if let ApiOutcome::Login(result) = outcome {
                    token = login.handle_login(result);
                }
                None
            }
            Screen::Register(register) if register.id == screen => {
                if let ApiOutcome::Register(result) = outcome {
                    register.handle_register(result);
                }
                None
            }
            Screen::Courses(courses) if courses.id == screen => {
                let id = courses.id;
                courses.handle(outcome).map(|call| execute(id, call))
            }
            Screen::Courses(CoursesScreen {
                lessons: Some(lessons),
                ..
            }) if lessons.id == screen => {
                let id = lessons.id;
                lessons.handle(outcome, now).map(|call| execute(id, call))
            }
            current => {
                tracing::debug!(?screen, current = ?current.id(), "Dropping stale response");
                None
            }
        };

        match token {
            Some(token) => {
                self.session.login(&token);
                self.banner = None;
                self.route()
            }
            None => follow_up,
        }
    }

    /// Expire timed notices; true when something changed on screen
    pub fn tick(&mut self, now: Instant) -> bool {
        match &mut self.screen {
            Screen::Courses(CoursesScreen {
                lessons: Some(lessons),
                ..
            }) => lessons.tick(now),
            _ => false,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            screen: self.screen.clone(),
            show_help: self.show_help,
            banner: self.banner.clone(),
        }
    }
}

pub(crate) fn execute(screen: ScreenId, call: ApiCall) -> NetworkCommand {
    NetworkCommand::Execute { screen, call }
}
