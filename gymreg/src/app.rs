/// Things that can happen to this app
mod action;
pub use action::Action;

/// Side effects the app asks for
mod effect;
pub use effect::{Effect, EffectContext};

/// The landing view after a successful registration
mod login_view;

/// The registration form and its widgets
mod registration_form;

/// Transient notifications
mod toast;

use chrono::{Duration, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use gymreg_core::{Notification, Outcome, Route};
use ratatui::{prelude::*, widgets::Paragraph, Frame};
use registration_form::RegistrationForm;
use std::process::ExitCode;
use toast::Toasts;

/// Shown when someone submits again before the last attempt finished.
const ALREADY_SUBMITTING: &str = "Registration already in progress…";

/// The "functional core" of the app.
pub struct App {
    /// Status to display (visible at the bottom of the screen)
    status_line: Option<String>,

    /// Where the app is in its lifecycle
    state: AppState,

    /// Notifications on screen
    toasts: Toasts,

    /// Whether a registration request is in flight. We only allow one at a
    /// time.
    submitting: bool,

    /// Branches to offer whenever we make a fresh form
    branches: Vec<String>,
}

impl App {
    /// Create a new instance of the app, starting on the registration form
    pub fn new(branches: Vec<String>, toast_lifetime: Duration) -> Self {
        Self {
            status_line: None,
            state: AppState::Registering(RegistrationForm::new(branches.clone())),
            toasts: Toasts::new(toast_lifetime),
            submitting: false,
            branches,
        }
    }

    /// Render the app's UI to the screen
    pub fn render(&mut self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]);
        let [body_area, status_area] = vertical.areas(frame.area());

        match &self.state {
            AppState::Registering(form) => form.render(body_area, frame),
            AppState::LoggingIn => login_view::render(frame, body_area),
            AppState::Exiting(_) => frame.render_widget(Paragraph::new("Exiting…"), body_area),
        }

        self.toasts.render(frame, body_area);

        let status = Paragraph::new(match (&self.status_line, self.route()) {
            (Some(line), _) => line.as_str(),
            (None, Some(Route::Register)) => {
                "tab/shift-tab: move · ←/→: choose · ctrl-t: show password · enter: register · esc: quit"
            }
            (None, _) => "All good!",
        });

        frame.render_widget(status, status_area);
    }

    /// Handle an `Action`, updating the app's state and producing some side effect(s)
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Key(key) => self.handle_key(key),
            Action::Problem(problem) => {
                self.status_line = Some(problem);

                vec![]
            }
            Action::TimePassed => {
                self.toasts.expire(Utc::now());

                vec![]
            }
            Action::Registered(outcome) => {
                self.finish_submission(&outcome);

                vec![]
            }
        }
    }

    /// Handle a key press for whatever view we're on
    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return vec![];
        }

        // Whatever the status line said is stale once someone presses a key,
        // except for the in-flight marker, which goes when the request does.
        if !self.submitting {
            self.status_line = None;
        }

        let ctrl_c =
            key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl_c || key.code == KeyCode::Esc {
            self.state = AppState::Exiting(ExitCode::SUCCESS);

            return vec![];
        }

        match &mut self.state {
            AppState::Registering(form) => match key.code {
                KeyCode::Enter => self.submit(),
                _ => {
                    form.handle_event(key);

                    vec![]
                }
            },
            AppState::LoggingIn => {
                match key.code {
                    KeyCode::Char('r') => {
                        self.state =
                            AppState::Registering(RegistrationForm::new(self.branches.clone()));
                    }
                    KeyCode::Char('q') => {
                        self.state = AppState::Exiting(ExitCode::SUCCESS);
                    }
                    _ => {
                        self.status_line = Some(format!("Unknown key {key:?}"));
                    }
                }

                vec![]
            }
            AppState::Exiting(_) => vec![],
        }
    }

    /// Validate the form and, if it's OK, ask for it to be sent. The form
    /// itself is left alone either way.
    fn submit(&mut self) -> Vec<Effect> {
        if self.submitting {
            self.notify(Notification::info(ALREADY_SUBMITTING));

            return vec![];
        }

        let AppState::Registering(form) = &self.state else {
            return vec![];
        };

        match form.finish().validate() {
            Ok(payload) => {
                self.submitting = true;
                self.status_line = Some("Registering…".to_owned());

                vec![Effect::Register(payload)]
            }
            Err(err) => {
                self.notify(Outcome::RejectedLocally(err).notification());

                vec![]
            }
        }
    }

    /// Show the result of a registration attempt and move on if it worked
    fn finish_submission(&mut self, outcome: &Outcome) {
        self.submitting = false;
        self.status_line = None;
        self.notify(outcome.notification());

        if outcome.route() == Some(Route::Login) && matches!(self.state, AppState::Registering(_))
        {
            // dropping the form here is what clears it
            self.state = AppState::LoggingIn;
        }
    }

    /// Put a notification on screen
    fn notify(&mut self, notification: Notification) {
        self.toasts.push(notification, Utc::now());
    }

    /// Which view we're showing, unless we're on the way out
    pub fn route(&self) -> Option<Route> {
        match self.state {
            AppState::Registering(_) => Some(Route::Register),
            AppState::LoggingIn => Some(Route::Login),
            AppState::Exiting(_) => None,
        }
    }

    /// Let the TUI manager know whether we're all wrapped up and can exit.
    pub fn should_exit(&self) -> Option<ExitCode> {
        if let AppState::Exiting(code) = &self.state {
            Some(*code)
        } else {
            None
        }
    }
}

/// App lifecycle
#[derive(Debug)]
enum AppState {
    /// Filling out the registration form
    Registering(RegistrationForm),

    /// Registered; showing the login view
    LoggingIn,

    /// We're done and want the following exit code after final effects
    Exiting(ExitCode),
}
