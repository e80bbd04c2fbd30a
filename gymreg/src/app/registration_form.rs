use crate::form_fields;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use gymreg_core::FormState;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

/// Roles a new account can ask for. `superadmin` accounts are never
/// self-registered.
pub const ROLES: [&str; 3] = ["member", "trainer", "admin"];

/// A form for entering registration information
#[derive(Debug)]
pub struct RegistrationForm {
    /// Which field we're editing
    active: Field,

    /// Who are you?
    name: Input,

    /// How do we reach you?
    email: Input,

    /// How else do we reach you?
    phone: Input,

    /// What kind of account?
    role: Choice,

    /// Where do you train?
    branch: Choice,

    /// What's your password? (Masked unless toggled)
    password: Secret,

    /// Same again, please
    confirm_password: Secret,
}

form_fields!(
    Field,
    Name => "Name",
    Email => "Email",
    Phone => "Phone",
    Role => "Role",
    Branch => "Branch",
    Password => "Password",
    ConfirmPassword => "Confirm password",
);

impl RegistrationForm {
    /// Start an empty form offering the given branches
    pub fn new(branches: Vec<String>) -> Self {
        Self {
            active: Field::Name,
            name: Input::default(),
            email: Input::default(),
            phone: Input::default(),
            role: Choice::new(ROLES.iter().map(ToString::to_string).collect()),
            branch: Choice::new(branches),
            password: Secret::default(),
            confirm_password: Secret::default(),
        }
    }

    /// Render the form in the middle of `body_area`
    pub fn render(&self, body_area: Rect, frame: &mut Frame<'_>) {
        // 7 fields of 3 rows each, plus 2 for the border and 2 for padding
        let popup_vert = Layout::vertical([Constraint::Length(25)]).flex(Flex::Center);
        let popup_horiz = Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

        let [popup_area] = popup_vert.areas(body_area);
        let [popup_area] = popup_horiz.areas(popup_area);
        frame.render_widget(Clear, popup_area);

        let outer = Block::default()
            .borders(Borders::ALL)
            .title("Create your account")
            .padding(Padding::vertical(1))
            .border_style(Style::default().fg(Color::Blue));
        let inner = outer.inner(popup_area);
        frame.render_widget(outer, popup_area);

        let areas = Layout::vertical(Constraint::from_lengths([3; 7])).split(inner);

        for (field, area) in Field::FIELDS.iter().zip(areas.iter()) {
            self.render_field(*field, *area, frame);
        }
    }

    /// Render a single field, placing the cursor in it if it's active
    fn render_field(&self, field: Field, area: Rect, frame: &mut Frame<'_>) {
        let is_active = self.active == field;
        let border_style = if is_active {
            Style::default().fg(Color::Blue)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(field.label())
            .border_style(border_style);

        match field {
            Field::Name => render_input(frame, area, block, &self.name, None, is_active),
            Field::Email => render_input(frame, area, block, &self.email, None, is_active),
            Field::Phone => render_input(frame, area, block, &self.phone, None, is_active),
            Field::Role => self.role.render(frame, area, block, "Select a role"),
            Field::Branch => self.branch.render(frame, area, block, "Select a branch"),
            Field::Password => self.password.render(frame, area, block, is_active),
            Field::ConfirmPassword => self.confirm_password.render(frame, area, block, is_active),
        }
    }

    /// Update the form in response to a key press
    pub fn handle_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.active = self.active.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.active = self.active.prev();
            }
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                match self.active {
                    Field::Password => self.password.toggle(),
                    Field::ConfirmPassword => self.confirm_password.toggle(),
                    _ => (),
                }
            }
            _ => {
                let event = Event::Key(key);

                match self.active {
                    Field::Name => {
                        self.name.handle_event(&event);
                    }
                    Field::Email => {
                        self.email.handle_event(&event);
                    }
                    Field::Phone => {
                        self.phone.handle_event(&event);
                    }
                    Field::Role => self.role.handle_event(key),
                    Field::Branch => self.branch.handle_event(key),
                    Field::Password => {
                        self.password.input.handle_event(&event);
                    }
                    Field::ConfirmPassword => {
                        self.confirm_password.input.handle_event(&event);
                    }
                };
            }
        }
    }

    /// Take a snapshot of what's been entered so far
    pub fn finish(&self) -> FormState {
        FormState {
            name: self.name.to_string(),
            email: self.email.to_string(),
            phone: self.phone.to_string(),
            role: self.role.value().to_string(),
            branch: self.branch.value().to_string(),
            password: self.password.input.to_string(),
            confirm_password: self.confirm_password.input.to_string(),
        }
    }
}

/// Render a text input in a bordered box. `display` replaces the shown text
/// (e.g. for masking) without changing the cursor position.
#[expect(clippy::cast_possible_truncation)]
fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    block: Block<'_>,
    input: &Input,
    display: Option<String>,
    is_active: bool,
) {
    let width = area.width.saturating_sub(2 + 1); // -2 for the border, -1 for the cursor
    let input_scroll = input.visual_scroll(width as usize);

    let field = Paragraph::new(display.unwrap_or_else(|| input.value().to_string()))
        .scroll((0, input_scroll as u16))
        .block(block);

    frame.render_widget(field, area);

    if is_active {
        frame.set_cursor_position((
            area.x
                + (input.visual_cursor().max(input_scroll) - input_scroll) as u16 // current end of text
                + 1, // just past the end of the text
            area.y + 1, // +1 row for the border/title
        ));
    }
}

/// A select field: one of a fixed set of options, or nothing yet
#[derive(Debug)]
pub struct Choice {
    /// What can be picked
    options: Vec<String>,

    /// What has been picked
    selected: Option<usize>,
}

impl Choice {
    /// A choice with nothing picked yet
    pub fn new(options: Vec<String>) -> Self {
        Self {
            options,
            selected: None,
        }
    }

    /// The picked option, or an empty string if there isn't one
    pub fn value(&self) -> &str {
        self.selected
            .and_then(|idx| self.options.get(idx))
            .map_or("", String::as_str)
    }

    /// Pick the option after the current one, wrapping around
    fn next(&mut self) {
        if self.options.is_empty() {
            return;
        }

        self.selected = Some(match self.selected {
            Some(idx) => (idx + 1) % self.options.len(),
            None => 0,
        });
    }

    /// Pick the option before the current one, wrapping around
    fn prev(&mut self) {
        if self.options.is_empty() {
            return;
        }

        self.selected = Some(match self.selected {
            Some(idx) => (idx + self.options.len() - 1) % self.options.len(),
            None => self.options.len() - 1,
        });
    }

    /// Cycle options with left/right/space. Other keys do nothing.
    fn handle_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Right | KeyCode::Char(' ') => self.next(),
            KeyCode::Left => self.prev(),
            _ => (),
        }
    }

    /// Render as `‹ option ›`, or a dimmed placeholder
    fn render(&self, frame: &mut Frame<'_>, area: Rect, block: Block<'_>, placeholder: &str) {
        let line = if self.selected.is_some() {
            Line::from(vec![
                Span::from("‹ ").dark_gray(),
                Span::from(self.value()),
                Span::from(" ›").dark_gray(),
            ])
        } else {
            Line::from(Span::from(placeholder).dark_gray())
        };

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

/// A password input with a show/hide toggle
#[derive(Debug, Default)]
pub struct Secret {
    /// The typed value
    input: Input,

    /// Whether to show the value in the clear
    visible: bool,
}

impl Secret {
    /// Flip between masked and visible
    fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Render masked or not depending on the toggle
    fn render(&self, frame: &mut Frame<'_>, area: Rect, block: Block<'_>, is_active: bool) {
        let (display, hint) = if self.visible {
            (None, "ctrl-t to hide")
        } else {
            (
                Some(mask(self.input.value())),
                "ctrl-t to show",
            )
        };

        let block = block.title_bottom(Line::from(hint).right_aligned().dark_gray());

        render_input(frame, area, block, &self.input, display, is_active);
    }
}

/// One `*` per terminal column, so the cursor (which tui-input places by
/// display width) lands at the end of the mask even for wide characters.
fn mask(value: &str) -> String {
    "*".repeat(Line::raw(value).width())
}
