use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Text},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

/// Where people land after registering. Signing in happens in the members
/// portal; this view just points them there.
pub fn render(frame: &mut Frame<'_>, body_area: Rect) {
    let popup_vert = Layout::vertical([Constraint::Length(8)]).flex(Flex::Center);
    let popup_horiz = Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

    let [popup_area] = popup_vert.areas(body_area);
    let [popup_area] = popup_horiz.areas(popup_area);

    let text = Text::from(vec![
        Line::from("Your account is ready.").bold(),
        Line::from("Log in with the email and password you just registered."),
        Line::default(),
        Line::from("r: register another account · q: quit").dark_gray(),
    ]);

    let popup = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Log in")
            .padding(Padding::uniform(1))
            .border_style(Style::new().blue()),
    );

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}
