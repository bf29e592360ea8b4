//! Rendering

use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use crate::domain::compose::{ComposeFields, Field, Notice};

use super::input::Focus;

const PASSWORD_PROMPT: &str = "Enter your email password (App Password for Gmail):";
const HINTS: &str = "Tab: next  Shift-Tab: previous  Ctrl-S: send  Esc: quit";

/// Everything needed to draw the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    /// Field values
    pub fields: ComposeFields,

    /// Focused control
    pub focus: Focus,

    /// Status line text
    pub status: String,
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);

    area
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn render_input(frame: &mut Frame<'_>, area: Rect, field: Field, value: &str, focused: bool) {
    let block = Block::bordered()
        .title(format!(" {}: ", field.label()))
        .border_style(focus_style(focused));
    let inner = block.inner(area);

    let input = Paragraph::new(value)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(input, area);

    if focused {
        let last = value.rsplit('\n').next().unwrap_or_default();
        let rows = value.matches('\n').count() as u16;
        let x = inner.x + (last.chars().count() as u16).min(inner.width.saturating_sub(1));
        let y = inner.y + rows.min(inner.height.saturating_sub(1));
        frame.set_cursor_position(Position::new(x, y));
    }
}

/// Draw the compose form.
pub fn render(frame: &mut Frame<'_>, screen: &Screen) {
    let outer = Block::bordered()
        .title(Line::from(" Send Email ").bold().centered())
        .border_style(Style::default().fg(Color::Cyan));
    let inner = outer.inner(frame.area());
    frame.render_widget(outer, frame.area());

    let [sender, recipient, subject, body, button, status, hints] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    for (field, area) in [
        (Field::Sender, sender),
        (Field::Recipient, recipient),
        (Field::Subject, subject),
        (Field::Body, body),
    ] {
        render_input(
            frame,
            area,
            field,
            screen.fields.get(field),
            screen.focus == Focus::Field(field),
        );
    }

    let focused = screen.focus == Focus::SendButton;
    let button_style = if focused {
        Style::default()
            .fg(Color::White)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };
    let send = Paragraph::new(Line::styled(" Send Email ", button_style))
        .alignment(Alignment::Center)
        .block(Block::bordered().border_style(focus_style(focused)));
    frame.render_widget(send, centered(button, 20, 3));

    frame.render_widget(
        Paragraph::new(screen.status.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center),
        status,
    );
    frame.render_widget(
        Paragraph::new(HINTS)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        hints,
    );
}

/// Draw the masked password modal over the form.
///
/// Only the number of characters typed is needed; the secret itself never
/// reaches the renderer.
pub fn render_password(frame: &mut Frame<'_>, typed: usize) {
    let area = centered(frame.area(), 60, 6);
    let block = Block::bordered()
        .title(" Password ")
        .border_style(Style::default().fg(Color::Yellow));

    let text = Text::from(vec![
        Line::from(PASSWORD_PROMPT),
        Line::from(""),
        Line::from("*".repeat(typed)).bold(),
    ]);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

/// Draw a blocking notice over the form.
pub fn render_notice(frame: &mut Frame<'_>, notice: &Notice) {
    const WIDTH: u16 = 64;

    let rows: usize = notice
        .message
        .lines()
        .map(|line| line.chars().count().max(1).div_ceil(WIDTH as usize - 4))
        .sum();
    let area = centered(frame.area(), WIDTH, rows as u16 + 4);
    let color = if notice.is_error {
        Color::Red
    } else {
        Color::Green
    };
    let block = Block::bordered()
        .title(format!(" {} ", notice.title))
        .border_style(Style::default().fg(color));

    let mut lines = notice
        .message
        .lines()
        .map(Line::from)
        .collect::<Vec<_>>();
    lines.push(Line::from(""));
    lines.push(Line::from("[ OK ]").bold().centered());

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}
