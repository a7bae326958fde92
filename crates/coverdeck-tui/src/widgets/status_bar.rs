use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let backdrop = app.controller.backdrop();

        let position = if app.controller.is_empty() {
            " 0/0 ".to_string()
        } else {
            format!(" {}/{} ", app.current_index() + 1, app.controller.len())
        };

        let line = Line::from(vec![
            Span::styled(
                position,
                Style::default()
                    .fg(theme.bg0())
                    .bg(theme.yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled("██", Style::default().fg(theme.backdrop(&backdrop.color))),
            Span::raw(" "),
            Span::styled(backdrop.label.clone(), Style::default().fg(theme.fg0)),
            Span::raw("  "),
            Span::styled("←/→", Style::default().fg(theme.aqua)),
            Span::styled(" scroll ", Style::default().fg(theme.fg0)),
            Span::styled("g/G", Style::default().fg(theme.aqua)),
            Span::styled(" first/last ", Style::default().fg(theme.fg0)),
            Span::styled("q", Style::default().fg(theme.aqua)),
            Span::styled(" quit", Style::default().fg(theme.fg0)),
        ]);

        let paragraph = Paragraph::new(line).style(Style::default().bg(theme.bg1));
        frame.render_widget(paragraph, area);
    }
}
