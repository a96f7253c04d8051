use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::state::App;
use crate::autocomplete::autocomplete_render;
use crate::form::{ADDRESS_FIELD, LATITUDE_FIELD, LONGITUDE_FIELD};

const FIELD_HEIGHT: u16 = 3;
const HELP_TEXT: &str = "Tab/Enter: accept or next  Shift+Tab: previous  ↑/↓: choose  Ctrl+S: submit  Esc: quit";

impl App {
    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let visible: Vec<usize> = self
            .form
            .fields()
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.hidden)
            .map(|(i, _)| i)
            .collect();

        let mut constraints = vec![Constraint::Length(1)];
        constraints.extend(visible.iter().map(|_| Constraint::Length(FIELD_HEIGHT)));
        constraints.push(Constraint::Length(1)); // Coordinates
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1)); // Help / status line
        let layout = Layout::vertical(constraints).split(frame.area());

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " New place",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))),
            layout[0],
        );

        let mut field_areas = Vec::with_capacity(visible.len());
        for (slot, &index) in visible.iter().enumerate() {
            let area = layout[slot + 1];
            self.render_field(frame, index, area);
            field_areas.push((index, area));
        }

        self.render_coordinates(frame, layout[visible.len() + 1]);
        self.render_status_line(frame, layout[layout.len() - 1]);

        // Render the popup last so it overlays the fields below
        let focus = self.form.focused_index();
        if let Some(&(_, anchor)) = field_areas.iter().find(|(i, _)| *i == focus)
            && let Some(popup) = self.active_popup()
        {
            let title = if self.form.index_of(ADDRESS_FIELD) == Some(focus) {
                "Addresses"
            } else {
                "Users"
            };
            autocomplete_render::render_popup(popup, frame, anchor, title);
        }
    }

    fn render_field(&mut self, frame: &mut Frame, index: usize, area: Rect) {
        let focused = self.form.focused_index() == index;
        let Some(field) = self.form.field_mut(index) else {
            return;
        };

        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let cursor_style = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };

        field.textarea.set_cursor_line_style(Style::default());
        field.textarea.set_cursor_style(cursor_style);
        field.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", field.label))
                .border_style(Style::default().fg(border_color)),
        );

        frame.render_widget(&field.textarea, area);
    }

    fn render_coordinates(&self, frame: &mut Frame, area: Rect) {
        let value = |name: &str| match self.form.value_of(name) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => "-".to_string(),
        };

        let line = Line::from(vec![
            Span::styled(" Longitude: ", Style::default().fg(Color::DarkGray)),
            Span::raw(value(LONGITUDE_FIELD)),
            Span::styled("  Latitude: ", Style::default().fg(Color::DarkGray)),
            Span::raw(value(LATITUDE_FIELD)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.status {
            Some(warning) => Line::from(Span::styled(
                format!(" {}", warning),
                Style::default().fg(Color::Yellow),
            )),
            None => Line::from(Span::styled(
                format!(" {}", HELP_TEXT),
                Style::default().fg(Color::DarkGray),
            )),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}
