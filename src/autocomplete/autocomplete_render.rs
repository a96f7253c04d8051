use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::AutocompleteState;
use crate::widgets::popup;

const MAX_VISIBLE_SUGGESTIONS: usize = 10;
const MAX_POPUP_WIDTH: usize = 60;
const MIN_POPUP_WIDTH: usize = 20;
const POPUP_BORDER_HEIGHT: u16 = 2;
const POPUP_PADDING: u16 = 4;
const POPUP_OFFSET_X: u16 = 2;

/// Render the suggestion list next to the field it belongs to
///
/// The popup opens below `anchor` when there is room, above it otherwise.
pub fn render_popup(state: &AutocompleteState, frame: &mut Frame, anchor: Rect, title: &str) {
    let suggestions = state.suggestions();
    if !state.is_visible() || suggestions.is_empty() {
        return;
    }

    let visible_count = suggestions.len().min(MAX_VISIBLE_SUGGESTIONS);
    let popup_height = (visible_count as u16) + POPUP_BORDER_HEIGHT;
    let max_text_width = suggestions
        .iter()
        .take(MAX_VISIBLE_SUGGESTIONS)
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(MIN_POPUP_WIDTH)
        .clamp(MIN_POPUP_WIDTH, MAX_POPUP_WIDTH);
    let popup_width = (max_text_width as u16) + POPUP_PADDING;

    let frame_area = frame.area();
    let space_below = frame_area
        .height
        .saturating_sub(anchor.y.saturating_add(anchor.height));
    let popup_area = if space_below >= popup_height || space_below >= anchor.y {
        popup::popup_below_anchor(anchor, frame_area, popup_width, popup_height, POPUP_OFFSET_X)
    } else {
        popup::popup_above_anchor(anchor, popup_width, popup_height, POPUP_OFFSET_X)
    };

    // Keep the selected entry in view when the list is longer than the popup
    let offset = state
        .selected_index()
        .saturating_sub(MAX_VISIBLE_SUGGESTIONS - 1);

    let items: Vec<ListItem> = suggestions
        .iter()
        .enumerate()
        .skip(offset)
        .take(MAX_VISIBLE_SUGGESTIONS)
        .map(|(i, suggestion)| {
            let line = if i == state.selected_index() {
                Line::from(vec![Span::styled(
                    format!("► {}", suggestion),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )])
            } else {
                Line::from(vec![Span::styled(
                    format!("  {}", suggestion),
                    Style::default().fg(Color::White).bg(Color::Black),
                )])
            };

            ListItem::new(line)
        })
        .collect();

    popup::clear_area(frame, popup_area);

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title))
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(list, popup_area);
}
