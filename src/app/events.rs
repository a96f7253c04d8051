use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

use super::state::App;

/// Short enough that debounced searches fire close to their deadline
const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(10);

impl App {
    /// Handle events and update application state
    pub fn handle_events(&mut self) -> io::Result<()> {
        self.poll_background();

        if event::poll(EVENT_POLL_TIMEOUT)? {
            match event::read()? {
                // Check that it's a key press event to avoid duplicates
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event);
                }
                Event::Paste(text) => {
                    self.handle_paste_event(&text);
                }
                Event::Resize(_, _) => self.mark_dirty(),
                _ => {}
            }
        }
        Ok(())
    }

    /// Insert pasted text as a single edit; fields are single-line
    pub fn handle_paste_event(&mut self, text: &str) {
        let text = text.replace(['\r', '\n'], " ");
        let focus = self.form.focused_index();
        if let Some(field) = self.form.focused_field_mut() {
            field.textarea.insert_str(text);
        }
        self.on_field_changed(focus);
        self.mark_dirty();
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        self.mark_dirty();

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('s') => {
                    self.submitted = true;
                    self.should_quit = true;
                    return;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc => {
                if self.popup_visible() {
                    self.hide_popup();
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Down if self.popup_visible() => {
                if let Some(popup) = self.active_popup_mut() {
                    popup.select_next();
                }
            }
            KeyCode::Up if self.popup_visible() => {
                if let Some(popup) = self.active_popup_mut() {
                    popup.select_previous();
                }
            }
            KeyCode::Enter | KeyCode::Tab => {
                if !self.accept_suggestion() {
                    self.form.focus_next();
                }
            }
            KeyCode::BackTab => {
                self.hide_popup();
                self.form.focus_previous();
            }
            _ => self.handle_field_key(key),
        }
    }

    /// Let the focused text field edit itself, then refresh its suggestions
    fn handle_field_key(&mut self, key: KeyEvent) {
        let focus = self.form.focused_index();
        let changed = match self.form.focused_field_mut() {
            Some(field) => {
                let before = field.value().to_string();
                field.textarea.input(key);
                field.value() != before
            }
            None => false,
        };

        if changed {
            self.on_field_changed(focus);
        }
    }
}
