// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Paragraph};
use taskcal_core::DATE_FORMAT;

use crate::tui::calendar_store::{CalendarStore, Focus};
use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::month_grid::{marker, marker_style};
use crate::util::truncate_to_width;

/// The tasks of the cursor date, where they can be completed or deleted.
pub struct Agenda;

impl Agenda {
    pub fn new() -> Self {
        Self
    }
}

impl Component<CalendarStore> for Agenda {
    fn render(&self, store: &RefCell<CalendarStore>, area: Rect, buf: &mut Buffer) {
        let store = store.borrow();
        let focused = store.focus == Focus::Agenda;
        let title = format!(" {} ", store.cursor.format(DATE_FORMAT));
        let block = Block::bordered()
            .border_set(border::ROUNDED)
            .title(Line::from(title).centered())
            .border_style(match focused {
                true => Style::new().blue(),
                false => Style::new().dark_gray(),
            });

        let inner = block.inner(area);
        block.render(area, buf);

        let agenda = store.agenda();
        if agenda.is_empty() {
            Paragraph::new("No tasks")
                .italic()
                .dark_gray()
                .render(inner, buf);
            return;
        }

        let width = inner.width as usize;
        let lines: Vec<Line> = agenda
            .iter()
            .enumerate()
            .map(|(i, event)| {
                let text = truncate_to_width(&marker(event), width);
                let mut style = marker_style(event);
                if focused && i == store.agenda_index {
                    style = style.reversed();
                }
                Line::styled(text, style)
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<CalendarStore>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let highlighted = store.borrow().highlighted().map(|e| e.id.clone());
        let action = match (event.code, highlighted) {
            (KeyCode::Up | KeyCode::Char('k'), _) => Action::MoveAgenda(-1),
            (KeyCode::Down | KeyCode::Char('j'), _) => Action::MoveAgenda(1),
            (KeyCode::Char(' ') | KeyCode::Char('x'), Some(id)) => Action::ToggleComplete(id),
            (KeyCode::Char('d') | KeyCode::Delete, Some(id)) => Action::DeleteEvent(id),
            (KeyCode::Enter | KeyCode::Char('a'), _) => {
                let cursor = store.borrow().cursor;
                Action::SelectDate(cursor)
            }
            (KeyCode::Char(' ' | 'x' | 'd') | KeyCode::Delete, None) => {
                return Some(Message::Handled);
            }
            _ => return None,
        };
        dispatcher.dispatch(action);
        Some(Message::Handled)
    }
}
