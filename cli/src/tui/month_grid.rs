// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use chrono::{Datelike, Days, NaiveDate};
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use taskcal_core::Event;

use crate::tui::calendar_store::{CalendarStore, Focus};
use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::{grid_start, truncate_to_width};

const WEEKS: u16 = 6;
const DAYS_PER_WEEK: u16 = 7;

/// Six week rows of day cells, each listing the tasks of that day.
pub struct MonthGrid;

impl MonthGrid {
    pub fn new() -> Self {
        Self
    }

    fn render_cell(store: &CalendarStore, date: NaiveDate, area: Rect, buf: &mut Buffer) {
        // one column is left empty between cells
        let width = area.width.saturating_sub(1) as usize;
        if width == 0 || area.height == 0 {
            return;
        }

        let events: Vec<&Event> = store.events.events_on(date).collect();
        let lines = area.height.saturating_sub(1) as usize;
        let (shown, hidden) = match events.len() {
            n if n <= lines => (n, 0),
            n => (lines.saturating_sub(1), n - lines.saturating_sub(1)),
        };

        let mut day = format!("{:>2}", date.day());
        if lines == 0 && hidden > 0 {
            day.push_str(&format!(" +{hidden}"));
        }
        buf.set_stringn(area.x, area.y, day, width, day_style(store, date));

        for (i, event) in events.iter().take(shown).enumerate() {
            let y = area.y + 1 + i as u16;
            let text = truncate_to_width(&marker(event), width);
            buf.set_stringn(area.x, y, text, width, marker_style(event));
        }

        if lines > 0 && hidden > 0 {
            let y = area.y + 1 + shown as u16;
            let text = format!("+{hidden}");
            buf.set_stringn(area.x, y, text, width, Style::new().italic().dark_gray());
        }
    }
}

impl Component<CalendarStore> for MonthGrid {
    fn render(&self, store: &RefCell<CalendarStore>, area: Rect, buf: &mut Buffer) {
        let store = store.borrow();
        let [title_area, header_area, cells_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        let month = store.month();
        Line::from(month.format("%B %Y").to_string().bold())
            .centered()
            .render(title_area, buf);

        let col_width = area.width / DAYS_PER_WEEK;
        let row_height = (cells_area.height / WEEKS).max(1);

        let mut weekday = store.week_start;
        for col in 0..DAYS_PER_WEEK {
            let x = header_area.x + col * col_width;
            let name = weekday.to_string();
            buf.set_stringn(x, header_area.y, name, col_width as usize, Style::new().bold());
            weekday = weekday.succ();
        }

        let start = grid_start(month, store.week_start);
        for i in 0..WEEKS * DAYS_PER_WEEK {
            let (row, col) = (i / DAYS_PER_WEEK, i % DAYS_PER_WEEK);
            let y = cells_area.y + row * row_height;
            if y >= cells_area.bottom() {
                break;
            }

            let Some(date) = start.checked_add_days(Days::new(u64::from(i))) else {
                break;
            };
            let cell = Rect::new(
                cells_area.x + col * col_width,
                y,
                col_width,
                row_height.min(cells_area.bottom() - y),
            );
            Self::render_cell(&store, date, cell, buf);
        }
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<CalendarStore>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let action = match event.code {
            KeyCode::Left | KeyCode::Char('h') => Action::MoveCursor(-1),
            KeyCode::Right | KeyCode::Char('l') => Action::MoveCursor(1),
            KeyCode::Up | KeyCode::Char('k') => Action::MoveCursor(-7),
            KeyCode::Down | KeyCode::Char('j') => Action::MoveCursor(7),
            KeyCode::PageUp | KeyCode::Char('[') => Action::MoveMonth(-1),
            KeyCode::PageDown | KeyCode::Char(']') => Action::MoveMonth(1),
            KeyCode::Char('t') => Action::GoToday,
            KeyCode::Enter | KeyCode::Char('a') => {
                let cursor = store.borrow().cursor;
                Action::SelectDate(cursor)
            }
            _ => return None,
        };
        dispatcher.dispatch(action);
        Some(Message::Handled)
    }
}

/// The one-line marker of a task: a checkbox and the title.
pub fn marker(event: &Event) -> String {
    let check = if event.completed { 'x' } else { ' ' };
    format!("[{check}] {}", event.title)
}

pub fn marker_style(event: &Event) -> Style {
    match event.completed {
        true => Style::new().crossed_out().dark_gray(),
        false => Style::new(),
    }
}

fn day_style(store: &CalendarStore, date: NaiveDate) -> Style {
    let mut style = Style::new();
    if date.month() != store.cursor.month() {
        style = style.dark_gray();
    }
    if date == store.today {
        style = style.bold().yellow();
    }
    if date == store.cursor {
        style = match store.focus {
            Focus::Grid => style.reversed(),
            Focus::Agenda => style.underlined(),
        };
    }
    style
}
