// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, rc::Rc};

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::agenda::Agenda;
use crate::tui::calendar_store::{CalendarStore, Focus};
use crate::tui::component::{Component, Message};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::month_grid::MonthGrid;
use crate::tui::task_form::TaskForm;

const AGENDA_WIDTH: u16 = 32;

/// Run the calendar until the user quits, handing the store back afterwards.
pub fn run_calendar(store: CalendarStore) -> Result<CalendarStore, Box<dyn Error>> {
    let store = Rc::new(RefCell::new(store));

    let mut terminal = ratatui::init();
    let result: Result<(), Box<dyn Error>> = {
        let mut dispatcher = Dispatcher::new();
        CalendarStore::register_to(store.clone(), &mut dispatcher);
        let mut view = SinglePage::new("Task Calendar", instructions, CalendarView::new());
        let mut area = Rect::default();

        loop {
            let drawn = terminal.draw(|frame| {
                area = frame.area();
                view.render(&store, area, frame.buffer_mut());
                if let Some(pos) = view.get_cursor_position(&store, area) {
                    frame.set_cursor_position(pos);
                }
            });
            if let Err(e) = drawn {
                break Err(e.into());
            }

            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(Message::Exit) = view.on_key(&mut dispatcher, &store, area, key) {
                        break Ok(());
                    }
                }
                Ok(_) => {} // resize and friends only need a redraw
                Err(e) => break Err(e.into()),
            }
        }
    }; // release dispatcher and view here, they hold references to the store
    ratatui::restore();
    result?;

    let owned_store = Rc::try_unwrap(store)
        .map_err(|_| "Store still has references")?
        .into_inner();
    Ok(owned_store)
}

/// Month grid and day agenda side by side, with the task form on top when open.
struct CalendarView {
    grid: MonthGrid,
    agenda: Agenda,
    form: TaskForm,
    form_open: bool,
}

impl CalendarView {
    fn new() -> Self {
        Self {
            grid: MonthGrid::new(),
            agenda: Agenda::new(),
            form: TaskForm::new(),
            form_open: false,
        }
    }

    fn layout(area: Rect) -> [Rect; 3] {
        let [main, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let [grid, agenda] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(AGENDA_WIDTH)])
                .areas(main);
        [grid, agenda, status]
    }

    /// Keep the form's focus in step with whether a date is selected.
    fn sync_form(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<CalendarStore>) {
        let open = store.borrow().selected.is_some();
        match (self.form_open, open) {
            (false, true) => self.form.activate(dispatcher, store),
            (true, false) => self.form.deactivate(dispatcher, store),
            _ => {}
        }
        self.form_open = open;
    }
}

impl Component<CalendarStore> for CalendarView {
    fn render(&self, store: &RefCell<CalendarStore>, area: Rect, buf: &mut Buffer) {
        let [grid, agenda, status] = Self::layout(area);
        self.grid.render(store, grid, buf);
        self.agenda.render(store, agenda, buf);

        if let Some(message) = &store.borrow().status {
            Paragraph::new(message.as_str()).red().render(status, buf);
        }

        if self.form_open {
            self.form.render(store, area, buf);
        }
    }

    fn get_cursor_position(
        &self,
        store: &RefCell<CalendarStore>,
        area: Rect,
    ) -> Option<(u16, u16)> {
        match self.form_open {
            true => self.form.get_cursor_position(store, area),
            false => None,
        }
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<CalendarStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let msg = if self.form_open {
            // modal, nothing behind it sees the key
            self.form.on_key(dispatcher, store, area, event);
            Some(Message::Handled)
        } else {
            let [grid, agenda, _] = Self::layout(area);
            let focus = store.borrow().focus;
            let msg = match focus {
                Focus::Grid => self.grid.on_key(dispatcher, store, grid, event),
                Focus::Agenda => self.agenda.on_key(dispatcher, store, agenda, event),
            };
            match (msg, event.code) {
                (None, KeyCode::Tab | KeyCode::BackTab) => {
                    dispatcher.dispatch(Action::SwitchFocus);
                    Some(Message::Handled)
                }
                (msg, _) => msg,
            }
        };

        self.sync_form(dispatcher, store);
        msg
    }
}

fn instructions(store: &CalendarStore) -> Line<'static> {
    let hints: &[(&str, &str)] = match (store.selected.is_some(), store.focus) {
        (true, _) => &[(" Save ", "<Enter>"), (" Cancel ", "<Esc>"), (" Next ", "<Tab> ")],
        (false, Focus::Grid) => &[
            (" Move ", "<Arrows>"),
            (" Month ", "<PgUp/PgDn>"),
            (" Today ", "<t>"),
            (" Add ", "<Enter>"),
            (" Tasks ", "<Tab>"),
            (" Quit ", "<q> "),
        ],
        (false, Focus::Agenda) => &[
            (" Move ", "<Up/Down>"),
            (" Done ", "<Space>"),
            (" Delete ", "<d>"),
            (" Add ", "<Enter>"),
            (" Calendar ", "<Tab>"),
            (" Quit ", "<q> "),
        ],
    };

    let spans: Vec<Span<'static>> = hints
        .iter()
        .flat_map(|(label, key)| [Span::raw(*label), key.blue().bold()])
        .collect();
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Weekday};
    use taskcal_core::{EventStore, MemoryStorage, Storage};

    use super::*;

    fn setup() -> (Rc<RefCell<CalendarStore>>, Dispatcher, MemoryStorage) {
        let storage = MemoryStorage::new();
        let boxed: Box<dyn Storage> = Box::new(storage.clone());
        let events = EventStore::load(boxed, "calendarEvents").unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let store = Rc::new(RefCell::new(CalendarStore::new(events, today, Weekday::Sun)));

        let mut dispatcher = Dispatcher::new();
        CalendarStore::register_to(store.clone(), &mut dispatcher);
        (store, dispatcher, storage)
    }

    fn press(
        view: &mut SinglePage<CalendarStore, CalendarView>,
        dispatcher: &mut Dispatcher,
        store: &RefCell<CalendarStore>,
        codes: impl IntoIterator<Item = KeyCode>,
    ) -> Option<Message> {
        let area = Rect::new(0, 0, 120, 40);
        let mut last = None;
        for code in codes {
            last = view.on_key(dispatcher, store, area, KeyEvent::from(code));
        }
        last
    }

    fn typed(s: &str) -> Vec<KeyCode> {
        s.chars().map(KeyCode::Char).collect()
    }

    fn new_view() -> SinglePage<CalendarStore, CalendarView> {
        SinglePage::new("Task Calendar", instructions, CalendarView::new())
    }

    #[test]
    fn add_task_through_the_form() {
        let (store, mut dispatcher, storage) = setup();
        let mut view = new_view();

        press(&mut view, &mut dispatcher, &store, [KeyCode::Enter]);
        assert!(store.borrow().selected.is_some());

        // q is text while the form is open
        press(&mut view, &mut dispatcher, &store, typed("quiz"));
        let msg = press(&mut view, &mut dispatcher, &store, [KeyCode::Enter]);
        assert_eq!(msg, Some(Message::Handled));

        let store = store.borrow();
        assert_eq!(store.selected, None);
        assert_eq!(store.events.events()[0].title, "quiz");
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn esc_closes_form_then_quits() {
        let (store, mut dispatcher, storage) = setup();
        let mut view = new_view();

        press(&mut view, &mut dispatcher, &store, [KeyCode::Enter]);
        press(&mut view, &mut dispatcher, &store, typed("draft"));
        let msg = press(&mut view, &mut dispatcher, &store, [KeyCode::Esc]);
        assert_eq!(msg, Some(Message::Handled));
        assert_eq!(store.borrow().selected, None);
        assert!(store.borrow().title.is_empty());
        assert_eq!(storage.write_count(), 0);

        let msg = press(&mut view, &mut dispatcher, &store, [KeyCode::Esc]);
        assert_eq!(msg, Some(Message::Exit));
    }

    #[test]
    fn reopened_form_starts_empty() {
        let (store, mut dispatcher, _) = setup();
        let mut view = new_view();

        press(&mut view, &mut dispatcher, &store, [KeyCode::Enter]);
        press(&mut view, &mut dispatcher, &store, typed("one"));
        press(&mut view, &mut dispatcher, &store, [KeyCode::Enter]);

        press(&mut view, &mut dispatcher, &store, [KeyCode::Enter]);
        press(&mut view, &mut dispatcher, &store, typed("two"));
        press(&mut view, &mut dispatcher, &store, [KeyCode::Enter]);

        let titles: Vec<String> = store
            .borrow()
            .events
            .events()
            .iter()
            .map(|e| e.title.clone())
            .collect();
        assert_eq!(titles, ["one", "two"]);
    }

    #[test]
    fn tab_moves_focus_to_agenda() {
        let (store, mut dispatcher, _) = setup();
        let mut view = new_view();

        press(&mut view, &mut dispatcher, &store, [KeyCode::Enter]);
        press(&mut view, &mut dispatcher, &store, typed("report"));
        press(&mut view, &mut dispatcher, &store, [KeyCode::Enter]);

        press(&mut view, &mut dispatcher, &store, [KeyCode::Tab]);
        assert_eq!(store.borrow().focus, Focus::Agenda);

        press(&mut view, &mut dispatcher, &store, [KeyCode::Char(' ')]);
        assert!(store.borrow().events.events()[0].completed);

        press(&mut view, &mut dispatcher, &store, [KeyCode::Char('d')]);
        assert!(store.borrow().events.is_empty());
    }

    #[test]
    fn renders_form_over_calendar() {
        let (store, mut dispatcher, _) = setup();
        let mut view = new_view();
        press(&mut view, &mut dispatcher, &store, [KeyCode::Enter]);

        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        view.render(&store, area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(text.contains("New task on 2024-06-01"));
        assert!(text.contains("[Save]"));
        assert!(view.get_cursor_position(&store, area).is_some());
    }
}
