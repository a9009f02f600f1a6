// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, rc::Rc};

use chrono::{Days, NaiveDate, Weekday};
use taskcal_core::Event;

use crate::cli::Store;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::{add_months, first_of_month};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Grid,
    Agenda,
}

/// State of the calendar view. Only [`CalendarStore::apply`] changes it.
pub struct CalendarStore {
    pub events: Store,
    pub today: NaiveDate,
    pub cursor: NaiveDate,
    pub week_start: Weekday,
    pub focus: Focus,
    pub agenda_index: usize,

    /// Date the task form is open for, `None` while it is hidden.
    pub selected: Option<NaiveDate>,

    /// Title typed into the task form so far.
    pub title: String,

    /// Last persistence failure, shown in the footer.
    pub status: Option<String>,
}

impl CalendarStore {
    pub fn new(events: Store, today: NaiveDate, week_start: Weekday) -> Self {
        Self {
            events,
            today,
            cursor: today,
            week_start,
            focus: Focus::default(),
            agenda_index: 0,
            selected: None,
            title: String::new(),
            status: None,
        }
    }

    /// First day of the month the cursor is in.
    pub fn month(&self) -> NaiveDate {
        first_of_month(self.cursor)
    }

    /// Events on the cursor date, in insertion order.
    pub fn agenda(&self) -> Vec<&Event> {
        self.events.events_on(self.cursor).collect()
    }

    pub fn highlighted(&self) -> Option<&Event> {
        self.events.events_on(self.cursor).nth(self.agenda_index)
    }

    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::MoveCursor(days) => {
                let step = Days::new(days.unsigned_abs());
                let moved = match *days >= 0 {
                    true => self.cursor.checked_add_days(step),
                    false => self.cursor.checked_sub_days(step),
                };
                self.move_cursor_to(moved.unwrap_or(self.cursor));
            }
            Action::MoveMonth(months) => self.move_cursor_to(add_months(self.cursor, *months)),
            Action::GoToday => self.move_cursor_to(self.today),
            Action::SelectDate(date) => {
                self.move_cursor_to(*date);
                self.selected = Some(*date);
                self.title.clear();
            }
            Action::SwitchFocus => {
                self.focus = match self.focus {
                    Focus::Grid => Focus::Agenda,
                    Focus::Agenda => Focus::Grid,
                };
                self.clamp_agenda_index();
            }
            Action::MoveAgenda(offset) => {
                self.agenda_index = self.agenda_index.saturating_add_signed(*offset);
                self.clamp_agenda_index();
            }
            Action::UpdateTitle(title) => {
                if self.selected.is_some() {
                    self.title = title.clone();
                }
            }
            Action::SaveTask => self.save_task(),
            Action::CancelTask => self.close_form(),
            Action::ToggleComplete(id) => {
                let result = self.events.toggle_complete(id);
                self.report(result);
            }
            Action::DeleteEvent(id) => {
                let result = self.events.delete(id);
                self.report(result);
                self.clamp_agenda_index();
            }
        }
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            that.borrow_mut().apply(action);
        }));
        dispatcher.register(callback);
    }

    fn save_task(&mut self) {
        let Some(date) = self.selected else {
            return;
        };

        match self.events.create(&self.title, Some(date)) {
            // blank title, keep the form open
            Ok(None) => {}
            Ok(Some(event)) => {
                tracing::debug!(id = %event.id, "task saved from the form");
                self.status = None;
                self.close_form();
                self.focus_event(date, &event.id);
            }
            Err(e) => {
                // the task is kept in memory, only the write failed
                let id = self.events.events().last().map(|e| e.id.clone());
                self.report_error(&e);
                self.close_form();
                if let Some(id) = id {
                    self.focus_event(date, &id);
                }
            }
        }
    }

    fn close_form(&mut self) {
        self.selected = None;
        self.title.clear();
    }

    fn focus_event(&mut self, date: NaiveDate, id: &str) {
        self.move_cursor_to(date);
        self.agenda_index = self
            .events
            .events_on(date)
            .position(|e| e.id == id)
            .unwrap_or(0);
    }

    fn move_cursor_to(&mut self, date: NaiveDate) {
        if date != self.cursor {
            self.cursor = date;
            self.agenda_index = 0;
        }
    }

    fn clamp_agenda_index(&mut self) {
        let len = self.events.count_on(self.cursor);
        self.agenda_index = self.agenda_index.min(len.saturating_sub(1));
    }

    fn report<T, E: Error>(&mut self, result: Result<T, E>) {
        match result {
            Ok(_) => self.status = None,
            Err(e) => self.report_error(&e),
        }
    }

    fn report_error(&mut self, e: &dyn Error) {
        tracing::error!("failed to save tasks: {e}");
        self.status = Some(format!("Not saved: {e}"));
    }
}

#[cfg(test)]
mod tests {
    use taskcal_core::{EventStore, MemoryStorage, Storage, StorageError};

    use super::*;

    const KEY: &str = "calendarEvents";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (CalendarStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        let boxed: Box<dyn Storage> = Box::new(storage.clone());
        let events = EventStore::load(boxed, KEY).unwrap();
        let store = CalendarStore::new(events, date(2024, 6, 12), Weekday::Sun);
        (store, storage)
    }

    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }

    #[test]
    fn select_then_save_creates_and_closes_form() {
        let (mut store, storage) = setup();
        store.apply(&Action::SelectDate(date(2024, 6, 1)));
        assert_eq!(store.selected, Some(date(2024, 6, 1)));
        assert_eq!(store.cursor, date(2024, 6, 1));

        store.apply(&Action::UpdateTitle("Write report".into()));
        store.apply(&Action::SaveTask);

        assert_eq!(store.selected, None);
        assert!(store.title.is_empty());
        assert_eq!(store.events.len(), 1);
        assert_eq!(store.agenda()[0].title, "Write report");
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn blank_title_keeps_form_open() {
        let (mut store, storage) = setup();
        store.apply(&Action::SelectDate(date(2024, 6, 1)));
        store.apply(&Action::UpdateTitle("   ".into()));
        store.apply(&Action::SaveTask);

        assert_eq!(store.selected, Some(date(2024, 6, 1)));
        assert_eq!(store.title, "   ");
        assert!(store.events.is_empty());
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn save_without_selection_is_ignored() {
        let (mut store, storage) = setup();
        store.apply(&Action::UpdateTitle("ignored".into()));
        store.apply(&Action::SaveTask);

        assert!(store.title.is_empty());
        assert!(store.events.is_empty());
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn cancel_clears_title_and_selection() {
        let (mut store, _) = setup();
        store.apply(&Action::SelectDate(date(2024, 6, 3)));
        store.apply(&Action::UpdateTitle("draft".into()));
        store.apply(&Action::CancelTask);

        assert_eq!(store.selected, None);
        assert!(store.title.is_empty());
        assert!(store.events.is_empty());
    }

    #[test]
    fn toggle_and_delete_from_agenda() {
        let (mut store, storage) = setup();
        for title in ["first", "second"] {
            store.apply(&Action::SelectDate(date(2024, 6, 12)));
            store.apply(&Action::UpdateTitle(title.into()));
            store.apply(&Action::SaveTask);
        }
        assert_eq!(store.agenda_index, 1);

        store.apply(&Action::SwitchFocus);
        store.apply(&Action::MoveAgenda(-1));
        let first = store.highlighted().unwrap().id.clone();
        store.apply(&Action::ToggleComplete(first.clone()));
        assert!(store.events.get(&first).unwrap().completed);

        store.apply(&Action::MoveAgenda(1));
        let second = store.highlighted().unwrap().id.clone();
        store.apply(&Action::DeleteEvent(second));
        assert_eq!(store.events.len(), 1);
        assert_eq!(store.agenda_index, 0);
        assert_eq!(storage.write_count(), 4);
    }

    #[test]
    fn unknown_id_changes_nothing() {
        let (mut store, storage) = setup();
        store.apply(&Action::ToggleComplete("nope".into()));
        store.apply(&Action::DeleteEvent("nope".into()));
        assert_eq!(storage.write_count(), 0);
        assert_eq!(store.status, None);
    }

    #[test]
    fn cursor_navigation() {
        let (mut store, _) = setup();
        store.apply(&Action::MoveCursor(-12));
        assert_eq!(store.cursor, date(2024, 5, 31));
        store.apply(&Action::MoveMonth(1));
        assert_eq!(store.cursor, date(2024, 6, 30));
        assert_eq!(store.month(), date(2024, 6, 1));
        store.apply(&Action::GoToday);
        assert_eq!(store.cursor, date(2024, 6, 12));
    }

    #[test]
    fn failed_write_is_reported_and_kept() {
        let boxed: Box<dyn Storage> = Box::new(BrokenStorage);
        let events = EventStore::load(boxed, KEY).unwrap();
        let mut store = CalendarStore::new(events, date(2024, 6, 12), Weekday::Mon);

        store.apply(&Action::SelectDate(date(2024, 6, 12)));
        store.apply(&Action::UpdateTitle("unsaved".into()));
        store.apply(&Action::SaveTask);

        assert_eq!(store.selected, None);
        assert_eq!(store.events.len(), 1);
        assert!(store.status.as_deref().unwrap().starts_with("Not saved"));
    }
}
