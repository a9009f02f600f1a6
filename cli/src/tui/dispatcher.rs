// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use chrono::NaiveDate;

type Callback = Rc<RefCell<dyn FnMut(&Action)>>;

pub struct Dispatcher {
    subscribers: Vec<Callback>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn register(&mut self, callback: Callback) {
        self.subscribers.push(callback);
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatching");
        for sub in &self.subscribers {
            (sub.borrow_mut())(&action);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor by a number of days.
    MoveCursor(i64),
    /// Move the cursor by a number of months.
    MoveMonth(i32),
    GoToday,
    /// Put the cursor on a date and open the task form for it.
    SelectDate(NaiveDate),
    SwitchFocus,
    /// Move the highlighted row of the day agenda.
    MoveAgenda(isize),
    UpdateTitle(String),
    SaveTask,
    CancelTask,
    ToggleComplete(String),
    DeleteEvent(String),
}
