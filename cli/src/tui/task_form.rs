// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::Flex;
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Clear};
use taskcal_core::DATE_FORMAT;

use crate::tui::calendar_store::CalendarStore;
use crate::tui::component::{Component, Message};
use crate::tui::component_form::{Access, Buttons, Form, Input};
use crate::tui::dispatcher::{Action, Dispatcher};

const MODAL_WIDTH: u16 = 48;

/// Modal asking for the title of a new task on the selected date.
pub struct TaskForm {
    form: Form<CalendarStore>,
}

impl TaskForm {
    pub fn new() -> Self {
        let title: Input<CalendarStore, TitleAccess> = Input::new("Title", "Enter task");
        let buttons = Buttons::new(
            "",
            vec![
                ("Save".to_string(), Action::SaveTask),
                ("Cancel".to_string(), Action::CancelTask),
            ],
        );
        let form = Form::new(
            vec![Box::new(title), Box::new(buttons)],
            Action::SaveTask,
            Action::CancelTask,
        );
        Self { form }
    }

    fn modal_area(&self, area: Rect) -> Rect {
        let [area] = Layout::horizontal([Constraint::Length(MODAL_WIDTH)])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::vertical([Constraint::Length(self.form.height() + 2)])
            .flex(Flex::Center)
            .areas(area);
        area
    }

    fn block(&self) -> Block<'_> {
        Block::bordered().border_set(border::ROUNDED)
    }
}

impl Component<CalendarStore> for TaskForm {
    fn render(&self, store: &RefCell<CalendarStore>, area: Rect, buf: &mut Buffer) {
        let Some(date) = store.borrow().selected else {
            return;
        };

        let area = self.modal_area(area);
        let title = format!(" New task on {} ", date.format(DATE_FORMAT));
        let block = self.block().title(Line::from(title.bold()).centered());
        let inner = block.inner(area);

        Clear.render(area, buf);
        block.render(area, buf);
        self.form.render(store, inner, buf);
    }

    fn get_cursor_position(
        &self,
        store: &RefCell<CalendarStore>,
        area: Rect,
    ) -> Option<(u16, u16)> {
        let inner = self.block().inner(self.modal_area(area));
        self.form.get_cursor_position(store, inner)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<CalendarStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let inner = self.block().inner(self.modal_area(area));
        self.form.on_key(dispatcher, store, inner, event)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<CalendarStore>) {
        self.form.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<CalendarStore>) {
        self.form.deactivate(dispatcher, store);
    }
}

struct TitleAccess;

impl Access<CalendarStore, String> for TitleAccess {
    fn get(store: &RefCell<CalendarStore>) -> String {
        store.borrow().title.clone()
    }

    fn set(dispatcher: &mut Dispatcher, value: String) {
        dispatcher.dispatch(Action::UpdateTitle(value));
    }
}
