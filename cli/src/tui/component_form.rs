// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::marker::PhantomData;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::{
    byte_offset_of_grapheme, byte_range_of_grapheme_at, grapheme_count,
    unicode_width_of_graphemes,
};

/// A vertical list of items. Enter dispatches `submit`, Esc dispatches `cancel`.
pub struct Form<S> {
    items: Vec<Box<dyn FormItem<S>>>,
    item_index: usize,
    submit: Action,
    cancel: Action,
}

impl<S> Form<S> {
    pub fn new(items: Vec<Box<dyn FormItem<S>>>, submit: Action, cancel: Action) -> Self {
        Self {
            items,
            item_index: 0,
            submit,
            cancel,
        }
    }

    /// Rows the form needs, including its margin.
    pub fn height(&self) -> u16 {
        3 * self.items.len() as u16 + 2
    }

    fn layout(&self) -> Layout {
        Layout::vertical(self.items.iter().map(|_| Constraint::Length(3))).margin(1)
    }

    fn navigate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>, offset: isize) {
        let len = self.items.len();
        if len == 0 {
            return;
        }

        if let Some(a) = self.items.get_mut(self.item_index) {
            a.deactivate(dispatcher, store);
        }

        let step = offset.unsigned_abs() % len;
        self.item_index = match offset > 0 {
            true => (self.item_index + step) % len,
            false => (self.item_index + len - step) % len,
        };

        if let Some(a) = self.items.get_mut(self.item_index) {
            a.activate(dispatcher, store);
        }
    }
}

impl<S> Component<S> for Form<S> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let areas = self.layout().split(area);
        let last = self.items.len().saturating_sub(1);
        for (i, (item, area)) in self.items.iter().zip(areas.iter()).enumerate() {
            item_render(i == last, item.as_ref(), *area, buf);
            item.render(store, item_inner(*area), buf);
        }
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        let areas = self.layout().split(area);
        match (self.items.get(self.item_index), areas.get(self.item_index)) {
            (Some(item), Some(area)) => item.get_cursor_position(store, *area),
            _ => None,
        }
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let areas = self.layout().split(area);
        if let (Some(item), Some(subarea)) =
            (self.items.get_mut(self.item_index), areas.get(self.item_index))
            && let Some(msg) = item.on_key(dispatcher, store, *subarea, event)
        {
            return Some(msg);
        }

        match event.code {
            KeyCode::Up | KeyCode::BackTab => {
                self.navigate(dispatcher, store, -1);
                Some(Message::CursorUpdated)
            }
            KeyCode::Down | KeyCode::Tab => {
                self.navigate(dispatcher, store, 1);
                Some(Message::CursorUpdated)
            }
            KeyCode::Enter => {
                dispatcher.dispatch(self.submit.clone());
                Some(Message::Handled)
            }
            KeyCode::Esc => {
                dispatcher.dispatch(self.cancel.clone());
                Some(Message::Handled)
            }
            _ => None,
        }
    }

    /// Focus the first item.
    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        if let Some(item) = self.items.get_mut(self.item_index) {
            item.deactivate(dispatcher, store);
        }
        self.item_index = 0;
        if let Some(item) = self.items.first_mut() {
            item.activate(dispatcher, store);
        }
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        if let Some(item) = self.items.get_mut(self.item_index) {
            item.deactivate(dispatcher, store);
        }
    }
}

pub trait FormItem<S>: Component<S> {
    fn item_title(&self) -> &str;
    fn is_active(&self) -> bool;
}

/// Reads a value from the store and writes it back through the dispatcher.
pub trait Access<S, T> {
    fn get(store: &RefCell<S>) -> T;
    fn set(dispatcher: &mut Dispatcher, value: T);
}

/// Single line text input.
pub struct Input<S, A: Access<S, String>> {
    title: String,
    placeholder: String,
    active: bool,
    character_index: usize,
    _phantom: PhantomData<(S, A)>,
}

impl<S, A: Access<S, String>> Input<S, A> {
    pub fn new(title: impl ToString, placeholder: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            placeholder: placeholder.to_string(),
            active: false,
            character_index: 0,
            _phantom: PhantomData,
        }
    }
}

impl<S, A: Access<S, String>> Component<S> for Input<S, A> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let v = A::get(store);
        match v.is_empty() {
            true => Paragraph::new(self.placeholder.as_str()).dark_gray(),
            false => Paragraph::new(v),
        }
        .render(area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        if !self.active {
            return None;
        }

        let v = A::get(store);
        let index = self.character_index.min(grapheme_count(&v));
        let width = unicode_width_of_graphemes(&v, index);
        let x = area.x + (width as u16) + 2; // sider 1 + padding 1
        let y = area.y + 1; // title line
        Some((x, y))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        use KeyCode::*;
        if !self.active || event.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }

        let mut v = A::get(store);
        let len = grapheme_count(&v);
        self.character_index = self.character_index.min(len);
        match event.code {
            Left => self.character_index = self.character_index.saturating_sub(1),
            Right => self.character_index = (self.character_index + 1).min(len),
            Home => self.character_index = 0,
            End => self.character_index = len,
            Backspace if self.character_index > 0 => {
                if let Some(range) = byte_range_of_grapheme_at(&v, self.character_index - 1) {
                    v.replace_range(range, "");
                    A::set(dispatcher, v);
                    self.character_index -= 1;
                }
            }
            Delete => {
                if let Some(range) = byte_range_of_grapheme_at(&v, self.character_index) {
                    v.replace_range(range, "");
                    A::set(dispatcher, v);
                }
            }
            Char(c) => {
                v.insert(byte_offset_of_grapheme(&v, self.character_index), c);
                A::set(dispatcher, v);
                self.character_index += 1;
            }
            Backspace => {}
            _ => return None,
        };

        Some(Message::CursorUpdated)
    }

    fn activate(&mut self, _dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.active = true;
        self.character_index = grapheme_count(&A::get(store));
    }

    fn deactivate(&mut self, _dispatcher: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
    }
}

impl<S, A: Access<S, String>> FormItem<S> for Input<S, A> {
    fn item_title(&self) -> &str {
        &self.title
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// A row of buttons, Left/Right to choose, Enter to press.
pub struct Buttons {
    title: String,
    buttons: Vec<(String, Action)>,
    selected: usize,
    active: bool,
}

impl Buttons {
    pub fn new(title: impl ToString, buttons: Vec<(String, Action)>) -> Self {
        Self {
            title: title.to_string(),
            buttons,
            selected: 0,
            active: false,
        }
    }

    fn layout(&self) -> Layout {
        // 4 = brackets (2) + gap (2)
        let constraints = self
            .buttons
            .iter()
            .map(|(label, _)| Constraint::Length(4 + label.width() as u16));
        Layout::horizontal(constraints)
    }
}

impl<S> Component<S> for Buttons {
    fn render(&self, _store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let areas = self.layout().split(area);
        for (i, ((label, _), area)) in self.buttons.iter().zip(areas.iter()).enumerate() {
            let text = format!("[{label}]");
            let style = match self.active && i == self.selected {
                true => Style::new().reversed().bold(),
                false => Style::new(),
            };
            Paragraph::new(text).style(style).render(*area, buf);
        }
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        _store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if !self.active || self.buttons.is_empty() {
            return None;
        }

        let len = self.buttons.len();
        match event.code {
            KeyCode::Left => self.selected = (self.selected + len - 1) % len,
            KeyCode::Right => self.selected = (self.selected + 1) % len,
            KeyCode::Enter => {
                if let Some((_, action)) = self.buttons.get(self.selected) {
                    dispatcher.dispatch(action.clone());
                }
            }
            _ => return None,
        }
        Some(Message::Handled)
    }

    fn activate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = true;
        self.selected = 0;
    }

    fn deactivate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
    }
}

impl<S> FormItem<S> for Buttons {
    fn item_title(&self) -> &str {
        &self.title
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

const S_STEP_ACTIVE: &str = "◆";
const S_STEP_INACTIVE: &str = "◇";
const S_SIDER_CONNECTOR: &str = "│";
const S_SIDER_BOTTOM: &str = "└";

fn item_render<S>(is_last: bool, item: &dyn FormItem<S>, area: Rect, buf: &mut Buffer) {
    let (color, step) = match item.is_active() {
        true => (Color::Blue, S_STEP_ACTIVE),
        false => (Color::Gray, S_STEP_INACTIVE),
    };

    let area_title = Rect::new(area.x + 2, area.y, area.width.saturating_sub(2), 1);
    Clear.render(area_title, buf);
    Paragraph::new(item.item_title())
        .bold()
        .fg(color)
        .render(area_title, buf);

    if let Some(c) = buf.cell_mut((area.x, area.y)) {
        c.set_symbol(step);
        c.set_fg(color);
    }

    for y in 1..area.height.saturating_sub(1) {
        if let Some(c) = buf.cell_mut((area.x, area.y + y)) {
            c.set_symbol(S_SIDER_CONNECTOR);
            c.set_fg(color);
        }
    }

    if let Some(c) = buf.cell_mut((area.x, area.y + area.height.saturating_sub(1))) {
        let symbol = match is_last {
            true => S_SIDER_BOTTOM,
            false => S_SIDER_CONNECTOR,
        };
        c.set_symbol(symbol);
        c.set_fg(color);
    }
}

fn item_inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}
