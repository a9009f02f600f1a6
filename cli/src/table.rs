// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use colored::{ColoredString, Colorize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Right
    }

    /// Style a cell that has already been padded.
    fn stylize(&self, _data: &T, cell: String) -> ColoredString {
        cell.normal()
    }
}

/// A plain text table, one row per item, columns aligned by display width.
pub struct Table<'a, T, C: TableColumn<T>> {
    columns: &'a [C],
    data: &'a [T],
    separator: &'a str,
    header: bool,
}

impl<'a, T, C: TableColumn<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            separator: " ",
            header: false,
        }
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    fn widths(&self, rows: &[Vec<Cow<'_, str>>]) -> Vec<usize> {
        let mut widths: Vec<usize> = match self.header {
            true => self.columns.iter().map(|c| c.name().width()).collect(),
            false => vec![0; self.columns.len()],
        };
        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.width());
            }
        }
        widths
    }
}

impl<T, C: TableColumn<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<Cow<'_, str>>> = self
            .data
            .iter()
            .map(|item| self.columns.iter().map(|c| c.format(item)).collect())
            .collect();
        let widths = self.widths(&rows);
        let last = self.columns.len().saturating_sub(1);

        if self.header {
            for (i, (col, width)) in self.columns.iter().zip(&widths).enumerate() {
                let cell = pad(&col.name(), *width, col.padding_direction(), i == last);
                write!(f, "{}", cell.bold())?;
                write!(f, "{}", if i == last { "\n" } else { self.separator })?;
            }
        }

        for (item, row) in self.data.iter().zip(rows.iter()) {
            let cells = self.columns.iter().zip(row).zip(&widths);
            for (i, ((col, cell), width)) in cells.enumerate() {
                let cell = pad(cell, *width, col.padding_direction(), i == last);
                write!(f, "{}", col.stylize(item, cell))?;
                write!(f, "{}", if i == last { "\n" } else { self.separator })?;
            }
        }
        Ok(())
    }
}

fn pad(cell: &str, width: usize, direction: PaddingDirection, is_last: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    match direction {
        PaddingDirection::Left => format!("{fill}{cell}"),
        PaddingDirection::Right if is_last => cell.to_string(), // no trailing spaces
        PaddingDirection::Right => format!("{cell}{fill}"),
    }
}
