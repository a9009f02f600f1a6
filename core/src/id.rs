// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use chrono::Utc;

/// A source of the current time, in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// The wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Issues time-based event ids.
///
/// An id is the decimal millisecond timestamp at creation. When the clock has
/// not moved past the last issued value (two creations within the same
/// millisecond, or the clock stepping backwards) the next integer is used
/// instead, so ids stay strictly increasing. Once `i64::MAX` has been issued
/// or observed there is no fresh id left.
pub struct IdGenerator {
    clock: Box<dyn Clock>,
    last: i64,
}

impl IdGenerator {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            last: 0,
        }
    }

    /// Make sure every id issued from now on is greater than `id`.
    ///
    /// Ids that are not decimal integers are ignored.
    pub fn observe(&mut self, id: &str) {
        if let Ok(v) = id.parse::<i64>()
            && v > self.last
        {
            self.last = v;
        }
    }

    /// Issue a fresh id, `None` when the id space is used up.
    pub fn next_id(&mut self) -> Option<String> {
        let now = self.clock.now_millis();
        self.last = match now > self.last {
            true => now,
            false => self.last.checked_add(1)?,
        };
        Some(self.last.to_string())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator")
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}
