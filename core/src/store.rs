// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use crate::error::StoreError;
use crate::event::Event;
use crate::id::{Clock, IdGenerator, SystemClock};
use crate::storage::Storage;

/// The single owner of the event collection.
///
/// Every mutation that changes the collection writes the whole collection
/// back to the storage before returning, so after a successful call the
/// stored value always equals [`EventStore::events`].
#[derive(Debug)]
pub struct EventStore<S: Storage> {
    storage: S,
    key: String,
    events: Vec<Event>,
    ids: IdGenerator,
}

impl<S: Storage> EventStore<S> {
    /// Restore the collection stored under `key`.
    ///
    /// Nothing stored yields an empty collection. Stored data that does not
    /// parse is treated the same way, with a warning, and gets replaced by
    /// the next mutation. Only a failing storage is an error.
    pub fn load(storage: S, key: impl Into<String>) -> Result<Self, StoreError> {
        Self::load_with_clock(storage, key, SystemClock)
    }

    /// Like [`EventStore::load`], issuing ids from the given clock.
    pub fn load_with_clock(
        storage: S,
        key: impl Into<String>,
        clock: impl Clock + 'static,
    ) -> Result<Self, StoreError> {
        let key = key.into();
        let events = match storage.get(&key)? {
            None => {
                tracing::debug!(key = %key, "nothing stored yet, starting empty");
                Vec::new()
            }
            Some(raw) => match serde_json::from_str::<Vec<Event>>(&raw) {
                Ok(events) => {
                    tracing::debug!(key = %key, count = events.len(), "loaded events");
                    events
                }
                Err(err) => {
                    tracing::warn!(
                        key = %key,
                        %err,
                        "stored events are malformed, starting empty"
                    );
                    Vec::new()
                }
            },
        };

        for id in duplicate_ids(&events) {
            tracing::warn!(
                key = %key,
                id,
                "duplicate event id in stored data, only the first is reachable"
            );
        }

        let mut ids = IdGenerator::new(clock);
        for event in &events {
            ids.observe(&event.id);
        }

        Ok(Self {
            storage,
            key,
            events,
            ids,
        })
    }

    /// Place a new task titled `title` on `date`.
    ///
    /// Returns `None` without touching the storage when the trimmed title is
    /// empty or no date is given.
    pub fn create(
        &mut self,
        title: &str,
        date: Option<NaiveDate>,
    ) -> Result<Option<Event>, StoreError> {
        let title = title.trim();
        let Some(date) = date else {
            tracing::debug!("no date selected, ignoring create");
            return Ok(None);
        };
        if title.is_empty() {
            tracing::debug!(%date, "empty title, ignoring create");
            return Ok(None);
        }

        let Some(id) = self.ids.next_id() else {
            tracing::warn!(%date, "event ids exhausted, refusing create");
            return Err(StoreError::IdsExhausted);
        };
        let event = Event::new(id, title.to_string(), date);
        tracing::debug!(id = %event.id, %date, "creating event");
        self.events.push(event.clone());
        self.persist()?;
        Ok(Some(event))
    }

    /// Flip the completion flag of the event `id`.
    ///
    /// Returns the updated event, or `None` if there is no such event.
    pub fn toggle_complete(&mut self, id: &str) -> Result<Option<Event>, StoreError> {
        let Some(event) = self.events.iter_mut().find(|e| e.id == id) else {
            tracing::debug!(id, "no such event, ignoring toggle");
            return Ok(None);
        };

        event.completed = !event.completed;
        let event = event.clone();
        tracing::debug!(id, completed = event.completed, "toggled event");
        self.persist()?;
        Ok(Some(event))
    }

    /// Remove the event `id`, keeping the order of the others.
    ///
    /// Returns the removed event, or `None` if there is no such event.
    pub fn delete(&mut self, id: &str) -> Result<Option<Event>, StoreError> {
        let Some(index) = self.events.iter().position(|e| e.id == id) else {
            tracing::debug!(id, "no such event, ignoring delete");
            return Ok(None);
        };

        let event = self.events.remove(index);
        tracing::debug!(id, "deleted event");
        self.persist()?;
        Ok(Some(event))
    }

    /// Write the whole collection to the storage, replacing the stored value.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.events)?;
        self.storage.set(&self.key, &raw)?;
        Ok(())
    }

    /// All events, in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events placed on `date`, in insertion order.
    pub fn events_on(&self, date: NaiveDate) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.date == date)
    }

    /// Events placed in the given month, in insertion order.
    pub fn events_in_month(&self, year: i32, month: u32) -> impl Iterator<Item = &Event> {
        self.events
            .iter()
            .filter(move |e| e.date.year() == year && e.date.month() == month)
    }

    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.events_on(date).count()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The key the collection is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

/// Ids that occur more than once, each reported once, in order of first repeat.
fn duplicate_ids(events: &[Event]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut repeated = Vec::new();
    for event in events {
        let id = event.id.as_str();
        if !seen.insert(id) && !repeated.contains(&id) {
            repeated.push(id);
        }
    }
    repeated
}
