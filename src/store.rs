//! In-memory record store
//!
//! A [`Collection`] is an insertion-ordered list of records with unique,
//! non-empty keys. Lookups are linear; the collections are small.

use std::cmp::Ordering;

use crate::error::{CoreError, Result};

/// A record with a unique string key
pub trait Record: Clone {
    /// Human-readable collection name used in error messages
    const KIND: &'static str;

    fn key(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct Collection<R> {
    items: Vec<R>,
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<R: Record> Collection<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from loaded records, keeping the first occurrence of each key.
    /// Returns the collection and the number of records dropped.
    pub fn from_records(records: Vec<R>) -> (Self, usize) {
        let mut collection = Self::new();
        let mut dropped = 0;
        for record in records {
            if collection.add(record).is_err() {
                dropped += 1;
            }
        }
        (collection, dropped)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|r| r.key() == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn add(&mut self, record: R) -> Result<()> {
        if record.key().is_empty() {
            return Err(CoreError::EmptyKey { kind: R::KIND });
        }
        if self.contains(record.key()) {
            return Err(CoreError::DuplicateKey {
                kind: R::KIND,
                key: record.key().to_string(),
            });
        }
        self.items.push(record);
        Ok(())
    }

    /// Apply `f` to the record stored under `key`.
    ///
    /// The key itself is immutable: if `f` changes it, the previous value is
    /// restored and [`CoreError::KeyChanged`] is returned.
    pub fn update<F>(&mut self, key: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut R),
    {
        let idx = self.position(key).ok_or_else(|| not_found::<R>(key))?;
        let before = self.items[idx].clone();
        f(&mut self.items[idx]);
        if self.items[idx].key() != key {
            let to = self.items[idx].key().to_string();
            self.items[idx] = before;
            return Err(CoreError::KeyChanged {
                kind: R::KIND,
                from: key.to_string(),
                to,
            });
        }
        Ok(())
    }

    pub fn delete(&mut self, key: &str) -> Result<R> {
        let idx = self.position(key).ok_or_else(|| not_found::<R>(key))?;
        Ok(self.items.remove(idx))
    }

    pub fn find(&self, key: &str) -> Option<&R> {
        self.items.iter().find(|r| r.key() == key)
    }

    pub fn list(&self) -> &[R] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Stable sort; reordering never affects key uniqueness
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&R, &R) -> Ordering,
    {
        self.items.sort_by(compare);
    }
}

impl<'a, R> IntoIterator for &'a Collection<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn not_found<R: Record>(key: &str) -> CoreError {
    CoreError::NotFound {
        kind: R::KIND,
        key: key.to_string(),
    }
}
