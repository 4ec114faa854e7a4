//! Keyed table that iterates in insertion order

use std::collections::HashMap;

/// Rows addressable by string id
pub(crate) trait Row: Clone {
    fn id(&self) -> &str;
}

impl Row for orgchart_core::Employee {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Row for orgchart_core::Department {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug)]
pub(crate) struct Table<T> {
    rows: HashMap<String, T>,
    order: Vec<String>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: Row> Table<T> {
    pub fn from_rows(rows: impl IntoIterator<Item = T>) -> Self {
        let mut table = Self::default();
        for row in rows {
            table.insert(row);
        }
        table
    }

    /// Insert or replace a row. Replacing keeps the original position.
    pub fn insert(&mut self, row: T) {
        let id = row.id().to_string();
        if self.rows.insert(id.clone(), row).is_none() {
            self.order.push(id);
        }
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.rows.get(id)
    }

    /// Rows in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.rows.get(id))
    }

    /// Mutate a row in place and return a copy of the result
    pub fn modify<F>(&mut self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let row = self.rows.get_mut(id)?;
        f(row);
        Some(row.clone())
    }

    pub fn remove(&mut self, id: &str) -> bool {
        if self.rows.remove(id).is_some() {
            self.order.retain(|existing| existing != id);
            true
        } else {
            false
        }
    }
}
