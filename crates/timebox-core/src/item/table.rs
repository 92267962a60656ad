//! Flat, id-keyed item storage.
//!
//! Child references hold ids, so a missing id is just a failed lookup and
//! never a dangling pointer.

use std::collections::HashMap;

use super::model::Item;
use crate::error::ValidationError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemTable {
    items: HashMap<String, Item>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

impl ItemTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a list. A later item with the same id replaces an
    /// earlier one.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut table = Self::new();
        for item in items {
            table.insert(item);
        }
        table
    }

    /// Insert an item, returning the one it replaced.
    pub fn insert(&mut self, item: Item) -> Option<Item> {
        self.items.insert(item.id().to_string(), item)
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Existing direct children of `id`, in storage order.
    pub fn children_of(&self, id: &str) -> Vec<&Item> {
        self.get(id)
            .map(|item| {
                item.child_ids()
                    .into_iter()
                    .filter_map(|child| self.get(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `(container_id, missing_child_id)` pairs, sorted for stable output.
    pub fn dangling_references(&self) -> Vec<(String, String)> {
        let mut dangling: Vec<(String, String)> = self
            .items
            .values()
            .flat_map(|item| {
                item.child_ids()
                    .into_iter()
                    .filter(|child| !self.contains(child))
                    .map(|child| (item.id().to_string(), child.to_string()))
                    .collect::<Vec<_>>()
            })
            .collect();
        dangling.sort();
        dangling
    }

    /// Check that the child graph is acyclic.
    ///
    /// This is the edit-time check the resolvers rely on; they never look
    /// for cycles themselves. Missing child ids are ignored.
    ///
    /// # Errors
    /// Returns [`ValidationError::Cycle`] with the offending path, first id
    /// repeated at the end.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(self.items.len());

        // Sorted roots keep the reported cycle stable between runs.
        let mut ids: Vec<&str> = self.items.keys().map(String::as_str).collect();
        ids.sort_unstable();

        for id in ids {
            if marks.contains_key(id) {
                continue;
            }
            let mut path = Vec::new();
            self.visit(id, &mut marks, &mut path)?;
        }
        Ok(())
    }

    fn visit<'a>(
        &'a self,
        id: &'a str,
        marks: &mut HashMap<&'a str, Mark>,
        path: &mut Vec<&'a str>,
    ) -> Result<(), ValidationError> {
        match marks.get(id) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = path.iter().position(|p| *p == id).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..].iter().map(|p| p.to_string()).collect();
                cycle.push(id.to_string());
                return Err(ValidationError::Cycle { path: cycle });
            }
            None => {}
        }

        let Some(item) = self.get(id) else {
            return Ok(());
        };

        marks.insert(id, Mark::Visiting);
        path.push(id);
        for child in item.child_ids() {
            if self.contains(child) {
                self.visit(child, marks, path)?;
            }
        }
        path.pop();
        marks.insert(id, Mark::Done);
        Ok(())
    }
}

impl FromIterator<Item> for ItemTable {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self::from_items(iter)
    }
}
