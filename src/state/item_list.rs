//! Ordered, keyed collections of vehicles and dependents
//!
//! Each entry keeps a stable key for the whole session: the backend id when
//! the entry was loaded from a saved application, otherwise a fresh UUID.
//! Entries stay in insertion order, which is also the order they are sent in.

use super::entities::{Dependent, Identified, Vehicle};
use super::forms::{DependentForm, EditorDialog, ItemForm, VehicleForm};
use std::fmt;
use uuid::Uuid;

/// Maximum number of vehicles on one application
pub const MAX_VEHICLES: usize = 3;

/// Session-unique key of a list entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Human-readable row summary
pub trait ListEntry {
    fn primary(&self) -> String;
    fn secondary(&self) -> String;
}

impl ListEntry for Vehicle {
    fn primary(&self) -> String {
        self.vin.clone()
    }

    fn secondary(&self) -> String {
        format!("{}, {}, {}", self.model, self.make, self.year)
    }
}

impl ListEntry for Dependent {
    fn primary(&self) -> String {
        self.person.full_name()
    }

    fn secondary(&self) -> String {
        format!(
            "{}, born {}",
            self.relationship,
            self.person.date_of_birth.format("%Y-%m-%d")
        )
    }
}

/// Change reported to the owning form: `entity` is `None` for a deletion
#[derive(Debug, Clone, PartialEq)]
pub struct ListChange<T> {
    pub key: ItemKey,
    pub entity: Option<T>,
}

/// A list of items edited through an [`EditorDialog`]
pub struct ItemList<F: ItemForm> {
    entries: Vec<(ItemKey, F::Item)>,
    selected_index: usize,
    /// Key being edited; `None` while creating
    editing: Option<ItemKey>,
    dialog: EditorDialog<F>,
    capacity: Option<usize>,
}

pub type VehicleList = ItemList<VehicleForm>;
pub type DependentList = ItemList<DependentForm>;

impl VehicleList {
    pub fn vehicles() -> Self {
        Self::with_capacity(Some(MAX_VEHICLES))
    }
}

impl DependentList {
    pub fn dependents() -> Self {
        Self::with_capacity(None)
    }
}

impl<F> ItemList<F>
where
    F: ItemForm,
    F::Item: ListEntry,
{
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            entries: Vec::new(),
            selected_index: 0,
            editing: None,
            dialog: EditorDialog::new(),
            capacity,
        }
    }

    pub fn entries(&self) -> &[(ItemKey, F::Item)] {
        &self.entries
    }

    /// The items in order, as sent to the API
    pub fn items(&self) -> Vec<F::Item> {
        self.entries.iter().map(|(_, item)| item.clone()).collect()
    }

    pub fn get(&self, key: &ItemKey) -> Option<&F::Item> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, item)| item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Whether "Add" is enabled
    pub fn can_add(&self) -> bool {
        self.capacity.map_or(true, |max| self.entries.len() < max)
    }

    pub fn dialog(&self) -> &EditorDialog<F> {
        &self.dialog
    }

    pub fn dialog_mut(&mut self) -> &mut EditorDialog<F> {
        &mut self.dialog
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_key(&self) -> Option<&ItemKey> {
        self.entries.get(self.selected_index).map(|(key, _)| key)
    }

    pub fn move_selection_down(&mut self) {
        if !self.entries.is_empty() && self.selected_index < self.entries.len() - 1 {
            self.selected_index += 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Open the dialog in create mode; false when the list is full
    pub fn begin_add(&mut self) -> bool {
        if !self.can_add() {
            return false;
        }
        self.editing = None;
        self.dialog.open(None);
        true
    }

    /// Open the dialog in edit mode for `key`
    pub fn begin_edit(&mut self, key: &ItemKey) -> bool {
        let Some(item) = self.get(key).cloned() else {
            return false;
        };
        self.editing = Some(key.clone());
        self.dialog.open(Some(&item));
        true
    }

    pub fn begin_edit_selected(&mut self) -> bool {
        match self.selected_key().cloned() {
            Some(key) => self.begin_edit(&key),
            None => false,
        }
    }

    /// Remove `key` immediately
    pub fn delete(&mut self, key: &ItemKey) -> Option<ListChange<F::Item>> {
        let position = self.entries.iter().position(|(k, _)| k == key)?;
        self.entries.remove(position);
        if self.selected_index >= self.entries.len() {
            self.selected_index = self.entries.len().saturating_sub(1);
        }
        Some(ListChange {
            key: key.clone(),
            entity: None,
        })
    }

    pub fn delete_selected(&mut self) -> Option<ListChange<F::Item>> {
        let key = self.selected_key()?.clone();
        self.delete(&key)
    }

    /// Confirm the dialog, replacing the edited entry or appending a new one
    pub fn save_dialog(&mut self) -> Option<ListChange<F::Item>> {
        let item = self.dialog.confirm()?;
        let key = match self.editing.take() {
            Some(key) => {
                match self.entries.iter_mut().find(|(k, _)| *k == key) {
                    Some(entry) => entry.1 = item.clone(),
                    // deleted while the dialog was open
                    None => self.entries.push((key.clone(), item.clone())),
                }
                key
            }
            None => {
                let key = ItemKey::generate();
                self.entries.push((key.clone(), item.clone()));
                self.selected_index = self.entries.len() - 1;
                key
            }
        };
        Some(ListChange {
            key,
            entity: Some(item),
        })
    }

    pub fn cancel_dialog(&mut self) {
        self.editing = None;
        self.dialog.cancel();
    }

    /// Replace every entry, keying each by its persisted id
    pub fn replace_all(&mut self, items: impl IntoIterator<Item = F::Item>) {
        self.entries = items
            .into_iter()
            .map(|item| {
                let key = match item.id() {
                    Some(id) => ItemKey::from(id),
                    None => {
                        tracing::debug!("Restored list entry has no id, assigning a local key");
                        ItemKey::generate()
                    }
                };
                (key, item)
            })
            .collect();
        self.selected_index = 0;
        self.cancel_dialog();
    }
}
