// Repository selection state.
// Holds the owner/name pair and decides when a change should trigger a fetch.

use crate::error::Result;
use crate::store::{KeyValueStore, OWNER_KEY, REPO_KEY};

/// Owner/name pair the dashboard is pointed at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositorySelection {
    pub owner: String,
    pub name: String,
}

impl RepositorySelection {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Read the remembered pair. Missing keys leave the field empty.
    pub fn restore(store: &impl KeyValueStore) -> Self {
        Self {
            owner: store.get(OWNER_KEY).unwrap_or_default(),
            name: store.get(REPO_KEY).unwrap_or_default(),
        }
    }

    /// Remember this pair for the next session.
    pub fn persist(&self, store: &mut impl KeyValueStore) -> Result<()> {
        store.set(OWNER_KEY, &self.owner)?;
        store.set(REPO_KEY, &self.name)
    }

    pub fn set_owner(&mut self, value: impl Into<String>) {
        self.owner = value.into();
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    /// Both fields are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.owner.is_empty() && !self.name.is_empty()
    }

    /// Both fields are empty.
    pub fn is_blank(&self) -> bool {
        self.owner.is_empty() && self.name.is_empty()
    }

    /// `owner/name` label for headers and logs.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Request to load the workflow list for a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchIntent {
    pub selection: RepositorySelection,
}

/// Decide whether a selection change should load the list.
///
/// Yields an intent when both fields are set and the pair differs from the
/// last one that loaded successfully.
pub fn on_selection_changed(
    selection: &RepositorySelection,
    last_fetched: Option<&RepositorySelection>,
) -> Option<FetchIntent> {
    if !selection.is_complete() || last_fetched == Some(selection) {
        return None;
    }
    Some(FetchIntent {
        selection: selection.clone(),
    })
}
