//! Blueprint registry: uploaded blueprints kept under auto-increment ids.

mod file;
mod memory;

use crate::blueprint::Blueprint;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Listing entry for a stored blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlueprintSummary {
    pub id: u64,
    pub title: String,
    pub description: String,
}

/// Storage for uploaded blueprints.
pub trait BlueprintStore {
    /// Store a validated blueprint and return its new id.
    fn add(&mut self, blueprint: &Blueprint) -> Result<u64>;

    /// Summaries of every stored blueprint, by ascending id.
    fn list(&self) -> Vec<BlueprintSummary>;

    /// Fetch one stored blueprint.
    fn get(&self, id: u64) -> Result<Blueprint>;

    /// Delete a stored blueprint. Its id is not reused.
    fn remove(&mut self, id: u64) -> Result<()>;

    /// Every stored blueprint, by ascending id, each validated on its own.
    fn blueprints(&self) -> Vec<Result<Blueprint>>;
}

/// One stored document with its denormalized listing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoredBlueprint {
    id: u64,
    title: String,
    description: String,
    document: JsonValue,
}

/// Registry contents shared by the store backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Registry {
    next_id: u64,
    entries: Vec<StoredBlueprint>,
}

impl Default for Registry {
    fn default() -> Self {
        Registry {
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl Registry {
    fn add(&mut self, blueprint: &Blueprint) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(StoredBlueprint {
            id,
            title: blueprint.preamble.title.clone(),
            description: blueprint.preamble.description.clone(),
            document: blueprint.document.clone(),
        });
        id
    }

    fn list(&self) -> Vec<BlueprintSummary> {
        self.entries
            .iter()
            .map(|e| BlueprintSummary {
                id: e.id,
                title: e.title.clone(),
                description: e.description.clone(),
            })
            .collect()
    }

    fn get(&self, id: u64) -> Result<Blueprint> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.id == id)
            .ok_or(Error::BlueprintNotFound(id))?;
        revalidate(entry)
    }

    fn remove(&mut self, id: u64) -> Result<()> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return Err(Error::BlueprintNotFound(id));
        }
        Ok(())
    }

    fn blueprints(&self) -> Vec<Result<Blueprint>> {
        self.entries.iter().map(revalidate).collect()
    }
}

/// Stored documents are checked again on the way out; a hand-edited store
/// must not feed unvalidated schemas into the repository.
fn revalidate(entry: &StoredBlueprint) -> Result<Blueprint> {
    Blueprint::from_json(entry.document.clone()).map_err(|violations| Error::InvalidBlueprint {
        name: format!("#{}", entry.id),
        violations,
    })
}
