//! In-memory blueprint store.

use crate::blueprint::Blueprint;
use crate::error::Result;
use crate::store::{BlueprintStore, BlueprintSummary, Registry};

/// A store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    registry: Registry,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlueprintStore for MemoryStore {
    fn add(&mut self, blueprint: &Blueprint) -> Result<u64> {
        Ok(self.registry.add(blueprint))
    }

    fn list(&self) -> Vec<BlueprintSummary> {
        self.registry.list()
    }

    fn get(&self, id: u64) -> Result<Blueprint> {
        self.registry.get(id)
    }

    fn remove(&mut self, id: u64) -> Result<()> {
        self.registry.remove(id)
    }

    fn blueprints(&self) -> Vec<Result<Blueprint>> {
        self.registry.blueprints()
    }
}
