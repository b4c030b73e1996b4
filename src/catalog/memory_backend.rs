//! In-memory module catalog using DashMap.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::Result;

use super::store::ModuleCatalog;
use super::types::{Module, ModuleRow};

/// Catalog held in memory, seeded with raw rows.
///
/// Iteration order follows the map's shards, so like the table it has no
/// defined order.
#[derive(Default)]
pub struct MemoryModuleCatalog {
    rows: DashMap<String, ModuleRow>,
}

impl MemoryModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: impl IntoIterator<Item = ModuleRow>) -> Self {
        let catalog = Self::new();
        for row in rows {
            catalog.seed(row);
        }
        catalog
    }

    /// Add or replace a catalog row.
    pub fn seed(&self, row: ModuleRow) {
        self.rows.insert(row.module_id.clone(), row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl ModuleCatalog for MemoryModuleCatalog {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn load_modules(&self) -> Result<Vec<Module>> {
        let rows: Vec<ModuleRow> = self.rows.iter().map(|r| r.value().clone()).collect();
        Ok(rows.into_iter().map(ModuleRow::into_module).collect())
    }

    async fn get_module(&self, module_id: &str) -> Result<Option<Module>> {
        let row = self.rows.get(module_id).map(|r| r.clone());
        Ok(row.map(ModuleRow::into_module))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armor_row() -> ModuleRow {
        ModuleRow {
            module_id: "plate-1".to_string(),
            name: "Plating".to_string(),
            module_type: "armor".to_string(),
            stats_json: Some(r#"{"armor": 20}"#.to_string()),
            description: None,
            cost: 80,
        }
    }

    #[tokio::test]
    async fn test_seed_replaces_existing_entry() {
        let catalog = MemoryModuleCatalog::from_rows([armor_row()]);
        let mut updated = armor_row();
        updated.cost = 95;
        catalog.seed(updated);

        assert_eq!(catalog.len(), 1);
        let module = catalog.get_module("plate-1").await.unwrap().unwrap();
        assert_eq!(module.cost, 95);
    }

    #[tokio::test]
    async fn test_get_unknown_module() {
        let catalog = MemoryModuleCatalog::new();
        assert!(catalog.get_module("nope").await.unwrap().is_none());
    }
}
