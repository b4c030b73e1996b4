//! Read-only access to the module catalog.

use async_trait::async_trait;

use crate::error::Result;

use super::types::Module;

#[async_trait]
pub trait ModuleCatalog: Send + Sync {
    /// Backend name for logs ("postgres", "memory").
    fn backend_name(&self) -> &'static str;

    /// Every catalog entry, in whatever order the backend yields them.
    ///
    /// A row with unreadable stats still loads, with empty stats. Only a
    /// backend failure fails the whole call.
    async fn load_modules(&self) -> Result<Vec<Module>>;

    /// One catalog entry by id.
    async fn get_module(&self, module_id: &str) -> Result<Option<Module>>;
}
