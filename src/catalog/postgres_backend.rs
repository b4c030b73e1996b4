//! PostgreSQL-backed module catalog.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::metrics::QueryTimer;

use super::store::ModuleCatalog;
use super::types::{Module, ModuleRow};

// No ORDER BY: callers must not rely on row order
const SELECT_MODULES: &str =
    "SELECT module_id, name, type, stats_json, description, cost FROM modules";

const SELECT_MODULE: &str = r#"
    SELECT module_id, name, type, stats_json, description, cost
    FROM modules
    WHERE module_id = $1
"#;

pub struct PostgresModuleCatalog {
    /// PostgreSQL connection pool
    pool: PgPool,
}

impl PostgresModuleCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ModuleCatalog for PostgresModuleCatalog {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn load_modules(&self) -> Result<Vec<Module>> {
        let timer = QueryTimer::start("load_modules");
        let rows = sqlx::query_as::<_, ModuleRow>(SELECT_MODULES)
            .fetch_all(&self.pool)
            .await;

        match rows {
            Ok(rows) => {
                timer.success();
                let modules: Vec<Module> = rows.into_iter().map(ModuleRow::into_module).collect();
                tracing::debug!(count = modules.len(), "Loaded module catalog");
                Ok(modules)
            }
            Err(e) => {
                timer.failure();
                tracing::error!(error = %e, "Error loading modules");
                Err(e.into())
            }
        }
    }

    async fn get_module(&self, module_id: &str) -> Result<Option<Module>> {
        let timer = QueryTimer::start("get_module");
        let row = sqlx::query_as::<_, ModuleRow>(SELECT_MODULE)
            .bind(module_id)
            .fetch_optional(&self.pool)
            .await;

        match row {
            Ok(row) => {
                timer.success();
                Ok(row.map(ModuleRow::into_module))
            }
            Err(e) => {
                timer.failure();
                tracing::error!(module_id = %module_id, error = %e, "Error fetching module");
                Err(e.into())
            }
        }
    }
}
