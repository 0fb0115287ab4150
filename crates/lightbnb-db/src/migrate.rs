//! Embedded schema migrations via [`refinery`].
//!
//! The SQL files under `migrations/` are compiled into the crate, so a binary
//! can bring an empty database up to the LightBnB schema without shipping
//! files alongside it.
//!
//! ```ignore
//! let pool = lightbnb_db::create_pool(&url)?;
//! let report = lightbnb_db::migrate::run_pool(&pool).await?;
//! ```

use crate::error::DbResult;

pub use refinery::{Migration, Report};

mod embedded {
    refinery::embed_migrations!("./migrations");
}

/// The embedded migrations, in version order.
pub fn migrations() -> Vec<Migration> {
    embedded::migrations::runner().get_migrations().to_vec()
}

/// Apply every pending migration on a single connection.
pub async fn run(client: &mut tokio_postgres::Client) -> DbResult<Report> {
    let report = embedded::migrations::runner().run_async(client).await?;
    for m in report.applied_migrations() {
        tracing::info!(target: "lightbnb.db", version = m.version(), name = m.name(), "applied migration");
    }
    Ok(report)
}

/// Acquire a connection from a pool and apply pending migrations on it.
#[cfg(feature = "pool")]
pub async fn run_pool(pool: &deadpool_postgres::Pool) -> DbResult<Report> {
    let mut client = pool.get().await?;
    run(&mut client).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_migration_is_embedded() {
        let migrations = migrations();
        assert_eq!(migrations.len(), 1);
        assert_eq!(migrations[0].version(), 1);
        assert_eq!(migrations[0].name(), "schema");
    }
}
