//! `tracing`-based SQL logging for any executor.

use crate::client::GenericClient;
use crate::error::DbResult;
use std::time::Instant;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;
use tracing::Level;

/// Settings for [`TracedClient`].
#[derive(Debug, Clone)]
pub struct SqlLogConfig {
    /// Tracing event level to emit at.
    pub level: Level,
    /// Truncate long SQL strings (in bytes, on a char boundary). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for SqlLogConfig {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl SqlLogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

/// Cut `sql` to at most `max` bytes without splitting a UTF-8 character.
pub(crate) fn truncate_sql_bytes(sql: &str, max: usize) -> &str {
    if sql.len() <= max {
        return sql;
    }
    let mut end = max;
    while !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// Dispatch a tracing event at a runtime-determined level.
macro_rules! emit_at_level {
    ($level:expr, $($field:tt)*) => {
        match $level {
            Level::ERROR => tracing::error!($($field)*),
            Level::WARN  => tracing::warn!($($field)*),
            Level::INFO  => tracing::info!($($field)*),
            Level::DEBUG => tracing::debug!($($field)*),
            Level::TRACE => tracing::trace!($($field)*),
        }
    };
}

/// An executor wrapper that logs every statement it forwards.
///
/// Before the statement: tag, parameter count and (truncated) SQL. After it:
/// elapsed time and row count, or a `warn!` carrying the error. Statements,
/// parameters and results pass through unchanged.
///
/// ```ignore
/// let client = TracedClient::new(pool.get().await?);
/// let hits = lightbnb_db::search_properties(&client, &filter, None).await?;
/// ```
#[derive(Debug, Clone)]
pub struct TracedClient<C> {
    client: C,
    config: SqlLogConfig,
}

impl<C: GenericClient> TracedClient<C> {
    pub fn new(client: C) -> Self {
        Self::with_config(client, SqlLogConfig::default())
    }

    pub fn with_config(client: C, config: SqlLogConfig) -> Self {
        Self { client, config }
    }

    pub fn inner(&self) -> &C {
        &self.client
    }

    fn before(&self, tag: &str, sql: &str, param_count: usize) -> Instant {
        let sql = self.config.truncate_sql(sql);
        emit_at_level!(
            self.config.level,
            target: "lightbnb.sql",
            tag,
            param_count,
            sql = %sql,
            "executing"
        );
        Instant::now()
    }

    fn after<T>(
        &self,
        tag: &str,
        started: Instant,
        result: &DbResult<T>,
        count_rows: impl Fn(&T) -> u64,
    ) {
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        match result {
            Ok(value) => emit_at_level!(
                self.config.level,
                target: "lightbnb.sql",
                tag,
                elapsed_ms,
                rows = count_rows(value),
                "done"
            ),
            Err(err) => tracing::warn!(
                target: "lightbnb.sql",
                tag,
                elapsed_ms,
                error = %err,
                "failed"
            ),
        }
    }

    async fn run_query(
        &self,
        tag: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> DbResult<Vec<Row>> {
        let started = self.before(tag, sql, params.len());
        let result = self.client.query_tagged(tag, sql, params).await;
        self.after(tag, started, &result, |rows| rows.len() as u64);
        result
    }
}

impl<C: GenericClient> GenericClient for TracedClient<C> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DbResult<Vec<Row>> {
        self.run_query("-", sql, params).await
    }

    async fn query_tagged(
        &self,
        tag: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> DbResult<Vec<Row>> {
        self.run_query(tag, sql, params).await
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DbResult<u64> {
        let started = self.before("-", sql, params.len());
        let result = self.client.execute(sql, params).await;
        self.after("-", started, &result, |n| *n);
        result
    }
}
