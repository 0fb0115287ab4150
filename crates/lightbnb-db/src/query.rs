//! Fixed-shape statements with pre-numbered placeholders.

use crate::client::GenericClient;
use crate::error::DbResult;
use crate::row::FromRow;
use std::sync::Arc;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A SQL string with pre-numbered placeholders (`$1, $2, ...`) plus bound parameters.
///
/// Values are always bound, never interpolated into the SQL text.
///
/// # Example
/// ```ignore
/// let user: Option<User> = lightbnb_db::query("SELECT * FROM users WHERE id = $1")
///     .tag("users.by_id")
///     .bind(1_i32)
///     .fetch_opt_as(&client)
///     .await?;
/// ```
#[must_use]
pub struct Query {
    sql: String,
    params: Vec<Arc<dyn ToSql + Sync + Send>>,
    tag: Option<String>,
}

/// Build a query from a pre-numbered SQL string.
pub fn query(sql: impl Into<String>) -> Query {
    Query::new(sql)
}

impl Query {
    /// Create a new pre-numbered query.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            tag: None,
        }
    }

    /// Associate a tag for observability.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Bind a parameter value.
    ///
    /// This does not modify the SQL string; it only appends the value to the
    /// parameter list.
    pub fn bind<T>(mut self, value: T) -> Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.params.push(Arc::new(value));
        self
    }

    /// Access the SQL string.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Number of bound parameters.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect()
    }

    /// Execute the query and return all rows.
    pub async fn fetch_all(&self, conn: &impl GenericClient) -> DbResult<Vec<Row>> {
        let params = self.params_ref();
        match self.tag.as_deref() {
            Some(tag) => conn.query_tagged(tag, &self.sql, &params).await,
            None => conn.query(&self.sql, &params).await,
        }
    }

    /// Execute the query and return all rows mapped to `T`.
    pub async fn fetch_all_as<T: FromRow>(&self, conn: &impl GenericClient) -> DbResult<Vec<T>> {
        let rows = self.fetch_all(conn).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Execute the query and return the first row, if any, mapped to `T`.
    pub async fn fetch_opt_as<T: FromRow>(
        &self,
        conn: &impl GenericClient,
    ) -> DbResult<Option<T>> {
        let rows = self.fetch_all(conn).await?;
        rows.first().map(T::from_row).transpose()
    }

    /// Execute the query and return the first row mapped to `T`.
    ///
    /// Zero rows is [`DbError::NotFound`](crate::DbError::NotFound).
    pub async fn fetch_one_as<T: FromRow>(&self, conn: &impl GenericClient) -> DbResult<T> {
        self.fetch_opt_as(conn).await?.ok_or_else(|| {
            crate::error::DbError::not_found(format!(
                "Expected one row, got none: {}",
                self.tag.as_deref().unwrap_or(&self.sql)
            ))
        })
    }

    /// Execute the statement and return the number of affected rows.
    pub async fn execute(&self, conn: &impl GenericClient) -> DbResult<u64> {
        let params = self.params_ref();
        conn.execute(&self.sql, &params).await
    }
}
