use super::bind::BindValue;
use crate::client::GenericClient;
use crate::error::{DbError, DbResult};
use crate::row::FromRow;
use std::fmt;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A finished statement: SQL text plus the ordered values for its placeholders.
///
/// The Nth placeholder (`$N`) refers to the Nth element of [`QueryPlan::params`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    sql: String,
    params: Vec<BindValue>,
    tag: Option<String>,
}

impl QueryPlan {
    /// Pair SQL text with its parameters.
    pub fn new(sql: impl Into<String>, params: Vec<BindValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
            tag: None,
        }
    }

    /// Associate a tag for observability.
    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// The SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The bind values, in placeholder order.
    pub fn params(&self) -> &[BindValue] {
        &self.params
    }

    /// The tag, if any.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Placeholder numbers in the order they appear in the SQL text.
    ///
    /// Text inside single-quoted literals is skipped.
    pub fn placeholders(&self) -> Vec<usize> {
        let bytes = self.sql.as_bytes();
        let mut out = Vec::new();
        let mut in_literal = false;
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\'' => in_literal = !in_literal,
                b'$' if !in_literal => {
                    let start = i + 1;
                    let mut end = start;
                    while end < bytes.len() && bytes[end].is_ascii_digit() {
                        end += 1;
                    }
                    if end > start {
                        if let Ok(n) = self.sql[start..end].parse::<usize>() {
                            out.push(n);
                        }
                        i = end;
                        continue;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        out
    }

    /// Check that placeholders run `$1..$N` without gaps or reuse and that
    /// there are exactly N parameters.
    pub fn validate(&self) -> DbResult<()> {
        let placeholders = self.placeholders();
        if let Some((pos, n)) = placeholders
            .iter()
            .enumerate()
            .find(|(pos, n)| **n != pos + 1)
        {
            return Err(DbError::validation(format!(
                "placeholder #{} is ${n}, expected ${}",
                pos + 1,
                pos + 1
            )));
        }
        if placeholders.len() != self.params.len() {
            return Err(DbError::validation(format!(
                "placeholders({}) != params({})",
                placeholders.len(),
                self.params.len()
            )));
        }
        Ok(())
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect()
    }

    /// Validate, execute and return all rows.
    pub async fn fetch_all(&self, conn: &impl GenericClient) -> DbResult<Vec<Row>> {
        self.validate()?;
        let params = self.params_ref();
        match self.tag.as_deref() {
            Some(tag) => conn.query_tagged(tag, &self.sql, &params).await,
            None => conn.query(&self.sql, &params).await,
        }
    }

    /// Validate, execute and map all rows to `T`.
    pub async fn fetch_all_as<T: FromRow>(&self, conn: &impl GenericClient) -> DbResult<Vec<T>> {
        let rows = self.fetch_all(conn).await?;
        rows.iter().map(T::from_row).collect()
    }
}

impl fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.sql)?;
        for (i, p) in self.params.iter().enumerate() {
            writeln!(f, "  ${} = {} ({})", i + 1, p, p.type_name())?;
        }
        Ok(())
    }
}
