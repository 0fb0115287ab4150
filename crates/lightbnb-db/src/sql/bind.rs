use bytes::BytesMut;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt;
use tokio_postgres::types::{IsNull, ToSql, Type};

/// A typed value bound to a `$N` placeholder.
///
/// Unlike a boxed `dyn ToSql`, a `BindValue` can be compared and printed, so a
/// [`QueryPlan`](super::QueryPlan) can be asserted on or explained before it
/// reaches the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    /// `TEXT` / `VARCHAR`
    Text(String),
    /// `INTEGER`
    Int(i32),
    /// `BIGINT` (row limits)
    BigInt(i64),
    /// `NUMERIC` (aggregate thresholds)
    Numeric(Decimal),
}

impl BindValue {
    /// Postgres type name of the wrapped value, for display.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "integer",
            Self::BigInt(_) => "bigint",
            Self::Numeric(_) => "numeric",
        }
    }
}

impl fmt::Display for BindValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Self::Int(v) => write!(f, "{v}"),
            Self::BigInt(v) => write!(f, "{v}"),
            Self::Numeric(v) => write!(f, "{v}"),
        }
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<i32> for BindValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        Self::BigInt(v)
    }
}

impl From<Decimal> for BindValue {
    fn from(v: Decimal) -> Self {
        Self::Numeric(v)
    }
}

impl ToSql for BindValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        // Type check per variant: an `Int` must not be written into a bigint slot.
        match self {
            Self::Text(v) => v.to_sql_checked(ty, out),
            Self::Int(v) => v.to_sql_checked(ty, out),
            Self::BigInt(v) => v.to_sql_checked(ty, out),
            Self::Numeric(v) => v.to_sql_checked(ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        <String as ToSql>::accepts(ty)
            || <i32 as ToSql>::accepts(ty)
            || <i64 as ToSql>::accepts(ty)
            || <Decimal as ToSql>::accepts(ty)
    }

    fn to_sql_checked(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        self.to_sql(ty, out)
    }
}
