//! Dynamic SQL assembly.
//!
//! - [`query()`](crate::query()) is for fixed statements already numbered `$1, $2...`.
//! - [`Sql`] composes a statement piece by piece without manual placeholder
//!   bookkeeping, and finishes into a [`QueryPlan`].
//!
//! # Example
//!
//! ```ignore
//! use lightbnb_db::sql;
//!
//! let mut q = sql("SELECT * FROM properties");
//! if let Some(city) = city {
//!     q.push(" WHERE city = ").push_bind(city);
//! }
//! q.limit(10);
//! let plan = q.into_plan();
//! ```

mod bind;
mod builder;
mod parts;
mod plan;


pub use bind::BindValue;
pub use builder::{Sql, SqlFragment};
pub use plan::QueryPlan;

/// Start building a SQL statement.
pub fn sql(initial_sql: impl Into<String>) -> Sql {
    Sql::new(initial_sql)
}
