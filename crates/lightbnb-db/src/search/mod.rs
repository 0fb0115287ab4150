//! Filtered aggregate property search.
//!
//! [`build`] turns a sparse [`FilterSpec`] and a row limit into one
//! parameterized statement over `properties ⋈ property_reviews`:
//!
//! ```text
//! SELECT properties.*, AVG(property_reviews.rating) AS average_rating
//! FROM properties JOIN property_reviews ON properties.id = property_reviews.property_id
//! [WHERE p1 [AND p2 ...]]                       -- city, owner, min price, max price
//! GROUP BY properties.id
//! [HAVING AVG(property_reviews.rating) >= $k]   -- min rating
//! ORDER BY cost_per_night ASC
//! LIMIT $n                                      -- always the last placeholder
//! ```
//!
//! The builder is pure: it never touches the database and never fails.

mod filter;

#[cfg(test)]
mod tests;

pub use filter::FilterSpec;

use crate::sql::{BindValue, QueryPlan, Sql, SqlFragment};

/// Row count used by list-style accessors when the caller gives none.
pub const DEFAULT_LIMIT: i64 = 10;

const SELECT_PROPERTIES_WITH_RATING: &str = "SELECT properties.*, AVG(property_reviews.rating) AS average_rating \
FROM properties \
JOIN property_reviews ON properties.id = property_reviews.property_id";

/// A pre-aggregation constraint with its bind value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `city LIKE initcap($n)`
    CityLike(String),
    /// `owner_id = $n`
    OwnerIs(i32),
    /// `cost_per_night >= $n`
    MinPrice(i32),
    /// `cost_per_night <= $n`
    MaxPrice(i32),
}

impl Predicate {
    /// SQL text before the placeholder and after it.
    fn template(&self) -> (&'static str, &'static str) {
        match self {
            Self::CityLike(_) => ("city LIKE initcap(", ")"),
            Self::OwnerIs(_) => ("owner_id = ", ""),
            Self::MinPrice(_) => ("cost_per_night >= ", ""),
            Self::MaxPrice(_) => ("cost_per_night <= ", ""),
        }
    }

    fn value(&self) -> BindValue {
        match self {
            Self::CityLike(city) => BindValue::Text(city.clone()),
            Self::OwnerIs(id) => BindValue::Int(*id),
            Self::MinPrice(price) | Self::MaxPrice(price) => BindValue::Int(*price),
        }
    }
}

impl SqlFragment for Predicate {
    fn append_to_sql(&self, sql: &mut Sql) {
        let (before, after) = self.template();
        sql.push(before).push_bind(self.value()).push(after);
    }
}

impl FilterSpec {
    /// The set pre-aggregation constraints, in the fixed order
    /// city, owner, minimum price, maximum price. Blank values are skipped
    /// (see [`FilterSpec::without_blanks`]).
    pub fn predicates(&self) -> Vec<Predicate> {
        let set = self.without_blanks();
        [
            set.city.map(Predicate::CityLike),
            set.owner_id.map(Predicate::OwnerIs),
            set.min_price_per_night.map(Predicate::MinPrice),
            set.max_price_per_night.map(Predicate::MaxPrice),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Assemble the search statement for `filter`, capped at `limit` rows.
///
/// `limit` is bound as-is; validating it is the caller's job.
pub fn build(filter: &FilterSpec, limit: i64) -> QueryPlan {
    let mut q = Sql::new(SELECT_PROPERTIES_WITH_RATING).tagged("properties.search");

    q.push_where_and(&filter.predicates());

    // Emitted even without HAVING so that AVG is always grouped.
    q.push(" GROUP BY properties.id");

    if let Some(min_rating) = filter.without_blanks().min_rating {
        q.push(" HAVING AVG(property_reviews.rating) >= ")
            .push_bind(min_rating);
    }

    q.push(" ORDER BY cost_per_night ASC");
    q.limit(limit);
    q.into_plan()
}
