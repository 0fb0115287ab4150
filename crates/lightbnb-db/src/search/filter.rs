use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sparse set of optional constraints for a property search.
///
/// Every field is optional and an absent field places no constraint at all.
/// Neither does a blank one (see [`FilterSpec::without_blanks`]).
/// Unknown keys are rejected on deserialization.
///
/// ```ignore
/// let filter: FilterSpec = serde_json::from_str(r#"{"city": "Vancouver", "minRating": 4}"#)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSpec {
    /// Matched with `LIKE initcap(..)`; may carry `%` wildcards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, alias = "ownerId", skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i32>,

    /// Inclusive lower bound on `cost_per_night`.
    #[serde(
        default,
        alias = "minPricePerNight",
        alias = "minimum_price_per_night",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_price_per_night: Option<i32>,

    /// Inclusive upper bound on `cost_per_night`.
    #[serde(
        default,
        alias = "maxPricePerNight",
        alias = "maximum_price_per_night",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_price_per_night: Option<i32>,

    /// Inclusive lower bound on the property's average review rating.
    #[serde(
        default,
        alias = "minRating",
        alias = "minimum_rating",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_rating: Option<Decimal>,
}

impl FilterSpec {
    /// An empty filter (matches every reviewed property).
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain by city, compared in capitalized form.
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Constrain to cities containing `fragment` once `initcap` has capitalized
    /// each of its words. The match is case-sensitive: `"vancouver"` finds
    /// North Vancouver, `"couver"` finds nothing.
    pub fn city_containing(self, fragment: &str) -> Self {
        self.city(format!("%{fragment}%"))
    }

    pub fn owner_id(mut self, owner_id: i32) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn min_price_per_night(mut self, price: i32) -> Self {
        self.min_price_per_night = Some(price);
        self
    }

    pub fn max_price_per_night(mut self, price: i32) -> Self {
        self.max_price_per_night = Some(price);
        self
    }

    pub fn min_rating(mut self, rating: impl Into<Decimal>) -> Self {
        self.min_rating = Some(rating.into());
        self
    }

    /// Whether no constraint is set. Blank values count as unset.
    pub fn is_empty(&self) -> bool {
        self.without_blanks() == Self::default()
    }

    /// A copy with blank values cleared: an empty `city` and a zero id,
    /// price or rating are what a blank search form submits, and mean
    /// "no constraint".
    pub fn without_blanks(&self) -> Self {
        Self {
            city: self.city.clone().filter(|city| !city.is_empty()),
            owner_id: self.owner_id.filter(|&id| id != 0),
            min_price_per_night: self.min_price_per_night.filter(|&p| p != 0),
            max_price_per_night: self.max_price_per_night.filter(|&p| p != 0),
            min_rating: self.min_rating.filter(|r| !r.is_zero()),
        }
    }

    /// Fill every field unset (or blank) in `self` from `other`.
    pub fn or(self, other: FilterSpec) -> Self {
        let this = self.without_blanks();
        Self {
            city: this.city.or(other.city),
            owner_id: this.owner_id.or(other.owner_id),
            min_price_per_night: this.min_price_per_night.or(other.min_price_per_night),
            max_price_per_night: this.max_price_per_night.or(other.max_price_per_night),
            min_rating: this.min_rating.or(other.min_rating),
        }
    }
}
