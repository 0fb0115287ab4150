use crate::client::GenericClient;
use crate::error::DbResult;
use crate::model::{NewProperty, Property, PropertyListing};
use crate::query::query;
use crate::search::{self, DEFAULT_LIMIT, FilterSpec};

const INSERT_PROPERTY: &str = "INSERT INTO properties (owner_id, title, description, thumbnail_photo_url, cover_photo_url, \
cost_per_night, street, city, province, post_code, country, parking_spaces, number_of_bathrooms, number_of_bedrooms) \
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) RETURNING *";

/// Properties matching `filter`, cheapest first, with their average rating.
///
/// `limit` defaults to [`DEFAULT_LIMIT`] rows. Only properties with at least
/// one review are returned.
pub async fn search_properties(
    conn: &impl GenericClient,
    filter: &FilterSpec,
    limit: Option<i64>,
) -> DbResult<Vec<PropertyListing>> {
    search::build(filter, limit.unwrap_or(DEFAULT_LIMIT))
        .fetch_all_as(conn)
        .await
}

/// Insert a property and return the stored row.
pub async fn add_property(conn: &impl GenericClient, property: &NewProperty) -> DbResult<Property> {
    let p = property.clone();
    query(INSERT_PROPERTY)
        .tag("properties.insert")
        .bind(p.owner_id)
        .bind(p.title)
        .bind(p.description)
        .bind(p.thumbnail_photo_url)
        .bind(p.cover_photo_url)
        .bind(p.cost_per_night)
        .bind(p.street)
        .bind(p.city)
        .bind(p.province)
        .bind(p.post_code)
        .bind(p.country)
        .bind(p.parking_spaces)
        .bind(p.number_of_bathrooms)
        .bind(p.number_of_bedrooms)
        .fetch_one_as(conn)
        .await
}
