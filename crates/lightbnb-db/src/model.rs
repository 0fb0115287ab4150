//! Row types for the LightBnB schema.

use crate::error::DbResult;
use crate::row::{FromRow, RowExt};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// A registered user (`users`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl FromRow for User {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            name: row.try_get_column("name")?,
            email: row.try_get_column("email")?,
            password: row.try_get_column("password")?,
        })
    }
}

/// Input for [`add_user`](crate::repo::add_user).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A listed property (`properties`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
}

impl FromRow for Property {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            owner_id: row.try_get_column("owner_id")?,
            title: row.try_get_column("title")?,
            description: row.try_get_column("description")?,
            thumbnail_photo_url: row.try_get_column("thumbnail_photo_url")?,
            cover_photo_url: row.try_get_column("cover_photo_url")?,
            cost_per_night: row.try_get_column("cost_per_night")?,
            parking_spaces: row.try_get_column("parking_spaces")?,
            number_of_bathrooms: row.try_get_column("number_of_bathrooms")?,
            number_of_bedrooms: row.try_get_column("number_of_bedrooms")?,
            country: row.try_get_column("country")?,
            street: row.try_get_column("street")?,
            city: row.try_get_column("city")?,
            province: row.try_get_column("province")?,
            post_code: row.try_get_column("post_code")?,
            active: row.try_get_column("active")?,
        })
    }
}

/// Input for [`add_property`](crate::repo::add_property).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewProperty {
    pub owner_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    #[serde(default)]
    pub parking_spaces: i32,
    #[serde(default)]
    pub number_of_bathrooms: i32,
    #[serde(default)]
    pub number_of_bedrooms: i32,
}

/// A property search hit: the property plus its average review rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyListing {
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: Option<Decimal>,
}

impl FromRow for PropertyListing {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            property: Property::from_row(row)?,
            average_rating: row.try_get_column("average_rating")?,
        })
    }
}

/// One of a guest's reservations with the reserved property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationListing {
    pub reservation_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub property: Property,
    pub average_rating: Option<Decimal>,
}

impl FromRow for ReservationListing {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            reservation_id: row.try_get_column("reservation_id")?,
            start_date: row.try_get_column("start_date")?,
            end_date: row.try_get_column("end_date")?,
            property: Property::from_row(row)?,
            average_rating: row.try_get_column("average_rating")?,
        })
    }
}
