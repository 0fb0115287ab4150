//! Log-and-degrade front for the accessors.
//!
//! Web handlers that only care about "data or nothing" use [`Lenient`]: a
//! failed statement is logged once through `tracing` and reported as the
//! empty value. Callers that need to tell "no data" from "operation failed"
//! use the functions in [`repo`](crate::repo) directly.

use crate::client::GenericClient;
use crate::error::DbResult;
use crate::model::{NewProperty, NewUser, Property, PropertyListing, ReservationListing, User};
use crate::repo;
use crate::search::FilterSpec;

/// Unwrap `result`, or log the error for `operation` and return `T::default()`.
pub fn or_log<T: Default>(operation: &str, result: DbResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(target: "lightbnb.db", operation, error = %err, "{err}");
            T::default()
        }
    }
}

/// Accessors that never fail: errors are logged and become `None` / empty.
#[derive(Debug, Clone)]
pub struct Lenient<C> {
    client: C,
}

impl<C: GenericClient> Lenient<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The wrapped executor.
    pub fn inner(&self) -> &C {
        &self.client
    }

    pub async fn get_user_with_email(&self, email: &str) -> Option<User> {
        or_log(
            "get_user_with_email",
            repo::get_user_with_email(&self.client, email).await,
        )
    }

    pub async fn get_user_with_id(&self, id: i32) -> Option<User> {
        or_log("get_user_with_id", repo::get_user_with_id(&self.client, id).await)
    }

    pub async fn add_user(&self, user: &NewUser) -> Option<User> {
        or_log("add_user", repo::add_user(&self.client, user).await.map(Some))
    }

    pub async fn get_all_reservations(
        &self,
        guest_id: i32,
        limit: Option<i64>,
    ) -> Vec<ReservationListing> {
        or_log(
            "get_all_reservations",
            repo::get_all_reservations(&self.client, guest_id, limit).await,
        )
    }

    pub async fn search_properties(
        &self,
        filter: &FilterSpec,
        limit: Option<i64>,
    ) -> Vec<PropertyListing> {
        or_log(
            "search_properties",
            repo::search_properties(&self.client, filter, limit).await,
        )
    }

    pub async fn add_property(&self, property: &NewProperty) -> Option<Property> {
        or_log(
            "add_property",
            repo::add_property(&self.client, property).await.map(Some),
        )
    }
}
