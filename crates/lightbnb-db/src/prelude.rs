//! Convenient imports for typical `lightbnb-db` usage.
//!
//! ```ignore
//! use lightbnb_db::prelude::*;
//! ```

pub use crate::{
    DbError, DbResult, FilterSpec, FromRow, GenericClient, Lenient, RowExt, TracedClient, query,
};
pub use crate::{NewProperty, NewUser, Property, PropertyListing, ReservationListing, User};
pub use crate::{
    add_property, add_user, get_all_reservations, get_user_with_email, get_user_with_id,
    search_properties,
};

#[cfg(feature = "pool")]
pub use crate::{create_pool, create_pool_with_config};
