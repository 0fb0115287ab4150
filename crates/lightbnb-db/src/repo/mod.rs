//! Accessors: one parameterized statement per operation.
//!
//! Every accessor takes `&impl GenericClient` and returns an explicit
//! [`DbResult`](crate::DbResult). A lookup that finds nothing is `Ok(None)`,
//! never an error. For the log-and-degrade behaviour see [`Lenient`](crate::Lenient).

mod properties;
mod reservations;
mod users;


pub use properties::{add_property, search_properties};
pub use reservations::get_all_reservations;
pub use users::{add_user, get_user_with_email, get_user_with_id};
