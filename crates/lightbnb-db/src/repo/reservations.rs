use crate::client::GenericClient;
use crate::error::DbResult;
use crate::model::ReservationListing;
use crate::query::query;
use crate::search::DEFAULT_LIMIT;

const RESERVATIONS_FOR_GUEST: &str = "SELECT reservations.id AS reservation_id, reservations.start_date, reservations.end_date, \
properties.*, AVG(property_reviews.rating) AS average_rating \
FROM reservations \
JOIN properties ON reservations.property_id = properties.id \
JOIN property_reviews ON property_reviews.reservation_id = reservations.id \
WHERE reservations.guest_id = $1 \
GROUP BY reservations.id, properties.id \
ORDER BY reservations.start_date \
LIMIT $2";

/// A guest's reviewed reservations, earliest first.
///
/// `limit` defaults to [`DEFAULT_LIMIT`] rows.
pub async fn get_all_reservations(
    conn: &impl GenericClient,
    guest_id: i32,
    limit: Option<i64>,
) -> DbResult<Vec<ReservationListing>> {
    query(RESERVATIONS_FOR_GUEST)
        .tag("reservations.for_guest")
        .bind(guest_id)
        .bind(limit.unwrap_or(DEFAULT_LIMIT))
        .fetch_all_as(conn)
        .await
}
