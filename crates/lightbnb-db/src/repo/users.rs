use crate::client::GenericClient;
use crate::error::DbResult;
use crate::model::{NewUser, User};
use crate::query::query;

/// Look up a user by email address.
pub async fn get_user_with_email(conn: &impl GenericClient, email: &str) -> DbResult<Option<User>> {
    query("SELECT * FROM users WHERE email = $1")
        .tag("users.by_email")
        .bind(email.to_string())
        .fetch_opt_as(conn)
        .await
}

/// Look up a user by id.
pub async fn get_user_with_id(conn: &impl GenericClient, id: i32) -> DbResult<Option<User>> {
    query("SELECT * FROM users WHERE id = $1")
        .tag("users.by_id")
        .bind(id)
        .fetch_opt_as(conn)
        .await
}

/// Insert a user and return the stored row.
pub async fn add_user(conn: &impl GenericClient, user: &NewUser) -> DbResult<User> {
    query("INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING *")
        .tag("users.insert")
        .bind(user.name.clone())
        .bind(user.email.clone())
        .bind(user.password.clone())
        .fetch_one_as(conn)
        .await
}
