//! Compile-only tests for the public API.
//!
//! These never touch a database; they only check that the executor seams,
//! wrappers and accessors fit together.

#![allow(dead_code)]

use lightbnb_db::prelude::*;
use lightbnb_db::{BindValue, QueryPlan, Sql, SqlFragment, SqlLogConfig, search, sql};

fn assert_send_sync<T: Send + Sync>() {}

fn assert_client<C: GenericClient>() {}

#[test]
fn compile_executor_impls() {
    assert_client::<tokio_postgres::Client>();
    assert_client::<tokio_postgres::Transaction<'static>>();
    assert_client::<&'static tokio_postgres::Client>();
    assert_client::<TracedClient<tokio_postgres::Client>>();
    assert_client::<TracedClient<&'static tokio_postgres::Client>>();
    assert_client::<deadpool_postgres::Client>();
}

#[test]
fn compile_plain_data_is_send_sync() {
    assert_send_sync::<FilterSpec>();
    assert_send_sync::<QueryPlan>();
    assert_send_sync::<BindValue>();
    assert_send_sync::<PropertyListing>();
    assert_send_sync::<ReservationListing>();
    assert_send_sync::<DbError>();
}

async fn every_accessor<C: GenericClient>(conn: &C) -> DbResult<()> {
    let filter = FilterSpec::new().city("Vancouver").min_rating(4);
    let _: Vec<PropertyListing> = search_properties(conn, &filter, Some(5)).await?;
    let _: Option<User> = get_user_with_email(conn, "a@b.c").await?;
    let _: Option<User> = get_user_with_id(conn, 1).await?;
    let _: Vec<ReservationListing> = get_all_reservations(conn, 1, None).await?;
    Ok(())
}

async fn lenient_accessors<C: GenericClient>(conn: C) {
    let lenient = Lenient::new(TracedClient::with_config(
        conn,
        SqlLogConfig::new().level(tracing::Level::INFO).no_truncate(),
    ));
    let _: Vec<PropertyListing> = lenient.search_properties(&FilterSpec::new(), None).await;
    let _: Option<User> = lenient.get_user_with_id(1).await;
}

fn accessors_futures_are_send<C: GenericClient>(conn: &C) {
    fn is_send<F: std::future::Future + Send>(_: F) {}
    is_send(every_accessor(conn));
}

async fn plan_and_query<C: GenericClient>(conn: &C) -> DbResult<()> {
    let plan = search::build(&FilterSpec::new(), 10);
    plan.validate()?;
    let _: Vec<PropertyListing> = plan.fetch_all_as(conn).await?;

    let _: Option<User> = query("SELECT * FROM users WHERE id = $1")
        .tag("users.by_id")
        .bind(1_i32)
        .fetch_opt_as(conn)
        .await?;
    Ok(())
}

struct OwnedBy(i32);

impl SqlFragment for OwnedBy {
    fn append_to_sql(&self, sql: &mut Sql) {
        sql.push("owner_id = ");
        sql.push_bind(self.0);
    }
}

#[test]
fn compile_custom_fragment() {
    let mut s = sql("SELECT * FROM properties");
    s.push_where_and(&[OwnedBy(1), OwnedBy(2)]);
    let _: QueryPlan = s.into_plan();
}

async fn pooled(url: &str) -> DbResult<()> {
    let pool = create_pool(url)?;
    let client = pool.get().await?;
    every_accessor(&client).await?;
    lightbnb_db::migrate::run_pool(&pool).await?;
    Ok(())
}
