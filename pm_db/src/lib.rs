use diesel_async::pooled_connection::AsyncDieselConnectionManager;

pub mod models;
pub mod schema;

pub type Pool =
    diesel_async::pooled_connection::bb8::Pool<diesel_async::AsyncPgConnection>;

/**
 * Establishes a connection pool to the database.
 *
 * Returns a bb8::Pool connection pool.
 */
pub async fn create_pool(database_url: &str) -> Pool {
    let config = AsyncDieselConnectionManager::<diesel_async::AsyncPgConnection>::new(
        database_url,
    );
    Pool::builder()
        .test_on_check_out(true)
        .max_size(10)
        .build(config)
        .await
        .expect("failed to build database pool")
}
