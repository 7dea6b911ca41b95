use axum::RequestPartsExt;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    Extension,
};
use diesel_async::pooled_connection::bb8::PooledConnection;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;

use pm_db::Pool;

pub struct ConnectionWrapper<'a> {
    pub connection: PooledConnection<'a, diesel_async::AsyncPgConnection>,
}

impl Debug for ConnectionWrapper<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("connection", &"PooledConnection")
            .finish()
    }
}

/**
 * Provide an extractor for the database connection by getting the extension from the request for the pool.
 */
pub struct DbConnection<'a>(pub ConnectionWrapper<'a>);

#[async_trait]
impl<'a, S> FromRequestParts<S> for DbConnection<'a>
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let pool = match parts.extract::<Extension<Pool>>().await {
            Ok(pool) => pool.0,
            Err(e) => {
                tracing::error!("Error getting pool from request: {}", e);
                return Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error getting pool from request",
                ));
            }
        };

        match pool.get_owned().await {
            Ok(conn) => Ok(Self(ConnectionWrapper { connection: conn })),
            Err(e) => {
                tracing::error!("Error getting connection from pool: {}", e);
                Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error getting connection from pool",
                ))
            }
        }
    }
}
