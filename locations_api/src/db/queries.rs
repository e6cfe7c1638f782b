use sqlx::{Pool, Postgres};

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Sql(#[from] sqlx::Error),
}

#[derive(Debug, sqlx::FromRow)]
pub struct LocationRecord {
    pub latitude: f64,
    pub longitude: f64,
}

/// All rows of `locations`, in whatever order Postgres returns them. The columns are cast so
/// `NUMERIC` or `REAL` coordinates decode as well as `DOUBLE PRECISION`.
pub async fn get_locations(pool: &Pool<Postgres>) -> Result<Vec<LocationRecord>, QueryError> {
    Ok(sqlx::query_as::<_, LocationRecord>(
        r"
        SELECT latitude::float8 AS latitude, longitude::float8 AS longitude
        FROM locations
        ",
    )
    .fetch_all(pool)
    .await?)
}
