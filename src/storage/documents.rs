//! Document store facade over PostgreSQL.
//!
//! Restaurants are stored schemaless: one JSONB document per row with a
//! store-assigned `BIGSERIAL` id. Every operation here is a single statement;
//! there are no retries and no transactions because no caller ever issues more
//! than one store operation per request.

use anyhow::Result;
use serde_json::{Map as JsonMap, Value as JsonValue};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::domain::restaurant::Restaurant;

/// A stored document together with its store-assigned id.
#[derive(Clone, Debug)]
pub struct StoredRestaurant {
    pub id: String,
    pub restaurant: Restaurant,
}

/// Exact-match filter for listing. Absent fields do not constrain the query;
/// unrecognized query parameters never reach this type.
#[derive(Clone, Debug, Default)]
pub struct ListFilter {
    pub cuisine: Option<String>,
    pub borough: Option<String>,
}

/// A document store that uses a PostgreSQL connection pool.
#[derive(Clone)]
pub struct RestaurantStore {
    pool: PgPool,
}

impl RestaurantStore {
    /// Connects to the database and creates the documents table if needed.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS restaurants (
                id  BIGSERIAL PRIMARY KEY,
                doc JSONB NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Persists a new document and returns it with the assigned id.
    pub async fn create(&self, restaurant: &Restaurant) -> Result<StoredRestaurant> {
        let doc = serde_json::to_value(restaurant)?;
        let row = sqlx::query(
            "INSERT INTO restaurants (doc) VALUES ($1) RETURNING id::text AS id, doc",
        )
        .bind(doc)
        .fetch_one(&self.pool)
        .await?;
        row_to_stored(&row)
    }

    /// Fetches at most `limit` documents matching the filter exactly. No sort
    /// order is guaranteed.
    pub async fn find(&self, filter: &ListFilter, limit: i64) -> Result<Vec<StoredRestaurant>> {
        let rows = sqlx::query(
            "SELECT id::text AS id, doc FROM restaurants
             WHERE ($1::text IS NULL OR doc->>'cuisine' = $1)
               AND ($2::text IS NULL OR doc->>'borough' = $2)
             LIMIT $3",
        )
        .bind(filter.cuisine.as_deref())
        .bind(filter.borough.as_deref())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_stored).collect()
    }

    /// Fetches a single document by id. Ids the store could never have
    /// assigned resolve to `None` rather than an error.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<StoredRestaurant>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let row = sqlx::query("SELECT id::text AS id, doc FROM restaurants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_stored).transpose()
    }

    /// Applies a partial update: fields in `patch` are merged over the stored
    /// document, everything else is left untouched. Returns the updated
    /// document, or `None` when no document has that id.
    pub async fn update(
        &self,
        id: &str,
        patch: &JsonMap<String, JsonValue>,
    ) -> Result<Option<StoredRestaurant>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let row = sqlx::query(
            "UPDATE restaurants SET doc = doc || $2 WHERE id = $1 RETURNING id::text AS id, doc",
        )
        .bind(id)
        .bind(JsonValue::Object(patch.clone()))
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_stored).transpose()
    }

    /// Removes the document if it exists. Succeeds either way.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let Some(id) = parse_id(id) else {
            return Ok(());
        };
        sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Wipes the table. Test-harness support.
    pub async fn clear(&self) -> Result<()> {
        sqlx::query("TRUNCATE TABLE restaurants")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn parse_id(id: &str) -> Option<i64> {
    id.parse::<i64>().ok()
}

fn row_to_stored(row: &sqlx::postgres::PgRow) -> Result<StoredRestaurant> {
    let id: String = row.try_get("id")?;
    let doc: JsonValue = row.try_get("doc")?;
    let restaurant: Restaurant = serde_json::from_value(doc)?;
    Ok(StoredRestaurant { id, restaurant })
}
