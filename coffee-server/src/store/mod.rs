use crate::config::DatabaseConfig;
use crate::models::{Drink, Ingredient};
use log::{debug, info, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Failed to encode or decode recipe: {0}")]
    Recipe(#[from] serde_json::Error),
}

const CREATE_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS drink (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL UNIQUE,
    recipe TEXT NOT NULL
);"#;

#[derive(FromRow)]
struct DrinkRow {
    id: i64,
    title: String,
    recipe: String,
}

impl TryFrom<DrinkRow> for Drink {
    type Error = serde_json::Error;

    fn try_from(row: DrinkRow) -> Result<Self, Self::Error> {
        Ok(Drink {
            id: row.id,
            title: row.title,
            recipe: serde_json::from_str(&row.recipe)?,
        })
    }
}

/// Drinks table backed by SQLite.
///
/// Every operation is a single statement; uniqueness of titles is enforced by
/// the table constraint.
#[derive(Clone)]
pub struct DrinkStore {
    pool: SqlitePool,
}

impl DrinkStore {
    /// Connect to the database and create the drinks table if it is missing
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&config.url)?;
        // Connections are kept open so an in-memory database survives
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        sqlx::query(CREATE_TABLE).execute(&store.pool).await?;
        debug!("Connected to drink store at {}", config.url);
        Ok(store)
    }

    /// Drop and recreate the drinks table, seeding a single drink.
    ///
    /// All existing records are lost.
    pub async fn reset(&self) -> Result<Drink, StoreError> {
        warn!("Dropping and recreating the drinks table");
        sqlx::query("DROP TABLE IF EXISTS drink")
            .execute(&self.pool)
            .await?;
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;

        let water = self
            .insert(
                "water",
                &[Ingredient {
                    name: "water".to_string(),
                    color: "blue".to_string(),
                    parts: 1,
                }],
            )
            .await?;
        info!("Seeded drink '{}' with id {}", water.title, water.id);
        Ok(water)
    }

    /// All drinks, ascending by id
    pub async fn list(&self) -> Result<Vec<Drink>, StoreError> {
        let rows: Vec<DrinkRow> = sqlx::query_as("SELECT id, title, recipe FROM drink ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| Drink::try_from(row).map_err(StoreError::from))
            .collect()
    }

    pub async fn find(&self, id: i64) -> Result<Option<Drink>, StoreError> {
        let row: Option<DrinkRow> =
            sqlx::query_as("SELECT id, title, recipe FROM drink WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Drink::try_from).transpose()?)
    }

    pub async fn find_by_title(&self, title: &str) -> Result<Option<Drink>, StoreError> {
        let row: Option<DrinkRow> =
            sqlx::query_as("SELECT id, title, recipe FROM drink WHERE title = ?")
                .bind(title)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Drink::try_from).transpose()?)
    }

    /// Insert a new drink and return it with its assigned id
    pub async fn insert(&self, title: &str, recipe: &[Ingredient]) -> Result<Drink, StoreError> {
        let encoded = serde_json::to_string(recipe)?;
        let id = sqlx::query("INSERT INTO drink (title, recipe) VALUES (?, ?)")
            .bind(title)
            .bind(encoded)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        Ok(Drink {
            id,
            title: title.to_string(),
            recipe: recipe.to_vec(),
        })
    }

    /// Overwrite title and recipe of an existing drink.
    ///
    /// Returns false when no drink has the given id.
    pub async fn update(&self, drink: &Drink) -> Result<bool, StoreError> {
        let encoded = serde_json::to_string(&drink.recipe)?;
        let result = sqlx::query("UPDATE drink SET title = ?, recipe = ? WHERE id = ?")
            .bind(&drink.title)
            .bind(encoded)
            .bind(drink.id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a drink. Returns false when no drink has the given id.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM drink WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Close all pooled connections; later operations fail
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Check that the database answers queries
    pub async fn health_check(&self) -> Result<(), String> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
