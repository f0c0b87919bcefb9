//! Property repository
//!
//! Both operations run SQL assembled by `lightbnb-core`:
//! - search: optional filters, average rating, price ordering
//! - create: column list taken from the validated record

use lightbnb_core::{build_property_search, NewProperty, SearchOptions};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use crate::bind;
use crate::error::DbError;

/// Property record from database.
///
/// Listing fields are optional so rows inserted with a partial record still
/// map cleanly.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Property {
    pub id: i32,
    pub owner_id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_photo_url: Option<String>,
    pub cover_photo_url: Option<String>,
    /// Minor currency units (cents)
    pub cost_per_night: Option<i32>,
    pub parking_spaces: Option<i32>,
    pub number_of_bathrooms: Option<i32>,
    pub number_of_bedrooms: Option<i32>,
    pub country: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub post_code: Option<String>,
    pub active: Option<bool>,
}

/// Property with the average of its review ratings
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PropertyWithRating {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: Option<f64>,
}

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Search properties that have at least one review.
    ///
    /// Results are ordered by nightly cost, cheapest first, and capped at
    /// `limit`.
    pub async fn search(
        &self,
        options: &SearchOptions,
        limit: i64,
    ) -> Result<Vec<PropertyWithRating>, DbError> {
        let statement = build_property_search(options, limit)?;
        debug!(sql = statement.sql(), params = ?statement.params(), "property search");

        bind::query_as(&statement)
            .map_err(|e| DbError::from_query("get_all_properties", e))?
            .fetch_all(self.pool)
            .await
            .map_err(|e| DbError::from_query("get_all_properties", e))
    }

    /// Insert a property and return the stored row, including server defaults.
    pub async fn create(&self, property: &NewProperty) -> Result<Property, DbError> {
        let statement = property.insert_statement()?;
        debug!(sql = statement.sql(), params = ?statement.params(), "creating property");

        bind::query_as(&statement)
            .map_err(|e| DbError::from_query("create_property", e))?
            .fetch_one(self.pool)
            .await
            .map_err(|e| DbError::from_query("create_property", e))
    }
}
