//! Property search query builder
//!
//! Builds one parameterized SELECT over properties joined with their reviews.
//! Optional filters are emitted in a fixed order (city, owner, minimum price,
//! maximum price); absent filters leave no trace in either the text or the
//! parameter list.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::params::{placeholder, SqlParam, Statement};

/// Result count used when the caller does not pass one
pub const DEFAULT_LIMIT: i64 = 10;

/// Prices are stored in minor units (cents)
const MINOR_UNITS_PER_MAJOR: i64 = 100;

const SEARCH_PREFIX: &str = "SELECT p.*, AVG(pr.rating)::float8 AS average_rating\n\
FROM properties AS p\n\
JOIN property_reviews AS pr ON p.id = pr.property_id";

/// Optional search criteria.
///
/// Presence is explicit: `Some(0)` is a real filter, only `None` skips it.
/// Prices are in major units and converted to minor units when bound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Partial, case-sensitive match on the city name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_price_per_night: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_price_per_night: Option<u32>,

    /// Compared against the average of a property's reviews
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_rating: Option<f64>,
}

impl SearchOptions {
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn owner_id(mut self, owner_id: i32) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn minimum_price_per_night(mut self, dollars: u32) -> Self {
        self.minimum_price_per_night = Some(dollars);
        self
    }

    pub fn maximum_price_per_night(mut self, dollars: u32) -> Self {
        self.maximum_price_per_night = Some(dollars);
        self
    }

    pub fn minimum_rating(mut self, rating: f64) -> Self {
        self.minimum_rating = Some(rating);
        self
    }

    /// Number of WHERE-level filters that will be emitted
    pub fn filter_count(&self) -> usize {
        [
            self.city.is_some(),
            self.owner_id.is_some(),
            self.minimum_price_per_night.is_some(),
            self.maximum_price_per_night.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}

fn to_minor_units(dollars: u32) -> i64 {
    i64::from(dollars) * MINOR_UNITS_PER_MAJOR
}

/// Accumulates query text and bound values in lockstep.
struct SearchBuilder {
    sql: String,
    params: Vec<SqlParam>,
    clause_emitted: bool,
}

impl SearchBuilder {
    fn new() -> Self {
        Self {
            sql: SEARCH_PREFIX.to_owned(),
            params: Vec::new(),
            clause_emitted: false,
        }
    }

    /// Append a value and return the placeholder that refers to it.
    fn bind(&mut self, value: impl Into<SqlParam>) -> String {
        self.params.push(value.into());
        placeholder(self.params.len())
    }

    /// `WHERE` for the first filter clause, `AND` afterwards.
    fn filter(&mut self, condition: &str, value: impl Into<SqlParam>) {
        let slot = self.bind(value);
        let keyword = if self.clause_emitted { "AND" } else { "WHERE" };
        self.clause_emitted = true;
        self.line(&format!("{keyword} {condition} {slot}"));
    }

    fn line(&mut self, text: &str) {
        self.sql.push('\n');
        self.sql.push_str(text);
    }

    fn finish(self) -> Statement {
        Statement::new(self.sql, self.params)
    }
}

/// Build the property search statement.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidLimit`] when `limit` is not positive.
pub fn build_property_search(
    options: &SearchOptions,
    limit: i64,
) -> Result<Statement, ValidationError> {
    if limit < 1 {
        return Err(ValidationError::InvalidLimit(limit));
    }

    let mut builder = SearchBuilder::new();

    if let Some(city) = &options.city {
        builder.filter("p.city LIKE", format!("%{city}%"));
    }
    if let Some(owner_id) = options.owner_id {
        builder.filter("p.owner_id =", owner_id);
    }
    if let Some(dollars) = options.minimum_price_per_night {
        builder.filter("p.cost_per_night >=", to_minor_units(dollars));
    }
    if let Some(dollars) = options.maximum_price_per_night {
        builder.filter("p.cost_per_night <=", to_minor_units(dollars));
    }

    builder.line("GROUP BY p.id");

    if let Some(rating) = options.minimum_rating {
        let slot = builder.bind(rating);
        builder.line(&format!("HAVING AVG(pr.rating) >= {slot}"));
    }

    let slot = builder.bind(limit);
    builder.line("ORDER BY p.cost_per_night ASC");
    builder.line(&format!("LIMIT {slot}"));

    Ok(builder.finish())
}
