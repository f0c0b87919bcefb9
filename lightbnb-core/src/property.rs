//! New property records and the INSERT builder
//!
//! Column names come from caller-supplied keys, so every key is checked
//! against [`PropertyColumn`] before it is written into SQL text. Values are
//! always bound.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::params::{placeholder, SqlParam, SqlType, Statement};

/// Columns of the `properties` table a caller may set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyColumn {
    OwnerId,
    Title,
    Description,
    ThumbnailPhotoUrl,
    CoverPhotoUrl,
    CostPerNight,
    ParkingSpaces,
    NumberOfBathrooms,
    NumberOfBedrooms,
    Country,
    Street,
    City,
    Province,
    PostCode,
    Active,
}

impl PropertyColumn {
    pub const ALL: [PropertyColumn; 15] = [
        Self::OwnerId,
        Self::Title,
        Self::Description,
        Self::ThumbnailPhotoUrl,
        Self::CoverPhotoUrl,
        Self::CostPerNight,
        Self::ParkingSpaces,
        Self::NumberOfBathrooms,
        Self::NumberOfBedrooms,
        Self::Country,
        Self::Street,
        Self::City,
        Self::Province,
        Self::PostCode,
        Self::Active,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OwnerId => "owner_id",
            Self::Title => "title",
            Self::Description => "description",
            Self::ThumbnailPhotoUrl => "thumbnail_photo_url",
            Self::CoverPhotoUrl => "cover_photo_url",
            Self::CostPerNight => "cost_per_night",
            Self::ParkingSpaces => "parking_spaces",
            Self::NumberOfBathrooms => "number_of_bathrooms",
            Self::NumberOfBedrooms => "number_of_bedrooms",
            Self::Country => "country",
            Self::Street => "street",
            Self::City => "city",
            Self::Province => "province",
            Self::PostCode => "post_code",
            Self::Active => "active",
        }
    }

    pub fn sql_type(&self) -> SqlType {
        match self {
            Self::OwnerId
            | Self::CostPerNight
            | Self::ParkingSpaces
            | Self::NumberOfBathrooms
            | Self::NumberOfBedrooms => SqlType::Integer,
            Self::Active => SqlType::Boolean,
            _ => SqlType::Text,
        }
    }

    /// Convert a JSON value into a parameter of this column's type.
    ///
    /// Integer columns also accept numeric strings, since form posts deliver
    /// every field as text.
    pub fn coerce(&self, value: &Value) -> Result<SqlParam, ValidationError> {
        let column = self.as_str();
        let ty = self.sql_type();
        let invalid = || ValidationError::invalid_value(column, ty.as_str());

        match (ty, value) {
            (_, Value::Null) => Ok(SqlParam::Null(ty)),
            (SqlType::Integer, Value::Number(n)) => n
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .map(SqlParam::Int)
                .ok_or_else(invalid),
            (SqlType::Integer, Value::String(s)) => {
                s.trim().parse::<i32>().map(SqlParam::Int).map_err(|_| invalid())
            }
            (SqlType::Boolean, Value::Bool(b)) => Ok(SqlParam::Bool(*b)),
            (SqlType::Boolean, Value::String(s)) => match s.as_str() {
                "true" | "on" => Ok(SqlParam::Bool(true)),
                "false" | "off" => Ok(SqlParam::Bool(false)),
                _ => Err(invalid()),
            },
            (SqlType::Text, Value::String(s)) => Ok(SqlParam::Text(s.clone())),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for PropertyColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyColumn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownColumn(s.to_owned()))
    }
}

/// An ordered set of column values for a new property.
///
/// Column order is preserved into the INSERT column list and the bound
/// parameter list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProperty {
    fields: Vec<(PropertyColumn, SqlParam)>,
}

impl NewProperty {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, rejecting a second value for the same column.
    pub fn set(
        &mut self,
        column: PropertyColumn,
        value: impl Into<SqlParam>,
    ) -> Result<&mut Self, ValidationError> {
        if self.fields.iter().any(|(existing, _)| *existing == column) {
            return Err(ValidationError::DuplicateColumn(column.as_str()));
        }
        self.fields.push((column, value.into()));
        Ok(self)
    }

    /// Builder-style [`NewProperty::set`]
    pub fn with(
        mut self,
        column: PropertyColumn,
        value: impl Into<SqlParam>,
    ) -> Result<Self, ValidationError> {
        self.set(column, value)?;
        Ok(self)
    }

    /// Build from a JSON object, validating every key against the allow-list.
    pub fn from_json_map(map: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut property = Self::new();
        for (key, value) in map {
            let column: PropertyColumn = key.parse()?;
            let param = column.coerce(value)?;
            property.set(column, param)?;
        }
        Ok(property)
    }

    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Self::from_json_map(map),
            _ => Err(ValidationError::NotAnObject),
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = PropertyColumn> + '_ {
        self.fields.iter().map(|(column, _)| *column)
    }

    /// `INSERT INTO properties (...) VALUES ($1..$n) RETURNING *`
    pub fn insert_statement(&self) -> Result<Statement, ValidationError> {
        if self.fields.is_empty() {
            return Err(ValidationError::EmptyRecord);
        }

        let columns = self
            .columns()
            .map(|column| column.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let slots = (1..=self.fields.len())
            .map(placeholder)
            .collect::<Vec<_>>()
            .join(", ");
        let params = self.fields.iter().map(|(_, value)| value.clone()).collect();

        let sql = format!("INSERT INTO properties ({columns})\nVALUES ({slots})\nRETURNING *");
        Ok(Statement::new(sql, params))
    }
}
