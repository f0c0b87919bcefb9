//! lightbnb-core: records and SQL builders for the LightBnB data layer
//!
//! Everything here is pure: the builders produce query text plus an ordered
//! parameter list, and `lightbnb-db` binds and executes them.

pub mod config;
pub mod error;
pub mod params;
pub mod property;
pub mod search;
pub mod user;

pub use config::{load_dotenv, DatabaseConfig, LightbnbConfig, SearchConfig};
pub use error::{ConfigError, ValidationError};
pub use params::{SqlParam, SqlType, Statement};
pub use property::{NewProperty, PropertyColumn};
pub use search::{build_property_search, SearchOptions, DEFAULT_LIMIT};
pub use user::NewUser;
