//! Bind a core [`Statement`] onto sqlx arguments

use lightbnb_core::{SqlParam, SqlType, Statement};
use sqlx::postgres::PgArguments;
use sqlx::Arguments;

/// Encode parameters in order, so `$n` refers to `params[n - 1]`.
pub fn arguments(params: &[SqlParam]) -> Result<PgArguments, sqlx::Error> {
    let mut args = PgArguments::default();
    for param in params {
        let added = match param {
            SqlParam::Int(v) => args.add(*v),
            SqlParam::BigInt(v) => args.add(*v),
            SqlParam::Double(v) => args.add(*v),
            SqlParam::Text(v) => args.add(v.as_str()),
            SqlParam::Bool(v) => args.add(*v),
            SqlParam::Null(SqlType::Integer) => args.add(None::<i32>),
            SqlParam::Null(SqlType::Text) => args.add(None::<String>),
            SqlParam::Null(SqlType::Boolean) => args.add(None::<bool>),
        };
        added.map_err(sqlx::Error::Encode)?;
    }
    Ok(args)
}

/// Typed `SELECT`/`RETURNING` over a statement
pub fn query_as<'q, O>(
    statement: &'q Statement,
) -> Result<sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>, sqlx::Error>
where
    O: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow>,
{
    let args = arguments(statement.params())?;
    Ok(sqlx::query_as_with(statement.sql(), args))
}
