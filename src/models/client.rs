//! Client models for database operations.

use diesel::prelude::*;
use jiff_diesel::Date;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

/// Client row as stored in the `clients` table
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Client {
    pub id: i32,
    pub first_name: String,
    pub second_name: String,
    pub birth_date: Date,
}

/// Client data for INSERT; the id is assigned by the store
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::clients)]
pub struct NewClient {
    pub first_name: String,
    pub second_name: String,
    pub birth_date: Date,
}

/// Full replacement of a client's mutable columns
#[derive(Debug, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::clients)]
pub struct ClientChanges {
    pub first_name: String,
    pub second_name: String,
    pub birth_date: Date,
}

/// Conjunctive client filter.
///
/// Every field is optional; empty names are treated as absent. Date parts
/// are matched against `birth_date`.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClientFilter {
    /// Exact first name
    pub first_name: Option<String>,
    /// Exact second name
    pub second_name: Option<String>,
    /// Day of month of the birth date
    #[validate(range(min = 1, max = 31, message = "Day must be between 1 and 31"))]
    #[param(minimum = 1, maximum = 31)]
    pub day: Option<i32>,
    /// Month of the birth date
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    #[param(minimum = 1, maximum = 12)]
    pub month: Option<i32>,
    /// Year of the birth date
    #[validate(range(min = 1, max = 3000, message = "Year must be between 1 and 3000"))]
    #[param(minimum = 1, maximum = 3000)]
    pub year: Option<i32>,
}

impl ClientFilter {
    pub fn first_name(&self) -> Option<&str> {
        non_empty(self.first_name.as_deref())
    }

    pub fn second_name(&self) -> Option<&str> {
        non_empty(self.second_name.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
