//! Order models for database operations.
//!
//! Orders reference a client and carry a text-backed status restricted by a
//! CHECK constraint on the `orders` table.

use bigdecimal::{BigDecimal, Zero};
use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use jiff_diesel::Timestamp;
use serde::{Deserialize, Serialize};
use std::io::Write;
use utoipa::IntoParams;
use validator::Validate;

// ============================================================================
// Enums
// ============================================================================

/// Processing status of an order
///
/// Any status may be replaced by any other through an update.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    NotProcessed,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::NotProcessed => "notprocessed",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl diesel::query_builder::QueryId for OrderStatus {
    type QueryId = OrderStatus;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for OrderStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for OrderStatus {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "notprocessed" => Ok(OrderStatus::NotProcessed),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("Unrecognized order status: {}", s).into()),
        }
    }
}

// ============================================================================
// Order Models (Query/Insert/Update)
// ============================================================================

/// Order row as stored in the `orders` table
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order {
    pub id: i32,
    pub amount: BigDecimal,
    pub status: OrderStatus,
    pub order_datetime: Timestamp,
    pub client_id: i32,
}

/// Order data for INSERT; `id` is generated always and never supplied
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder {
    pub amount: BigDecimal,
    pub status: OrderStatus,
    pub order_datetime: Timestamp,
    pub client_id: i32,
}

/// Full replacement of an order's mutable columns
#[derive(Debug, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::orders)]
pub struct OrderChanges {
    pub amount: BigDecimal,
    pub status: OrderStatus,
    pub order_datetime: Timestamp,
    pub client_id: i32,
}

// ============================================================================
// Filter
// ============================================================================

/// Conjunctive order filter.
///
/// `amount` and `client_id` only filter when strictly positive; zero or
/// negative values are treated as "not specified". Date parts are matched
/// against `order_datetime` in UTC.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderFilter {
    /// Only orders with an amount strictly greater than this value
    #[param(value_type = Option<String>, example = "100.00")]
    pub amount: Option<BigDecimal>,
    /// Exact status
    pub status: Option<OrderStatus>,
    /// Day of month of the order date
    #[validate(range(min = 1, max = 31, message = "Day must be between 1 and 31"))]
    #[param(minimum = 1, maximum = 31)]
    pub day: Option<i32>,
    /// Month of the order date
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    #[param(minimum = 1, maximum = 12)]
    pub month: Option<i32>,
    /// Year of the order date
    #[validate(range(min = 1, max = 3000, message = "Year must be between 1 and 3000"))]
    #[param(minimum = 1, maximum = 3000)]
    pub year: Option<i32>,
    /// Owning client
    pub client_id: Option<i32>,
}

impl OrderFilter {
    /// Lower bound for `amount`, if it should be applied
    pub fn min_amount(&self) -> Option<&BigDecimal> {
        self.amount.as_ref().filter(|a| **a > BigDecimal::zero())
    }

    /// Client to match, if it should be applied
    pub fn client(&self) -> Option<i32> {
        self.client_id.filter(|id| *id > 0)
    }
}
