//! SQL helpers for matching calendar parts of date/time columns.

use diesel::define_sql_function;
use diesel::sql_types::{Date, Double, Text, Timestamp, Timestamptz};

define_sql_function! {
    /// `date_part(field, source)` over a DATE column
    #[sql_name = "date_part"]
    fn date_part_of_date(field: Text, source: Date) -> Double;
}

define_sql_function! {
    /// `date_part(field, source)` over a timestamp without time zone
    #[sql_name = "date_part"]
    fn date_part_of_timestamp(field: Text, source: Timestamp) -> Double;
}

define_sql_function! {
    /// `timezone(zone, source)`: converts a TIMESTAMPTZ to local time in `zone`
    fn timezone(zone: Text, source: Timestamptz) -> Timestamp;
}

/// Calendar parts accepted by the filters
pub const DAY: &str = "day";
pub const MONTH: &str = "month";
pub const YEAR: &str = "year";

/// Time zone in which order timestamps are split into calendar parts
pub const ORDER_TIME_ZONE: &str = "UTC";
