//! Rows returned by the store-side report functions.

use bigdecimal::BigDecimal;
use diesel::QueryableByName;
use diesel::sql_types::{Int4, Numeric, Text};

/// One row of `get_avg_check_by_hour()`
#[derive(Debug, Clone, QueryableByName)]
pub struct AvgCheckByHour {
    #[diesel(sql_type = Int4)]
    pub hour: i32,
    #[diesel(sql_type = Numeric)]
    pub avg_check: BigDecimal,
}

/// One row of `get_sum_by_client_on_birthday()`
#[derive(Debug, Clone, QueryableByName)]
pub struct BirthdaySum {
    #[diesel(sql_type = Int4)]
    pub client_id: i32,
    #[diesel(sql_type = Text)]
    pub first_name: String,
    #[diesel(sql_type = Text)]
    pub second_name: String,
    #[diesel(sql_type = Numeric)]
    pub total_sum: BigDecimal,
}
