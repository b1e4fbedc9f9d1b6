//! Report DTOs.

use crate::models::{AvgCheckByHour, BirthdaySum};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the average-check report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AvgCheckByHourResponse {
    /// Hour of day in UTC, 0 to 23
    #[schema(minimum = 0, maximum = 23, example = 14)]
    pub hour: i32,
    #[schema(value_type = String, example = "250.00")]
    pub avg_check: BigDecimal,
}

impl From<AvgCheckByHour> for AvgCheckByHourResponse {
    fn from(row: AvgCheckByHour) -> Self {
        Self {
            hour: row.hour,
            avg_check: row.avg_check,
        }
    }
}

/// One row of the birthday-sum report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BirthdaySumResponse {
    pub client_id: i32,
    pub first_name: String,
    pub second_name: String,
    #[schema(value_type = String, example = "1200.00")]
    pub total_sum: BigDecimal,
}

impl From<BirthdaySum> for BirthdaySumResponse {
    fn from(row: BirthdaySum) -> Self {
        Self {
            client_id: row.client_id,
            first_name: row.first_name,
            second_name: row.second_name,
            total_sum: row.total_sum,
        }
    }
}
