//! Order DTOs for API requests and responses.

use super::client::ClientResponse;
use crate::models::{Client, NewOrder, Order, OrderChanges, OrderStatus};
use bigdecimal::BigDecimal;
use jiff::Timestamp;
use jiff_diesel::ToDiesel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating an order.
///
/// The id is always assigned by the database; an `id` field in the payload
/// is ignored.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreateOrderRequest {
    #[schema(value_type = String, example = "125.50")]
    pub amount: BigDecimal,
    /// Defaults to `notprocessed`
    #[serde(default)]
    pub status: OrderStatus,
    #[schema(value_type = String, format = DateTime, example = "2024-06-05T14:30:00Z")]
    pub order_datetime: Timestamp,
    #[validate(range(min = 1, message = "Client id must be positive"))]
    pub client_id: i32,
}

impl CreateOrderRequest {
    pub fn into_new_order(self) -> NewOrder {
        NewOrder {
            amount: self.amount,
            status: self.status,
            order_datetime: self.order_datetime.to_diesel(),
            client_id: self.client_id,
        }
    }
}

/// Request body for replacing an order.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct UpdateOrderRequest {
    #[schema(value_type = String)]
    pub amount: BigDecimal,
    /// Defaults to `notprocessed`
    #[serde(default)]
    pub status: OrderStatus,
    #[schema(value_type = String, format = DateTime)]
    pub order_datetime: Timestamp,
    #[validate(range(min = 1, message = "Client id must be positive"))]
    pub client_id: i32,
}

impl UpdateOrderRequest {
    pub fn into_changes(self) -> OrderChanges {
        OrderChanges {
            amount: self.amount,
            status: self.status,
            order_datetime: self.order_datetime.to_diesel(),
            client_id: self.client_id,
        }
    }
}

/// Order as returned by the API. Amounts are serialized as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    #[schema(value_type = String, example = "125.50")]
    pub amount: BigDecimal,
    pub status: OrderStatus,
    #[schema(value_type = String, format = DateTime)]
    pub order_datetime: Timestamp,
    pub client_id: i32,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            amount: order.amount,
            status: order.status,
            order_datetime: order.order_datetime.to_jiff(),
            client_id: order.client_id,
        }
    }
}

/// Order with its owning client nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderWithClientResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub client: ClientResponse,
}

impl From<(Order, Client)> for OrderWithClientResponse {
    fn from((order, client): (Order, Client)) -> Self {
        Self {
            order: order.into(),
            client: client.into(),
        }
    }
}
