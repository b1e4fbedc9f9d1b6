//! Data Transfer Objects for API requests and responses.

mod client;
mod error;
mod health;
mod order;
mod pagination;
mod report;

pub use client::{ClientResponse, CreateClientRequest, UpdateClientRequest};
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use order::{CreateOrderRequest, OrderResponse, OrderWithClientResponse, UpdateOrderRequest};
pub use pagination::PageParams;
pub use report::{AvgCheckByHourResponse, BirthdaySumResponse};
