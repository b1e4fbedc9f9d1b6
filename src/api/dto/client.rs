//! Client DTOs for API requests and responses.

use crate::models::{Client, ClientChanges, NewClient};
use jiff::civil::Date;
use jiff_diesel::ToDiesel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating a client.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"))]
    #[schema(min_length = 1, max_length = 100, example = "Ivan")]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Second name must be between 1 and 100 characters"))]
    #[schema(min_length = 1, max_length = 100, example = "Ivanov")]
    pub second_name: String,
    #[schema(value_type = String, format = Date, example = "2000-01-01")]
    pub birth_date: Date,
}

impl CreateClientRequest {
    pub fn into_new_client(self) -> NewClient {
        NewClient {
            first_name: self.first_name,
            second_name: self.second_name,
            birth_date: self.birth_date.to_diesel(),
        }
    }
}

/// Request body for replacing a client. Every field is required.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct UpdateClientRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"))]
    #[schema(min_length = 1, max_length = 100)]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Second name must be between 1 and 100 characters"))]
    #[schema(min_length = 1, max_length = 100)]
    pub second_name: String,
    #[schema(value_type = String, format = Date)]
    pub birth_date: Date,
}

impl UpdateClientRequest {
    pub fn into_changes(self) -> ClientChanges {
        ClientChanges {
            first_name: self.first_name,
            second_name: self.second_name,
            birth_date: self.birth_date.to_diesel(),
        }
    }
}

/// Client as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClientResponse {
    pub id: i32,
    pub first_name: String,
    pub second_name: String,
    #[schema(value_type = String, format = Date, example = "2000-01-01")]
    pub birth_date: Date,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            first_name: client.first_name,
            second_name: client.second_name,
            birth_date: client.birth_date.to_jiff(),
        }
    }
}
