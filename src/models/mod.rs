mod client;
mod order;
mod report;

pub use client::{Client, ClientChanges, ClientFilter, NewClient};
pub use order::{NewOrder, Order, OrderChanges, OrderFilter, OrderStatus};
pub use report::{AvgCheckByHour, BirthdaySum};
