pub mod alerts;
pub mod analytics;
pub mod health;
pub mod products;
pub mod shipments;
pub mod suppliers;

pub use crate::error::AppError;
