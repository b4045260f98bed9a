pub mod backend;
pub mod client;
pub mod types;

pub use backend::{ApiError, TourismApi};
pub use client::ApiClient;
pub use types::{Coordinate, Credentials, NewTouristPoint, TouristPoint, User};
