//! Device location collaborator.
//!
//! Screens ask for permission first, then for the current position. The
//! terminal front end has no GPS, so it is fed a coordinate from config or
//! flags; without one, permission is denied.

use std::fmt;

use async_trait::async_trait;

use crate::api::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[derive(Debug)]
pub enum LocationError {
    /// Permission was not granted before asking for a position.
    PermissionDenied,
    /// The position source failed.
    Unavailable(String),
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::PermissionDenied => write!(f, "location permission denied"),
            LocationError::Unavailable(msg) => write!(f, "location unavailable: {msg}"),
        }
    }
}

impl std::error::Error for LocationError {}

#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_permission(&self) -> PermissionStatus;
    async fn current_position(&self) -> Result<Coordinate, LocationError>;
}

/// Always grants permission and reports the same coordinate.
pub struct FixedLocation(pub Coordinate);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// No position source configured: permission is always denied.
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Denied
    }

    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}

/// What a screen learned from the location provider.
#[derive(Debug)]
pub enum LocationOutcome {
    Found(Coordinate),
    Denied,
    Failed(LocationError),
}

/// Permission prompt followed by a position query.
pub async fn locate(provider: &dyn LocationProvider) -> LocationOutcome {
    if provider.request_permission().await != PermissionStatus::Granted {
        return LocationOutcome::Denied;
    }
    match provider.current_position().await {
        Ok(coordinate) => LocationOutcome::Found(coordinate),
        Err(e) => LocationOutcome::Failed(e),
    }
}
