//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{ApiError, Credentials, NewTouristPoint, TouristPoint, TourismApi, User};
use crate::api::Coordinate;
use crate::core::location::{
    FixedLocation, LocationError, LocationProvider, NoLocation, PermissionStatus,
};
use crate::core::state::App;
use crate::core::storage::MemoryStore;

pub const FAKE_TOKEN: &str = "fake-token";
pub const FAKE_PASSWORD: &str = "secret";

pub const HERE: Coordinate = Coordinate {
    latitude: -22.9068,
    longitude: -43.1729,
};

/// A scripted backend that records every call it receives.
pub struct FakeApi {
    calls: Mutex<Vec<String>>,
    pub users: Vec<User>,
    pub points: Vec<TouristPoint>,
    /// When set, every authenticated call answers HTTP 500.
    pub failing: bool,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            users: vec![user("u1", "ana"), user("u2", "bruno")],
            points: vec![point("p1", "Cristo Redentor")],
            failing: false,
        }
    }
}

impl FakeApi {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn authorize(&self, token: &str) -> Result<(), ApiError> {
        if self.failing {
            return Err(ApiError::Api {
                status: 500,
                message: "internal error".to_string(),
            });
        }
        if token != FAKE_TOKEN {
            return Err(ApiError::Api {
                status: 401,
                message: "invalid token".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TourismApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        self.record(format!("login {}", credentials.nome));
        if credentials.senha == FAKE_PASSWORD {
            Ok(FAKE_TOKEN.to_string())
        } else {
            Err(ApiError::Api {
                status: 401,
                message: "invalid credentials".to_string(),
            })
        }
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        self.record(format!("register {}", credentials.nome));
        if self.failing || credentials.nome.is_empty() {
            return Err(ApiError::Api {
                status: 400,
                message: "bad request".to_string(),
            });
        }
        Ok(())
    }

    async fn list_users(&self, token: &str) -> Result<Vec<User>, ApiError> {
        self.record("list_users".to_string());
        self.authorize(token)?;
        Ok(self.users.clone())
    }

    async fn delete_user(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.record(format!("delete_user {id}"));
        self.authorize(token)?;
        Ok(())
    }

    async fn list_points(&self, token: &str) -> Result<Vec<TouristPoint>, ApiError> {
        self.record("list_points".to_string());
        self.authorize(token)?;
        Ok(self.points.clone())
    }

    async fn create_point(
        &self,
        token: &str,
        new_point: &NewTouristPoint,
    ) -> Result<TouristPoint, ApiError> {
        self.record(format!("create_point {}", new_point.nome));
        self.authorize(token)?;
        Ok(TouristPoint {
            id: "created".to_string(),
            nome: new_point.nome.clone(),
            descricao: new_point.descricao.clone(),
            latitude: new_point.latitude,
            longitude: new_point.longitude,
        })
    }

    async fn get_point(&self, token: &str, id: &str) -> Result<TouristPoint, ApiError> {
        self.record(format!("get_point {id}"));
        self.authorize(token)?;
        self.points
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Api {
                status: 404,
                message: "not found".to_string(),
            })
    }
}

/// Grants permission, then fails to produce a position.
pub struct FailingLocation;

#[async_trait]
impl LocationProvider for FailingLocation {
    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::Unavailable("no fix".to_string()))
    }
}

pub fn user(id: &str, nome: &str) -> User {
    User {
        id: id.to_string(),
        nome: nome.to_string(),
    }
}

pub fn point(id: &str, nome: &str) -> TouristPoint {
    TouristPoint {
        id: id.to_string(),
        nome: nome.to_string(),
        descricao: format!("Sobre {nome}"),
        latitude: -22.9519,
        longitude: -43.2105,
    }
}

pub fn build_app(
    api: Arc<FakeApi>,
    store: MemoryStore,
    location: Arc<dyn LocationProvider>,
) -> App {
    App::new(api, Arc::new(store), location)
}

/// Creates a test App with no token and no location.
pub fn test_app() -> App {
    build_app(Arc::new(FakeApi::default()), MemoryStore::new(), Arc::new(NoLocation))
}

/// Creates a test App holding a valid token and a fixed location.
pub fn logged_in_app(api: Arc<FakeApi>) -> App {
    build_app(api, MemoryStore::with_token(FAKE_TOKEN), Arc::new(FixedLocation(HERE)))
}
