use serde::{Deserialize, Serialize};

/// A registered account as listed by `GET /api/usuarios`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub nome: String,
}

/// A named, described geographic point of interest.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TouristPoint {
    #[serde(rename = "_id")]
    pub id: String,
    pub nome: String,
    #[serde(default)]
    pub descricao: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl TouristPoint {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Request body for `POST /api/pontosturisticos`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewTouristPoint {
    pub nome: String,
    pub descricao: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Request body shared by login and registration.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Credentials {
    pub nome: String,
    pub senha: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}
