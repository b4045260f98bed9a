//! Tourist point list plus the creation form.

use std::fmt;

use log::{debug, info, warn};

use crate::api::{Coordinate, NewTouristPoint, TouristPoint};
use crate::core::location::{LocationOutcome, locate};
use crate::core::navigation::Route;
use crate::core::state::App;
use crate::core::storage::load_token;

pub const LOCATION_DENIED_TITLE: &str = "Permissão de localização negada";
pub const LOCATION_DENIED: &str =
    "Não será possível criar pontos turísticos sem localização.";
pub const REQUIRES_AUTH: &str = "Você precisa estar autenticado para acessar essa página!";
pub const MISSING_FIELDS: &str = "Preencha todos os campos antes de criar um ponto turístico.";
pub const CREATE_FAILED: &str = "Não foi possível criar o ponto turístico.";

#[derive(Debug, Default)]
pub struct TourismScreen {
    pub points: Vec<TouristPoint>,
    pub nome: String,
    pub descricao: String,
    pub location: Option<Coordinate>,
    pub is_loading: bool,
}

impl TourismScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn mount(&mut self, app: &mut App) {
        self.acquire_location(app).await;
        self.refresh(app).await;
    }

    async fn acquire_location(&mut self, app: &mut App) {
        match locate(app.location.as_ref()).await {
            LocationOutcome::Found(coordinate) => {
                debug!("Device location: {:?}", coordinate);
                self.location = Some(coordinate);
            }
            LocationOutcome::Denied => app.alert(LOCATION_DENIED_TITLE, LOCATION_DENIED),
            LocationOutcome::Failed(e) => warn!("Could not get location: {}", e),
        }
    }

    /// Replaces the list with the backend's. Any failure sends the user to Login.
    pub async fn refresh(&mut self, app: &mut App) {
        let Ok(Some(token)) = load_token(app.store.as_ref()).await else {
            app.alert("Erro", REQUIRES_AUTH);
            app.navigator.navigate(Route::Login);
            return;
        };

        self.is_loading = true;
        let result = app.api.list_points(&token).await;
        self.is_loading = false;

        match result {
            Ok(points) => {
                info!("Loaded {} tourist points", points.len());
                self.points = points;
            }
            Err(e) => {
                warn!("Failed to load tourist points: {}", e);
                app.alert("Erro", REQUIRES_AUTH);
                app.navigator.navigate(Route::Login);
            }
        }
    }

    /// Validated form body, or `None` if a field or the location is missing.
    fn form(&self) -> Option<NewTouristPoint> {
        let location = self.location?;
        if self.nome.trim().is_empty() || self.descricao.trim().is_empty() {
            return None;
        }
        Some(NewTouristPoint {
            nome: self.nome.clone(),
            descricao: self.descricao.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
        })
    }

    /// Creates a point at the device location. Validation runs before any I/O.
    pub async fn create(&mut self, app: &mut App) {
        let Some(body) = self.form() else {
            app.alert("Erro", MISSING_FIELDS);
            return;
        };

        let Ok(Some(token)) = load_token(app.store.as_ref()).await else {
            app.alert("Erro", REQUIRES_AUTH);
            app.navigator.navigate(Route::Login);
            return;
        };

        match app.api.create_point(&token, &body).await {
            Ok(created) => {
                info!("Created tourist point {}", created.id);
                self.points.push(created);
                self.nome.clear();
                self.descricao.clear();
            }
            Err(e) => {
                warn!("Failed to create tourist point: {}", e);
                app.alert("Erro", CREATE_FAILED);
            }
        }
    }

    pub fn open(&self, app: &mut App, point_id: &str) {
        app.navigator.navigate(Route::Details {
            point_id: point_id.to_string(),
        });
    }
}

impl fmt::Display for TourismScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Criar Ponto Turístico")?;
        writeln!(f, "  Nome:      {}", self.nome)?;
        writeln!(f, "  Descrição: {}", self.descricao)?;
        match self.location {
            Some(c) => writeln!(f, "  Local:     {}, {}", c.latitude, c.longitude)?,
            None => writeln!(f, "  Local:     (indisponível)")?,
        }
        writeln!(f, "Pontos Turísticos")?;
        if self.is_loading {
            return write!(f, "  Carregando...");
        }
        if self.points.is_empty() {
            return write!(f, "  (nenhum ponto)");
        }
        let mut first = true;
        for point in &self.points {
            if !first {
                writeln!(f)?;
            }
            first = false;
            writeln!(f, "  {}  [{}]", point.nome, point.id)?;
            writeln!(f, "    {}", point.descricao)?;
            write!(f, "    Local: {}, {}", point.latitude, point.longitude)?;
        }
        Ok(())
    }
}
