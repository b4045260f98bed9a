//! Point detail with its map region.

use std::fmt;

use log::{info, warn};

use crate::api::{Coordinate, TouristPoint};
use crate::core::location::{LocationOutcome, locate};
use crate::core::navigation::Route;
use crate::core::state::App;
use crate::core::storage::load_token;

/// Span of the initial map region around the point, in degrees.
pub const MAP_DELTA: f64 = 0.01;

pub const LOCATION_PERMISSION_TITLE: &str = "Permissão de localização";
pub const LOCATION_DENIED: &str = "Permissão para acessar a localização foi negada.";
pub const LOCATION_FAILED: &str = "Não foi possível obter sua localização.";
pub const REQUIRES_AUTH: &str = "Você precisa estar autenticado para acessar esta página.";
pub const LOAD_FAILED: &str = "Não foi possível carregar as informações do ponto turístico.";

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub coordinate: Coordinate,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapRegion {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
    pub marker: MapMarker,
}

#[derive(Debug)]
pub struct DetailsScreen {
    pub point_id: String,
    pub point: Option<TouristPoint>,
    pub user_location: Option<Coordinate>,
    pub is_loading: bool,
}

impl DetailsScreen {
    pub fn new(point_id: &str) -> Self {
        Self {
            point_id: point_id.to_string(),
            point: None,
            user_location: None,
            is_loading: true,
        }
    }

    pub async fn mount(&mut self, app: &mut App) {
        match locate(app.location.as_ref()).await {
            LocationOutcome::Found(coordinate) => self.user_location = Some(coordinate),
            LocationOutcome::Denied => app.alert(LOCATION_PERMISSION_TITLE, LOCATION_DENIED),
            LocationOutcome::Failed(e) => {
                warn!("Could not get location: {}", e);
                app.alert("Erro", LOCATION_FAILED);
            }
        }
        self.fetch(app).await;
    }

    async fn fetch(&mut self, app: &mut App) {
        let Ok(Some(token)) = load_token(app.store.as_ref()).await else {
            self.is_loading = false;
            app.alert("Erro", REQUIRES_AUTH);
            app.navigator.navigate(Route::Login);
            return;
        };

        let result = app.api.get_point(&token, &self.point_id).await;
        self.is_loading = false;

        match result {
            Ok(point) => {
                info!("Loaded tourist point {}", point.id);
                self.point = Some(point);
            }
            Err(e) => {
                warn!("Failed to load tourist point {}: {}", self.point_id, e);
                app.alert("Erro", LOAD_FAILED);
                app.navigator.navigate(Route::Login);
            }
        }
    }

    /// The map to show, available only once the point has loaded.
    pub fn map_region(&self) -> Option<MapRegion> {
        if self.is_loading {
            return None;
        }
        let point = self.point.as_ref()?;
        Some(MapRegion {
            center: point.coordinate(),
            latitude_delta: MAP_DELTA,
            longitude_delta: MAP_DELTA,
            marker: MapMarker {
                coordinate: point.coordinate(),
                title: point.nome.clone(),
                description: point.descricao.clone(),
            },
        })
    }
}

impl fmt::Display for DetailsScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(point), Some(region)) = (&self.point, self.map_region()) else {
            return write!(f, "Carregando...");
        };
        writeln!(f, "{}", point.nome)?;
        writeln!(f, "{}", point.descricao)?;
        write!(
            f,
            "Mapa: centro {}, {} (Δ {}) marcador \"{}\"",
            region.center.latitude,
            region.center.longitude,
            region.latitude_delta,
            region.marker.title
        )
    }
}
