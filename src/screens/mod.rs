//! # Screens
//!
//! One struct per route, each holding its own UI state. Operations take
//! `&mut App` and express outcomes only through alerts and navigator
//! transitions, so the same screen serves the one-shot CLI and the shell.

pub mod details;
pub mod home;
pub mod login;
pub mod register;
pub mod tourism;

use std::fmt;

use log::debug;

pub use details::{DetailsScreen, MapMarker, MapRegion};
pub use home::HomeScreen;
pub use login::LoginScreen;
pub use register::RegisterScreen;
pub use tourism::TourismScreen;

use crate::core::navigation::Route;
use crate::core::state::App;

/// The screen currently mounted on top of the navigation stack.
#[derive(Debug)]
pub enum ActiveScreen {
    Login(LoginScreen),
    Register(RegisterScreen),
    Home(HomeScreen),
    Tourism(TourismScreen),
    Details(DetailsScreen),
}

impl ActiveScreen {
    /// Builds the screen for `route` and runs its load.
    pub async fn mount(route: &Route, app: &mut App) -> Self {
        debug!("Mounting {}", route);
        match route {
            Route::Login => ActiveScreen::Login(LoginScreen::new()),
            Route::Register => ActiveScreen::Register(RegisterScreen::new()),
            Route::Home => {
                let mut screen = HomeScreen::new();
                screen.mount(app).await;
                ActiveScreen::Home(screen)
            }
            Route::Tourism => {
                let mut screen = TourismScreen::new();
                screen.mount(app).await;
                ActiveScreen::Tourism(screen)
            }
            Route::Details { point_id } => {
                let mut screen = DetailsScreen::new(point_id);
                screen.mount(app).await;
                ActiveScreen::Details(screen)
            }
        }
    }

    /// The route this screen was mounted for.
    pub fn route(&self) -> Route {
        match self {
            ActiveScreen::Login(_) => Route::Login,
            ActiveScreen::Register(_) => Route::Register,
            ActiveScreen::Home(_) => Route::Home,
            ActiveScreen::Tourism(_) => Route::Tourism,
            ActiveScreen::Details(screen) => Route::Details {
                point_id: screen.point_id.clone(),
            },
        }
    }
}

impl fmt::Display for ActiveScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "── {} ──", self.route())?;
        match self {
            ActiveScreen::Login(screen) => fmt::Display::fmt(screen, f),
            ActiveScreen::Register(screen) => fmt::Display::fmt(screen, f),
            ActiveScreen::Home(screen) => fmt::Display::fmt(screen, f),
            ActiveScreen::Tourism(screen) => fmt::Display::fmt(screen, f),
            ActiveScreen::Details(screen) => fmt::Display::fmt(screen, f),
        }
    }
}
