//! # Terminal Front End
//!
//! One-shot subcommands and the interactive shell both drive the screens
//! through [`dispatch`], so they share every flow and alert.

pub mod shell;

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::{ApiClient, ApiError};
use crate::core::action::{Action, Field, dispatch, sync_screen};
use crate::core::config::{CliOverrides, ResolvedConfig};
use crate::core::location::{FixedLocation, LocationProvider, NoLocation};
use crate::core::navigation::Route;
use crate::core::state::App;
use crate::core::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::screens::home::CONFIRM_DELETE;
use crate::screens::{ActiveScreen, HomeScreen};

#[derive(Parser, Debug)]
#[command(name = "turistamap", about = "Terminal client for the TuristaMap backend")]
pub struct Args {
    /// Backend origin, e.g. http://localhost:3000
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Device latitude used when creating points
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Device longitude used when creating points
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Token storage file
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    /// Keep the token in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            base_url: self.base_url.clone(),
            storage_path: self.storage.clone(),
            latitude: self.lat,
            longitude: self.lon,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Authenticate and store the token
    Login {
        #[arg(long)]
        nome: String,
        #[arg(long)]
        senha: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        nome: String,
        #[arg(long)]
        senha: String,
    },
    /// Forget the stored token
    Logout,
    /// List or delete users
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// List, create, or show tourist points
    Points {
        #[command(subcommand)]
        command: PointsCommand,
    },
    /// Interactive session (default)
    Shell,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List,
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum PointsCommand {
    List,
    /// Create a point at the configured location
    Create {
        #[arg(long)]
        nome: String,
        #[arg(long)]
        descricao: String,
    },
    Show {
        id: String,
    },
}

/// Wires the real backend, storage, and location source from resolved config.
pub fn build_app(config: &ResolvedConfig, ephemeral: bool) -> Result<App, ApiError> {
    let api = Arc::new(ApiClient::new(&config.base_url, config.request_timeout)?);
    info!("Backend: {}", api.base_url());

    let store: Arc<dyn KeyValueStore> = if ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        info!("Token storage: {}", config.storage_path.display());
        Arc::new(FileStore::new(&config.storage_path))
    };

    let location: Arc<dyn LocationProvider> = match config.location {
        Some(coordinate) => Arc::new(FixedLocation(coordinate)),
        None => Arc::new(NoLocation),
    };

    Ok(App::new(api, store, location))
}

pub async fn run(command: Option<Command>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut screen = ActiveScreen::mount(&Route::Login, app).await;

    match command.unwrap_or(Command::Shell) {
        Command::Shell => {
            shell::run(app, &mut screen).await?;
            return Ok(());
        }
        Command::Login { nome, senha } => {
            dispatch(app, &mut screen, Action::SetField(Field::Nome, nome)).await?;
            dispatch(app, &mut screen, Action::SetField(Field::Senha, senha)).await?;
            dispatch(app, &mut screen, Action::Submit).await?;
        }
        Command::Register { nome, senha } => {
            dispatch(app, &mut screen, Action::GoToRegister).await?;
            dispatch(app, &mut screen, Action::SetField(Field::Nome, nome)).await?;
            dispatch(app, &mut screen, Action::SetField(Field::Senha, senha)).await?;
            dispatch(app, &mut screen, Action::Submit).await?;
        }
        Command::Logout => {
            // Logging out needs no user list, so Home is entered without loading it.
            app.navigator.reset(Route::Home);
            screen = ActiveScreen::Home(HomeScreen::new());
            dispatch(app, &mut screen, Action::Logout).await?;
        }
        Command::Users { command } => {
            open(app, &mut screen, Route::Home).await;
            if let UsersCommand::Delete { id, yes } = command
                && matches!(screen, ActiveScreen::Home(_))
            {
                dispatch(app, &mut screen, Action::RequestDelete(id.clone())).await?;
                if delete_pending(&screen) {
                    let confirmed = yes || confirm(&delete_prompt(&id)).await?;
                    let action = if confirmed {
                        Action::ConfirmDelete
                    } else {
                        Action::CancelDelete
                    };
                    dispatch(app, &mut screen, action).await?;
                }
            }
        }
        Command::Points { command } => match command {
            PointsCommand::List => open(app, &mut screen, Route::Tourism).await,
            PointsCommand::Create { nome, descricao } => {
                open(app, &mut screen, Route::Tourism).await;
                if matches!(screen, ActiveScreen::Tourism(_)) {
                    dispatch(app, &mut screen, Action::SetField(Field::Nome, nome)).await?;
                    dispatch(app, &mut screen, Action::SetField(Field::Descricao, descricao))
                        .await?;
                    dispatch(app, &mut screen, Action::Submit).await?;
                }
            }
            PointsCommand::Show { id } => {
                open(app, &mut screen, Route::Details { point_id: id }).await
            }
        },
    }

    report(app, &screen);
    Ok(())
}

/// Makes `route` the only entry on the stack and mounts it.
async fn open(app: &mut App, screen: &mut ActiveScreen, route: Route) {
    app.navigator.reset(route);
    sync_screen(app, screen).await;
}

fn delete_pending(screen: &ActiveScreen) -> bool {
    matches!(screen, ActiveScreen::Home(home) if home.pending_delete.is_some())
}

/// Same wording as the Home screen's confirmation dialog.
fn delete_prompt(id: &str) -> String {
    format!("{CONFIRM_DELETE} ({id})")
}

/// Asks a yes/no question on stdin. Anything but y/yes/s/sim is a no.
async fn confirm(question: &str) -> std::io::Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(matches!(
        line.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    ))
}

/// Prints and drains pending alerts, then the mounted screen.
pub fn report(app: &mut App, screen: &ActiveScreen) {
    for alert in app.take_alerts() {
        println!("! {alert}");
    }
    println!("{screen}");
}
