//! # Actions
//!
//! Everything a user can do becomes an `Action`.
//! Typing into the name field? That's `Action::SetField(Field::Nome, ..)`.
//! Pressing the delete button? That's `Action::RequestDelete(id)`.
//!
//! `dispatch()` hands the action to the mounted screen, then mounts
//! whatever route the navigator ended up on:
//!
//! ```text
//! Action  →  screen operation  →  Navigator changed?  →  mount new screen
//! ```
//!
//! Mounting can itself navigate (a failed load redirects to Login), so it
//! repeats until the route settles.

use std::fmt;

use log::{debug, warn};

use crate::core::navigation::Route;
use crate::core::state::App;
use crate::screens::ActiveScreen;

/// Upper bound on chained mounts after one action. Every redirect chain
/// ends on Login, which does no I/O when mounted, so this is never reached
/// in practice.
const MAX_MOUNTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Nome,
    Senha,
    Descricao,
}

impl Field {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "nome" | "name" => Some(Field::Nome),
            "senha" | "password" => Some(Field::Senha),
            "descricao" | "descrição" | "description" => Some(Field::Descricao),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetField(Field, String),
    /// Submits the form on Login, Register, or Tourism (create).
    Submit,
    GoToRegister,
    /// Re-runs the screen's load.
    Refresh,
    RequestDelete(String),
    ConfirmDelete,
    CancelDelete,
    Logout,
    GoToTourism,
    OpenPoint(String),
    Back,
}

#[derive(Debug)]
pub enum ActionError {
    /// The mounted screen has no such operation.
    Unsupported { action: Action, route: Route },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Unsupported { action, route } => {
                write!(f, "{action:?} is not available on {route}")
            }
        }
    }
}

impl std::error::Error for ActionError {}

/// Runs `action` against `screen`, then syncs the mounted screen with the navigator.
pub async fn dispatch(
    app: &mut App,
    screen: &mut ActiveScreen,
    action: Action,
) -> Result<(), ActionError> {
    debug!("dispatch {:?} on {}", action, screen.route());
    match (&mut *screen, action) {
        (ActiveScreen::Login(s), Action::SetField(Field::Nome, v)) => s.nome = v,
        (ActiveScreen::Login(s), Action::SetField(Field::Senha, v)) => s.senha = v,
        (ActiveScreen::Login(s), Action::Submit) => s.submit(app).await,
        (ActiveScreen::Login(s), Action::GoToRegister) => s.go_to_register(app),

        (ActiveScreen::Register(s), Action::SetField(Field::Nome, v)) => s.nome = v,
        (ActiveScreen::Register(s), Action::SetField(Field::Senha, v)) => s.senha = v,
        (ActiveScreen::Register(s), Action::Submit) => s.submit(app).await,

        (ActiveScreen::Home(s), Action::Refresh) => s.mount(app).await,
        (ActiveScreen::Home(s), Action::RequestDelete(id)) => s.request_delete(app, &id).await,
        (ActiveScreen::Home(s), Action::ConfirmDelete) => s.confirm_delete(app).await,
        (ActiveScreen::Home(s), Action::CancelDelete) => s.cancel_delete(),
        (ActiveScreen::Home(s), Action::Logout) => s.logout(app).await,
        (ActiveScreen::Home(s), Action::GoToTourism) => s.go_to_tourism(app),

        (ActiveScreen::Tourism(s), Action::SetField(Field::Nome, v)) => s.nome = v,
        (ActiveScreen::Tourism(s), Action::SetField(Field::Descricao, v)) => s.descricao = v,
        (ActiveScreen::Tourism(s), Action::Submit) => s.create(app).await,
        (ActiveScreen::Tourism(s), Action::Refresh) => s.refresh(app).await,
        (ActiveScreen::Tourism(s), Action::OpenPoint(id)) => s.open(app, &id),

        (ActiveScreen::Details(s), Action::Refresh) => s.mount(app).await,

        (_, Action::Back) => {
            if !app.navigator.back() {
                debug!("back ignored at root");
            }
        }

        (current, action) => {
            return Err(ActionError::Unsupported {
                action,
                route: current.route(),
            });
        }
    }

    sync_screen(app, screen).await;
    Ok(())
}

/// Mounts screens until the mounted one matches the navigator's current route.
pub async fn sync_screen(app: &mut App, screen: &mut ActiveScreen) {
    for _ in 0..MAX_MOUNTS {
        let route = app.navigator.current().clone();
        if screen.route() == route {
            return;
        }
        *screen = ActiveScreen::mount(&route, app).await;
    }
    warn!("Navigation did not settle after {} mounts", MAX_MOUNTS);
}

impl Action {
    /// Parses one shell line, e.g. `nome Ana`, `delete 42`, `open p1`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        if let Some(field) = Field::parse(command) {
            return Some(Action::SetField(field, rest.to_string()));
        }

        let with_arg = |build: fn(String) -> Action| {
            (!rest.is_empty()).then(|| build(rest.to_string()))
        };

        match command.to_lowercase().as_str() {
            "submit" | "entrar" | "criar" | "cadastrar" => Some(Action::Submit),
            "cadastro" | "register" => Some(Action::GoToRegister),
            "refresh" | "reload" => Some(Action::Refresh),
            "delete" | "deletar" => with_arg(Action::RequestDelete),
            "yes" | "y" | "sim" => Some(Action::ConfirmDelete),
            "no" | "n" | "cancelar" => Some(Action::CancelDelete),
            "logout" | "sair" => Some(Action::Logout),
            "turismo" | "points" => Some(Action::GoToTourism),
            "open" | "detalhes" => with_arg(Action::OpenPoint),
            "back" | "voltar" => Some(Action::Back),
            _ => None,
        }
    }
}
