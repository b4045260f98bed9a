//! User list with delete, logout, and the way into the tourist points.

use std::fmt;

use log::{info, warn};

use crate::api::User;
use crate::core::navigation::Route;
use crate::core::state::App;
use crate::core::storage::{clear_token, load_token};

pub const PAGE_REQUIRES_AUTH: &str = "Você precisa estar autenticado para acessar essa página.";
pub const ACTION_REQUIRES_AUTH: &str = "Você precisa estar autenticado para realizar essa ação.";
pub const LOAD_USERS_FAILED: &str = "Falha ao carregar usuários.";
pub const CONFIRM_DELETE: &str = "Você tem certeza que deseja deletar este usuário?";
pub const USER_DELETED: &str = "Usuário deletado com sucesso.";
pub const DELETE_FAILED: &str = "Não foi possível deletar o usuário.";

#[derive(Debug, Default)]
pub struct HomeScreen {
    pub users: Vec<User>,
    pub is_loading: bool,
    /// Id awaiting confirmation, if the delete prompt is open.
    pub pending_delete: Option<String>,
}

impl HomeScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the user list. Without a usable token the user is sent to Login.
    pub async fn mount(&mut self, app: &mut App) {
        let token = match load_token(app.store.as_ref()).await {
            Ok(Some(token)) => token,
            Ok(None) => {
                app.alert("Erro", PAGE_REQUIRES_AUTH);
                app.navigator.navigate(Route::Login);
                return;
            }
            Err(e) => {
                warn!("Could not read token: {}", e);
                app.alert("Erro", PAGE_REQUIRES_AUTH);
                app.navigator.navigate(Route::Login);
                return;
            }
        };

        self.is_loading = true;
        let result = app.api.list_users(&token).await;
        self.is_loading = false;

        match result {
            Ok(users) => {
                info!("Loaded {} users", users.len());
                self.users = users;
            }
            Err(e) => {
                warn!("Failed to load users: {}", e);
                app.alert("Erro", LOAD_USERS_FAILED);
                app.navigator.navigate(Route::Login);
            }
        }
    }

    /// Opens the confirmation prompt for `id`.
    pub async fn request_delete(&mut self, app: &mut App, id: &str) {
        if !matches!(load_token(app.store.as_ref()).await, Ok(Some(_))) {
            app.alert("Erro", ACTION_REQUIRES_AUTH);
            app.navigator.navigate(Route::Login);
            return;
        }
        self.pending_delete = Some(id.to_string());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the user awaiting confirmation. On failure the list is untouched.
    pub async fn confirm_delete(&mut self, app: &mut App) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        let token = match load_token(app.store.as_ref()).await {
            Ok(Some(token)) => token,
            _ => {
                app.alert("Erro", ACTION_REQUIRES_AUTH);
                app.navigator.navigate(Route::Login);
                return;
            }
        };

        match app.api.delete_user(&token, &id).await {
            Ok(()) => {
                info!("Deleted user {}", id);
                self.users.retain(|user| user.id != id);
                app.alert("Sucesso", USER_DELETED);
            }
            Err(e) => {
                warn!("Failed to delete user {}: {}", id, e);
                app.alert("Erro", DELETE_FAILED);
            }
        }
    }

    pub async fn logout(&mut self, app: &mut App) {
        if let Err(e) = clear_token(app.store.as_ref()).await {
            warn!("Could not clear token: {}", e);
        }
        app.navigator.replace(Route::Login);
    }

    pub fn go_to_tourism(&self, app: &mut App) {
        app.navigator.navigate(Route::Tourism);
    }
}

impl fmt::Display for HomeScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Lista de Usuários")?;
        if self.is_loading {
            writeln!(f, "  Carregando...")?;
        } else if self.users.is_empty() {
            writeln!(f, "  (nenhum usuário)")?;
        } else {
            for user in &self.users {
                writeln!(f, "  {}  [{}]", user.nome, user.id)?;
            }
        }
        if let Some(id) = &self.pending_delete {
            writeln!(f, "Confirmar Exclusão: {CONFIRM_DELETE} ({id})")?;
        }
        write!(f, "Sair | Pontos Turísticos")
    }
}
