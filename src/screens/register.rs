use std::fmt;

use log::{debug, warn};

use crate::api::Credentials;
use crate::core::navigation::Route;
use crate::core::state::App;

pub const REGISTERED: &str = "Usuário adicionado com sucesso!";
pub const REGISTER_FAILED: &str = "Erro ao registrar usuário";

#[derive(Debug, Default)]
pub struct RegisterScreen {
    pub nome: String,
    pub senha: String,
}

impl RegisterScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(&mut self, app: &mut App) {
        let credentials = Credentials {
            nome: self.nome.clone(),
            senha: self.senha.clone(),
        };

        match app.api.register(&credentials).await {
            Ok(()) => {
                debug!("Registered user: {}", credentials.nome);
                app.notice(REGISTERED);
                app.navigator.replace(Route::Login);
            }
            Err(e) => {
                warn!("Registration failed: {}", e);
                app.notice(REGISTER_FAILED);
            }
        }
    }
}

impl fmt::Display for RegisterScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cadastre-se")?;
        writeln!(f, "  Nome:  {}", self.nome)?;
        write!(f, "  Senha: {}", "*".repeat(self.senha.chars().count()))
    }
}
