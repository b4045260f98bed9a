use std::fmt;

use log::{info, warn};

use crate::api::Credentials;
use crate::core::navigation::Route;
use crate::core::state::App;
use crate::core::storage::save_token;

pub const WELCOME: &str = "Boas-vindas!";
pub const WRONG_CREDENTIALS: &str = "Nome e/ou senha errados!";

#[derive(Debug, Default)]
pub struct LoginScreen {
    pub nome: String,
    pub senha: String,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticates, persists the token, and replaces this screen with Home.
    /// Every failure, network or credentials, surfaces the same message.
    pub async fn submit(&mut self, app: &mut App) {
        let credentials = Credentials {
            nome: self.nome.clone(),
            senha: self.senha.clone(),
        };

        let token = match app.api.login(&credentials).await {
            Ok(token) => token,
            Err(e) => {
                warn!("Login failed for {:?}: {}", credentials.nome, e);
                app.notice(WRONG_CREDENTIALS);
                return;
            }
        };

        if let Err(e) = save_token(app.store.as_ref(), &token).await {
            warn!("Could not persist token: {}", e);
            app.notice(WRONG_CREDENTIALS);
            return;
        }

        info!("Logged in as {:?}", credentials.nome);
        app.notice(WELCOME);
        app.navigator.replace(Route::Home);
    }

    pub fn go_to_register(&self, app: &mut App) {
        app.navigator.navigate(Route::Register);
    }
}

impl fmt::Display for LoginScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Olá! Autentique-se para entrar.")?;
        writeln!(f, "  Nome:  {}", self.nome)?;
        writeln!(f, "  Senha: {}", "*".repeat(self.senha.chars().count()))?;
        write!(f, "Você não tem uma conta? Cadastre-se")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::load_token;
    use crate::test_support::{FAKE_PASSWORD, FAKE_TOKEN, test_app};

    #[tokio::test]
    async fn test_login_success_persists_token_and_replaces() {
        let mut app = test_app();
        let mut screen = LoginScreen {
            nome: "ana".into(),
            senha: FAKE_PASSWORD.into(),
        };
        screen.submit(&mut app).await;

        let token = load_token(app.store.as_ref()).await.unwrap();
        assert_eq!(token.as_deref(), Some(FAKE_TOKEN));
        assert_eq!(app.navigator.stack(), &[Route::Home]);
        assert_eq!(app.take_alerts()[0].message, WELCOME);
    }

    #[tokio::test]
    async fn test_login_failure_keeps_no_token() {
        let mut app = test_app();
        let mut screen = LoginScreen {
            nome: "ana".into(),
            senha: "wrong".into(),
        };
        screen.submit(&mut app).await;

        assert_eq!(load_token(app.store.as_ref()).await.unwrap(), None);
        assert_eq!(app.navigator.current(), &Route::Login);
        assert_eq!(app.take_alerts()[0].message, WRONG_CREDENTIALS);
    }

    #[test]
    fn test_go_to_register_pushes() {
        let mut app = test_app();
        LoginScreen::new().go_to_register(&mut app);
        assert_eq!(app.navigator.stack(), &[Route::Login, Route::Register]);
    }

    #[test]
    fn test_render_masks_password() {
        let screen = LoginScreen {
            nome: "ana".into(),
            senha: "abc".into(),
        };
        let text = screen.to_string();
        assert!(text.contains("Senha: ***"));
        assert!(!text.contains("abc"));
    }
}
