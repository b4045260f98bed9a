//! Line-oriented interactive session over the screens.

use std::io::{self, Write};

use log::{debug, info};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::report;
use crate::core::action::{Action, dispatch};
use crate::core::navigation::Route;
use crate::core::state::App;
use crate::screens::ActiveScreen;

/// Commands available on each route, as shown by `help`.
pub fn help(route: &Route) -> &'static str {
    match route {
        Route::Login => "nome <texto> | senha <texto> | entrar | cadastro",
        Route::Register => "nome <texto> | senha <texto> | cadastrar | voltar",
        Route::Home => "refresh | deletar <id> | sim | cancelar | sair | turismo | voltar",
        Route::Tourism => {
            "nome <texto> | descricao <texto> | criar | refresh | detalhes <id> | voltar"
        }
        Route::Details { .. } => "refresh | voltar",
    }
}

fn prompt(route: &Route) -> io::Result<()> {
    print!("{route}> ");
    io::stdout().flush()
}

pub async fn run(app: &mut App, screen: &mut ActiveScreen) -> io::Result<()> {
    info!("Interactive shell started");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    report(app, screen);
    prompt(app.navigator.current())?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => {}
            "quit" | "exit" | "q" => break,
            "help" | "?" => println!("{}  (help, quit)", help(app.navigator.current())),
            command => match Action::parse(command) {
                Some(action) => {
                    debug!("shell action: {:?}", action);
                    match dispatch(app, screen, action).await {
                        Ok(()) => report(app, screen),
                        Err(e) => println!("{e}"),
                    }
                }
                None => println!("Comando desconhecido: {command} (digite help)"),
            },
        }
        prompt(app.navigator.current())?;
    }

    info!("Interactive shell finished");
    Ok(())
}
