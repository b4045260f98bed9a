//! # Navigation Container
//!
//! A stack of the five statically declared routes. Screens never construct
//! each other; they ask the [`Navigator`] for a transition and the
//! dispatcher mounts whatever ends up on top.
//!
//! ```text
//! Login ──navigate──▶ Cadastro ──replace──▶ Login
//!   │
//!   └──replace──▶ Home ──navigate──▶ Turismo ──navigate──▶ Detalhes { id }
//! ```

use std::fmt;

use log::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Home,
    Tourism,
    Details { point_id: String },
}

impl Route {
    /// The route's declared name. Params do not take part in it.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Register => "Cadastro",
            Route::Home => "Home",
            Route::Tourism => "Turismo",
            Route::Details { .. } => "Detalhes",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Details { point_id } => write!(f, "Detalhes({point_id})"),
            other => f.write_str(other.name()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        Self {
            stack: vec![initial],
        }
    }

    pub fn current(&self) -> &Route {
        // The stack is never emptied: back() keeps the root and reset() replaces it.
        &self.stack[self.stack.len() - 1]
    }

    pub fn stack(&self) -> &[Route] {
        &self.stack
    }

    /// Goes to `route`. If a route of the same name is already on the stack,
    /// pops back to it and takes the new params; otherwise pushes.
    pub fn navigate(&mut self, route: Route) {
        match self.stack.iter().position(|r| r.name() == route.name()) {
            Some(pos) => {
                self.stack.truncate(pos + 1);
                self.stack[pos] = route;
            }
            None => self.stack.push(route),
        }
        info!("navigate -> {}", self.current());
    }

    pub fn push(&mut self, route: Route) {
        self.stack.push(route);
        info!("push -> {}", self.current());
    }

    /// Swaps the top entry for `route`.
    pub fn replace(&mut self, route: Route) {
        let top = self.stack.len() - 1;
        self.stack[top] = route;
        info!("replace -> {}", self.current());
    }

    /// Pops the top entry. Returns false when already at the root.
    pub fn back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        info!("back -> {}", self.current());
        true
    }

    pub fn reset(&mut self, route: Route) {
        self.stack.clear();
        self.stack.push(route);
        info!("reset -> {}", self.current());
    }
}
