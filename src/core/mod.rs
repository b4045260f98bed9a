//! # Core Application Logic
//!
//! Everything between the terminal front end and the backend. It knows
//! nothing about how screens are drawn.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (App services) │
//!                    │  • Action (dispatch)    │
//!                    │  • Navigation (stack)   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │  Storage   │      │    API     │      │  Location  │
//!     │  (token)   │      │ (reqwest)  │      │  (device)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, the services every screen shares
//! - [`action`]: The `Action` enum and the dispatcher
//! - [`navigation`]: The route stack
//! - [`storage`]: The persistence shim holding the token
//! - [`location`]: The device position collaborator
//! - [`config`]: Layered settings

pub mod action;
pub mod config;
pub mod location;
pub mod navigation;
pub mod state;
pub mod storage;
