// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - The boundary between the rendering layer and the services
// - Translates between DTOs and domain entities
// - Every action returns an ActionResult and never raises

pub mod action;
pub mod commands;
pub mod dto;
pub mod state;

pub use action::{safe_action, ActionResult};
pub use commands::*;
pub use dto::*;
pub use state::AppState;
