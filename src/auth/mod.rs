use crate::state::AppState;
use axum::Router;

mod dto;
pub mod extractors;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use extractors::Principal;
pub use repo_types::{NewUser, User};
pub use services::{IdentityResolver, UserLookup};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::me_routes())
}
