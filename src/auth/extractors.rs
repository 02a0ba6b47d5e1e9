use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{auth::repo_types::User, error::AppError, state::AppState};

/// The resolved, authorized caller of a request.
#[derive(Debug, Clone)]
pub struct Principal(pub User);

#[async_trait]
impl FromRequestParts<AppState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by the upstream access proxy. A present value always counts, even one
        // that is not UTF-8: it is decoded lossily and will not match a provisioned email.
        let trusted_email = parts
            .headers
            .get(state.config.auth.trusted_header.as_str())
            .map(|h| String::from_utf8_lossy(h.as_bytes()));

        let user = state
            .resolver
            .resolve(&state.db, trusted_email.as_deref())
            .await?;
        Ok(Principal(user))
    }
}
