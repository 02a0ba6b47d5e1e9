use axum::{routing::get, Json, Router};
use tracing::{debug, instrument};

use crate::{
    auth::{dto::PublicUser, extractors::Principal},
    state::AppState,
};

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/users/me", get(get_me))
}

#[instrument(skip_all)]
pub async fn get_me(Principal(user): Principal) -> Json<PublicUser> {
    debug!(user_id = user.id, "whoami");
    Json(PublicUser::from(user))
}

#[cfg(test)]
mod me_tests {
    use super::*;
    use crate::auth::repo_types::User;

    #[test]
    fn me_response_serialization() {
        let response = PublicUser::from(User {
            id: 7,
            email: "test@example.com".to_string(),
            display_name: "Test".to_string(),
            is_active: true,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["email"], "test@example.com");
        assert_eq!(json["display_name"], "Test");
        assert_eq!(json["is_active"], true);
    }
}
