use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use time::Date;
use tracing::instrument;

use crate::{
    auth::Principal,
    error::{AppError, Result},
    state::AppState,
};

use super::dto::{DailyAvailability, ToggleRequest, ToggleResponse};
use super::{repo, services};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/availability/me", get(list_my_availability))
        .route("/availability/aggregate", get(get_aggregate))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/availability", post(toggle_availability))
}

#[instrument(skip_all)]
pub async fn list_my_availability(
    State(state): State<AppState>,
    Principal(user): Principal,
) -> Result<Json<Vec<Date>>> {
    let dates = repo::list_dates(&state.db, user.id).await?;
    Ok(Json(dates))
}

#[instrument(skip_all)]
pub async fn toggle_availability(
    State(state): State<AppState>,
    Principal(user): Principal,
    payload: std::result::Result<Json<ToggleRequest>, JsonRejection>,
) -> Result<Json<ToggleResponse>> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let resp = services::toggle(&state.db, user.id, req.date, req.available).await?;
    Ok(Json(resp))
}

#[instrument(skip_all)]
pub async fn get_aggregate(
    State(state): State<AppState>,
    Principal(_user): Principal,
) -> Result<Json<Vec<DailyAvailability>>> {
    let days = services::aggregate(&state.db).await?;
    Ok(Json(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn toggle_request_parses_iso_date() {
        let req: ToggleRequest =
            serde_json::from_str(r#"{"date":"2024-01-31","available":true}"#).unwrap();
        assert_eq!(req.date, date!(2024 - 01 - 31));
        assert!(req.available);
    }

    #[test]
    fn toggle_request_rejects_impossible_date() {
        assert!(serde_json::from_str::<ToggleRequest>(r#"{"date":"2024-02-30","available":true}"#)
            .is_err());
    }

    #[test]
    fn aggregate_row_serialization() {
        let day = DailyAvailability {
            date: date!(2024 - 01 - 01),
            count: 2,
            total_active_users: 3,
            available_user_names: vec!["A".into(), "B".into()],
        };
        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["count"], 2);
        assert_eq!(json["total_active_users"], 3);
        assert_eq!(json["available_user_names"][1], "B");
    }
}
