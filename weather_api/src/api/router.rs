use crate::api::handlers::get_live_weather;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

pub fn router() -> Router<AppState> {
    Router::<AppState>::new().route("/weather/live", get(get_live_weather))
}
