use crate::nws::NwsClient;
use axum::extract::FromRef;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub nws: NwsClient,
}
