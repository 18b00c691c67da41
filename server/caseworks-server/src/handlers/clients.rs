use crate::error::{ApiContext, ApiError};
use crate::extract::ApiQuery;
use crate::state::AppState;
use axum::{extract::State, Json};
use member_registry::Client;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientQuery {
    pub case_worker_id: Option<String>,
}

/// GET /api/clients?caseWorkerId=
pub async fn list_clients(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ClientQuery>,
) -> Result<Json<Vec<Client>>, ApiError> {
    let clients = state
        .registry
        .list_clients(query.case_worker_id.as_deref())
        .await
        .api_context("Error fetching clients")?;

    Ok(Json(clients))
}
