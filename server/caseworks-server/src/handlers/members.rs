use crate::error::{ApiContext, ApiError};
use crate::extract::{ApiJson, ApiPath, ApiQuery, AuthContext};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use member_registry::{DuplicateCheck, Member, MemberSummary, NewMember, SearchFilters};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct MemberCreated {
    pub id: i32,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateResponse {
    pub is_duplicate: bool,
}

/// Raw search query string; blank values are treated as absent
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub name: Option<String>,
    pub dob: Option<String>,
    pub member_id: Option<String>,
    pub phone_number: Option<String>,
}

impl SearchQuery {
    pub fn into_filters(self) -> Result<SearchFilters, ApiError> {
        let date_of_birth = match non_blank(self.dob) {
            Some(dob) => Some(
                NaiveDate::parse_from_str(dob.trim(), "%Y-%m-%d")
                    .map_err(|_| ApiError::validation("dob must be a date in YYYY-MM-DD format"))?,
            ),
            None => None,
        };
        let id = match non_blank(self.member_id) {
            Some(id) => Some(
                id.trim()
                    .parse::<i32>()
                    .map_err(|_| ApiError::validation("memberId must be an integer"))?,
            ),
            None => None,
        };

        Ok(SearchFilters {
            name: non_blank(self.name),
            date_of_birth,
            id,
            phone_number: non_blank(self.phone_number),
        })
    }
}

/// Drop blank parameters; others are matched as given
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// POST /api/members
pub async fn add_member(
    State(state): State<AppState>,
    ApiJson(member): ApiJson<NewMember>,
) -> Result<(StatusCode, Json<MemberCreated>), ApiError> {
    let id = state
        .registry
        .add_member(member)
        .await
        .api_context("Error adding member")?;

    Ok((
        StatusCode::CREATED,
        Json(MemberCreated {
            id,
            message: "Member added successfully".to_string(),
        }),
    ))
}

/// POST /api/members/check-duplicate
pub async fn check_duplicate(
    State(state): State<AppState>,
    ApiJson(check): ApiJson<DuplicateCheck>,
) -> Result<Json<DuplicateResponse>, ApiError> {
    let is_duplicate = state
        .registry
        .check_duplicate(check)
        .await
        .api_context("Error checking for duplicate member")?;

    Ok(Json(DuplicateResponse { is_duplicate }))
}

/// GET /api/members
pub async fn list_members(
    _auth: AuthContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<MemberSummary>>, ApiError> {
    let members = state
        .registry
        .list_members()
        .await
        .api_context("Error fetching members")?;

    Ok(Json(members))
}

/// GET /api/members/search
pub async fn search_members(
    _auth: AuthContext,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Vec<Member>>, ApiError> {
    let filters = query.into_filters()?;
    let members = state
        .registry
        .search(filters)
        .await
        .api_context("Error searching members")?;

    Ok(Json(members))
}

/// GET /api/members/:id
///
/// Ids that are not integers cannot name a member and are reported as
/// not found.
pub async fn get_member(
    _auth: AuthContext,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Member>, ApiError> {
    let id = id
        .parse::<i32>()
        .map_err(|_| ApiError::not_found("Member not found"))?;

    let member = state
        .registry
        .get_member(id)
        .await
        .api_context("Error fetching member details")?;

    Ok(Json(member))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_parses_and_drops_blanks() {
        let filters = SearchQuery {
            name: Some(" jo ".to_string()),
            dob: Some("1990-05-01".to_string()),
            member_id: Some(String::new()),
            phone_number: Some("  ".to_string()),
        }
        .into_filters()
        .unwrap();

        assert_eq!(filters.name.as_deref(), Some(" jo "));
        assert_eq!(filters.date_of_birth, NaiveDate::from_ymd_opt(1990, 5, 1));
        assert!(filters.id.is_none());
        assert!(filters.phone_number.is_none());
    }

    #[test]
    fn test_search_query_rejects_bad_values() {
        let bad_date = SearchQuery {
            dob: Some("05/01/1990".to_string()),
            ..Default::default()
        };
        assert!(matches!(bad_date.into_filters(), Err(ApiError::Validation { .. })));

        let bad_id = SearchQuery {
            member_id: Some("abc".to_string()),
            ..Default::default()
        };
        assert!(matches!(bad_id.into_filters(), Err(ApiError::Validation { .. })));
    }
}
