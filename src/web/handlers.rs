use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::Json,
};

use super::{AppState, FindParams};
use crate::models::SearchResult;

/// `GET /find/:search`. Always answers 200; lookup failures show up as an
/// empty product and/or an empty vendor list.
pub async fn find_product(
    State(state): State<AppState>,
    Path(search): Path<String>,
    params: Result<Query<FindParams>, QueryRejection>,
) -> Json<SearchResult> {
    let limit = match params {
        Ok(Query(FindParams { limit: Some(limit) })) => limit,
        Ok(Query(FindParams { limit: None })) => state.finder.offer_limit(),
        Err(rejection) => {
            tracing::warn!(
                search = %search,
                error = %rejection.body_text(),
                "Ignoring malformed query, using default offer limit"
            );
            state.finder.offer_limit()
        }
    };

    Json(state.finder.find_with_limit(&search, limit).await)
}
