use super::super::{ApiError, ApiState};
use crate::types::*;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};

/// Run the pipeline for one endpoint. `interval`, when given, overrides the
/// metric's default window size.
async fn fetch_series(
    state: &ApiState,
    token_address: &str,
    kind: MetricKind,
    params: HistoryQuery,
) -> Result<Vec<MetricPoint>, ApiError> {
    let window = match params.interval.as_deref() {
        Some(raw) => raw.parse::<WindowSize>().map_err(|e| {
            tracing::warn!("Rejected {} history request for {}: {}", kind, token_address, e);
            ApiError::bad_request(format!("Failed to fetch {} history.", kind))
        })?,
        None => kind.default_window(),
    };

    state
        .history
        .history(token_address, kind, window)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch {} history for {}: {}", kind, token_address, e);
            ApiError::from_history(kind, &e)
        })
}

pub async fn get_price_history(
    Path(token_address): Path<String>,
    Query(params): Query<HistoryQuery>,
    State(state): State<ApiState>,
) -> Result<Json<Vec<PricePoint>>, ApiError> {
    let points = fetch_series(&state, &token_address, MetricKind::Price, params).await?;
    Ok(Json(points.into_iter().map(PricePoint::from).collect()))
}

pub async fn get_volume_history(
    Path(token_address): Path<String>,
    Query(params): Query<HistoryQuery>,
    State(state): State<ApiState>,
) -> Result<Json<Vec<VolumePoint>>, ApiError> {
    let points = fetch_series(&state, &token_address, MetricKind::Volume, params).await?;
    Ok(Json(points.into_iter().map(VolumePoint::from).collect()))
}

pub async fn get_liquidity_history(
    Path(token_address): Path<String>,
    Query(params): Query<HistoryQuery>,
    State(state): State<ApiState>,
) -> Result<Json<Vec<LiquidityPoint>>, ApiError> {
    let points = fetch_series(&state, &token_address, MetricKind::Liquidity, params).await?;
    Ok(Json(points.into_iter().map(LiquidityPoint::from).collect()))
}
