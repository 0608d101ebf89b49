//src/paths/lending.rs
use axum::{Json, Router, routing::post, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::utils::lending::{
    max_base_units, max_input_amount, summarize_position, CToken, LendingLimits, LendingTxType,
    UserPosition,
};
use crate::utils::serializer::{error_response, success_response};
use crate::utils::token_registry::MAX_DECIMALS;

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MaxAmountParams {
    pub c_token: CToken,
    pub tx_type: LendingTxType,
    #[serde(default)]
    pub limits: LendingLimits,
}

pub async fn max_amount_handler(
    Json(params): Json<MaxAmountParams>,
) -> Result<Json<Value>, StatusCode> {
    info!("Received POST /api/lending/max request for {:?}", params.tx_type);
    let decimals = params.c_token.underlying.decimals;
    if decimals > MAX_DECIMALS {
        return Ok(Json(error_response(format!(
            "Invalid decimals: must be at most {}",
            MAX_DECIMALS
        ))));
    }
    let base_units = max_base_units(&params.c_token, params.tx_type, &params.limits);
    let amount = max_input_amount(&params.c_token, params.tx_type, &params.limits);
    Ok(Json(success_response(json!({
        "txType": params.tx_type,
        "baseUnits": base_units,
        "amount": amount
    }))))
}

pub async fn position_summary_handler(
    Json(position): Json<UserPosition>,
) -> Result<Json<Value>, StatusCode> {
    info!("Received POST /api/lending/position request");
    Ok(Json(success_response(json!(summarize_position(&position)))))
}

pub fn create_lending_routes() -> Router {
    Router::new()
        .route("/api/lending/max", post(max_amount_handler))
        .route("/api/lending/position", post(position_summary_handler))
}
