//src/paths/amounts.rs
use axum::{Json, Router, routing::post, extract::Extension, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::load_resources::AppState;
use crate::paths::validate_params::{
    resolve_decimals, validate_decimal_amount, validate_token_reference, TokenReference,
    ValidationResult,
};
use crate::utils::serializer::{error_response, success_response};
use crate::utils::token_conversion::{
    add_token_balances, format_balance, parse_units, BaseUnitAmount, FormatOptions,
};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EncodeParams {
    #[serde(deserialize_with = "crate::paths::utils::deserialization_helpers::number_to_string")]
    pub amount: String,
    #[serde(flatten)]
    pub token: TokenReference,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FormatParams {
    #[serde(deserialize_with = "crate::paths::utils::deserialization_helpers::number_to_string")]
    pub amount: String,
    #[serde(flatten)]
    pub token: TokenReference,
    #[serde(flatten)]
    pub options: FormatOptions,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AddParams {
    #[serde(deserialize_with = "crate::paths::utils::deserialization_helpers::number_to_string")]
    pub a: String,
    #[serde(deserialize_with = "crate::paths::utils::deserialization_helpers::number_to_string")]
    pub b: String,
}

fn decimals_for(token: &TokenReference, state: &AppState) -> Result<u32, String> {
    let validation = validate_token_reference(token);
    if !validation.valid {
        return Err(validation.message);
    }
    resolve_decimals(token, &state.tokens)
}

pub async fn encode_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(params): Json<EncodeParams>,
) -> Result<Json<Value>, StatusCode> {
    info!("Received POST /api/amounts/encode request");

    let ValidationResult { valid, message } = validate_decimal_amount(&params.amount);
    if !valid {
        error!("Validation failed: {}", message);
        return Ok(Json(error_response(message)));
    }

    let decimals = match decimals_for(&params.token, &state) {
        Ok(decimals) => decimals,
        Err(message) => {
            error!("Validation failed: {}", message);
            return Ok(Json(error_response(message)));
        }
    };

    match parse_units(&params.amount, decimals) {
        Ok(base_units) => {
            debug!("Encoded {} at {} decimals: {}", params.amount, decimals, base_units);
            Ok(Json(success_response(json!({
                "amount": params.amount,
                "decimals": decimals,
                "baseUnits": base_units
            }))))
        }
        Err(e) => {
            error!("Error encoding amount: {}", e);
            Ok(Json(error_response(e.to_string())))
        }
    }
}

pub async fn format_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(params): Json<FormatParams>,
) -> Result<Json<Value>, StatusCode> {
    info!("Received POST /api/amounts/format request");

    let decimals = match decimals_for(&params.token, &state) {
        Ok(decimals) => decimals,
        Err(message) => {
            error!("Validation failed: {}", message);
            return Ok(Json(error_response(message)));
        }
    };

    // Only plain base-unit integers are rendered; anything else displays as 0.
    let formatted = match params.amount.parse::<BaseUnitAmount>() {
        Ok(amount) => format_balance(&amount, decimals, &params.options),
        Err(e) => {
            debug!("Rendering 0 for unparsable amount: {}", e);
            "0".to_string()
        }
    };

    Ok(Json(success_response(json!({
        "amount": params.amount,
        "decimals": decimals,
        "formatted": formatted
    }))))
}

pub async fn add_handler(Json(params): Json<AddParams>) -> Result<Json<Value>, StatusCode> {
    info!("Received POST /api/amounts/add request");
    Ok(Json(success_response(json!({
        "sum": add_token_balances(&params.a, &params.b)
    }))))
}

pub fn create_amount_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/amounts/encode", post(encode_handler))
        .route("/api/amounts/format", post(format_handler))
        .route("/api/amounts/add", post(add_handler))
        .layer(Extension(state))
}
