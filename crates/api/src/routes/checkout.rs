//! Order finalization handler.

use axum::body::Bytes;
use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use crate::db::checkout::CheckoutRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

use super::{parse_json, required};

/// Finalize-order request body.
#[derive(Debug, Deserialize)]
pub struct ConfirmOrderRequest {
    pub tax_id: Option<String>,
    pub payment_method: Option<String>,
}

/// `POST /confirm-order` - convert the caller's cart into orders and a
/// payment record, then clear the cart.
///
/// Authentication happens in the extractor, so an unauthenticated request
/// never reaches body validation. An empty cart still finalizes.
#[instrument(skip_all)]
pub async fn confirm(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    body: Bytes,
) -> Result<StatusCode> {
    let request: ConfirmOrderRequest = parse_json(&body)?;

    let tax_id = required(request.tax_id, "tax_id")?;
    let payment_method = required(request.payment_method, "payment_method")?;

    let receipt = CheckoutRepository::new(state.pool())
        .finalize(user.id, &payment_method, &tax_id)
        .await?;

    tracing::info!(
        user_id = %user.id,
        order_lines = receipt.order_lines,
        payment_id = %receipt.payment_id,
        "order finalized"
    );

    Ok(StatusCode::OK)
}
