//! API route handlers

use std::collections::BTreeMap;

use allocation_facade::{
    AllocationError, AllocationResult, DemandTable, PipelineConfig, SyntheticConfig,
};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AllocateRequest {
    /// Entity name to daily sales; synthetic data when absent
    pub series: Option<BTreeMap<String, Vec<f64>>>,
    pub config: PipelineConfig,
    pub synthetic: SyntheticConfig,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
}

impl From<AllocationError> for ErrorResponse {
    fn from(e: AllocationError) -> Self {
        Self {
            kind: e.kind(),
            error: e.to_string(),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn unprocessable(e: AllocationError) -> ApiError {
    tracing::warn!(kind = e.kind(), "allocation rejected: {}", e);
    (StatusCode::UNPROCESSABLE_ENTITY, Json(e.into()))
}

fn run_request(req: AllocateRequest) -> allocation_facade::Result<AllocationResult> {
    let pipeline = req.config.build()?;
    let table = match req.series {
        Some(series) => DemandTable::new(series)?,
        None => req.synthetic.generate()?,
    };
    pipeline.run(&table)
}

/// Malformed bodies are reported like any other invalid input
pub async fn allocate(
    payload: Result<Json<AllocateRequest>, JsonRejection>,
) -> Result<Json<AllocationResult>, ApiError> {
    let Json(req) = payload
        .map_err(|rejection| unprocessable(AllocationError::invalid(rejection.body_text())))?;
    run_request(req).map(Json).map_err(unprocessable)
}
