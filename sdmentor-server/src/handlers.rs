//! Endpoint handlers. Thin wrappers that hand the parsed body to the
//! reviewer and serialize whatever comes back.

use axum::{Json, extract::State};

use crate::AppState;
use crate::schemas::{
    ValidateApisRequest, ValidateApisResponse, ValidateDataModelRequest,
    ValidateDataModelResponse, ValidateDeepDivesRequest, ValidateDeepDivesResponse,
    ValidateDetailedDiagramRequest, ValidateDetailedDiagramResponse, ValidateDiagramRequest,
    ValidateDiagramResponse, ValidateEstimationRequest, ValidateEstimationResponse,
    ValidateFlowRequest, ValidateFlowResponse, ValidateRequest, ValidateResponse,
};

pub async fn validate(
    State(state): State<AppState>,
    Json(req): Json<ValidateRequest>,
) -> Json<ValidateResponse> {
    let review = state
        .reviewer
        .review_requirements(&req.topic, &req.functional_reqs, &req.non_functional_reqs)
        .await;
    Json(review.into())
}

pub async fn validate_apis(
    State(state): State<AppState>,
    Json(req): Json<ValidateApisRequest>,
) -> Json<ValidateApisResponse> {
    let review = state.reviewer.review_apis(&req.topic, &req.apis).await;
    Json(review.into())
}

pub async fn validate_diagram(
    State(state): State<AppState>,
    Json(req): Json<ValidateDiagramRequest>,
) -> Json<ValidateDiagramResponse> {
    let review = state
        .reviewer
        .review_diagram(&req.topic, &req.diagram_xml)
        .await;
    Json(review.into())
}

pub async fn validate_estimation(
    State(state): State<AppState>,
    Json(req): Json<ValidateEstimationRequest>,
) -> Json<ValidateEstimationResponse> {
    let review = state
        .reviewer
        .review_estimation(&req.topic, &req.estimations)
        .await;
    Json(review.into())
}

pub async fn validate_data_model(
    State(state): State<AppState>,
    Json(req): Json<ValidateDataModelRequest>,
) -> Json<ValidateDataModelResponse> {
    let review = state
        .reviewer
        .review_data_model(&req.topic, &req.data_model, &req.api_design)
        .await;
    Json(review.into())
}

pub async fn validate_flow(
    State(state): State<AppState>,
    Json(req): Json<ValidateFlowRequest>,
) -> Json<ValidateFlowResponse> {
    let review = state
        .reviewer
        .review_flow(&req.topic, &req.flow_summary, &req.diagram_xml)
        .await;
    Json(review.into())
}

pub async fn validate_deep_dives(
    State(state): State<AppState>,
    Json(req): Json<ValidateDeepDivesRequest>,
) -> Json<ValidateDeepDivesResponse> {
    let entries: Vec<_> = req.deep_dives.into_iter().map(Into::into).collect();
    let review = state.reviewer.review_deep_dives(&req.topic, &entries).await;
    Json(review.into())
}

pub async fn validate_detailed_diagram(
    State(state): State<AppState>,
    Json(req): Json<ValidateDetailedDiagramRequest>,
) -> Json<ValidateDetailedDiagramResponse> {
    let (topic, diagram_xml, context) = req.into_parts();
    let review = state
        .reviewer
        .review_detailed_diagram(&topic, &diagram_xml, &context)
        .await;
    Json(review.into())
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
