//! Request and response bodies, camelCase to match the web frontend.

use serde::{Deserialize, Serialize};

use sdmentor_core::types::{
    ApiDesignEntry, ApisReview, DataModelReview, DeepDiveEntry, DeepDivesReview,
    DetailedDiagramContext, DetailedDiagramReview, DiagramReview, EstimationReview, FlowReview,
    RequirementLists, RequirementsReview,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub topic: String,
    #[serde(default)]
    pub functional_reqs: Vec<String>,
    #[serde(default)]
    pub non_functional_reqs: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub functional: Vec<String>,
    pub non_functional: Vec<String>,
    pub functional_matched: Vec<String>,
    pub functional_missed: Vec<String>,
    pub non_functional_matched: Vec<String>,
    pub non_functional_missed: Vec<String>,
}

impl From<RequirementsReview> for ValidateResponse {
    fn from(review: RequirementsReview) -> Self {
        Self {
            functional: review.functional,
            non_functional: review.non_functional,
            functional_matched: review.functional_coverage.matched,
            functional_missed: review.functional_coverage.missed,
            non_functional_matched: review.non_functional_coverage.matched,
            non_functional_missed: review.non_functional_coverage.missed,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateApisRequest {
    pub topic: String,
    #[serde(default)]
    pub apis: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateApisResponse {
    pub apis: Vec<String>,
    pub matched: Vec<String>,
    pub missed: Vec<String>,
}

impl From<ApisReview> for ValidateApisResponse {
    fn from(review: ApisReview) -> Self {
        Self {
            apis: review.apis,
            matched: review.coverage.matched,
            missed: review.coverage.missed,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDiagramRequest {
    pub topic: String,
    #[serde(default)]
    pub diagram_xml: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDiagramResponse {
    pub elements: Vec<String>,
    pub matched: Vec<String>,
    pub missed: Vec<String>,
    pub suggested_diagram: String,
    pub suggested_diagram_png: String,
}

impl From<DiagramReview> for ValidateDiagramResponse {
    fn from(review: DiagramReview) -> Self {
        Self {
            elements: review.elements,
            matched: review.coverage.matched,
            missed: review.coverage.missed,
            suggested_diagram: review.suggested_diagram,
            suggested_diagram_png: review.suggested_diagram_png,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateEstimationRequest {
    pub topic: String,
    #[serde(default)]
    pub estimations: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineFeedbackBody {
    pub user_line: String,
    pub reasonable: bool,
    pub comment: String,
}

impl From<sdmentor_core::types::LineFeedback> for LineFeedbackBody {
    fn from(feedback: sdmentor_core::types::LineFeedback) -> Self {
        Self {
            user_line: feedback.user_line,
            reasonable: feedback.reasonable,
            comment: feedback.comment,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateEstimationResponse {
    pub elements: Vec<String>,
    pub matched: Vec<String>,
    pub missed: Vec<String>,
    pub calculation_feedback: Vec<LineFeedbackBody>,
}

impl From<EstimationReview> for ValidateEstimationResponse {
    fn from(review: EstimationReview) -> Self {
        Self {
            elements: review.elements,
            matched: review.coverage.matched,
            missed: review.coverage.missed,
            calculation_feedback: review
                .calculation_feedback
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDataModelRequest {
    pub topic: String,
    #[serde(default)]
    pub data_model: Vec<String>,
    #[serde(default)]
    pub api_design: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDataModelResponse {
    pub elements: Vec<String>,
    pub matched: Vec<String>,
    pub missed: Vec<String>,
    pub feedback: Vec<LineFeedbackBody>,
    pub suggested_missing_tables: Vec<String>,
}

impl From<DataModelReview> for ValidateDataModelResponse {
    fn from(review: DataModelReview) -> Self {
        Self {
            elements: review.elements,
            matched: review.coverage.matched,
            missed: review.coverage.missed,
            feedback: review.feedback.into_iter().map(Into::into).collect(),
            suggested_missing_tables: review.suggested_missing_tables,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateFlowRequest {
    pub topic: String,
    #[serde(default)]
    pub flow_summary: String,
    #[serde(default)]
    pub diagram_xml: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateFlowResponse {
    pub correct: bool,
    pub feedback: String,
    pub improvements: String,
}

impl From<FlowReview> for ValidateFlowResponse {
    fn from(review: FlowReview) -> Self {
        Self {
            correct: review.correct,
            feedback: review.feedback,
            improvements: review.improvements,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepDiveBody {
    pub topic: String,
    #[serde(default)]
    pub user_summary: String,
}

impl From<DeepDiveBody> for DeepDiveEntry {
    fn from(body: DeepDiveBody) -> Self {
        Self {
            topic: body.topic,
            user_summary: body.user_summary,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDeepDivesRequest {
    pub topic: String,
    #[serde(default)]
    pub deep_dives: Vec<DeepDiveBody>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepDiveItemBody {
    pub topic: String,
    pub suggested_summary: String,
    pub feedback: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDeepDivesResponse {
    pub items: Vec<DeepDiveItemBody>,
    pub suggested_missing_topics: Vec<String>,
}

impl From<DeepDivesReview> for ValidateDeepDivesResponse {
    fn from(review: DeepDivesReview) -> Self {
        Self {
            items: review
                .items
                .into_iter()
                .map(|item| DeepDiveItemBody {
                    topic: item.topic,
                    suggested_summary: item.suggested_summary,
                    feedback: item.feedback,
                })
                .collect(),
            suggested_missing_topics: review.suggested_missing_topics,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementsBody {
    #[serde(default)]
    pub functional: Vec<String>,
    #[serde(default)]
    pub non_functional: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDesignRowBody {
    pub api: String,
    #[serde(default)]
    pub request: String,
    #[serde(default)]
    pub response: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDetailedDiagramRequest {
    pub topic: String,
    #[serde(default)]
    pub diagram_xml: String,
    #[serde(default)]
    pub requirements: Option<RequirementsBody>,
    #[serde(default)]
    pub api_design: Vec<ApiDesignRowBody>,
    #[serde(default)]
    pub data_model: Vec<String>,
    #[serde(default)]
    pub high_level_diagram_xml: String,
    #[serde(default)]
    pub end_to_end_flow: String,
    #[serde(default)]
    pub deep_dives: Vec<DeepDiveBody>,
}

impl ValidateDetailedDiagramRequest {
    /// Split into the diagram XML under review and the surrounding
    /// interview context.
    pub fn into_parts(self) -> (String, String, DetailedDiagramContext) {
        let context = DetailedDiagramContext {
            requirements: self.requirements.map(|reqs| RequirementLists {
                functional: reqs.functional,
                non_functional: reqs.non_functional,
            }),
            api_design: self
                .api_design
                .into_iter()
                .map(|row| ApiDesignEntry {
                    api: row.api,
                    request: row.request,
                    response: row.response,
                })
                .collect(),
            data_model: self.data_model,
            high_level_diagram_xml: self.high_level_diagram_xml,
            end_to_end_flow: self.end_to_end_flow,
            deep_dives: self.deep_dives.into_iter().map(Into::into).collect(),
        };
        (self.topic, self.diagram_xml, context)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDetailedDiagramResponse {
    pub feedback: String,
    pub improvements: String,
    pub suggested_diagram: String,
    pub suggested_diagram_png: String,
}

impl From<DetailedDiagramReview> for ValidateDetailedDiagramResponse {
    fn from(review: DetailedDiagramReview) -> Self {
        Self {
            feedback: review.feedback,
            improvements: review.improvements,
            suggested_diagram: review.suggested_diagram,
            suggested_diagram_png: review.suggested_diagram_png,
        }
    }
}
