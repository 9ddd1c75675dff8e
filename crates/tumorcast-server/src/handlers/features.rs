//! Feature schema handler.

use axum::Json;
use tumorcast_core::{
    BENIGN_SAMPLE, DECISION_THRESHOLD, FEATURE_COUNT, FEATURE_NAMES, MALIGNANT_SAMPLE,
};

use crate::dto::{FeatureSamples, FeatureSchemaResponse};

/// GET /features - Expected input layout plus reference samples.
pub async fn schema() -> Json<FeatureSchemaResponse> {
    Json(FeatureSchemaResponse {
        count: FEATURE_COUNT,
        threshold: DECISION_THRESHOLD,
        names: &FEATURE_NAMES,
        samples: FeatureSamples {
            benign: &BENIGN_SAMPLE,
            malignant: &MALIGNANT_SAMPLE,
        },
    })
}
