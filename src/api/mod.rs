use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use validator::Validate;

use crate::config::AppConfig;
use crate::food::api::SpoonacularClient;
use crate::food::filters::filters_or_default;
use crate::food::prompt::SYSTEM_PROMPT;
use crate::food::{Filters, KitchenAssistant, RecipeLookup, Suggestion};
use crate::providers::build_provider;
use crate::providers::utils::build_http_client;

pub const LIVENESS_MESSAGE: &str = "Smart Kitchen Assistant Backend is running!";

#[derive(Clone)]
pub struct AppState {
    assistant: KitchenAssistant,
}

impl AppState {
    pub fn new(assistant: KitchenAssistant) -> Self {
        Self { assistant }
    }

    pub fn from_config(config: &AppConfig) -> reqwest::Result<Self> {
        let client = build_http_client(config.upstream_timeout)?;
        let provider = build_provider(&config.provider, SYSTEM_PROMPT.to_string(), client.clone());
        let spoonacular = SpoonacularClient::new(config.food.clone(), client);

        Ok(Self::new(KitchenAssistant::new(
            provider,
            spoonacular,
            config.upstream_timeout,
        )))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RecipeRequest {
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, deserialize_with = "filters_or_default")]
    pub filters: Filters,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub ai_suggestion: String,
    pub real_recipe_data: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    provider: String,
    model: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No ingredients provided. Please specify ingredients.")]
    NoIngredients,
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Create and configure the API router
pub fn create_api(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health_check))
        .route("/api/generate-recipe", post(generate_recipe_handler))
        .layer(cors)
        .with_state(state)
}

async fn generate_recipe_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected request body: {}", rejection.body_text());
        ApiError::InvalidBody(rejection.body_text())
    })?;

    if request.validate().is_err() {
        warn!("Request without ingredients rejected");
        return Err(ApiError::NoIngredients);
    }
    let ingredients = request.ingredients.unwrap_or_default();
    let filters = request.filters;

    info!("Received ingredients: {:?}", ingredients);
    info!("Received filters: {:?}", filters);

    let recommendation = state.assistant.recommend(&ingredients, &filters).await;

    let ai_suggestion = match recommendation.suggestion {
        Suggestion::Generated(text) => text,
        unavailable @ Suggestion::Unavailable => {
            warn!("Serving fallback AI suggestion");
            unavailable.into_text()
        }
    };
    if matches!(recommendation.recipe, RecipeLookup::Failed) {
        warn!("Serving response without recipe data");
    }
    let real_recipe_data = recommendation.recipe.into_data();

    Ok(Json(RecipeResponse {
        ai_suggestion,
        real_recipe_data,
    }))
}

async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider = state.assistant.provider();
    let model = provider
        .get_model_info()
        .await
        .unwrap_or_else(|_| "unknown".to_string());

    Json(HealthResponse {
        status: "Server is running and healthy".to_string(),
        provider: provider.name().to_string(),
        model,
    })
}
