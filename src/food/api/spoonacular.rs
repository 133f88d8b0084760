use log::info;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::food::config::FoodConfig;
use crate::food::search::SearchParams;

#[derive(Error, Debug)]
pub enum SpoonacularError {
    #[error("SPOONACULAR_API_KEY is not configured")]
    MissingApiKey,
    #[error("Failed to send request: {0}")]
    Request(#[source] reqwest::Error),
    #[error("API request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Failed to parse response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// One entry of a find-by-ingredients result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub image: Option<String>,
    pub used_ingredient_count: Option<u32>,
    pub missed_ingredient_count: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct SpoonacularClient {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl SpoonacularClient {
    pub fn new(config: FoodConfig, client: Client) -> Self {
        Self {
            api_key: config.spoonacular_api_key,
            base_url: config.spoonacular_base_url,
            client,
        }
    }

    fn api_key(&self) -> Result<&str, SpoonacularError> {
        self.api_key.as_deref().ok_or(SpoonacularError::MissingApiKey)
    }

    pub async fn find_by_ingredients(
        &self,
        params: &SearchParams,
    ) -> Result<Vec<RecipeSummary>, SpoonacularError> {
        let api_key = self.api_key()?;
        let url = format!("{}/recipes/findByIngredients", self.base_url);

        let mut query = params.to_query();
        query.push(("apiKey", api_key.to_string()));

        info!("Calling Spoonacular findByIngredients for '{}'", params.ingredients);
        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(SpoonacularError::Request)?;

        Self::decode(response).await
    }

    /// Full recipe information, nutrition included, passed through untouched.
    pub async fn recipe_information(&self, id: i64) -> Result<Value, SpoonacularError> {
        let api_key = self.api_key()?;
        let url = format!("{}/recipes/{}/information", self.base_url, id);

        info!("Fetching Spoonacular details for recipe {}", id);
        let response = self
            .client
            .get(&url)
            .query(&[("includeNutrition", "true"), ("apiKey", api_key)])
            .send()
            .await
            .map_err(SpoonacularError::Request)?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SpoonacularError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpoonacularError::Status { status, body });
        }

        response.json().await.map_err(SpoonacularError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_search_result() {
        let raw = r#"[{
            "id": 716429,
            "title": "Pasta with Garlic, Scallions, Cauliflower & Breadcrumbs",
            "image": "https://img.spoonacular.com/recipes/716429-312x231.jpg",
            "usedIngredientCount": 3,
            "missedIngredientCount": 1,
            "likes": 209
        }]"#;
        let summaries: Vec<RecipeSummary> = serde_json::from_str(raw).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, 716429);
        assert_eq!(summaries[0].used_ingredient_count, Some(3));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let client = SpoonacularClient::new(
            FoodConfig {
                spoonacular_api_key: None,
                spoonacular_base_url: "http://127.0.0.1:9".to_string(),
            },
            Client::new(),
        );
        let params = SearchParams::from_request(&["egg".to_string()], &Default::default());
        let err = client.find_by_ingredients(&params).await.unwrap_err();
        assert!(matches!(err, SpoonacularError::MissingApiKey));
    }
}
