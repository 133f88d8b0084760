use anyhow::anyhow;
use log::{error, info, warn};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::api::SpoonacularClient;
use super::filters::Filters;
use super::prompt::build_prompt;
use super::search::SearchParams;
use crate::providers::traits::CompletionProvider;

pub const FALLBACK_SUGGESTION: &str = "AI recipe idea could not be generated at this time.";

/// Outcome of the AI branch.
#[derive(Debug, Clone, PartialEq)]
pub enum Suggestion {
    Generated(String),
    Unavailable,
}

impl Suggestion {
    pub fn into_text(self) -> String {
        match self {
            Suggestion::Generated(text) => text,
            Suggestion::Unavailable => FALLBACK_SUGGESTION.to_string(),
        }
    }
}

/// Outcome of the recipe-search branch.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeLookup {
    Matched(Value),
    NoMatch,
    Failed,
}

impl RecipeLookup {
    pub fn into_data(self) -> Option<Value> {
        match self {
            RecipeLookup::Matched(data) => Some(data),
            RecipeLookup::NoMatch | RecipeLookup::Failed => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub suggestion: Suggestion,
    pub recipe: RecipeLookup,
}

/// Runs the AI and recipe-search branches for one request.
#[derive(Clone)]
pub struct KitchenAssistant {
    provider: Arc<dyn CompletionProvider>,
    spoonacular: Arc<SpoonacularClient>,
    timeout: Duration,
}

impl KitchenAssistant {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        spoonacular: SpoonacularClient,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            spoonacular: Arc::new(spoonacular),
            timeout,
        }
    }

    pub fn provider(&self) -> &Arc<dyn CompletionProvider> {
        &self.provider
    }

    pub async fn recommend(&self, ingredients: &[String], filters: &Filters) -> Recommendation {
        let (suggestion, recipe) = tokio::join!(
            self.suggest(ingredients, filters),
            self.find_recipe(ingredients, filters)
        );

        Recommendation { suggestion, recipe }
    }

    pub async fn suggest(&self, ingredients: &[String], filters: &Filters) -> Suggestion {
        let prompt = build_prompt(ingredients, filters);

        info!("Calling {} for a recipe idea...", self.provider.name());
        match within(self.timeout, self.provider.complete(&prompt)).await {
            Ok(text) => {
                info!("{} response received.", self.provider.name());
                Suggestion::Generated(text)
            }
            Err(e) => {
                error!("Error calling {}: {:#}", self.provider.name(), e);
                Suggestion::Unavailable
            }
        }
    }

    pub async fn find_recipe(&self, ingredients: &[String], filters: &Filters) -> RecipeLookup {
        let params = SearchParams::from_request(ingredients, filters);

        let matches = match within(self.timeout, self.spoonacular.find_by_ingredients(&params)).await {
            Ok(matches) => matches,
            Err(e) => {
                error!("Error calling Spoonacular search: {:#}", e);
                return RecipeLookup::Failed;
            }
        };

        let Some(top) = matches.first() else {
            warn!("No Spoonacular recipes found matching ingredients.");
            return RecipeLookup::NoMatch;
        };

        info!("Found Spoonacular recipe {} ('{}'). Fetching details...", top.id, top.title);
        match within(self.timeout, self.spoonacular.recipe_information(top.id)).await {
            Ok(details) => {
                info!("Spoonacular details received.");
                RecipeLookup::Matched(details)
            }
            Err(e) => {
                error!("Error fetching Spoonacular recipe {}: {:#}", top.id, e);
                RecipeLookup::Failed
            }
        }
    }
}

/// Awaits `call` for at most `limit`; running out of time is an ordinary failure.
async fn within<T, E, F>(limit: Duration, call: F) -> anyhow::Result<T>
where
    F: Future<Output = Result<T, E>>,
    E: Into<anyhow::Error>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => Err(anyhow!("timed out after {:?}", limit)),
    }
}
