pub mod api;
pub mod assistant;
pub mod config;
pub mod filters;
pub mod prompt;
pub mod search;

pub use assistant::{KitchenAssistant, RecipeLookup, Recommendation, Suggestion, FALLBACK_SUGGESTION};
pub use config::FoodConfig;
pub use filters::Filters;
