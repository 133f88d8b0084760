use std::env;

pub const SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com";

#[derive(Debug, Clone)]
pub struct FoodConfig {
    pub spoonacular_api_key: Option<String>,
    pub spoonacular_base_url: String,
}

impl FoodConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            spoonacular_api_key: var("SPOONACULAR_API_KEY"),
            spoonacular_base_url: var("SPOONACULAR_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| SPOONACULAR_BASE_URL.to_string()),
        }
    }
}
