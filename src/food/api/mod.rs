pub mod spoonacular;

pub use spoonacular::{RecipeSummary, SpoonacularClient, SpoonacularError};
