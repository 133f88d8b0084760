use super::filters::Filters;

/// Query for Spoonacular's find-by-ingredients endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub ingredients: String,
    pub number: u32,
    /// 1 maximizes used ingredients, 2 minimizes missing ones.
    pub ranking: u8,
    pub ignore_pantry: bool,
    pub max_ready_time: Option<u32>,
    pub diet: Option<&'static str>,
}

impl SearchParams {
    pub fn from_request(ingredients: &[String], filters: &Filters) -> Self {
        Self {
            ingredients: ingredients.join(","),
            number: 1,
            ranking: 1,
            ignore_pantry: true,
            max_ready_time: filters.max_ready_time(),
            diet: filters.diet(),
        }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("ingredients", self.ingredients.clone()),
            ("number", self.number.to_string()),
            ("ranking", self.ranking.to_string()),
            ("ignorePantry", self.ignore_pantry.to_string()),
        ];

        if let Some(minutes) = self.max_ready_time {
            params.push(("maxReadyTime", minutes.to_string()));
        }
        if let Some(diet) = self.diet {
            params.push(("diet", diet.to_string()));
        }

        params
    }
}
