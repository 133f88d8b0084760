use super::filters::Filters;

pub const SYSTEM_PROMPT: &str = "You are a practical culinary assistant. \
You suggest realistic home-cooking recipes built around the ingredients a cook already has, \
with a short ingredient list and clear, concise steps.";

/// One line per filter that carries a real preference.
pub fn preference_clauses(filters: &Filters) -> Vec<String> {
    let mut clauses = Vec::new();

    if let Some(time) = filters.time() {
        clauses.push(format!("Time available: {}", time));
    }
    if let Some(mood) = filters.mood() {
        clauses.push(format!("Mood: {}", mood));
    }
    if let Some(dish_type) = filters.dish_type() {
        clauses.push(format!("Dish type: {}", dish_type));
    }

    clauses
}

pub fn build_prompt(ingredients: &[String], filters: &Filters) -> String {
    let mut prompt = format!(
        "Suggest one recipe using these ingredients: {}.\n",
        ingredients.join(", ")
    );

    let clauses = preference_clauses(filters);
    if !clauses.is_empty() {
        prompt.push_str("Preferences:\n");
        for clause in &clauses {
            prompt.push_str(&format!("- {}\n", clause));
        }
    }

    prompt.push_str("Use as many of the listed ingredients as possible.\n");

    if let Some(time) = filters.time() {
        prompt.push_str(&format!(
            "The cook is short on time ({}), so favor quick techniques and few steps.\n",
            time
        ));
    }

    prompt.push_str(
        "Only propose substitutions or extra ingredients as a secondary option, \
         after making the most of what is available.\n",
    );
    prompt.push_str("Give the recipe a name, a short ingredient list and brief steps.");

    prompt
}
