use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Sentinel used by the time and mood pickers for "no preference".
pub const NO_LIMIT: &str = "No limit";
/// Sentinel used by the type picker for "no preference".
pub const ANYTHING: &str = "Anything";

/// User preferences sent alongside the ingredient list.
///
/// Every field is optional; a missing field, a non-string value, an empty
/// string and the `"No limit"` / `"Anything"` sentinels all mean "no preference".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default, deserialize_with = "string_or_none")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub mood: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "string_or_none")]
    pub dish_type: Option<String>,
}

impl Filters {
    pub fn time(&self) -> Option<&str> {
        preference(self.time.as_deref())
    }

    pub fn mood(&self) -> Option<&str> {
        preference(self.mood.as_deref())
    }

    pub fn dish_type(&self) -> Option<&str> {
        preference(self.dish_type.as_deref())
    }

    /// Ready-time ceiling in minutes for the recognised time buckets.
    pub fn max_ready_time(&self) -> Option<u32> {
        match self.time()? {
            "<10 mins" => Some(10),
            "<30 mins" => Some(30),
            _ => None,
        }
    }

    /// Dietary restriction understood by the recipe search.
    pub fn diet(&self) -> Option<&'static str> {
        match self.dish_type()? {
            "Veg" => Some("vegetarian"),
            _ => None,
        }
    }
}

/// Reads a request's `filters`; anything that is not an object means no filters.
pub fn filters_or_default<'de, D>(deserializer: D) -> Result<Filters, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

pub fn is_sentinel(value: &str) -> bool {
    value.eq_ignore_ascii_case(NO_LIMIT) || value.eq_ignore_ascii_case(ANYTHING)
}

fn preference(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !is_sentinel(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(time: &str, mood: &str, dish_type: &str) -> Filters {
        Filters {
            time: Some(time.to_string()),
            mood: Some(mood.to_string()),
            dish_type: Some(dish_type.to_string()),
        }
    }

    #[test]
    fn test_sentinels_mean_no_preference() {
        let f = filters("No limit", "No limit", "Anything");
        assert_eq!(f.time(), None);
        assert_eq!(f.mood(), None);
        assert_eq!(f.dish_type(), None);
        assert_eq!(f.max_ready_time(), None);
        assert_eq!(f.diet(), None);

        let f = filters("no LIMIT", "NO LIMIT", "anything");
        assert_eq!(f.time(), None);
        assert_eq!(f.mood(), None);
        assert_eq!(f.dish_type(), None);
    }

    #[test]
    fn test_time_buckets() {
        assert_eq!(filters("<10 mins", "", "").max_ready_time(), Some(10));
        assert_eq!(filters("<30 mins", "", "").max_ready_time(), Some(30));
        assert_eq!(filters("<60 mins", "", "").max_ready_time(), None);
        assert_eq!(Filters::default().max_ready_time(), None);
    }

    #[test]
    fn test_only_veg_maps_to_diet() {
        assert_eq!(filters("", "", "Veg").diet(), Some("vegetarian"));
        assert_eq!(filters("", "", "Non-Veg").diet(), None);
        assert_eq!(filters("", "", "Vegan").diet(), None);
    }

    #[test]
    fn test_deserialize_partial_and_unknown_fields() {
        let f: Filters =
            serde_json::from_str(r#"{"type": "Veg", "spice": "hot", "mood": null}"#).unwrap();
        assert_eq!(f.dish_type(), Some("Veg"));
        assert_eq!(f.mood(), None);
        assert_eq!(f.time(), None);
    }

    #[test]
    fn test_non_string_values_mean_no_preference() {
        let f: Filters =
            serde_json::from_str(r#"{"time": 10, "mood": true, "type": ["Veg"]}"#).unwrap();
        assert_eq!(f, Filters::default());
    }

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(default, deserialize_with = "filters_or_default")]
        filters: Filters,
    }

    #[test]
    fn test_non_object_filters_are_ignored() {
        for raw in [r#"{"filters": "quick"}"#, r#"{"filters": 3}"#, r#"{"filters": null}"#, "{}"] {
            let wrapper: Wrapper = serde_json::from_str(raw).unwrap();
            assert_eq!(wrapper.filters, Filters::default(), "{}", raw);
        }

        let wrapper: Wrapper =
            serde_json::from_str(r#"{"filters": {"time": "<10 mins", "mood": 5}}"#).unwrap();
        assert_eq!(wrapper.filters.max_ready_time(), Some(10));
        assert_eq!(wrapper.filters.mood(), None);
    }
}
