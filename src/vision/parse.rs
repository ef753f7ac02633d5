use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One food the model believes is on the plate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedFood {
    pub food: String,
    /// Estimated portion, never negative.
    pub grams: f64,
    /// Model confidence in [0, 1].
    pub confidence: f64,
}

/// Parse the model's reply into detected foods.
///
/// The reply should be `{"items": [...]}`, but models often wrap JSON in
/// prose or code fences; the outermost `{...}` span is tried next. Anything
/// unreadable yields an empty list.
pub fn parse_detection_content(content: &str) -> Vec<DetectedFood> {
    let Some(parsed) = parse_json_object(content) else {
        return Vec::new();
    };

    let Some(items) = parsed.get("items").and_then(Value::as_array) else {
        return Vec::new();
    };

    items.iter().filter_map(parse_item).collect()
}

fn parse_json_object(content: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(content) {
        return Some(value);
    }

    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&content[start..=end]).ok()
}

fn parse_item(item: &Value) -> Option<DetectedFood> {
    let food = match item.get("food")? {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    if food.is_empty() {
        return None;
    }

    let grams = number_field(item, "grams").max(0.0);
    let confidence = number_field(item, "confidence").clamp(0.0, 1.0);

    Some(DetectedFood {
        food,
        grams,
        confidence,
    })
}

fn number_field(item: &Value, key: &str) -> f64 {
    let value = match item.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}
