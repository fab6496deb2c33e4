use serde_json::{Map, Number, Value};

/// Build a configuration object from submitted form fields, applying the
/// panel's coercion rules: checkbox literals become booleans and numeric
/// strings become numbers. Later fields win on duplicate names.
pub fn coerce_config<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Map<String, Value> {
    let mut config = Map::new();
    for (name, value) in fields {
        config.insert(name.to_string(), coerce_value(value));
    }
    config
}

pub fn coerce_value(raw: &str) -> Value {
    match raw {
        "on" => return Value::Bool(true),
        "off" => return Value::Bool(false),
        _ => {}
    }
    if !raw.is_empty() {
        if let Ok(int) = raw.parse::<i64>() {
            return Value::Number(int.into());
        }
        if let Ok(float) = raw.parse::<f64>() {
            // NaN and infinities have no JSON representation; keep the text.
            if let Some(number) = Number::from_f64(float) {
                return Value::Number(number);
            }
        }
    }
    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn checkbox_and_numeric_fields_are_coerced() {
        let config = coerce_config([("enabled", "on"), ("interval", "30")]);
        assert_eq!(Value::Object(config), json!({"enabled": true, "interval": 30}));
    }

    #[test]
    fn off_becomes_false() {
        assert_eq!(coerce_value("off"), Value::Bool(false));
    }

    #[test]
    fn fractional_values_stay_numeric() {
        assert_eq!(coerce_value("29.97"), json!(29.97));
    }

    #[test]
    fn plain_text_and_empty_values_stay_strings() {
        assert_eq!(coerce_value("camera0"), json!("camera0"));
        assert_eq!(coerce_value(""), json!(""));
        assert_eq!(coerce_value("NaN"), json!("NaN"));
    }

    #[test]
    fn later_duplicate_fields_win() {
        let config = coerce_config([("fps", "25"), ("fps", "30")]);
        assert_eq!(config["fps"], json!(30));
    }
}
