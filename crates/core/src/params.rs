//! Pure helpers for reading typed parameters out of a `serde_json::Value`.
//!
//! A missing key or a value of the wrong type yields the default. These
//! never fail.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// JSON integers are accepted and converted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing,
/// negative, fractional, or of the wrong type.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_extracts_existing_float() {
        let params = json!({"dt": 1.15});
        assert!((param_f64(&params, "dt", 1.0) - 1.15).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_extracts_integer_as_float() {
        let params = json!({"beta": 2});
        assert!((param_f64(&params, "beta", 0.0) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_key_missing() {
        let params = json!({"other": 1.0});
        assert!((param_f64(&params, "dt", 3.0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_wrong_type() {
        let params = json!({"dt": "fast"});
        assert!((param_f64(&params, "dt", 1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_for_non_object() {
        let params = json!("not an object");
        assert!((param_f64(&params, "dt", 7.0) - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_usize_extracts_existing_integer() {
        let params = json!({"sub_steps": 8});
        assert_eq!(param_usize(&params, "sub_steps", 1), 8);
    }

    #[test]
    fn param_usize_returns_default_for_float_value() {
        let params = json!({"sub_steps": 2.5});
        assert_eq!(param_usize(&params, "sub_steps", 99), 99);
    }

    #[test]
    fn param_usize_returns_default_for_negative_integer() {
        let params = json!({"sub_steps": -1});
        assert_eq!(param_usize(&params, "sub_steps", 5), 5);
    }
}
