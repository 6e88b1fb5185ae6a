use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(describe)
}

/// Same as [`from_str_with_path`], for an already parsed value.
pub fn from_value_with_path<T: DeserializeOwned>(value: &Value) -> Result<T, String> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(describe)
}

fn describe<E: std::fmt::Display>(err: serde_path_to_error::Error<E>) -> String {
    let path = err.path().to_string();
    format!("at JSON path {path} → {}", err.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Server { host: String, ports: Vec<u16> }

    #[test]
    fn error_names_the_path() {
        let err = from_value_with_path::<Server>(&json!({"host": "a", "ports": [80, "x"]})).unwrap_err();
        assert!(err.starts_with("at JSON path ports[1] →"), "{err}");
    }

    #[test]
    fn parses_text() {
        let server = from_str_with_path::<Server>(r#"{"host": "a", "ports": [80]}"#).unwrap();
        assert_eq!(server.ports, vec![80]);
    }
}
