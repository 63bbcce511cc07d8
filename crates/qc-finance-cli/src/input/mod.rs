pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Calculator input from `--input <file>` or piped stdin, in that order.
///
/// `None` means neither was supplied and the caller falls back to its
/// individual flags. Piped text may be JSON or YAML.
pub fn load<T: DeserializeOwned>(path: Option<&str>) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_structured(path)?));
    }
    match stdin::read_stdin()? {
        Some(text) => Ok(Some(parse_piped(&text)?)),
        None => Ok(None),
    }
}

fn parse_piped<T: DeserializeOwned>(text: &str) -> Result<T, Box<dyn std::error::Error>> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(json_err) => serde_yaml::from_str(text)
            .map_err(|_| format!("stdin is neither valid JSON nor YAML: {json_err}").into()),
    }
}
