use serde_json::Value;
use std::io;

/// Document piped on stdin, or None for a terminal or blank input.
///
/// JSON is tried first; anything else must be YAML.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let piped = io::read_to_string(io::stdin())?;
    let document = piped.trim();
    if document.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str(document) {
        Ok(value) => Ok(Some(value)),
        Err(json_err) => serde_yaml::from_str(document)
            .map(Some)
            .map_err(|_| format!("stdin is neither JSON nor YAML: {}", json_err).into()),
    }
}
