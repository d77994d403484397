//! Reading command input from a file or stdin.

use std::io::{self, Read};

use serde_json::Value;
use tracing::debug;

use crate::error::CliError;

/// Reads the whole input as text.
pub fn read_text(input: Option<String>) -> Result<String, CliError> {
    let text = match input {
        Some(path) => {
            let text = std::fs::read_to_string(&path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            debug!(%path, bytes = text.len(), "read input file");
            text
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| CliError::Read {
                    path: "stdin".into(),
                    source,
                })?;
            debug!(bytes = buffer.len(), "read input from stdin");
            buffer
        }
    };
    Ok(text)
}

/// Reads the input as a JSON value.
pub fn read_json(input: Option<String>) -> Result<Value, CliError> {
    Ok(serde_json::from_str(&read_text(input)?)?)
}
