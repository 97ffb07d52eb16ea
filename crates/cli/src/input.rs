//! Command-line argument classification

use anyhow::{Context, Result};
use domator::{args_from_json, BuildArg};
use serde_json::Value;

/// A positional argument as typed by the user
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Selector(String),
    Json(Value),
}

impl Input {
    /// Positionals starting with `{` or `[` are JSON, anything else a selector
    pub fn classify(raw: &str) -> Result<Self> {
        if raw.starts_with('{') || raw.starts_with('[') {
            let value = serde_json::from_str(raw)
                .with_context(|| format!("invalid JSON argument `{raw}`"))?;
            Ok(Input::Json(value))
        } else {
            Ok(Input::Selector(raw.to_string()))
        }
    }
}

/// Turn positionals into build arguments. A JSON object is an attribute
/// mapping, a JSON array a child list.
pub fn build_args(inputs: Vec<Input>) -> Result<Vec<BuildArg<u32>>> {
    let mut args = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.into_iter().enumerate() {
        match input {
            Input::Selector(selector) => args.push(BuildArg::Selector(selector)),
            Input::Json(value) => {
                let decoded = args_from_json(&Value::Array(vec![value]))
                    .with_context(|| format!("argument {index}"))?;
                args.extend(decoded);
            }
        }
    }
    Ok(args)
}

/// Read a JSON array of build arguments from a file body
pub fn file_args(body: &str) -> Result<Vec<BuildArg<u32>>> {
    let value: Value = serde_json::from_str(body).context("file is not valid JSON")?;
    Ok(args_from_json(&value)?)
}
