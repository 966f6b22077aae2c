//! Host context: declared parameters, container allocation and outputs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Names of the parameters the control declares to its host.
pub mod param {
    pub const PLACEHOLDER: &str = "PlaceHolderContent";
    pub const HEADER: &str = "headerContent";
    pub const HEADER_FONT_COLOR: &str = "headerFontColor";
    /// Declared for hosts that expose it, but the panel height is fixed.
    pub const MAX_DROPDOWN_HEIGHT: &str = "maxDropdownHeight";
    pub const FILTER_COLUMN: &str = "filterColumnLogicalName";
    pub const IDENTIFIER_COLUMN: &str = "identifierColumnLogicalName";
    pub const USER_INPUT: &str = "userInput";
    pub const ENTITY_SET: &str = "pluralTableLogicalName";
    pub const FILTER_TYPE: &str = "filterType";
    pub const DUPLICATE_MESSAGE: &str = "duplicteDetectedMessage";
    pub const NO_MATCHES_MESSAGE: &str = "noMatchesFoundMessage";
    pub const PARTIAL_MATCH_MESSAGE: &str = "partialMatchMessage";
    pub const ENVIRONMENT_URL: &str = "EnvironmentURL";
}

/// The value of one declared parameter, as the host supplies it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterValue {
    /// The raw value; `None` when the host has no value bound.
    #[serde(default)]
    pub raw: Option<String>,
}

impl ParameterValue {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }
}

/// The parameters a host passes on every lifecycle call.
///
/// Deserializes from the host's JSON form:
/// `{"filterColumnLogicalName": {"raw": "name"}, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(HashMap<String, ParameterValue>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter's raw value.
    pub fn set(&mut self, name: impl Into<String>, raw: impl Into<String>) {
        self.0.insert(name.into(), ParameterValue::new(raw));
    }

    /// Set a parameter using builder pattern.
    pub fn with(mut self, name: impl Into<String>, raw: impl Into<String>) -> Self {
        self.set(name, raw);
        self
    }

    /// The raw value of a parameter, if declared and bound.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|value| value.raw.as_deref())
    }

    /// The raw value of a parameter, or `default` when the parameter is
    /// absent, unbound or blank.
    pub fn text_or(&self, name: &str, default: &str) -> String {
        match self.raw(name) {
            Some(raw) if !raw.trim().is_empty() => raw.to_string(),
            _ => default.to_string(),
        }
    }
}

/// Everything the host hands the control on `init` and `update_view`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    /// Declared parameter values.
    #[serde(default)]
    pub parameters: Parameters,
    /// Width the host allocated to the container, once resize tracking is on.
    #[serde(default)]
    pub allocated_width: Option<f32>,
    /// Height the host allocated to the container, once resize tracking is on.
    #[serde(default)]
    pub allocated_height: Option<f32>,
}

impl Context {
    pub fn new(parameters: Parameters) -> Self {
        Self {
            parameters,
            ..Default::default()
        }
    }

    /// Set the allocated container size using builder pattern.
    pub fn with_allocated_size(mut self, width: f32, height: f32) -> Self {
        self.allocated_width = Some(width);
        self.allocated_height = Some(height);
        self
    }
}

/// Values the control exposes back to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outputs {
    /// The last confirmed non-duplicate input.
    pub user_input: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_or_defaults() {
        let mut params = Parameters::new()
            .with(param::PLACEHOLDER, "Account name")
            .with(param::HEADER, "   ");
        params.0.insert(param::FILTER_TYPE.to_string(), ParameterValue { raw: None });

        assert_eq!(params.text_or(param::PLACEHOLDER, "Column Value"), "Account name");
        assert_eq!(params.text_or(param::HEADER, "fallback"), "fallback");
        assert_eq!(params.text_or(param::FILTER_TYPE, "or"), "or");
        assert_eq!(params.text_or(param::ENTITY_SET, ""), "");
    }

    #[test]
    fn test_context_from_host_json() {
        let json = r#"{
            "parameters": {
                "filterColumnLogicalName": {"raw": "name"},
                "userInput": {"raw": null}
            },
            "allocatedWidth": 320.0
        }"#;
        let context: Context = serde_json::from_str(json).unwrap();
        assert_eq!(context.parameters.raw(param::FILTER_COLUMN), Some("name"));
        assert_eq!(context.parameters.raw(param::USER_INPUT), None);
        assert_eq!(context.allocated_width, Some(320.0));
        assert_eq!(context.allocated_height, None);
    }

    #[test]
    fn test_outputs_serialize() {
        let outputs = Outputs {
            user_input: "Acme".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&outputs).unwrap(),
            r#"{"userInput":"Acme"}"#
        );
    }
}
