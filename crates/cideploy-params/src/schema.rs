//! Template parameter schema: the `Parameters` section of a stack template.

use std::collections::BTreeMap;

use cideploy_common::error::{DeployError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Declared properties of one template parameter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParameterDescriptor {
    /// Declared parameter type, e.g. `String` or `Number`.
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    /// Declared default value, of any JSON type.
    #[serde(rename = "Default", default)]
    pub default: Option<Value>,
    /// Human-readable description.
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
}

/// Parameter name to descriptor mapping of a template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateSchema {
    parameters: BTreeMap<String, ParameterDescriptor>,
}

impl TemplateSchema {
    /// Extracts the schema from a parsed template document.
    ///
    /// A template without a `Parameters` section has an empty schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not an object or `Parameters`
    /// is not a mapping of descriptors.
    pub fn from_template(template: &Value) -> Result<Self> {
        let Some(root) = template.as_object() else {
            return Err(DeployError::Config {
                message: "template document is not a JSON object".into(),
            });
        };
        let Some(section) = root.get("Parameters") else {
            return Ok(Self::default());
        };
        let parameters = BTreeMap::<String, ParameterDescriptor>::deserialize(section)
            .map_err(|e| DeployError::Config {
                message: format!("template Parameters section is malformed: {e}"),
            })?;
        Ok(Self { parameters })
    }

    /// Returns the descriptor for a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.get(name)
    }

    /// Returns the parameter's default coerced to a string, if declared.
    #[must_use]
    pub fn default_for(&self, name: &str) -> Option<String> {
        self.parameters
            .get(name)
            .and_then(|d| d.default.as_ref())
            .map(coerce_to_string)
    }

    /// Number of declared parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns whether no parameters are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

/// Renders a JSON value the way a template default is read back.
///
/// Strings are taken verbatim and everything else uses its JSON text.
fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn schema_reads_declared_defaults() {
        let schema = TemplateSchema::from_template(&json!({
            "Parameters": {
                "InstanceType": {"Type": "String", "Default": "c5.large"},
                "Capacity": {"Type": "Number", "Default": 2},
                "Enabled": {"Default": true},
                "NoDefault": {"Type": "String"}
            }
        }))
        .expect("schema");

        assert_eq!(schema.len(), 4);
        assert_eq!(schema.default_for("InstanceType").as_deref(), Some("c5.large"));
        assert_eq!(schema.default_for("Capacity").as_deref(), Some("2"));
        assert_eq!(schema.default_for("Enabled").as_deref(), Some("true"));
        assert_eq!(schema.default_for("NoDefault"), None);
        assert_eq!(schema.default_for("Missing"), None);
    }

    #[test]
    fn null_default_counts_as_undeclared() {
        let schema =
            TemplateSchema::from_template(&json!({"Parameters": {"A": {"Default": null}}}))
                .expect("schema");
        assert_eq!(schema.default_for("A"), None);
    }

    #[test]
    fn structured_default_uses_json_text() {
        let schema =
            TemplateSchema::from_template(&json!({"Parameters": {"A": {"Default": ["x", 1]}}}))
                .expect("schema");
        assert_eq!(schema.default_for("A").as_deref(), Some(r#"["x",1]"#));
    }

    #[test]
    fn template_without_parameters_is_empty() {
        let schema = TemplateSchema::from_template(&json!({"Resources": {}})).expect("schema");
        assert!(schema.is_empty());
    }

    #[test]
    fn non_object_template_is_rejected() {
        assert!(TemplateSchema::from_template(&json!([1, 2])).is_err());
    }

    #[test]
    fn malformed_parameters_section_is_rejected() {
        assert!(TemplateSchema::from_template(&json!({"Parameters": ["A"]})).is_err());
    }

    #[test]
    fn descriptor_keeps_type_and_description() {
        let schema = TemplateSchema::from_template(&json!({
            "Parameters": {"Vpc": {"Type": "String", "Description": "VPC CIDR"}}
        }))
        .expect("schema");
        let vpc = schema.get("Vpc").expect("Vpc");
        assert_eq!(vpc.kind.as_deref(), Some("String"));
        assert_eq!(vpc.description.as_deref(), Some("VPC CIDR"));
    }
}
