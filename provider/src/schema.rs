//! Attribute schemas for resources and the validator that checks a
//! configuration document against them.
//!
//! Documents are `serde_json::Value` objects keyed by attribute name. A nested
//! block is a list holding at most one object.

use std::ops::RangeInclusive;

use serde::Serialize;
use serde_json::{Map, Value};
use stratus_common::types::ValidationError;

use crate::error::{AttributeError, ValidationErrors};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Int,
    Bool,
    Set {
        element: Box<AttributeType>,
    },
    /// A nested block of at most one element.
    Block {
        attributes: Vec<AttributeSchema>,
    },
}

impl AttributeType {
    pub fn string_set() -> Self {
        Self::Set {
            element: Box::new(Self::String),
        }
    }

    pub fn block(attributes: impl IntoIterator<Item = AttributeSchema>) -> Self {
        Self::Block {
            attributes: attributes.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Validator {
    IntBetween {
        min: i64,
        max: i64,
    },
    LengthBetween {
        min: usize,
        max: usize,
    },
    OneOf {
        values: &'static [&'static str],
    },
    /// Applies to the set itself rather than its elements.
    SizeAtMost {
        max: usize,
    },
    Check {
        description: &'static str,
        #[serde(skip)]
        check: fn(&str) -> Result<(), ValidationError>,
    },
    ExactlyOneOf {
        attributes: &'static [&'static str],
    },
    ConflictsWith {
        attributes: &'static [&'static str],
    },
    AlsoRequires {
        attributes: &'static [&'static str],
    },
}

impl Validator {
    pub fn int_between(range: RangeInclusive<i64>) -> Self {
        Self::IntBetween {
            min: *range.start(),
            max: *range.end(),
        }
    }

    pub fn length_between(min: usize, max: usize) -> Self {
        Self::LengthBetween { min, max }
    }

    pub fn one_of(values: &'static [&'static str]) -> Self {
        Self::OneOf { values }
    }

    pub fn check(description: &'static str, check: fn(&str) -> Result<(), ValidationError>) -> Self {
        Self::Check { description, check }
    }

    /// Check a single scalar. Set-level and cross-attribute validators are
    /// handled by the walker.
    fn check_scalar(&self, value: &Value) -> Result<(), String> {
        match self {
            Self::IntBetween { min, max } => match value.as_i64() {
                Some(n) if !(*min..=*max).contains(&n) => Err(format!(
                    "expected to be in the range ({min} - {max}), got {n}"
                )),
                _ => Ok(()),
            },
            Self::LengthBetween { min, max } => match value.as_str() {
                Some(s) if !(*min..=*max).contains(&s.chars().count()) => Err(format!(
                    "expected length to be in the range ({min} - {max}), got {}",
                    s.chars().count()
                )),
                _ => Ok(()),
            },
            Self::OneOf { values } => match value.as_str() {
                Some(s) if !values.contains(&s) => {
                    Err(format!("expected to be one of {values:?}, got {s}"))
                }
                _ => Ok(()),
            },
            Self::Check { check, .. } => match value.as_str() {
                Some(s) => check(s).map_err(|e| e.0),
                None => Ok(()),
            },
            Self::SizeAtMost { .. }
            | Self::ExactlyOneOf { .. }
            | Self::ConflictsWith { .. }
            | Self::AlsoRequires { .. } => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttributeSchema {
    pub name: &'static str,
    #[serde(flatten)]
    pub ty: AttributeType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    /// A change plans a replacement instead of an in-place update.
    pub force_new: bool,
    /// When left unset in configuration, the plan keeps the prior state value.
    pub use_state_for_unknown: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

impl AttributeSchema {
    pub fn new(name: &'static str, ty: AttributeType) -> Self {
        Self {
            name,
            ty,
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            force_new: false,
            use_state_for_unknown: false,
            default: None,
            description: None,
            validators: Vec::new(),
        }
    }

    pub fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub fn optional(self) -> Self {
        Self {
            optional: true,
            ..self
        }
    }

    pub fn computed(self) -> Self {
        Self {
            computed: true,
            ..self
        }
    }

    /// Optional and computed, keeping the prior state value when unset.
    pub fn optional_computed(self) -> Self {
        Self {
            optional: true,
            computed: true,
            use_state_for_unknown: true,
            ..self
        }
    }

    pub fn sensitive(self) -> Self {
        Self {
            sensitive: true,
            ..self
        }
    }

    pub fn force_new(self) -> Self {
        Self {
            force_new: true,
            ..self
        }
    }

    pub fn use_state_for_unknown(self) -> Self {
        Self {
            use_state_for_unknown: true,
            ..self
        }
    }

    pub fn with_default(self, default: impl Into<Value>) -> Self {
        Self {
            default: Some(default.into()),
            ..self
        }
    }

    pub fn with_description(self, description: &'static str) -> Self {
        Self {
            description: Some(description),
            ..self
        }
    }

    pub fn validate(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn is_computed_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceSchema {
    pub type_name: &'static str,
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    pub attributes: Vec<AttributeSchema>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Configuration as written: computed-only attributes must be absent.
    Config,
    /// A planned model, which may carry computed values.
    Planned,
}

impl ResourceSchema {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            version: 0,
            description: None,
            attributes: Vec::new(),
        }
    }

    pub fn with_description(self, description: &'static str) -> Self {
        Self {
            description: Some(description),
            ..self
        }
    }

    pub fn attribute(mut self, attribute: AttributeSchema) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Run every validator against a configuration document, collecting all
    /// failures.
    pub fn validate_config(&self, config: &Value) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        validate_object(&self.attributes, config, "", Mode::Config, &mut errors);
        errors.into_result()
    }

    /// Like [`Self::validate_config`], but computed attributes may be set.
    pub fn validate_planned(&self, planned: &Value) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        validate_object(&self.attributes, planned, "", Mode::Planned, &mut errors);
        errors.into_result()
    }
}

pub(crate) fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_owned()
    } else {
        format!("{parent}.{name}")
    }
}

/// Present and not null.
pub(crate) fn present<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object.get(name).filter(|v| !v.is_null())
}

fn validate_object(
    attributes: &[AttributeSchema],
    value: &Value,
    path: &str,
    mode: Mode,
    errors: &mut ValidationErrors,
) {
    let Some(object) = value.as_object() else {
        errors.push(AttributeError::new(path, "expected an object"));
        return;
    };

    for key in object.keys() {
        if !attributes.iter().any(|a| a.name == key) {
            errors.push(AttributeError::new(
                join_path(path, key),
                "unsupported argument",
            ));
        }
    }

    for attribute in attributes {
        let attr_path = join_path(path, attribute.name);
        let value = present(object, attribute.name);

        // Cross-attribute rules describe what may be written together, so
        // computed values carried into a plan are not held to them.
        if mode == Mode::Config {
            for validator in &attribute.validators {
                check_cross_attribute(
                    attribute.name,
                    validator,
                    object,
                    value.is_some(),
                    path,
                    errors,
                );
            }
        }

        match value {
            None if attribute.required => {
                errors.push(AttributeError::new(attr_path, "missing required argument"));
            }
            None => {}
            Some(_) if mode == Mode::Config && attribute.is_computed_only() => {
                errors.push(AttributeError::new(
                    attr_path,
                    "value is computed by the service and cannot be configured",
                ));
            }
            Some(value) => validate_value(attribute, &attribute.ty, value, &attr_path, mode, errors),
        }
    }
}

fn validate_value(
    attribute: &AttributeSchema,
    ty: &AttributeType,
    value: &Value,
    path: &str,
    mode: Mode,
    errors: &mut ValidationErrors,
) {
    match ty {
        AttributeType::String if !value.is_string() => {
            errors.push(AttributeError::new(path, "expected a string"));
        }
        AttributeType::Int if value.as_i64().is_none() => {
            errors.push(AttributeError::new(path, "expected a whole number"));
        }
        AttributeType::Bool if !value.is_boolean() => {
            errors.push(AttributeError::new(path, "expected a boolean"));
        }
        AttributeType::String | AttributeType::Int | AttributeType::Bool => {
            for validator in &attribute.validators {
                if let Err(message) = validator.check_scalar(value) {
                    errors.push(AttributeError::new(path, message));
                }
            }
        }
        AttributeType::Set { element } => {
            let Some(items) = value.as_array() else {
                errors.push(AttributeError::new(path, "expected a set"));
                return;
            };
            for validator in &attribute.validators {
                if let Validator::SizeAtMost { max } = validator
                    && items.len() > *max
                {
                    errors.push(AttributeError::new(
                        path,
                        format!("expected at most {max} elements, got {}", items.len()),
                    ));
                }
            }
            for (i, item) in items.iter().enumerate() {
                validate_value(attribute, element, item, &format!("{path}[{i}]"), mode, errors);
            }
        }
        AttributeType::Block { attributes } => match value.as_array().map(Vec::as_slice) {
            None => errors.push(AttributeError::new(path, "expected a list of blocks")),
            Some([]) => {}
            Some([block]) => validate_object(attributes, block, &format!("{path}.0"), mode, errors),
            Some(blocks) => errors.push(AttributeError::new(
                path,
                format!("expected at most one block, found {}", blocks.len()),
            )),
        },
    }
}

fn check_cross_attribute(
    name: &str,
    validator: &Validator,
    object: &Map<String, Value>,
    is_set: bool,
    path: &str,
    errors: &mut ValidationErrors,
) {
    match validator {
        Validator::ExactlyOneOf { attributes } => {
            let set = attributes
                .iter()
                .filter(|n| present(object, n).is_some())
                .count();
            if set != 1 {
                errors.push(AttributeError::new(
                    join_path(path, name),
                    format!(
                        "exactly one of {} must be specified, got {set}",
                        describe(path, attributes)
                    ),
                ));
            }
        }
        Validator::ConflictsWith { attributes } if is_set => {
            let conflicting: Vec<&str> = attributes
                .iter()
                .copied()
                .filter(|n| present(object, n).is_some())
                .collect();
            if !conflicting.is_empty() {
                errors.push(AttributeError::new(
                    join_path(path, name),
                    format!("conflicts with {}", describe(path, &conflicting)),
                ));
            }
        }
        Validator::AlsoRequires { attributes } if is_set => {
            let missing: Vec<&str> = attributes
                .iter()
                .copied()
                .filter(|n| present(object, n).is_none())
                .collect();
            if !missing.is_empty() {
                errors.push(AttributeError::new(
                    join_path(path, name),
                    format!("also requires {}", describe(path, &missing)),
                ));
            }
        }
        _ => {}
    }
}

fn describe(path: &str, names: &[&str]) -> String {
    names
        .iter()
        .map(|n| format!("`{}`", join_path(path, n)))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema() -> ResourceSchema {
        ResourceSchema::new("test_thing")
            .attribute(AttributeSchema::new("id", AttributeType::String).computed())
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .validate(Validator::length_between(1, 8)),
            )
            .attribute(
                AttributeSchema::new("ttl", AttributeType::Int)
                    .optional_computed()
                    .validate(Validator::int_between(1..=10)),
            )
            .attribute(
                AttributeSchema::new("modes", AttributeType::string_set())
                    .optional()
                    .validate(Validator::SizeAtMost { max: 2 })
                    .validate(Validator::one_of(&["a", "b", "c"])),
            )
            .attribute(
                AttributeSchema::new(
                    "target",
                    AttributeType::block([
                        AttributeSchema::new("arn", AttributeType::String)
                            .optional()
                            .validate(Validator::ExactlyOneOf {
                                attributes: &["arn", "app"],
                            })
                            .validate(Validator::ConflictsWith {
                                attributes: &["role"],
                            }),
                        AttributeSchema::new("app", AttributeType::String)
                            .optional()
                            .validate(Validator::AlsoRequires {
                                attributes: &["role"],
                            }),
                        AttributeSchema::new("role", AttributeType::String).optional(),
                    ]),
                )
                .optional(),
            )
    }

    fn paths(errors: ValidationErrors) -> Vec<String> {
        errors.iter().map(|e| e.path.clone()).collect()
    }

    #[test]
    fn accepts_valid_document() {
        let config = json!({
            "name": "web",
            "ttl": 5,
            "modes": ["a", "c"],
            "target": [{ "app": "x", "role": "r" }],
        });
        assert_eq!(schema().validate_config(&config), Ok(()));
    }

    #[test]
    fn null_counts_as_absent() {
        let config = json!({ "name": "web", "ttl": null, "target": null });
        assert_eq!(schema().validate_config(&config), Ok(()));
    }

    #[test]
    fn reports_every_failure() {
        let config = json!({
            "id": "assigned",
            "ttl": 11,
            "modes": ["a", "b", "z"],
            "colour": "blue",
        });
        let errors = schema().validate_config(&config).unwrap_err();
        assert_eq!(
            paths(errors),
            vec!["colour", "id", "name", "ttl", "modes", "modes[2]"]
        );
    }

    #[test]
    fn planned_documents_may_carry_computed_values() {
        let planned = json!({ "id": "assigned", "name": "web" });
        assert!(schema().validate_config(&planned).is_err());
        assert_eq!(schema().validate_planned(&planned), Ok(()));
    }

    #[test]
    fn block_cross_attribute_rules() {
        let neither = json!({ "name": "web", "target": [{ "role": "r" }] });
        let errors = schema().validate_config(&neither).unwrap_err();
        assert_eq!(paths(errors), vec!["target.0.arn"]);

        let conflicting = json!({ "name": "web", "target": [{ "arn": "x", "role": "r" }] });
        let errors = schema().validate_config(&conflicting).unwrap_err();
        assert_eq!(errors.0[0].message, "conflicts with `target.0.role`");

        let missing_role = json!({ "name": "web", "target": [{ "app": "x" }] });
        let errors = schema().validate_config(&missing_role).unwrap_err();
        assert_eq!(errors.0[0].message, "also requires `target.0.role`");
    }

    #[test]
    fn planned_documents_skip_cross_attribute_rules() {
        let planned = json!({
            "id": "assigned",
            "name": "web",
            "target": [{ "arn": "x", "role": "assigned-by-service" }],
        });
        assert!(schema().validate_config(&planned).is_err());
        assert_eq!(schema().validate_planned(&planned), Ok(()));
    }

    #[test]
    fn block_allows_at_most_one_element() {
        let config = json!({ "name": "web", "target": [{ "app": "x", "role": "r" }, { "arn": "y" }] });
        let errors = schema().validate_config(&config).unwrap_err();
        assert_eq!(errors.0[0].message, "expected at most one block, found 2");
    }

    #[test]
    fn type_mismatches() {
        let config = json!({ "name": 3, "ttl": "soon", "modes": "a" });
        let errors = schema().validate_config(&config).unwrap_err();
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["expected a string", "expected a whole number", "expected a set"]
        );
    }

    #[test]
    fn schema_serializes_for_display() {
        let json = serde_json::to_value(schema()).unwrap();
        assert_eq!(json["type_name"], "test_thing");
        assert_eq!(json["attributes"][1]["name"], "name");
        assert_eq!(json["attributes"][1]["type"], "string");
        assert_eq!(json["attributes"][1]["validators"][0]["kind"], "length_between");
        assert_eq!(json["attributes"][3]["element"]["type"], "string");
    }
}
