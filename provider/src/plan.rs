use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{
    error::ResourceError,
    schema::{AttributeSchema, AttributeType, ResourceSchema, join_path, present},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlanAction {
    Create,
    Update,
    Replace,
    NoOp,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannedChange<M> {
    pub action: PlanAction,
    pub planned: M,
    /// Attributes whose change forces the replacement.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replace_paths: Vec<String>,
}

impl<M: PartialEq> PlannedChange<M> {
    pub fn new(prior: Option<&M>, planned: M, replace_paths: Vec<String>) -> Self {
        let action = match prior {
            None => PlanAction::Create,
            Some(_) if !replace_paths.is_empty() => PlanAction::Replace,
            Some(prior) if *prior == planned => PlanAction::NoOp,
            Some(_) => PlanAction::Update,
        };
        Self {
            action,
            planned,
            replace_paths,
        }
    }
}

/// Validate `config`, then plan it against `prior` as a typed model.
pub fn plan_change<M>(
    schema: &ResourceSchema,
    prior: Option<&M>,
    config: &Value,
) -> Result<PlannedChange<M>, ResourceError>
where
    M: PartialEq + Serialize + DeserializeOwned,
{
    schema.validate_config(config)?;
    let prior_value = prior.map(serde_json::to_value).transpose()?;
    let (planned, replace_paths) = plan_values(schema, prior_value.as_ref(), config);
    let planned = serde_json::from_value(planned)?;
    Ok(PlannedChange::new(prior, planned, replace_paths))
}

/// Compute planned attribute values from configuration and prior state.
///
/// Configured values win. Unset attributes take their schema default, or the
/// prior state value when they are computed. When a force-new attribute changes, the plan is
/// recomputed without prior state so that computed values become unknown.
pub fn plan_values(
    schema: &ResourceSchema,
    prior: Option<&Value>,
    config: &Value,
) -> (Value, Vec<String>) {
    let empty = Map::new();
    let config = config.as_object().unwrap_or(&empty);
    let prior = prior.and_then(Value::as_object);

    let mut replace_paths = Vec::new();
    let planned = merge_object(&schema.attributes, prior, config, "", &mut replace_paths);
    if replace_paths.is_empty() {
        (Value::Object(planned), replace_paths)
    } else {
        let fresh = merge_object(&schema.attributes, None, config, "", &mut Vec::new());
        (Value::Object(fresh), replace_paths)
    }
}

fn merge_object(
    attributes: &[AttributeSchema],
    prior: Option<&Map<String, Value>>,
    config: &Map<String, Value>,
    path: &str,
    replace_paths: &mut Vec<String>,
) -> Map<String, Value> {
    let mut planned = Map::new();
    for attribute in attributes {
        let attr_path = join_path(path, attribute.name);
        let configured = present(config, attribute.name);
        let prior_value = prior.and_then(|p| present(p, attribute.name));

        let value = match (configured, &attribute.ty) {
            (Some(value), AttributeType::Block { attributes }) => {
                match first_block(value) {
                    Some(block) => {
                        let prior_block = prior_value.and_then(first_block);
                        let merged = merge_object(
                            attributes,
                            prior_block,
                            block,
                            &format!("{attr_path}.0"),
                            replace_paths,
                        );
                        Value::Array(vec![Value::Object(merged)])
                    }
                    None => Value::Null,
                }
            }
            (Some(value), _) => value.clone(),
            (None, _) => match &attribute.default {
                Some(default) => default.clone(),
                None if attribute.computed => {
                    prior_value.cloned().unwrap_or(Value::Null)
                }
                None => Value::Null,
            },
        };

        if attribute.force_new && prior.is_some() && !same_value(prior_value, &value) {
            replace_paths.push(attr_path);
        }
        planned.insert(attribute.name.to_owned(), value);
    }
    planned
}

fn first_block(value: &Value) -> Option<&Map<String, Value>> {
    value.as_array()?.first()?.as_object()
}

fn same_value(prior: Option<&Value>, planned: &Value) -> bool {
    match prior {
        Some(prior) => prior == planned,
        None => planned.is_null(),
    }
}
