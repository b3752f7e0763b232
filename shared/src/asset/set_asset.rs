use std::{fs, path::Path, sync::Arc};

use log::{debug, info};
use serde_json::{Map, Value};

use crate::{AttributeDef, AttributeSetSchema, MetaAttributeRegistry, Name, SchemaError};

use super::error::AssetError;

const DEFAULT_CATEGORY: &str = "Attributes";

/// An attribute set described as data, as authored in a JSON asset.
///
/// ```json
/// {
///   "name": "Primary",
///   "attributes": [
///     { "name": "Health", "metadata": { "ClampMin": 0, "ClampMax": 100 } },
///     { "name": "Stamina", "metadata": { "SkipOnRep": "yes" } }
///   ]
/// }
/// ```
#[derive(Clone, Debug)]
pub struct AttributeSetAsset {
    name: Name,
    class_name: String,
    attributes: Vec<AttributeDef>,
}

impl AttributeSetAsset {
    /// Parses an asset. `default_name` is used when the asset does not name
    /// the set itself.
    pub fn from_json_str(json: &str, default_name: &str) -> Result<Self, AssetError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value, default_name)
    }

    /// Reads and parses an asset file, named after the file stem unless the
    /// asset names itself
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|error| AssetError::Io {
            path: path.display().to_string(),
            reason: error.to_string(),
        })?;
        let default_name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();

        debug!("AttributeSetAsset: Loading {}", path.display());
        Self::from_json_str(&json, default_name)
    }

    pub fn from_value(value: &Value, default_name: &str) -> Result<Self, AssetError> {
        let root = value.as_object().ok_or_else(|| AssetError::NotAnObject {
            context: "the attribute set asset root".to_string(),
        })?;

        let name = field(root, &["name", "AttributeSetName"])
            .and_then(non_empty_string)
            .unwrap_or_else(|| default_name.to_string());
        let class_name = field(root, &["className", "ClassName"])
            .and_then(non_empty_string)
            .unwrap_or_else(|| format!("U{}AttributeSet", name));

        let entries = field(root, &["attributes", "Attributes"])
            .and_then(Value::as_array)
            .ok_or_else(|| AssetError::MissingAttributes { set: name.clone() })?;
        if entries.is_empty() {
            return Err(AssetError::EmptyAttributes { set: name });
        }

        let attributes = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| parse_attribute(&name, index, entry))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "AttributeSetAsset: Parsed '{}' with {} attributes",
            name,
            attributes.len()
        );

        Ok(Self {
            name: Name::new(name),
            class_name,
            attributes,
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The class name the asset asked for, or `U<Name>AttributeSet`
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn attributes(&self) -> &[AttributeDef] {
        &self.attributes
    }

    /// Checks every `MetaAttribute` tag names a registered meta-attribute
    pub fn validate_meta(&self, registry: &MetaAttributeRegistry) -> Result<(), AssetError> {
        for def in &self.attributes {
            let Some(key) = def.meta_attribute_key() else {
                continue;
            };
            if registry.find(key.as_str()).is_none() {
                return Err(SchemaError::UnknownMetaAttribute {
                    attribute: def.name().clone(),
                    key: key.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    pub fn into_schema(self) -> Result<Arc<AttributeSetSchema>, AssetError> {
        let schema = AttributeSetSchema::builder(self.name)
            .add_attributes(self.attributes)
            .build()?;
        Ok(schema)
    }

    /// One `Name: metadata` line per attribute
    pub fn summary(&self) -> String {
        self.attributes
            .iter()
            .map(|def| format!("{}: {}", def.name(), def.summary()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_attribute(set: &str, index: usize, entry: &Value) -> Result<AttributeDef, AssetError> {
    let object = entry.as_object().ok_or_else(|| AssetError::NotAnObject {
        context: format!("attribute entry {} of '{}'", index, set),
    })?;

    let name = field(object, &["name", "Name"])
        .and_then(non_empty_string)
        .ok_or_else(|| AssetError::MissingName {
            set: set.to_string(),
            index,
        })?;

    let empty = Map::new();
    let metadata = field(object, &["metadata", "Metadata"])
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let category = field(object, &["category", "Category"])
        .and_then(non_empty_string)
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let replicate = metadata_bool(&name, metadata, "Replicate", &["Replicate", "replicate"], true)?;
    let generate_hooks = metadata_bool(
        &name,
        metadata,
        "GenerateHooks",
        &["GenerateHooks", "generateHooks"],
        true,
    )?;
    let skip_on_rep =
        metadata_bool(&name, metadata, "SkipOnRep", &["SkipOnRep", "skipOnRep"], false)?;
    let clamp_min = metadata_float(&name, metadata, "ClampMin", &["ClampMin", "clampMin"])?;
    let clamp_max = metadata_float(&name, metadata, "ClampMax", &["ClampMax", "clampMax"])?;
    let base_value = match present(object, &["baseValue", "BaseValue"]) {
        Some(value) => {
            coerce_float(value).ok_or_else(|| invalid(&name, "BaseValue", value, "a number"))?
        }
        None => 0.0,
    };

    let mut def = AttributeDef::new(name.clone())
        .with_category(category)
        .with_base_value(base_value)
        .with_replication(replicate, !skip_on_rep)
        .with_hooks(generate_hooks)
        .try_clamp_range(clamp_min, clamp_max)?;

    if let Some(comment) = field(object, &["comment", "Comment"]).and_then(non_empty_string) {
        def = def.with_description(comment);
    }
    if let Some(key) =
        field(metadata, &["MetaAttribute", "metaAttribute"]).and_then(non_empty_string)
    {
        def = def.meta_attribute(key);
    }

    Ok(def)
}

fn field<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| object.get(*key))
}

/// Like `field`, but a JSON null counts as absent
fn present<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    field(object, keys).filter(|value| !value.is_null())
}

fn non_empty_string(value: &Value) -> Option<String> {
    let trimmed = value.as_str()?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

fn metadata_bool(
    attribute: &str,
    metadata: &Map<String, Value>,
    key: &'static str,
    aliases: &[&str],
    default: bool,
) -> Result<bool, AssetError> {
    match present(metadata, aliases) {
        Some(value) => {
            coerce_bool(value).ok_or_else(|| invalid(attribute, key, value, "a boolean"))
        }
        None => Ok(default),
    }
}

fn metadata_float(
    attribute: &str,
    metadata: &Map<String, Value>,
    key: &'static str,
    aliases: &[&str],
) -> Result<Option<f32>, AssetError> {
    match present(metadata, aliases) {
        Some(value) => coerce_float(value)
            .map(Some)
            .ok_or_else(|| invalid(attribute, key, value, "a number")),
        None => Ok(None),
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn coerce_float(value: &Value) -> Option<f32> {
    match value {
        Value::Number(number) => number.as_f64().map(|number| number as f32),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f32>().ok()
        }
        _ => None,
    }
}

fn invalid(
    attribute: &str,
    key: &'static str,
    value: &Value,
    expected: &'static str,
) -> AssetError {
    AssetError::InvalidMetadata {
        attribute: attribute.to_string(),
        key,
        value: value.to_string(),
        expected,
    }
}
