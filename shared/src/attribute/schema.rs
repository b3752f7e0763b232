use std::{collections::HashMap, sync::Arc};

use log::info;

use crate::{attribute::definition::AttributeDef, MetaAttributeRegistry, Name, SchemaError};

/// Attribute indices are carried as u8 on the dirty mask
pub const MAX_ATTRIBUTES: usize = u8::MAX as usize;

/// The fixed, ordered collection of attribute definitions for one
/// AttributeSet type. Built once and shared by every entity of that type.
#[derive(Debug)]
pub struct AttributeSetSchema {
    name: Name,
    attributes: Vec<AttributeDef>,
    index_by_name: HashMap<Name, u8>,
}

impl AttributeSetSchema {
    pub fn builder(name: impl Into<Name>) -> AttributeSetSchemaBuilder {
        AttributeSetSchemaBuilder::new(name)
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn attributes(&self) -> &[AttributeDef] {
        &self.attributes
    }

    pub fn index_of(&self, name: &str) -> Option<u8> {
        self.index_by_name.get(name).copied()
    }

    pub fn get(&self, index: u8) -> Option<&AttributeDef> {
        self.attributes.get(index as usize)
    }

    pub fn find(&self, name: &str) -> Option<&AttributeDef> {
        self.index_of(name).and_then(|index| self.get(index))
    }

    /// The first attribute tagged as backing storage for the given meta key
    pub fn meta_backing_index(&self, key: &str) -> Option<u8> {
        self.attributes
            .iter()
            .position(|def| def.meta_attribute_key().map_or(false, |tag| tag == key))
            .map(|position| position as u8)
    }

    /// Checks every `meta_attribute` tag in this schema names a registered
    /// meta-attribute
    pub fn validate_meta(&self, registry: &MetaAttributeRegistry) -> Result<(), SchemaError> {
        for def in &self.attributes {
            let Some(key) = def.meta_attribute_key() else {
                continue;
            };
            if registry.find(key.as_str()).is_none() {
                return Err(SchemaError::UnknownMetaAttribute {
                    attribute: def.name().clone(),
                    key: key.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Collects attribute definitions and validates them into a schema
pub struct AttributeSetSchemaBuilder {
    name: Name,
    attributes: Vec<AttributeDef>,
}

impl AttributeSetSchemaBuilder {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn add_attribute(mut self, def: AttributeDef) -> Self {
        self.attributes.push(def);
        self
    }

    pub fn add_attributes(mut self, defs: impl IntoIterator<Item = AttributeDef>) -> Self {
        self.attributes.extend(defs);
        self
    }

    /// Validates the collected definitions.
    ///
    /// Returns an error on an empty or duplicated attribute name, or when the
    /// set holds more attributes than the dirty mask can index.
    pub fn build(self) -> Result<Arc<AttributeSetSchema>, SchemaError> {
        if self.attributes.len() > MAX_ATTRIBUTES {
            return Err(SchemaError::TooManyAttributes {
                set: self.name,
                count: self.attributes.len(),
                max: MAX_ATTRIBUTES,
            });
        }

        let mut index_by_name = HashMap::with_capacity(self.attributes.len());
        for (index, def) in self.attributes.iter().enumerate() {
            if def.name().is_none() {
                return Err(SchemaError::EmptyAttributeName { set: self.name });
            }
            if index_by_name.insert(def.name().clone(), index as u8).is_some() {
                return Err(SchemaError::DuplicateAttribute {
                    set: self.name,
                    attribute: def.name().clone(),
                });
            }
        }

        info!(
            "AttributeSetSchema: Built '{}' with {} attributes",
            self.name,
            self.attributes.len()
        );

        Ok(Arc::new(AttributeSetSchema {
            name: self.name,
            attributes: self.attributes,
            index_by_name,
        }))
    }
}
