//! Attribute schema declarations
//!
//! Each resource and data source declares its attributes with the flags the
//! host runtime understands: required/optional/computed, force-new,
//! sensitive, and mutual-exclusion rules. `Schema::validate` is run against
//! the desired state before any remote write.

use super::state::{AttrValue, ResourceState};
use anyhow::{bail, Result};
use std::collections::BTreeMap;

/// Attribute value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    String,
    Bool,
    Int,
    List,
}

/// Per-attribute validation hook, given the attribute name and its value.
pub type ValidatorFn = fn(&str, &AttrValue) -> Result<()>;

/// A single schema attribute.
#[derive(Clone)]
pub struct Attribute {
    pub attr_type: AttrType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub force_new: bool,
    pub sensitive: bool,
    pub conflicts_with: &'static [&'static str],
    pub description: &'static str,
    pub validator: Option<ValidatorFn>,
}

impl Attribute {
    fn new(attr_type: AttrType) -> Self {
        Self {
            attr_type,
            required: false,
            optional: false,
            computed: false,
            force_new: false,
            sensitive: false,
            conflicts_with: &[],
            description: "",
            validator: None,
        }
    }

    pub fn required_string() -> Self {
        let mut attr = Self::new(AttrType::String);
        attr.required = true;
        attr
    }

    pub fn optional_string() -> Self {
        let mut attr = Self::new(AttrType::String);
        attr.optional = true;
        attr
    }

    pub fn computed_string() -> Self {
        let mut attr = Self::new(AttrType::String);
        attr.computed = true;
        attr
    }

    pub fn computed_list() -> Self {
        let mut attr = Self::new(AttrType::List);
        attr.computed = true;
        attr
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn conflicts_with(mut self, names: &'static [&'static str]) -> Self {
        self.conflicts_with = names;
        self
    }

    pub fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn validator(mut self, validator: ValidatorFn) -> Self {
        self.validator = Some(validator);
        self
    }

    fn type_matches(&self, value: &AttrValue) -> bool {
        matches!(
            (self.attr_type, value),
            (AttrType::String, AttrValue::String(_))
                | (AttrType::Bool, AttrValue::Bool(_))
                | (AttrType::Int, AttrValue::Int(_))
                | (AttrType::List, AttrValue::List(_))
        )
    }
}

/// Declared attribute set for one resource or data source.
#[derive(Clone, Default)]
pub struct Schema {
    attributes: BTreeMap<&'static str, Attribute>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: &'static str, attribute: Attribute) -> Self {
        self.attributes.insert(name, attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes.keys().copied()
    }

    /// Validate a desired state against this schema.
    ///
    /// Rejects unknown attributes, missing required attributes, type
    /// mismatches, conflicting attributes that are both set, and anything a
    /// per-attribute validator refuses. Empty strings count as unset for
    /// requiredness and conflict purposes.
    pub fn validate(&self, state: &ResourceState) -> Result<()> {
        for name in state.attr_names() {
            if !self.attributes.contains_key(name) {
                bail!("Unknown attribute {:?}", name);
            }
        }

        for (name, attribute) in &self.attributes {
            let value = state.get(name);

            if attribute.required && !is_set(value) {
                bail!("Missing required attribute {:?}", name);
            }

            let Some(value) = value else { continue };

            if !attribute.type_matches(value) {
                bail!("Attribute {:?} has the wrong type", name);
            }

            if is_set(Some(value)) {
                for other in attribute.conflicts_with {
                    if is_set(state.get(other)) {
                        bail!("Attribute {:?} conflicts with {:?}; set only one", name, other);
                    }
                }

                if let Some(validator) = attribute.validator {
                    validator(name, value)?;
                }
            }
        }

        Ok(())
    }
}

/// Whether an attribute counts as set. Absent values and empty strings do
/// not.
fn is_set(value: Option<&AttrValue>) -> bool {
    match value {
        None => false,
        Some(AttrValue::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}
