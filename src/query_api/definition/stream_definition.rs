// SPDX-License-Identifier: MIT OR Apache-2.0

// src/query_api/definition/stream_definition.rs
use crate::query_api::definition::attribute::{Attribute, Type as AttributeType};

/// Defines a stream with a unique ID and an ordered list of attributes.
///
/// The selector itself only works with positions; a definition is what lets a
/// query plan refer to attributes by name.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct StreamDefinition {
    pub id: String,
    pub attribute_list: Vec<Attribute>,
}

impl StreamDefinition {
    pub fn new(id: String) -> Self {
        StreamDefinition {
            id,
            attribute_list: Vec::new(),
        }
    }

    pub fn attribute(mut self, attribute_name: String, attribute_type: AttributeType) -> Self {
        if self
            .attribute_list
            .iter()
            .any(|attr| attr.get_name() == &attribute_name)
        {
            log::warn!(
                "Duplicate attribute '{}' in stream definition '{}'",
                attribute_name,
                self.id
            );
        }
        self.attribute_list
            .push(Attribute::new(attribute_name, attribute_type));
        self
    }

    pub fn get_attribute_list(&self) -> &[Attribute] {
        &self.attribute_list
    }

    /// Position of the first attribute called `name`.
    pub fn get_attribute_position(&self, name: &str) -> Option<usize> {
        self.attribute_list
            .iter()
            .position(|attr| attr.get_name() == name)
    }

    pub fn get_attribute_type(&self, name: &str) -> Option<AttributeType> {
        self.attribute_list
            .iter()
            .find(|attr| attr.get_name() == name)
            .map(|attr| attr.get_type())
    }
}
