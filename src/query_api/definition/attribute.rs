// SPDX-License-Identifier: MIT OR Apache-2.0

// src/query_api/definition/attribute.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Data type of a stream or output attribute.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    STRING,
    INT,
    LONG,
    FLOAT,
    DOUBLE,
    BOOL,
    #[default]
    OBJECT,
}

impl Type {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::INT | Type::LONG | Type::FLOAT | Type::DOUBLE)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::STRING => "STRING",
            Type::INT => "INT",
            Type::LONG => "LONG",
            Type::FLOAT => "FLOAT",
            Type::DOUBLE => "DOUBLE",
            Type::BOOL => "BOOL",
            Type::OBJECT => "OBJECT",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: Type,
}

impl Attribute {
    pub fn new(name: String, attribute_type: Type) -> Self {
        Self {
            name,
            attribute_type,
        }
    }

    pub fn get_name(&self) -> &String {
        &self.name
    }

    pub fn get_type(&self) -> Type {
        self.attribute_type
    }
}
