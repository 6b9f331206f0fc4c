// SPDX-License-Identifier: MIT OR Apache-2.0

// src/query_api/expression/condition.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOperator {
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    Equal,
    NotEqual,
}

impl FromStr for CompareOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<" => Ok(CompareOperator::LessThan),
            ">" => Ok(CompareOperator::GreaterThan),
            "<=" => Ok(CompareOperator::LessThanEqual),
            ">=" => Ok(CompareOperator::GreaterThanEqual),
            "==" | "=" => Ok(CompareOperator::Equal),
            "!=" | "<>" => Ok(CompareOperator::NotEqual),
            other => Err(format!("Unknown compare operator '{other}'")),
        }
    }
}

impl fmt::Display for CompareOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            CompareOperator::LessThan => "<",
            CompareOperator::GreaterThan => ">",
            CompareOperator::LessThanEqual => "<=",
            CompareOperator::GreaterThanEqual => ">=",
            CompareOperator::Equal => "==",
            CompareOperator::NotEqual => "!=",
        };
        f.write_str(symbol)
    }
}
