/*
 *
 *  * Copyright (c) 2025 Couchbase, Inc.
 *  *
 *  * Licensed under the Apache License, Version 2.0 (the "License");
 *  * you may not use this file except in compliance with the License.
 *  * You may obtain a copy of the License at
 *  *
 *  *    http://www.apache.org/licenses/LICENSE-2.0
 *  *
 *  * Unless required by applicable law or agreed to in writing, software
 *  * distributed under the License is distributed on an "AS IS" BASIS,
 *  * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  * See the License for the specific language governing permissions and
 *  * limitations under the License.
 *
 */

//! Helpers for checking what a deployment returned against what a workflow
//! expected.

use crate::management::search::definition::VectorIndexDefinition;
use crate::management::search::index::{IndexDefinition, IndexField};
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// Scores from different deployments of the same data set differ in the
/// last few decimal places.
pub const DEFAULT_SCORE_TOLERANCE: f64 = 1e-6;

const SCORE_KEY: &str = "score";

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpectation {
    pub name: String,
    pub fields: Vec<IndexField>,
}

impl IndexExpectation {
    pub fn new(name: impl Into<String>, fields: Vec<IndexField>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn from_definition(name: impl Into<String>, definition: &VectorIndexDefinition) -> Self {
        Self::new(name, definition.fields().to_vec())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub path: String,
    pub expected: String,
    pub actual: String,
}

impl Mismatch {
    fn new(path: impl Into<String>, expected: impl Display, actual: impl Display) -> Self {
        Self {
            path: path.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: expected {} but got {}",
            self.path, self.expected, self.actual
        )
    }
}

/// Compares a projected index against an expectation. Fields are compared
/// positionally. Quantization is only compared when the expectation sets
/// it. An empty result means the index matches.
pub fn verify_index_definition(
    actual: &IndexDefinition,
    expected: &IndexExpectation,
) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();

    if actual.name != expected.name {
        mismatches.push(Mismatch::new("name", &expected.name, &actual.name));
    }

    let actual_fields = actual.fields();
    if actual_fields.len() != expected.fields.len() {
        mismatches.push(Mismatch::new(
            "fields.length",
            expected.fields.len(),
            actual_fields.len(),
        ));
    }

    for (i, (actual_field, expected_field)) in
        actual_fields.iter().zip(expected.fields.iter()).enumerate()
    {
        let path = format!("fields[{i}]");

        if actual_field.field_type() != expected_field.field_type() {
            mismatches.push(Mismatch::new(
                format!("{path}.type"),
                expected_field.field_type(),
                actual_field.field_type(),
            ));
            continue;
        }

        if actual_field.path() != expected_field.path() {
            mismatches.push(Mismatch::new(
                format!("{path}.path"),
                expected_field.path(),
                actual_field.path(),
            ));
        }

        if let (IndexField::Vector(actual_vector), IndexField::Vector(expected_vector)) =
            (actual_field, expected_field)
        {
            if actual_vector.num_dimensions != expected_vector.num_dimensions {
                mismatches.push(Mismatch::new(
                    format!("{path}.numDimensions"),
                    expected_vector.num_dimensions,
                    actual_vector.num_dimensions,
                ));
            }

            if actual_vector.similarity != expected_vector.similarity {
                mismatches.push(Mismatch::new(
                    format!("{path}.similarity"),
                    expected_vector.similarity,
                    actual_vector.similarity,
                ));
            }

            if expected_vector.quantization.is_some()
                && actual_vector.quantization != expected_vector.quantization
            {
                mismatches.push(Mismatch::new(
                    format!("{path}.quantization"),
                    format!("{:?}", expected_vector.quantization),
                    format!("{:?}", actual_vector.quantization),
                ));
            }
        }
    }

    mismatches
}

/// Compares scored query rows against an expected fixture. Every key present
/// in an expected row must be present in the actual row; `score` is
/// compared within `tolerance`, everything else exactly. Keys only present
/// in the actual rows are ignored.
pub fn verify_scored_results(actual: &[Value], expected: &[Value], tolerance: f64) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();

    if actual.len() != expected.len() {
        mismatches.push(Mismatch::new("length", expected.len(), actual.len()));
    }

    for (i, (actual_row, expected_row)) in actual.iter().zip(expected.iter()).enumerate() {
        let Some(expected_obj) = expected_row.as_object() else {
            if actual_row != expected_row {
                mismatches.push(Mismatch::new(format!("[{i}]"), expected_row, actual_row));
            }
            continue;
        };

        for (key, expected_value) in expected_obj {
            let path = format!("[{i}].{key}");

            let Some(actual_value) = actual_row.get(key) else {
                mismatches.push(Mismatch::new(path, expected_value, "nothing"));
                continue;
            };

            if key == SCORE_KEY {
                match (actual_value.as_f64(), expected_value.as_f64()) {
                    (Some(a), Some(e)) if (a - e).abs() <= tolerance => {}
                    _ => mismatches.push(Mismatch::new(path, expected_value, actual_value)),
                }
            } else if actual_value != expected_value {
                mismatches.push(Mismatch::new(path, expected_value, actual_value));
            }
        }
    }

    mismatches
}
