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

use crate::error::{self, Error, ProjectionErrorKind};
use crate::management::search::index::{IndexDefinition, IndexStatus};
use crate::management::search::index_json::IndexDefinitionJson;
use serde_json::Value;
use tracing::trace;

const KNOWN_FIELD_TYPES: [&str; 2] = ["vector", "filter"];

/// Converts a raw listing entry into a typed [`IndexDefinition`].
///
/// The shape is checked before deserialising so that a schema mismatch is
/// reported against the path that caused it. All failures are projection
/// failures, never command failures.
pub fn project(raw: &Value) -> error::Result<IndexDefinition> {
    let obj = raw.as_object().ok_or_else(|| {
        Error::projection(ProjectionErrorKind::UnexpectedShape {
            path: "$".to_string(),
            expected: "an object".to_string(),
        })
    })?;

    match obj.get("name") {
        Some(Value::String(_)) => {}
        Some(_) => {
            return Err(Error::projection(ProjectionErrorKind::UnexpectedShape {
                path: "name".to_string(),
                expected: "a string".to_string(),
            }))
        }
        None => {
            return Err(Error::projection(ProjectionErrorKind::MissingField {
                path: "name".to_string(),
            }))
        }
    }

    let definition = obj.get("latestDefinition").ok_or_else(|| {
        Error::projection(ProjectionErrorKind::MissingField {
            path: "latestDefinition".to_string(),
        })
    })?;

    let fields = match definition.get("fields") {
        Some(Value::Array(fields)) => fields,
        Some(_) => {
            return Err(Error::projection(ProjectionErrorKind::UnexpectedShape {
                path: "latestDefinition.fields".to_string(),
                expected: "an array".to_string(),
            }))
        }
        None => {
            return Err(Error::projection(ProjectionErrorKind::MissingField {
                path: "latestDefinition.fields".to_string(),
            }))
        }
    };

    for (index, field) in fields.iter().enumerate() {
        let field_type = field.get("type").and_then(Value::as_str).ok_or_else(|| {
            Error::projection(ProjectionErrorKind::MissingField {
                path: format!("latestDefinition.fields[{index}].type"),
            })
        })?;

        if !KNOWN_FIELD_TYPES.contains(&field_type) {
            return Err(Error::projection(ProjectionErrorKind::UnknownFieldType {
                index,
                field_type: field_type.to_string(),
            }));
        }
    }

    trace!("Projecting index definition {}", raw);

    let json: IndexDefinitionJson = serde_json::from_value(raw.clone()).map_err(|e| {
        Error::projection(ProjectionErrorKind::InvalidValue {
            path: "$".to_string(),
            msg: e.to_string(),
        })
    })?;

    Ok(json.into())
}

/// Reads the `name` of a raw listing entry without projecting the rest.
pub(crate) fn raw_index_name(raw: &Value) -> Option<&str> {
    raw.get("name").and_then(Value::as_str)
}

/// Reads the `queryable` flag of a raw listing entry, treating a missing
/// flag as not queryable.
pub(crate) fn raw_index_queryable(raw: &Value) -> bool {
    raw.get("queryable")
        .and_then(Value::as_bool)
        .unwrap_or_default()
}

/// Reads the `status` of a raw listing entry. Missing or unrecognised
/// statuses read as [`IndexStatus::Unknown`].
pub(crate) fn raw_index_status(raw: &Value) -> IndexStatus {
    raw.get("status")
        .and_then(|status| serde_json::from_value(status.clone()).ok())
        .unwrap_or_default()
}
