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

use crate::error;
use crate::error::Error;
use crate::management::search::index::{FilterField, IndexField, VectorField};
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MAX_VECTOR_DIMENSIONS: u32 = 8192;

/// The body of a create or update request for a `vectorSearch` index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct VectorIndexDefinition {
    pub fields: Vec<IndexField>,
}

impl VectorIndexDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vector_field(mut self, field: VectorField) -> Self {
        self.fields.push(IndexField::Vector(field));
        self
    }

    pub fn filter_field(mut self, path: impl Into<String>) -> Self {
        self.fields.push(IndexField::Filter(FilterField::new(path)));
        self
    }

    pub fn fields(&self) -> &[IndexField] {
        &self.fields
    }

    pub(crate) fn validate(&self) -> error::Result<()> {
        if self.fields.is_empty() {
            return Err(Error::invalid_argument(
                "fields",
                "an index definition requires at least one field",
            ));
        }

        if !self.fields.iter().any(|f| matches!(f, IndexField::Vector(_))) {
            return Err(Error::invalid_argument(
                "fields",
                "a vectorSearch index requires a vector field",
            ));
        }

        let mut filter_paths = HashSet::new();
        for field in &self.fields {
            if field.path().is_empty() {
                return Err(Error::invalid_argument("path", "field paths cannot be empty"));
            }

            match field {
                IndexField::Vector(vector) => {
                    if vector.num_dimensions == 0 || vector.num_dimensions > MAX_VECTOR_DIMENSIONS
                    {
                        return Err(Error::invalid_argument(
                            "numDimensions",
                            format!(
                                "must be between 1 and {MAX_VECTOR_DIMENSIONS}, got {}",
                                vector.num_dimensions
                            ),
                        ));
                    }
                }
                IndexField::Filter(filter) => {
                    if !filter_paths.insert(filter.path.as_str()) {
                        return Err(Error::invalid_argument(
                            "path",
                            format!("duplicate filter path {}", filter.path),
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    pub(crate) fn to_document(&self) -> error::Result<Document> {
        mongodb::bson::to_document(self).map_err(Error::encoding_failure_from_bson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::management::search::index::Similarity;
    use mongodb::bson::Bson;
    use serde_json::json;

    fn plot_embedding() -> VectorField {
        VectorField::new("plot_embedding", 1536, Similarity::Euclidean)
    }

    #[test]
    fn document_matches_create_payload() {
        let definition = VectorIndexDefinition::new()
            .vector_field(plot_embedding())
            .filter_field("genres")
            .filter_field("year");

        definition.validate().unwrap();

        let document = definition.to_document().unwrap();
        assert_eq!(
            json!({
                "fields": [
                    {"type": "vector", "path": "plot_embedding", "numDimensions": 1536, "similarity": "euclidean"},
                    {"type": "filter", "path": "genres"},
                    {"type": "filter", "path": "year"},
                ]
            }),
            Bson::Document(document).into_relaxed_extjson()
        );
    }

    #[test]
    fn empty_definition_is_rejected() {
        let err = VectorIndexDefinition::new().validate().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument(_)));
    }

    #[test]
    fn filters_alone_are_rejected() {
        let err = VectorIndexDefinition::new()
            .filter_field("genres")
            .validate()
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument(_)));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let err = VectorIndexDefinition::new()
            .vector_field(VectorField::new("plot_embedding", 0, Similarity::Cosine))
            .validate()
            .unwrap_err();

        match err.kind() {
            ErrorKind::InvalidArgument(e) => {
                assert_eq!(Some("numDimensions".to_string()), e.arg)
            }
            other => panic!("unexpected error kind {other:?}"),
        }
    }

    #[test]
    fn too_many_dimensions_are_rejected() {
        let err = VectorIndexDefinition::new()
            .vector_field(VectorField::new(
                "plot_embedding",
                MAX_VECTOR_DIMENSIONS + 1,
                Similarity::Cosine,
            ))
            .validate()
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument(_)));
    }

    #[test]
    fn duplicate_filter_paths_are_rejected() {
        let err = VectorIndexDefinition::new()
            .vector_field(plot_embedding())
            .filter_field("year")
            .filter_field("year")
            .validate()
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument(_)));
    }
}
