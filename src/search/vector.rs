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
use mongodb::bson::{doc, Document};

/// A `$vectorSearch` aggregation against a vector search index.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct VectorSearchRequest {
    pub index_name: String,
    pub path: String,
    pub query_vector: Vec<f64>,
    pub num_candidates: u32,
    pub limit: u32,
    pub filter: Option<Document>,
    pub projection: Option<Document>,
}

impl VectorSearchRequest {
    pub fn new(
        index_name: impl Into<String>,
        path: impl Into<String>,
        query_vector: impl Into<Vec<f64>>,
    ) -> Self {
        Self {
            index_name: index_name.into(),
            path: path.into(),
            query_vector: query_vector.into(),
            num_candidates: 150,
            limit: 10,
            filter: None,
            projection: None,
        }
    }

    pub fn num_candidates(mut self, num_candidates: u32) -> Self {
        self.num_candidates = num_candidates;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn filter(mut self, filter: impl Into<Option<Document>>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn projection(mut self, projection: impl Into<Option<Document>>) -> Self {
        self.projection = projection.into();
        self
    }

    pub(crate) fn validate(&self) -> error::Result<()> {
        if self.query_vector.is_empty() {
            return Err(Error::invalid_argument(
                "queryVector",
                "query vector cannot be empty",
            ));
        }

        if self.limit == 0 {
            return Err(Error::invalid_argument("limit", "limit must be positive"));
        }

        if self.num_candidates < self.limit {
            return Err(Error::invalid_argument(
                "numCandidates",
                format!(
                    "numCandidates ({}) must be at least limit ({})",
                    self.num_candidates, self.limit
                ),
            ));
        }

        Ok(())
    }

    pub(crate) fn pipeline(&self) -> Vec<Document> {
        let mut stage = doc! {
            "index": self.index_name.as_str(),
            "path": self.path.as_str(),
            "queryVector": self.query_vector.clone(),
            "numCandidates": self.num_candidates as i64,
            "limit": self.limit as i64,
        };

        if let Some(filter) = &self.filter {
            stage.insert("filter", filter.clone());
        }

        let mut projection = self
            .projection
            .clone()
            .unwrap_or_else(|| doc! { "_id": 0 });
        projection.insert("score", doc! { "$meta": "vectorSearchScore" });

        vec![doc! { "$vectorSearch": stage }, doc! { "$project": projection }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn pipeline_with_filter() {
        let request = VectorSearchRequest::new("vector_index", "plot_embedding", vec![0.1, 0.2])
            .num_candidates(150)
            .limit(10)
            .filter(doc! { "year": { "$lt": 1975 } })
            .projection(doc! { "_id": 0, "title": 1, "plot": 1, "year": 1 });

        request.validate().unwrap();

        assert_eq!(
            vec![
                doc! {
                    "$vectorSearch": {
                        "index": "vector_index",
                        "path": "plot_embedding",
                        "queryVector": [0.1, 0.2],
                        "numCandidates": 150_i64,
                        "limit": 10_i64,
                        "filter": { "year": { "$lt": 1975 } },
                    }
                },
                doc! {
                    "$project": {
                        "_id": 0, "title": 1, "plot": 1, "year": 1,
                        "score": { "$meta": "vectorSearchScore" },
                    }
                },
            ],
            request.pipeline()
        );
    }

    #[test]
    fn default_projection_only_hides_id() {
        let request = VectorSearchRequest::new("vector_index", "plot_embedding", vec![0.5]);

        let pipeline = request.pipeline();
        assert_eq!(
            &doc! { "$project": { "_id": 0, "score": { "$meta": "vectorSearchScore" } } },
            &pipeline[1]
        );
    }

    #[test]
    fn candidates_must_cover_limit() {
        let err = VectorSearchRequest::new("vector_index", "plot_embedding", vec![0.5])
            .num_candidates(5)
            .limit(10)
            .validate()
            .unwrap_err();

        assert!(matches!(err.kind(), ErrorKind::InvalidArgument(_)));
    }

    #[test]
    fn empty_vector_is_rejected() {
        let err = VectorSearchRequest::new("vector_index", "plot_embedding", Vec::<f64>::new())
            .validate()
            .unwrap_err();

        assert!(matches!(err.kind(), ErrorKind::InvalidArgument(_)));
    }
}
