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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A snapshot of one named search index as reported by the server.
///
/// Instances are only ever produced by projecting a listing response; each
/// poll or view fetches a fresh snapshot.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct IndexDefinition {
    pub id: Option<String>,
    pub name: String,
    pub index_type: SearchIndexType,
    pub status: IndexStatus,
    pub queryable: bool,
    pub latest_version: Option<i64>,
    pub latest_definition_version: Option<DefinitionVersion>,
    pub latest_definition: Definition,
    pub status_detail: Vec<StatusDetail>,
}

impl IndexDefinition {
    pub fn fields(&self) -> &[IndexField] {
        &self.latest_definition.fields
    }

    pub fn vector_fields(&self) -> impl Iterator<Item = &VectorField> {
        self.fields().iter().filter_map(IndexField::as_vector)
    }

    pub fn filter_fields(&self) -> impl Iterator<Item = &FilterField> {
        self.fields().iter().filter_map(IndexField::as_filter)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Definition {
    pub fields: Vec<IndexField>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct DefinitionVersion {
    pub version: i64,
    pub created_at: Option<DateTime<Utc>>,
}

/// Per-host view of an index build.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct StatusDetail {
    pub hostname: String,
    pub status: IndexStatus,
    pub queryable: bool,
    pub main_index: Option<IndexSnapshot>,
    // Present while a new definition is being built alongside the live one.
    pub staged_index: Option<IndexSnapshot>,
}

#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct IndexSnapshot {
    pub status: IndexStatus,
    pub queryable: bool,
    pub definition_version: Option<DefinitionVersion>,
    pub definition: Option<Definition>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
#[non_exhaustive]
pub enum IndexField {
    Vector(VectorField),
    Filter(FilterField),
}

impl IndexField {
    pub fn path(&self) -> &str {
        match self {
            IndexField::Vector(field) => &field.path,
            IndexField::Filter(field) => &field.path,
        }
    }

    pub fn field_type(&self) -> &'static str {
        match self {
            IndexField::Vector(_) => "vector",
            IndexField::Filter(_) => "filter",
        }
    }

    pub fn as_vector(&self) -> Option<&VectorField> {
        match self {
            IndexField::Vector(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_filter(&self) -> Option<&FilterField> {
        match self {
            IndexField::Filter(field) => Some(field),
            _ => None,
        }
    }
}

impl From<VectorField> for IndexField {
    fn from(field: VectorField) -> Self {
        IndexField::Vector(field)
    }
}

impl From<FilterField> for IndexField {
    fn from(field: FilterField) -> Self {
        IndexField::Filter(field)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct VectorField {
    pub path: String,
    pub num_dimensions: u32,
    pub similarity: Similarity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantization: Option<Quantization>,
}

impl VectorField {
    pub fn new(path: impl Into<String>, num_dimensions: u32, similarity: Similarity) -> Self {
        Self {
            path: path.into(),
            num_dimensions,
            similarity,
            quantization: None,
        }
    }

    pub fn quantization(mut self, quantization: impl Into<Option<Quantization>>) -> Self {
        self.quantization = quantization.into();
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct FilterField {
    pub path: String,
}

impl FilterField {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum Similarity {
    Euclidean,
    Cosine,
    DotProduct,
}

impl Display for Similarity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Similarity::Euclidean => "euclidean",
            Similarity::Cosine => "cosine",
            Similarity::DotProduct => "dotProduct",
        };

        write!(f, "{s}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Quantization {
    None,
    Scalar,
    Binary,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum SearchIndexType {
    // Servers that predate vector search omit the type entirely.
    #[default]
    Search,
    VectorSearch,
}

impl Display for SearchIndexType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchIndexType::Search => write!(f, "search"),
            SearchIndexType::VectorSearch => write!(f, "vectorSearch"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum IndexStatus {
    Pending,
    Building,
    Ready,
    Stale,
    Failed,
    Deleting,
    DoesNotExist,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Display for IndexStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            IndexStatus::Pending => "PENDING",
            IndexStatus::Building => "BUILDING",
            IndexStatus::Ready => "READY",
            IndexStatus::Stale => "STALE",
            IndexStatus::Failed => "FAILED",
            IndexStatus::Deleting => "DELETING",
            IndexStatus::DoesNotExist => "DOES_NOT_EXIST",
            IndexStatus::Unknown => "UNKNOWN",
        };

        write!(f, "{s}")
    }
}
