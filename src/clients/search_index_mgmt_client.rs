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
use crate::management::search::definition::VectorIndexDefinition;
use crate::results::search_index_mgmt_results::IndexCursor;
use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use mongodb::bson::{Bson, Document};
use mongodb::{Collection, SearchIndexModel, SearchIndexType};
use serde_json::Value;
use tracing::debug;

/// The closed set of requests that can be issued against a collection's
/// search indexes. Each command maps to exactly one server request.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum IndexCommand {
    Create {
        index_name: String,
        definition: VectorIndexDefinition,
    },
    View {
        index_name: String,
    },
    List,
    Update {
        index_name: String,
        definition: VectorIndexDefinition,
    },
    Drop {
        index_name: String,
    },
}

impl IndexCommand {
    pub fn index_name(&self) -> Option<&str> {
        match self {
            IndexCommand::Create { index_name, .. }
            | IndexCommand::View { index_name }
            | IndexCommand::Update { index_name, .. }
            | IndexCommand::Drop { index_name } => Some(index_name),
            IndexCommand::List => None,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            IndexCommand::Create { .. } => "create",
            IndexCommand::View { .. } => "view",
            IndexCommand::List => "list",
            IndexCommand::Update { .. } => "update",
            IndexCommand::Drop { .. } => "drop",
        }
    }
}

pub enum CommandOutput {
    Created(String),
    Viewed(Option<Value>),
    Listed(IndexCursor),
    Updated,
    Dropped,
}

impl CommandOutput {
    fn variant_name(&self) -> &'static str {
        match self {
            CommandOutput::Created(_) => "created",
            CommandOutput::Viewed(_) => "viewed",
            CommandOutput::Listed(_) => "listed",
            CommandOutput::Updated => "updated",
            CommandOutput::Dropped => "dropped",
        }
    }

    pub(crate) fn into_created(self) -> error::Result<String> {
        match self {
            CommandOutput::Created(name) => Ok(name),
            other => Err(other.unexpected("created")),
        }
    }

    pub(crate) fn into_viewed(self) -> error::Result<Option<Value>> {
        match self {
            CommandOutput::Viewed(index) => Ok(index),
            other => Err(other.unexpected("viewed")),
        }
    }

    pub(crate) fn into_listed(self) -> error::Result<IndexCursor> {
        match self {
            CommandOutput::Listed(cursor) => Ok(cursor),
            other => Err(other.unexpected("listed")),
        }
    }

    pub(crate) fn into_updated(self) -> error::Result<()> {
        match self {
            CommandOutput::Updated => Ok(()),
            other => Err(other.unexpected("updated")),
        }
    }

    pub(crate) fn into_dropped(self) -> error::Result<()> {
        match self {
            CommandOutput::Dropped => Ok(()),
            other => Err(other.unexpected("dropped")),
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        Error::other_failure(format!(
            "expected a {expected} response but got {}",
            self.variant_name()
        ))
    }
}

#[async_trait]
pub trait IndexCommandExecutor: Send + Sync {
    async fn execute(&self, command: IndexCommand) -> error::Result<CommandOutput>;
}

pub(crate) struct MongoSearchIndexMgmtClient {
    collection: Collection<Document>,
}

impl MongoSearchIndexMgmtClient {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    async fn create_index(
        &self,
        index_name: String,
        definition: VectorIndexDefinition,
    ) -> error::Result<String> {
        let model = search_index_model(&index_name, &definition)?;

        Ok(self.collection.create_search_index(model).await?)
    }

    async fn view_index(&self, index_name: String) -> error::Result<Option<Value>> {
        let mut cursor = self
            .collection
            .list_search_indexes()
            .name(index_name.as_str())
            .await?;

        let first = cursor.try_next().await?;

        Ok(first.map(document_to_json))
    }

    async fn list_indexes(&self) -> error::Result<IndexCursor> {
        let cursor = self.collection.list_search_indexes().await?;

        let stream = cursor
            .map(|doc| doc.map(document_to_json).map_err(Error::from))
            .boxed();

        Ok(IndexCursor::new(stream))
    }

    async fn update_index(
        &self,
        index_name: String,
        definition: VectorIndexDefinition,
    ) -> error::Result<()> {
        let definition = definition.to_document()?;

        self.collection
            .update_search_index(index_name.as_str(), definition)
            .await?;

        Ok(())
    }

    async fn drop_index(&self, index_name: String) -> error::Result<()> {
        self.collection
            .drop_search_index(index_name.as_str())
            .await?;

        Ok(())
    }
}

#[async_trait]
impl IndexCommandExecutor for MongoSearchIndexMgmtClient {
    async fn execute(&self, command: IndexCommand) -> error::Result<CommandOutput> {
        debug!(
            "Executing {} search index command on {}",
            command.name(),
            self.collection.namespace()
        );

        match command {
            IndexCommand::Create {
                index_name,
                definition,
            } => self
                .create_index(index_name, definition)
                .await
                .map(CommandOutput::Created),
            IndexCommand::View { index_name } => {
                self.view_index(index_name).await.map(CommandOutput::Viewed)
            }
            IndexCommand::List => self.list_indexes().await.map(CommandOutput::Listed),
            IndexCommand::Update {
                index_name,
                definition,
            } => {
                self.update_index(index_name, definition).await?;
                Ok(CommandOutput::Updated)
            }
            IndexCommand::Drop { index_name } => {
                self.drop_index(index_name).await?;
                Ok(CommandOutput::Dropped)
            }
        }
    }
}

fn search_index_model(
    index_name: &str,
    definition: &VectorIndexDefinition,
) -> error::Result<SearchIndexModel> {
    Ok(SearchIndexModel::builder()
        .definition(definition.to_document()?)
        .name(index_name.to_string())
        .index_type(SearchIndexType::VectorSearch)
        .build())
}

pub(crate) fn document_to_json(doc: Document) -> Value {
    Bson::Document(doc).into_relaxed_extjson()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::management::search::index::{Similarity, VectorField};
    use mongodb::bson::doc;
    use serde_json::json;

    #[test]
    fn model_carries_name_type_and_definition() {
        let definition = VectorIndexDefinition::new().vector_field(VectorField::new(
            "plot_embedding",
            1536,
            Similarity::Euclidean,
        ));

        let model = search_index_model("vector_index", &definition).unwrap();

        assert_eq!(Some("vector_index".to_string()), model.name);
        assert!(matches!(
            model.index_type,
            Some(SearchIndexType::VectorSearch)
        ));
        assert_eq!(
            json!({"fields": [
                {"type": "vector", "path": "plot_embedding", "numDimensions": 1536, "similarity": "euclidean"}
            ]}),
            document_to_json(model.definition)
        );
    }

    #[test]
    fn object_ids_convert_to_relaxed_json() {
        let oid = mongodb::bson::oid::ObjectId::parse_str("6524096020da840844a4c4a7").unwrap();
        let value = document_to_json(doc! {"id": oid, "name": "vector_index"});

        assert_eq!(
            json!({"id": {"$oid": "6524096020da840844a4c4a7"}, "name": "vector_index"}),
            value
        );
    }

    #[test]
    fn unexpected_output_is_reported() {
        let err = CommandOutput::Dropped.into_created().unwrap_err();
        assert_eq!(
            "expected a created response but got dropped",
            err.to_string()
        );
    }
}
