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

use crate::clients::search_index_mgmt_client::{
    CommandOutput, IndexCommand, IndexCommandExecutor,
};
use crate::error;
use crate::error::ErrorKind;
use crate::error_context::{ErrorContext, Operation};
use crate::management::search::definition::VectorIndexDefinition;
use crate::management::search::index::IndexDefinition;
use crate::management::search::poller::{DesiredState, IndexPoller, PollSummary};
use crate::management::search::projection::project;
use crate::options::search_index_mgmt_options::{
    CreateSearchIndexOptions, DropSearchIndexOptions, ListSearchIndexesOptions, PollOptions,
    UpdateSearchIndexOptions, ViewSearchIndexOptions,
};
use crate::results::search_index_mgmt_results::IndexCursor;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::{instrument, Level};

/// Manages the search indexes of a single collection.
///
/// Every operation issues exactly one command; none of them wait for the
/// server to finish building or removing an index. Use
/// [`wait_until_queryable`](Self::wait_until_queryable) and
/// [`wait_until_deleted`](Self::wait_until_deleted) for that.
#[derive(Clone)]
pub struct SearchIndexManager {
    executor: Arc<dyn IndexCommandExecutor>,
    database_name: String,
    collection_name: String,
}

impl SearchIndexManager {
    /// Builds a manager on top of any executor. Used to drive the manager
    /// without a live deployment.
    pub fn with_executor(
        executor: Arc<dyn IndexCommandExecutor>,
        database_name: impl Into<String>,
        collection_name: impl Into<String>,
    ) -> Self {
        Self {
            executor,
            database_name: database_name.into(),
            collection_name: collection_name.into(),
        }
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Creates a `vectorSearch` index and returns the name the server
    /// assigned to it. The definition is validated before any request is
    /// sent.
    pub async fn create_index(
        &self,
        index_name: impl Into<String>,
        definition: VectorIndexDefinition,
        _opts: impl Into<Option<CreateSearchIndexOptions>>,
    ) -> error::Result<String> {
        let index_name = index_name.into();

        if let Err(e) = definition.validate() {
            return Err(self.context_for(e, Operation::CreateSearchIndex, Some(&index_name)));
        }

        self.execute(
            Operation::CreateSearchIndex,
            Some(&index_name),
            IndexCommand::Create {
                index_name: index_name.clone(),
                definition,
            },
        )
        .await?
        .into_created()
    }

    /// Returns the named index, or `None` when no index with that name
    /// exists.
    pub async fn view_index(
        &self,
        index_name: impl Into<String>,
        _opts: impl Into<Option<ViewSearchIndexOptions>>,
    ) -> error::Result<Option<IndexDefinition>> {
        let index_name = index_name.into();

        let raw = self
            .execute(
                Operation::ViewSearchIndex,
                Some(&index_name),
                IndexCommand::View {
                    index_name: index_name.clone(),
                },
            )
            .await?
            .into_viewed()?;

        match raw {
            Some(raw) => project(&raw)
                .map(Some)
                .map_err(|e| self.context_for(e, Operation::ViewSearchIndex, Some(&index_name))),
            None => Ok(None),
        }
    }

    pub async fn list_indexes(
        &self,
        _opts: impl Into<Option<ListSearchIndexesOptions>>,
    ) -> error::Result<IndexCursor> {
        let cursor = self
            .execute(Operation::ListSearchIndexes, None, IndexCommand::List)
            .await?
            .into_listed()?;

        let manager = self.clone();
        Ok(cursor.map_err(move |e| {
            if e.context().is_some() {
                e
            } else {
                manager.context_for(e, Operation::ListSearchIndexes, None)
            }
        }))
    }

    /// Replaces the definition of an existing index. The server rebuilds the
    /// index in the background and keeps serving the previous definition
    /// until the rebuild completes.
    pub async fn update_index(
        &self,
        index_name: impl Into<String>,
        definition: VectorIndexDefinition,
        _opts: impl Into<Option<UpdateSearchIndexOptions>>,
    ) -> error::Result<()> {
        let index_name = index_name.into();

        if let Err(e) = definition.validate() {
            return Err(self.context_for(e, Operation::UpdateSearchIndex, Some(&index_name)));
        }

        self.execute(
            Operation::UpdateSearchIndex,
            Some(&index_name),
            IndexCommand::Update {
                index_name: index_name.clone(),
                definition,
            },
        )
        .await?
        .into_updated()
    }

    /// Requests removal of the named index. Removal is asynchronous: the
    /// index may keep appearing in listings for a while after this returns.
    pub async fn drop_index(
        &self,
        index_name: impl Into<String>,
        _opts: impl Into<Option<DropSearchIndexOptions>>,
    ) -> error::Result<()> {
        let index_name = index_name.into();

        self.execute(
            Operation::DropSearchIndex,
            Some(&index_name),
            IndexCommand::Drop {
                index_name: index_name.clone(),
            },
        )
        .await?
        .into_dropped()
    }

    /// Like [`drop_index`](Self::drop_index) but treats a missing index as
    /// success. Returns whether a drop request was accepted.
    pub async fn drop_index_if_exists(
        &self,
        index_name: impl Into<String>,
        opts: impl Into<Option<DropSearchIndexOptions>>,
    ) -> error::Result<bool> {
        match self.drop_index(index_name, opts).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == &ErrorKind::IndexNotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn wait_until_deleted(
        &self,
        index_name: impl Into<String>,
        opts: impl Into<Option<PollOptions>>,
    ) -> error::Result<PollSummary> {
        let opts = opts.into().unwrap_or_else(PollOptions::for_deletion);

        IndexPoller::new(self, index_name, DesiredState::Deleted, opts)
            .poll()
            .await
    }

    pub async fn wait_until_queryable(
        &self,
        index_name: impl Into<String>,
        opts: impl Into<Option<PollOptions>>,
    ) -> error::Result<PollSummary> {
        let opts = opts.into().unwrap_or_else(PollOptions::for_queryable);

        IndexPoller::new(self, index_name, DesiredState::Queryable, opts)
            .poll()
            .await
    }

    #[instrument(
        skip_all,
        level = Level::TRACE,
        name = "search_index_command",
        fields(
        db.system = "mongodb",
        db.operation = operation.as_str(),
        db.name = self.database_name.as_str(),
        db.collection = self.collection_name.as_str(),
        db.search_index = index_name,
        ))]
    async fn execute(
        &self,
        operation: Operation,
        index_name: Option<&str>,
        command: IndexCommand,
    ) -> error::Result<CommandOutput> {
        self.executor
            .execute(command)
            .await
            .map_err(|e| self.context_for(e, operation, index_name))
    }

    pub(crate) fn context_for(
        &self,
        err: error::Error,
        operation: Operation,
        index_name: Option<&str>,
    ) -> error::Error {
        let mut context = ErrorContext::new(operation, &self.database_name, &self.collection_name);
        if let Some(index_name) = index_name {
            context = context.with_index_name(index_name);
        }

        err.with_context(context)
    }
}

impl Debug for SearchIndexManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndexManager")
            .field("database_name", &self.database_name)
            .field("collection_name", &self.collection_name)
            .finish()
    }
}
