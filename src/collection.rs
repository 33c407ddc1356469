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

use crate::clients::search_client::SearchClient;
use crate::clients::search_index_mgmt_client::MongoSearchIndexMgmtClient;
use crate::error;
use crate::error_context::{ErrorContext, Operation};
use crate::management::search::search_index_manager::SearchIndexManager;
use crate::search::vector::VectorSearchRequest;
use mongodb::bson::Document;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct Collection {
    inner: mongodb::Collection<Document>,
    database_name: String,
}

impl Collection {
    pub(crate) fn new(inner: mongodb::Collection<Document>, database_name: String) -> Self {
        Self {
            inner,
            database_name,
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn search_indexes(&self) -> SearchIndexManager {
        SearchIndexManager::with_executor(
            Arc::new(MongoSearchIndexMgmtClient::new(self.inner.clone())),
            self.database_name(),
            self.name(),
        )
    }

    /// Runs a `$vectorSearch` aggregation and returns the projected rows,
    /// each carrying its `score`.
    pub async fn vector_search(&self, request: VectorSearchRequest) -> error::Result<Vec<Value>> {
        let context = || {
            ErrorContext::new(Operation::VectorSearch, self.database_name(), self.name())
                .with_index_name(&request.index_name)
        };

        request.validate().map_err(|e| e.with_context(context()))?;

        SearchClient::new(self.inner.clone())
            .vector_search(&request)
            .await
            .map_err(|e| e.with_context(context()))
    }
}
