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

use crate::clients::search_index_mgmt_client::document_to_json;
use crate::error;
use crate::search::vector::VectorSearchRequest;
use futures::TryStreamExt;
use mongodb::bson::Document;
use mongodb::Collection;
use serde_json::Value;
use tracing::debug;

pub(crate) struct SearchClient {
    collection: Collection<Document>,
}

impl SearchClient {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    pub async fn vector_search(&self, request: &VectorSearchRequest) -> error::Result<Vec<Value>> {
        debug!(
            "Running vector search against {} on {}",
            request.index_name,
            self.collection.namespace()
        );

        let cursor = self.collection.aggregate(request.pipeline()).await?;
        let rows: Vec<Document> = cursor.try_collect().await?;

        Ok(rows.into_iter().map(document_to_json).collect())
    }
}
