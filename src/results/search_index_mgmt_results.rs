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
use crate::management::search::index::IndexDefinition;
use crate::management::search::projection::project;
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt, TryStreamExt};
use serde_json::Value;

/// A lazy, finite and non-restartable listing of raw index definitions in
/// server order. Once drained it stays empty; issue a new listing to observe
/// newer server state.
pub struct IndexCursor {
    inner: BoxStream<'static, error::Result<Value>>,
}

impl IndexCursor {
    pub fn new(inner: BoxStream<'static, error::Result<Value>>) -> Self {
        Self { inner }
    }

    pub fn from_values(values: Vec<Value>) -> Self {
        Self::new(stream::iter(values.into_iter().map(Ok)).boxed())
    }

    pub async fn try_collect(self) -> error::Result<Vec<Value>> {
        TryStreamExt::try_collect(self.inner).await
    }

    /// Rewrites every error yielded while reading the listing.
    pub(crate) fn map_err<F>(self, f: F) -> Self
    where
        F: FnMut(error::Error) -> error::Error + Send + 'static,
    {
        Self::new(TryStreamExt::map_err(self.inner, f).boxed())
    }

    /// Projects each entry as it is read. A projection failure is yielded in
    /// place of the offending entry.
    pub fn projected(self) -> impl Stream<Item = error::Result<IndexDefinition>> {
        self.inner
            .map(|raw| raw.and_then(|raw| project(&raw)))
    }
}

impl Stream for IndexCursor {
    type Item = error::Result<Value>;

    fn poll_next(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}
