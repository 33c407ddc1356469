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

//! End to end index workflows against the `sample_mflix.embedded_movies`
//! data set. Each top level workflow opens its own connection and closes it
//! before returning, whether or not the workflow succeeded. Every wait is
//! bounded by the configured poll timeout.

use crate::client::Client;
use crate::collection::Collection;
use crate::config::WorkflowConfig;
use crate::error;
use crate::error::{Error, ErrorKind};
use crate::error_context::Operation;
use crate::management::search::definition::VectorIndexDefinition;
use crate::management::search::index::{IndexDefinition, Similarity, VectorField};
use crate::management::search::poller::PollSummary;
use crate::management::search::search_index_manager::SearchIndexManager;
use crate::options::search_index_mgmt_options::PollOptions;
use std::future::Future;
use tracing::info;

pub const PLOT_EMBEDDING_PATH: &str = "plot_embedding";
pub const PLOT_EMBEDDING_DIMENSIONS: u32 = 1536;
pub const EDITED_PLOT_EMBEDDING_DIMENSIONS: u32 = 1024;

pub fn basic_definition() -> VectorIndexDefinition {
    VectorIndexDefinition::new().vector_field(VectorField::new(
        PLOT_EMBEDDING_PATH,
        PLOT_EMBEDDING_DIMENSIONS,
        Similarity::Euclidean,
    ))
}

pub fn filter_definition() -> VectorIndexDefinition {
    basic_definition()
        .filter_field("genres")
        .filter_field("year")
}

pub fn edited_definition() -> VectorIndexDefinition {
    VectorIndexDefinition::new().vector_field(VectorField::new(
        PLOT_EMBEDDING_PATH,
        EDITED_PLOT_EMBEDDING_DIMENSIONS,
        Similarity::Euclidean,
    ))
}

/// Connects, hands the configured collection to `f`, then shuts the
/// connection down. The connection is closed on every exit path of `f`.
pub async fn with_collection<F, Fut, T>(config: &WorkflowConfig, f: F) -> error::Result<T>
where
    F: FnOnce(Collection) -> Fut,
    Fut: Future<Output = error::Result<T>>,
{
    let client = Client::connect(&config.connection_string, config.client_options()).await?;
    let collection = client
        .database(&config.database_name)
        .collection(&config.collection_name);

    let result = f(collection).await;

    client.shutdown().await;

    result
}

/// Creates an index, waits for it to become queryable and returns its
/// definition as the server reports it.
pub async fn create_and_wait(
    manager: &SearchIndexManager,
    index_name: &str,
    definition: VectorIndexDefinition,
    poll: PollOptions,
) -> error::Result<IndexDefinition> {
    info!("Creating search index {}", index_name);
    let created = manager.create_index(index_name, definition, None).await?;

    info!("Polling to confirm index {} is queryable", created);
    manager.wait_until_queryable(&created, poll).await?;

    match manager.view_index(&created, None).await? {
        Some(index) => Ok(index),
        None => Err(manager.context_for(
            Error::new(ErrorKind::IndexNotFound),
            Operation::ViewSearchIndex,
            Some(&created),
        )),
    }
}

/// Drops an index and waits until it no longer appears in listings.
pub async fn drop_and_wait(
    manager: &SearchIndexManager,
    index_name: &str,
    poll: PollOptions,
) -> error::Result<PollSummary> {
    info!("Dropping search index {}", index_name);
    manager.drop_index(index_name, None).await?;

    let summary = manager.wait_until_deleted(index_name, poll).await?;
    info!(
        "Search index {} deleted after {} polls",
        index_name, summary.attempts
    );

    Ok(summary)
}

pub async fn create_index_basic(config: &WorkflowConfig) -> error::Result<IndexDefinition> {
    with_collection(config, |collection| async move {
        create_and_wait(
            &collection.search_indexes(),
            &config.index_name,
            basic_definition(),
            config.queryable_poll_options(),
        )
        .await
    })
    .await
}

pub async fn create_index_filter(config: &WorkflowConfig) -> error::Result<IndexDefinition> {
    with_collection(config, |collection| async move {
        create_and_wait(
            &collection.search_indexes(),
            &config.index_name,
            filter_definition(),
            config.queryable_poll_options(),
        )
        .await
    })
    .await
}

pub async fn view_index(config: &WorkflowConfig) -> error::Result<Option<IndexDefinition>> {
    with_collection(config, |collection| async move {
        collection
            .search_indexes()
            .view_index(&config.index_name, None)
            .await
    })
    .await
}

/// Replaces the configured index's definition with a 1024 dimension vector
/// field. Returns `false` without connecting when the environment does not
/// support index updates.
pub async fn edit_index(config: &WorkflowConfig) -> error::Result<bool> {
    if !config.environment.supports_index_updates() {
        info!(
            "Skipping edit of {}: not supported in the {} environment",
            config.index_name, config.environment
        );
        return Ok(false);
    }

    with_collection(config, |collection| async move {
        collection
            .search_indexes()
            .update_index(&config.index_name, edited_definition(), None)
            .await?;

        Ok(true)
    })
    .await
}

pub async fn drop_index(config: &WorkflowConfig) -> error::Result<PollSummary> {
    with_collection(config, |collection| async move {
        drop_and_wait(
            &collection.search_indexes(),
            &config.index_name,
            config.deletion_poll_options(),
        )
        .await
    })
    .await
}
