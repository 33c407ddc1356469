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

use atlas_vector_index::config::WorkflowConfig;
use atlas_vector_index::error::Result;
use atlas_vector_index::workflows;

/// Creates a vector search index with `genres` and `year` filter fields.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = WorkflowConfig::from_env()?;

    let index = workflows::create_index_filter(&config).await?;

    println!("Name of Index Created: {}", index.name);
    for field in index.fields() {
        println!("  {} {}", field.field_type(), field.path());
    }

    Ok(())
}
