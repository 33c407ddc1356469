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

#![allow(dead_code)]

use atlas_vector_index::management::search::search_index_manager::SearchIndexManager;
use scripted_executor::ScriptedExecutor;
use std::sync::Arc;

pub mod scripted_executor;
pub mod test_config;

pub const TEST_DATABASE: &str = "sample_mflix";
pub const TEST_COLLECTION: &str = "embedded_movies";
pub const TEST_INDEX: &str = "vector_index";

pub fn scripted_manager() -> (Arc<ScriptedExecutor>, SearchIndexManager) {
    let executor = Arc::new(ScriptedExecutor::new());
    let manager =
        SearchIndexManager::with_executor(executor.clone(), TEST_DATABASE, TEST_COLLECTION);

    (executor, manager)
}
