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

use std::env;
use std::future::Future;
use std::io::Write;
use std::ops::Deref;
use std::sync::LazyLock;

use atlas_vector_index::config::{Environment, WorkflowConfig};
use envconfig::Envconfig;
use lazy_static::lazy_static;
use log::LevelFilter;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

lazy_static! {
    pub static ref TEST_CONFIG: RwLock<Option<TestSetupConfig>> = RwLock::new(None);
}

#[derive(Debug, Clone, Envconfig)]
pub struct EnvTestConfig {
    #[envconfig(from = "ATLAS_CONNECTION_STRING")]
    pub conn_string: Option<String>,
    #[envconfig(from = "ENV", default = "Atlas")]
    pub environment: Environment,
    #[envconfig(from = "ATLAS_DATABASE", default = "sample_mflix")]
    pub database: String,
    #[envconfig(from = "ATLAS_COLLECTION", default = "embedded_movies")]
    pub collection: String,
    #[envconfig(from = "ATLAS_INDEX_NAME", default = "vector_index")]
    pub index_name: String,
}

#[derive(Debug, Clone)]
pub struct TestSetupConfig {
    /// `None` when no deployment is configured; live tests return early.
    pub workflow_config: Option<WorkflowConfig>,
}

static RUNTIME: LazyLock<Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
});

/// Runs a test that needs a live deployment. The test is skipped when
/// `ATLAS_CONNECTION_STRING` is not set.
pub fn run_test<T, Fut>(test: T)
where
    T: FnOnce(WorkflowConfig) -> Fut,
    Fut: Future<Output = ()>,
{
    RUNTIME.block_on(async {
        let mut config = TEST_CONFIG.write().await;

        if let Some(setup) = config.deref() {
            let setup = setup.clone();
            drop(config);
            run_or_skip(setup, test).await;
            return;
        }

        env_logger::Builder::new()
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{}:{} {} [{}] - {}",
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0),
                    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                    record.level(),
                    record.args()
                )
            })
            .filter(Some("mongodb"), LevelFilter::Warn)
            .filter_level(
                env::var("RUST_LOG")
                    .unwrap_or("DEBUG".to_string())
                    .parse()
                    .unwrap(),
            )
            .is_test(true)
            .init();

        let setup = create_test_setup();

        *config = Some(setup.clone());
        drop(config);

        run_or_skip(setup, test).await;
    });
}

async fn run_or_skip<T, Fut>(setup: TestSetupConfig, test: T)
where
    T: FnOnce(WorkflowConfig) -> Fut,
    Fut: Future<Output = ()>,
{
    match setup.workflow_config {
        Some(workflow_config) => test(workflow_config).await,
        None => log::warn!("ATLAS_CONNECTION_STRING is not set, skipping live test"),
    }
}

pub fn create_test_setup() -> TestSetupConfig {
    let test_config = EnvTestConfig::init_from_env().unwrap();

    let workflow_config = test_config.conn_string.map(|conn_string| {
        WorkflowConfig::new(conn_string)
            .environment(test_config.environment)
            .database_name(test_config.database)
            .collection_name(test_config.collection)
            .index_name(test_config.index_name)
    });

    TestSetupConfig { workflow_config }
}
