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
use crate::error::{Error, ErrorKind, InvalidArgumentErrorKind};
use crate::options::client_options::ClientOptions;
use crate::options::search_index_mgmt_options::PollOptions;
use envconfig::Envconfig;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATABASE: &str = "sample_mflix";
pub const DEFAULT_COLLECTION: &str = "embedded_movies";
pub const DEFAULT_INDEX_NAME: &str = "vector_index";
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(600);

/// The kind of deployment the workflows run against. Local deployments do
/// not support every index command.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Atlas,
    Local,
}

impl Environment {
    pub fn supports_index_updates(&self) -> bool {
        matches!(self, Environment::Atlas)
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "atlas" | "" => Ok(Environment::Atlas),
            "local" => Ok(Environment::Local),
            other => Err(Error::invalid_argument(
                "ENV",
                format!("unknown environment {other}, expected Atlas or local"),
            )),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Atlas => write!(f, "Atlas"),
            Environment::Local => write!(f, "local"),
        }
    }
}

/// Where the workflows connect to and which index they operate on.
#[derive(Debug, Clone, PartialEq, Envconfig)]
pub struct WorkflowConfig {
    #[envconfig(from = "ATLAS_CONNECTION_STRING")]
    pub connection_string: String,
    #[envconfig(from = "ENV", default = "Atlas")]
    pub environment: Environment,
    #[envconfig(from = "ATLAS_DATABASE", default = "sample_mflix")]
    pub database_name: String,
    #[envconfig(from = "ATLAS_COLLECTION", default = "embedded_movies")]
    pub collection_name: String,
    #[envconfig(from = "ATLAS_INDEX_NAME", default = "vector_index")]
    pub index_name: String,
    /// Upper bound, in seconds, on each wait for an index to become
    /// queryable or disappear.
    #[envconfig(from = "ATLAS_POLL_TIMEOUT_SECS", default = "600")]
    pub poll_timeout_secs: u64,
}

impl WorkflowConfig {
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            environment: Environment::default(),
            database_name: DEFAULT_DATABASE.to_string(),
            collection_name: DEFAULT_COLLECTION.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            poll_timeout_secs: DEFAULT_POLL_TIMEOUT.as_secs(),
        }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> error::Result<Self> {
        Self::init_from_env().map_err(|e| {
            Error::new(ErrorKind::InvalidArgument(InvalidArgumentErrorKind {
                msg: e.to_string(),
                arg: None,
            }))
        })
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn database_name(mut self, database_name: impl Into<String>) -> Self {
        self.database_name = database_name.into();
        self
    }

    pub fn collection_name(mut self, collection_name: impl Into<String>) -> Self {
        self.collection_name = collection_name.into();
        self
    }

    pub fn index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = index_name.into();
        self
    }

    pub fn poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout_secs = poll_timeout.as_secs();
        self
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions::default()
    }

    pub fn queryable_poll_options(&self) -> PollOptions {
        PollOptions::for_queryable().deadline(Duration::from_secs(self.poll_timeout_secs))
    }

    pub fn deletion_poll_options(&self) -> PollOptions {
        PollOptions::for_deletion().deadline(Duration::from_secs(self.poll_timeout_secs))
    }
}
