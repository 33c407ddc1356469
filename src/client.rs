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

use crate::database::Database;
use crate::error;
use crate::error::Error;
use crate::options::client_options::ClientOptions;
use tracing::debug;

/// A connection to a deployment. Cloning is cheap and clones share the
/// underlying connection pool.
#[derive(Clone, Debug)]
pub struct Client {
    inner: mongodb::Client,
}

impl Client {
    pub async fn connect(conn_str: impl AsRef<str>, opts: ClientOptions) -> error::Result<Client> {
        let conn_str = conn_str.as_ref();
        if conn_str.is_empty() {
            return Err(Error::invalid_argument(
                "connection_string",
                "connection string cannot be empty",
            ));
        }

        let mut driver_opts = mongodb::options::ClientOptions::parse(conn_str).await?;
        opts.apply(&mut driver_opts);

        debug!(
            "Connecting to {:?} as {:?}",
            driver_opts.hosts, driver_opts.app_name
        );

        let inner = mongodb::Client::with_options(driver_opts)?;

        Ok(Client { inner })
    }

    pub fn database(&self, name: impl Into<String>) -> Database {
        Database::new(self.inner.database(&name.into()))
    }

    /// Closes the connection pool. Waits for outstanding cursors to be
    /// dropped before returning.
    pub async fn shutdown(self) {
        self.inner.shutdown().await;
    }
}
