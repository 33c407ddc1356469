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

use std::time::Duration;

pub const DEFAULT_APP_NAME: &str = "atlas-vector-index";

#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ClientOptions {
    // app_name is reported to the server in the connection handshake.
    pub app_name: Option<String>,
    // timeout_options specifies connection timeouts.
    pub timeout_options: TimeoutOptions,
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn timeout_options(mut self, timeout_options: TimeoutOptions) -> Self {
        self.timeout_options = timeout_options;
        self
    }

    /// Fills in settings the connection string left unset. Values given in
    /// the connection string always win.
    pub(crate) fn apply(&self, opts: &mut mongodb::options::ClientOptions) {
        if opts.app_name.is_none() {
            opts.app_name = self.app_name.clone();
        }

        if opts.server_selection_timeout.is_none() {
            opts.server_selection_timeout = self.timeout_options.server_selection_timeout;
        }

        if opts.connect_timeout.is_none() {
            opts.connect_timeout = self.timeout_options.connect_timeout;
        }
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            app_name: Some(DEFAULT_APP_NAME.to_string()),
            timeout_options: TimeoutOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct TimeoutOptions {
    pub server_selection_timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl TimeoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn server_selection_timeout(mut self, timeout: impl Into<Option<Duration>>) -> Self {
        self.server_selection_timeout = timeout.into();
        self
    }

    pub fn connect_timeout(mut self, timeout: impl Into<Option<Duration>>) -> Self {
        self.connect_timeout = timeout.into();
        self
    }
}

impl Default for TimeoutOptions {
    fn default() -> Self {
        Self {
            server_selection_timeout: Some(Duration::from_secs(30)),
            connect_timeout: Some(Duration::from_secs(10)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_on_top_of_parsed_options() {
        let mut driver_opts = mongodb::options::ClientOptions::default();

        ClientOptions::new()
            .app_name("vector-workflows")
            .timeout_options(TimeoutOptions::new().connect_timeout(Duration::from_secs(3)))
            .apply(&mut driver_opts);

        assert_eq!(Some("vector-workflows".to_string()), driver_opts.app_name);
        assert_eq!(Some(Duration::from_secs(3)), driver_opts.connect_timeout);
        assert_eq!(
            Some(Duration::from_secs(30)),
            driver_opts.server_selection_timeout
        );
    }

    #[tokio::test]
    async fn connection_string_settings_are_kept() {
        let mut driver_opts = mongodb::options::ClientOptions::parse(
            "mongodb://localhost:27017/?serverSelectionTimeoutMS=5000&connectTimeoutMS=2000&appName=Cluster0",
        )
        .await
        .unwrap();

        ClientOptions::default().apply(&mut driver_opts);

        assert_eq!(Some("Cluster0".to_string()), driver_opts.app_name);
        assert_eq!(
            Some(Duration::from_secs(5)),
            driver_opts.server_selection_timeout
        );
        assert_eq!(Some(Duration::from_secs(2)), driver_opts.connect_timeout);
    }

    #[tokio::test]
    async fn defaults_fill_settings_the_connection_string_omits() {
        let mut driver_opts =
            mongodb::options::ClientOptions::parse("mongodb://localhost:27017/?appName=Cluster0")
                .await
                .unwrap();

        ClientOptions::default().apply(&mut driver_opts);

        assert_eq!(Some("Cluster0".to_string()), driver_opts.app_name);
        assert_eq!(
            Some(Duration::from_secs(30)),
            driver_opts.server_selection_timeout
        );
        assert_eq!(Some(Duration::from_secs(10)), driver_opts.connect_timeout);
    }

    #[test]
    fn unset_timeouts_leave_driver_defaults() {
        let mut driver_opts = mongodb::options::ClientOptions::default();

        ClientOptions::new()
            .timeout_options(
                TimeoutOptions::new()
                    .connect_timeout(None)
                    .server_selection_timeout(None),
            )
            .apply(&mut driver_opts);

        assert_eq!(None, driver_opts.connect_timeout);
        assert_eq!(None, driver_opts.server_selection_timeout);
    }
}
