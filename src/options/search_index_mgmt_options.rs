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

pub const DEFAULT_DELETION_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_QUERYABLE_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Default, Debug, Clone)]
#[non_exhaustive]
pub struct CreateSearchIndexOptions {}

impl CreateSearchIndexOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Default, Debug, Clone)]
#[non_exhaustive]
pub struct ViewSearchIndexOptions {}

impl ViewSearchIndexOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Default, Debug, Clone)]
#[non_exhaustive]
pub struct ListSearchIndexesOptions {}

impl ListSearchIndexesOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Default, Debug, Clone)]
#[non_exhaustive]
pub struct UpdateSearchIndexOptions {}

impl UpdateSearchIndexOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Default, Debug, Clone)]
#[non_exhaustive]
pub struct DropSearchIndexOptions {}

impl DropSearchIndexOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Controls how often, and for how long, an index is polled.
///
/// With neither `max_attempts` nor `deadline` set, polling continues until
/// the desired state is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct PollOptions {
    pub interval: Duration,
    pub max_attempts: Option<u32>,
    pub deadline: Option<Duration>,
}

impl PollOptions {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
            deadline: None,
        }
    }

    pub fn for_deletion() -> Self {
        Self::new(DEFAULT_DELETION_POLL_INTERVAL)
    }

    pub fn for_queryable() -> Self {
        Self::new(DEFAULT_QUERYABLE_POLL_INTERVAL)
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn max_attempts(mut self, max_attempts: impl Into<Option<u32>>) -> Self {
        self.max_attempts = max_attempts.into();
        self
    }

    pub fn deadline(mut self, deadline: impl Into<Option<Duration>>) -> Self {
        self.deadline = deadline.into();
        self
    }
}

impl Default for PollOptions {
    fn default() -> Self {
        Self::for_deletion()
    }
}
