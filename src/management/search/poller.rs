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
use crate::error::Error;
use crate::error_context::Operation;
use crate::management::search::index::IndexStatus;
use crate::management::search::projection::{
    raw_index_name, raw_index_queryable, raw_index_status,
};
use crate::management::search::search_index_manager::SearchIndexManager;
use crate::options::search_index_mgmt_options::PollOptions;
use futures::TryStreamExt;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

#[derive(Copy, Debug, Clone, Ord, PartialOrd, Eq, PartialEq)]
#[non_exhaustive]
pub enum DesiredState {
    /// The index no longer appears in the collection's listing.
    Deleted,
    /// The index is listed and reports `queryable: true`. A listed index
    /// whose status is `FAILED` ends the poll with an error.
    Queryable,
}

#[derive(Copy, Debug, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PollState {
    Checking,
    /// The index was listed but is not yet in the desired state.
    FoundWaiting,
    /// The index was not listed but is expected to appear.
    AbsentWaiting,
    ConfirmedDeleted,
    ConfirmedQueryable,
}

impl PollState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PollState::ConfirmedDeleted | PollState::ConfirmedQueryable
        )
    }
}

impl Display for PollState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PollState::Checking => "CHECKING",
            PollState::FoundWaiting => "FOUND_WAITING",
            PollState::AbsentWaiting => "ABSENT_WAITING",
            PollState::ConfirmedDeleted => "CONFIRMED_DELETED",
            PollState::ConfirmedQueryable => "CONFIRMED_QUERYABLE",
        };

        write!(f, "{name}")
    }
}

/// What a completed poll observed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct PollSummary {
    /// Number of listings issued.
    pub attempts: u32,
    /// Number of interval sleeps taken.
    pub waits: u32,
    /// Every state entered, starting with `Checking` and ending with the
    /// terminal state.
    pub transitions: Vec<PollState>,
    pub elapsed: Duration,
}

impl PollSummary {
    pub fn final_state(&self) -> Option<PollState> {
        self.transitions.last().copied()
    }
}

/// Entry observed for the target name in one listing.
enum Observation {
    Absent,
    Present { queryable: bool, status: IndexStatus },
}

/// Repeatedly lists a collection's search indexes until the named index
/// reaches a [`DesiredState`].
///
/// Each attempt fetches a fresh listing. An attempt never confirms deletion
/// while the target name is still present in the listing. Listing errors
/// end the poll immediately.
pub struct IndexPoller<'a> {
    manager: &'a SearchIndexManager,
    index_name: String,
    desired_state: DesiredState,
    opts: PollOptions,

    state: PollState,
    transitions: Vec<PollState>,
    attempts: u32,
    waits: u32,
}

impl<'a> IndexPoller<'a> {
    pub fn new(
        manager: &'a SearchIndexManager,
        index_name: impl Into<String>,
        desired_state: DesiredState,
        opts: PollOptions,
    ) -> Self {
        Self {
            manager,
            index_name: index_name.into(),
            desired_state,
            opts,
            state: PollState::Checking,
            transitions: vec![PollState::Checking],
            attempts: 0,
            waits: 0,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub async fn poll(mut self) -> error::Result<PollSummary> {
        let start = Instant::now();

        loop {
            let observation = self.check().await?;

            let next = match (self.desired_state, observation) {
                (DesiredState::Deleted, Observation::Absent) => PollState::ConfirmedDeleted,
                (DesiredState::Deleted, Observation::Present { .. }) => PollState::FoundWaiting,
                (DesiredState::Queryable, Observation::Present { queryable: true, .. }) => {
                    PollState::ConfirmedQueryable
                }
                (
                    DesiredState::Queryable,
                    Observation::Present {
                        status: IndexStatus::Failed,
                        ..
                    },
                ) => {
                    debug!(
                        "Search index {} reported FAILED on poll {}",
                        self.index_name, self.attempts
                    );
                    return Err(self.manager.context_for(
                        Error::index_build_failed(&self.index_name),
                        Operation::PollSearchIndex,
                        Some(&self.index_name),
                    ));
                }
                (DesiredState::Queryable, Observation::Present { .. }) => PollState::FoundWaiting,
                (DesiredState::Queryable, Observation::Absent) => PollState::AbsentWaiting,
            };
            self.transition(next);

            if next.is_terminal() {
                return Ok(PollSummary {
                    attempts: self.attempts,
                    waits: self.waits,
                    transitions: self.transitions,
                    elapsed: start.elapsed(),
                });
            }

            if self.exhausted(start) {
                return Err(self.manager.context_for(
                    Error::poll_timeout(&self.index_name, self.attempts),
                    Operation::PollSearchIndex,
                    Some(&self.index_name),
                ));
            }

            sleep(self.opts.interval).await;
            self.waits += 1;
            self.transition(PollState::Checking);
        }
    }

    async fn check(&mut self) -> error::Result<Observation> {
        self.attempts += 1;

        let mut cursor = self.manager.list_indexes(None).await?;

        while let Some(raw) = cursor.try_next().await? {
            if raw_index_name(&raw) == Some(self.index_name.as_str()) {
                return Ok(Observation::Present {
                    queryable: raw_index_queryable(&raw),
                    status: raw_index_status(&raw),
                });
            }
        }

        Ok(Observation::Absent)
    }

    fn exhausted(&self, start: Instant) -> bool {
        if let Some(max_attempts) = self.opts.max_attempts {
            if self.attempts >= max_attempts {
                return true;
            }
        }

        if let Some(deadline) = self.opts.deadline {
            if start.elapsed() + self.opts.interval > deadline {
                return true;
            }
        }

        false
    }

    fn transition(&mut self, next: PollState) {
        debug!(
            "Search index {} poll {}: {} -> {}",
            self.index_name, self.attempts, self.state, next
        );

        self.state = next;
        self.transitions.push(next);
    }
}
