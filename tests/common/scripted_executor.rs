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

use async_trait::async_trait;
use atlas_vector_index::error::{Error, ErrorKind, Result};
use atlas_vector_index::management::search::{CommandOutput, IndexCommand, IndexCommandExecutor};
use atlas_vector_index::results::search_index_mgmt_results::IndexCursor;
use futures::stream;
use futures::StreamExt;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays queued responses in order and records every command it receives.
pub struct ScriptedExecutor {
    responses: Mutex<VecDeque<Result<CommandOutput>>>,
    commands: Mutex<Vec<IndexCommand>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            commands: Mutex::new(vec![]),
        }
    }

    pub fn push(&self, response: Result<CommandOutput>) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn push_listing(&self, listing: Vec<Value>) -> &Self {
        self.push(Ok(CommandOutput::Listed(IndexCursor::from_values(listing))))
    }

    /// A listing whose entries are followed by a read failure.
    pub fn push_broken_listing(&self, listing: Vec<Value>, err: Error) -> &Self {
        let items = listing.into_iter().map(Ok).chain(std::iter::once(Err(err)));
        self.push(Ok(CommandOutput::Listed(IndexCursor::new(
            stream::iter(items).boxed(),
        ))))
    }

    pub fn push_error(&self, kind: ErrorKind) -> &Self {
        self.push(Err(Error::new(kind)))
    }

    pub fn commands(&self) -> Vec<IndexCommand> {
        self.commands.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl IndexCommandExecutor for ScriptedExecutor {
    async fn execute(&self, command: IndexCommand) -> Result<CommandOutput> {
        self.commands.lock().unwrap().push(command.clone());

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(Error::new(ErrorKind::OtherFailure(format!(
                    "no scripted response for {command:?}"
                ))))
            })
    }
}
