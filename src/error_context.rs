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

use serde::ser::SerializeStruct;
use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Operation {
    CreateSearchIndex,
    ViewSearchIndex,
    ListSearchIndexes,
    UpdateSearchIndex,
    DropSearchIndex,
    PollSearchIndex,
    VectorSearch,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateSearchIndex => "create_search_index",
            Operation::ViewSearchIndex => "view_search_index",
            Operation::ListSearchIndexes => "list_search_indexes",
            Operation::UpdateSearchIndex => "update_search_index",
            Operation::DropSearchIndex => "drop_search_index",
            Operation::PollSearchIndex => "poll_search_index",
            Operation::VectorSearch => "vector_search",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ErrorContext {
    operation: Operation,
    database_name: String,
    collection_name: String,
    index_name: Option<String>,
}

impl ErrorContext {
    pub(crate) fn new(
        operation: Operation,
        database_name: impl Into<String>,
        collection_name: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            database_name: database_name.into(),
            collection_name: collection_name.into(),
            index_name: None,
        }
    }

    pub(crate) fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = Some(index_name.into());
        self
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    pub fn index_name(&self) -> Option<&String> {
        self.index_name.as_ref()
    }
}

impl Serialize for ErrorContext {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("context", 4)?;
        state.serialize_field("operation", self.operation.as_str())?;
        state.serialize_field("database", &self.database_name)?;
        state.serialize_field("collection", &self.collection_name)?;

        if let Some(ref index_name) = self.index_name {
            state.serialize_field("index", index_name)?;
        }

        state.end()
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "operation={} namespace={}.{}",
            self.operation, self.database_name, self.collection_name
        )?;

        if let Some(index_name) = &self.index_name {
            write!(f, " index={index_name}")?;
        }

        Ok(())
    }
}
