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

use crate::management::search::index::{
    Definition, DefinitionVersion, IndexDefinition, IndexSnapshot, IndexStatus, SearchIndexType,
    StatusDetail,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

// Listing responses arrive either as plain JSON or as relaxed extended JSON
// converted from BSON, so identifiers and timestamps accept both encodings.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IndexDefinitionJson {
    pub id: Option<IdJson>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub index_type: SearchIndexType,
    #[serde(default)]
    pub status: IndexStatus,
    #[serde(default)]
    pub queryable: bool,
    pub latest_version: Option<i64>,
    pub latest_definition_version: Option<DefinitionVersionJson>,
    pub latest_definition: Definition,
    #[serde(default)]
    pub status_detail: Vec<StatusDetailJson>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum IdJson {
    Plain(String),
    ObjectId {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DefinitionVersionJson {
    pub version: i64,
    pub created_at: Option<DateJson>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum DateJson {
    Rfc3339(DateTime<Utc>),
    Extended {
        #[serde(rename = "$date")]
        date: ExtendedDateJson,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ExtendedDateJson {
    Rfc3339(DateTime<Utc>),
    Millis(i64),
    NumberLong {
        #[serde(rename = "$numberLong")]
        millis: String,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusDetailJson {
    pub hostname: String,
    #[serde(default)]
    pub status: IndexStatus,
    #[serde(default)]
    pub queryable: bool,
    pub main_index: Option<IndexSnapshotJson>,
    pub staged_index: Option<IndexSnapshotJson>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IndexSnapshotJson {
    #[serde(default)]
    pub status: IndexStatus,
    #[serde(default)]
    pub queryable: bool,
    pub definition_version: Option<DefinitionVersionJson>,
    pub definition: Option<Definition>,
}

impl IdJson {
    fn into_string(self) -> String {
        match self {
            IdJson::Plain(id) => id,
            IdJson::ObjectId { oid } => oid,
        }
    }
}

impl DateJson {
    fn into_datetime(self) -> Option<DateTime<Utc>> {
        match self {
            DateJson::Rfc3339(date) => Some(date),
            DateJson::Extended { date } => match date {
                ExtendedDateJson::Rfc3339(date) => Some(date),
                ExtendedDateJson::Millis(millis) => DateTime::from_timestamp_millis(millis),
                ExtendedDateJson::NumberLong { millis } => millis
                    .parse::<i64>()
                    .ok()
                    .and_then(DateTime::from_timestamp_millis),
            },
        }
    }
}

impl From<DefinitionVersionJson> for DefinitionVersion {
    fn from(value: DefinitionVersionJson) -> DefinitionVersion {
        DefinitionVersion {
            version: value.version,
            created_at: value.created_at.and_then(DateJson::into_datetime),
        }
    }
}

impl From<IndexSnapshotJson> for IndexSnapshot {
    fn from(value: IndexSnapshotJson) -> IndexSnapshot {
        IndexSnapshot {
            status: value.status,
            queryable: value.queryable,
            definition_version: value.definition_version.map(DefinitionVersion::from),
            definition: value.definition,
        }
    }
}

impl From<StatusDetailJson> for StatusDetail {
    fn from(value: StatusDetailJson) -> StatusDetail {
        StatusDetail {
            hostname: value.hostname,
            status: value.status,
            queryable: value.queryable,
            main_index: value.main_index.map(IndexSnapshot::from),
            staged_index: value.staged_index.map(IndexSnapshot::from),
        }
    }
}

impl From<IndexDefinitionJson> for IndexDefinition {
    fn from(value: IndexDefinitionJson) -> IndexDefinition {
        IndexDefinition {
            id: value.id.map(IdJson::into_string),
            name: value.name,
            index_type: value.index_type,
            status: value.status,
            queryable: value.queryable,
            latest_version: value.latest_version,
            latest_definition_version: value
                .latest_definition_version
                .map(DefinitionVersion::from),
            latest_definition: value.latest_definition,
            status_detail: value
                .status_detail
                .into_iter()
                .map(StatusDetail::from)
                .collect(),
        }
    }
}
