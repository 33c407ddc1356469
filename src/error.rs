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

use crate::error_context::ErrorContext;
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};
use std::ops::Deref;

pub type Result<T> = std::result::Result<T, Error>;

// Server error codes returned by mongot-backed search index commands.
const INDEX_NOT_FOUND_CODE: i32 = 27;
const INDEX_ALREADY_EXISTS_CODE: i32 = 68;
const UNAUTHORIZED_CODE: i32 = 13;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Error {
    kind: Box<ErrorKind>,
    context: Box<Option<ErrorContext>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
            context: Box::new(None),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        self.context.deref().as_ref()
    }

    /// True for failures produced while issuing a command: connection,
    /// authentication, or a server rejecting the request.
    pub fn is_command_failure(&self) -> bool {
        !self.is_projection_failure()
    }

    /// True when a server response could not be projected into the typed
    /// index model. This indicates a schema mismatch, not a network problem.
    pub fn is_projection_failure(&self) -> bool {
        matches!(self.kind(), ErrorKind::Projection(_))
    }

    pub(crate) fn other_failure(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::OtherFailure(msg.into()))
    }

    pub(crate) fn invalid_argument(arg: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(InvalidArgumentErrorKind {
            msg: msg.into(),
            arg: Some(arg.into()),
        }))
    }

    pub(crate) fn projection(kind: ProjectionErrorKind) -> Self {
        Self::new(ErrorKind::Projection(kind))
    }

    pub(crate) fn poll_timeout(index_name: impl Into<String>, attempts: u32) -> Self {
        Self::new(ErrorKind::PollTimeout(PollTimeoutErrorKind {
            index_name: index_name.into(),
            attempts,
        }))
    }

    pub(crate) fn index_build_failed(index_name: impl Into<String>) -> Self {
        Self::new(ErrorKind::IndexBuildFailed(index_name.into()))
    }

    // Not a From impl: driver errors already convert via From and may carry
    // their own serialization failures.
    pub(crate) fn encoding_failure_from_bson(e: mongodb::bson::ser::Error) -> Self {
        Self::new(ErrorKind::EncodingFailure(format!("encoding failed: {e}")))
    }

    pub(crate) fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Box::new(Some(context));
        self
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let msg = self.kind.to_string();

        if let Some(context) = self.context.deref() {
            write!(f, "{msg}: {context}")
        } else {
            write!(f, "{msg}")
        }
    }
}

impl StdError for Error {}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    // Command failures
    ConnectionFailure(String),
    AuthenticationFailure,
    InvalidArgument(InvalidArgumentErrorKind),
    IndexExists,
    IndexNotFound,
    ServerFailure(ServerErrorKind),
    EncodingFailure(String),
    DecodingFailure(String),
    PollTimeout(PollTimeoutErrorKind),
    IndexBuildFailed(String),
    OtherFailure(String),

    // Projection failures
    Projection(ProjectionErrorKind),
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            ErrorKind::ConnectionFailure(msg) => {
                return write!(f, "connection failure: {msg}");
            }
            ErrorKind::OtherFailure(msg) => {
                return write!(f, "{msg}");
            }
            ErrorKind::InvalidArgument(invalid_arg_kind) => {
                let arg = &invalid_arg_kind.arg;
                let msg = &invalid_arg_kind.msg;

                return if let Some(arg) = arg {
                    write!(f, "invalid argument for {arg}: {msg}")
                } else {
                    write!(f, "invalid argument: {msg}")
                };
            }
            ErrorKind::ServerFailure(server) => {
                return write!(f, "server failure: {server}");
            }
            ErrorKind::PollTimeout(timeout) => {
                return write!(
                    f,
                    "index {} did not reach the desired state after {} polls",
                    timeout.index_name, timeout.attempts
                );
            }
            ErrorKind::IndexBuildFailed(index_name) => {
                return write!(f, "index {index_name} failed to build");
            }
            ErrorKind::Projection(projection) => {
                return write!(f, "projection failure: {projection}");
            }
            ErrorKind::EncodingFailure(msg) => return write!(f, "encoding failure: {msg}"),
            ErrorKind::DecodingFailure(msg) => return write!(f, "decoding failure: {msg}"),
            ErrorKind::AuthenticationFailure => "authentication failure",
            ErrorKind::IndexExists => "index exists",
            ErrorKind::IndexNotFound => "index not found",
        };

        write!(f, "{msg}")
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct InvalidArgumentErrorKind {
    pub(crate) msg: String,
    pub arg: Option<String>,
}

impl InvalidArgumentErrorKind {
    pub fn msg(&self) -> &str {
        &self.msg
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ServerErrorKind {
    pub code: i32,
    pub code_name: String,
    pub msg: String,
}

impl Display for ServerErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.code_name.is_empty() {
            write!(f, "({}) {}", self.code, self.msg)
        } else {
            write!(f, "{} ({}) {}", self.code_name, self.code, self.msg)
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct PollTimeoutErrorKind {
    pub index_name: String,
    pub attempts: u32,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ProjectionErrorKind {
    MissingField { path: String },
    UnexpectedShape { path: String, expected: String },
    UnknownFieldType { index: usize, field_type: String },
    InvalidValue { path: String, msg: String },
}

impl Display for ProjectionErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectionErrorKind::MissingField { path } => {
                write!(f, "missing required field {path}")
            }
            ProjectionErrorKind::UnexpectedShape { path, expected } => {
                write!(f, "expected {path} to be {expected}")
            }
            ProjectionErrorKind::UnknownFieldType { index, field_type } => {
                write!(f, "unknown type {field_type} for field {index}")
            }
            ProjectionErrorKind::InvalidValue { path, msg } => {
                write!(f, "invalid value at {path}: {msg}")
            }
        }
    }
}

impl From<mongodb::error::Error> for Error {
    fn from(value: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind as DriverErrorKind;

        let kind = match value.kind.as_ref() {
            DriverErrorKind::Authentication { .. } => ErrorKind::AuthenticationFailure,
            DriverErrorKind::Command(e) => match e.code {
                INDEX_NOT_FOUND_CODE => ErrorKind::IndexNotFound,
                INDEX_ALREADY_EXISTS_CODE => ErrorKind::IndexExists,
                UNAUTHORIZED_CODE => ErrorKind::AuthenticationFailure,
                _ => ErrorKind::ServerFailure(ServerErrorKind {
                    code: e.code,
                    code_name: e.code_name.clone(),
                    msg: e.message.clone(),
                }),
            },
            DriverErrorKind::ServerSelection { message, .. }
            | DriverErrorKind::DnsResolve { message, .. }
            | DriverErrorKind::ConnectionPoolCleared { message, .. } => {
                ErrorKind::ConnectionFailure(message.clone())
            }
            DriverErrorKind::Io(e) => ErrorKind::ConnectionFailure(e.to_string()),
            DriverErrorKind::InvalidArgument { message, .. } => {
                ErrorKind::InvalidArgument(InvalidArgumentErrorKind {
                    msg: message.clone(),
                    arg: None,
                })
            }
            DriverErrorKind::BsonDeserialization(e) => {
                ErrorKind::DecodingFailure(format!("decoding failed: {e}"))
            }
            DriverErrorKind::BsonSerialization(e) => {
                ErrorKind::EncodingFailure(format!("encoding failed: {e}"))
            }
            _ => ErrorKind::OtherFailure(value.to_string()),
        };

        Error::new(kind)
    }
}
