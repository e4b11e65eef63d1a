//! Record Store Port - Collection-oriented persistence for prospects and activities.
//!
//! The store offers three operations per collection: select-all, insert-one
//! (returning the stored row with its assigned identifier) and
//! delete-by-identifier. There is no update; records are created once.
//!
//! Adapters: `PostgrestClient` for the hosted table API, `InMemoryRecordStore`
//! for development and tests.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::activity::{Activity, NewActivity};
use crate::domain::foundation::{ActivityId, ErrorCode, ProspectId};
use crate::domain::prospect::{NewProspect, Prospect};

/// Port for the `prospects` collection.
///
/// # Contract
///
/// - `list_all` returns every stored row, in store order
/// - `insert` returns the row as stored, with its assigned `id`
/// - `delete` returns how many rows the store actually removed; an unknown id,
///   or a row the store refuses to touch, yields `Ok(0)` rather than an error
#[async_trait]
pub trait ProspectStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Prospect>, StoreError>;

    async fn insert(&self, prospect: &NewProspect) -> Result<Prospect, StoreError>;

    async fn delete(&self, id: ProspectId) -> Result<usize, StoreError>;
}

/// Port for the `activities` collection. Same contract as [`ProspectStore`].
#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Activity>, StoreError>;

    async fn insert(&self, activity: &NewActivity) -> Result<Activity, StoreError>;

    async fn delete(&self, id: ActivityId) -> Result<usize, StoreError>;
}

/// Errors returned by record store adapters.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The request never got a response (connect, timeout, TLS).
    #[error("Record store unreachable: {0}")]
    Transport(String),

    /// The store answered with a non-success status.
    #[error("Record store rejected request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The response body did not match the expected row shape.
    #[error("Failed to decode record store response: {0}")]
    Decode(String),

    /// An insert succeeded but no row came back.
    #[error("Record store returned no row for insert into '{0}'")]
    EmptyResponse(String),

    /// A delete was accepted but removed no row, e.g. row-level security
    /// filtered it out.
    #[error("Record store deleted no row with id {id} from '{collection}'")]
    NothingDeleted { collection: String, id: String },
}

impl StoreError {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport(reason.into())
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode(reason.into())
    }

    pub fn nothing_deleted(collection: impl Into<String>, id: impl ToString) -> Self {
        Self::NothingDeleted {
            collection: collection.into(),
            id: id.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::Rejected { .. } | StoreError::NothingDeleted { .. } => {
                ErrorCode::StoreRejected
            }
            StoreError::Transport(_) | StoreError::Decode(_) | StoreError::EmptyResponse(_) => {
                ErrorCode::StoreUnavailable
            }
        }
    }
}
