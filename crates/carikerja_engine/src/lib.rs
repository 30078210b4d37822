//! CariKerja engine: remote store access and fetch execution.
mod engine;
mod query;
mod store;
mod types;

pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use query::{
    articles_query, categories_query, job_by_slug_query, jobs_query, Direction, Query,
    JOB_DETAIL_COLUMNS, JOB_LIST_COLUMNS,
};
pub use store::{ListingStore, RestStore, StoreSettings, ERROR_BODY_LIMIT};
pub use types::{EngineEvent, FailureKind, FetchError};
