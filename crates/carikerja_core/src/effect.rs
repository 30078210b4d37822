use std::time::Duration;

use crate::{CategoryId, Collection, FetchFailure, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchCategories {
        request: RequestId,
    },
    FetchJobs {
        request: RequestId,
        category: Option<CategoryId>,
    },
    FetchArticles {
        request: RequestId,
    },
    FetchJobBySlug {
        request: RequestId,
        slug: String,
    },
    /// Deliver `Msg::LoadingWindowElapsed { request }` after `delay`.
    ReleaseLoadingAfter {
        request: RequestId,
        delay: Duration,
    },
    /// Deliver `Msg::TransitionElapsed { generation }` after `delay`.
    EndTransitionAfter {
        generation: u64,
        delay: Duration,
    },
    ReportFailure {
        collection: Collection,
        failure: FetchFailure,
    },
}
