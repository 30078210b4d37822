use crate::{Article, Category, CategoryId, FetchFailure, Job, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The listing page was opened (or re-opened); loads every collection.
    Mounted,
    /// User picked a category from the dropdown. `None` means all categories.
    CategorySelected(Option<CategoryId>),
    /// User edited the search box.
    SearchChanged(String),
    CategoriesLoaded {
        request: RequestId,
        result: Result<Vec<Category>, FetchFailure>,
    },
    JobsLoaded {
        request: RequestId,
        result: Result<Vec<Job>, FetchFailure>,
    },
    ArticlesLoaded {
        request: RequestId,
        result: Result<Vec<Article>, FetchFailure>,
    },
    /// The minimum loading window of a jobs fetch has passed.
    LoadingWindowElapsed { request: RequestId },
    /// The transition window raised by a filter change has passed.
    TransitionElapsed { generation: u64 },
    /// User opened a job detail page.
    JobDetailRequested { slug: String },
    /// Result of a detail lookup. `Ok(None)` means no job has that slug.
    JobDetailLoaded {
        request: RequestId,
        result: Result<Option<Job>, FetchFailure>,
    },
    /// User left the detail page.
    JobDetailClosed,
}
