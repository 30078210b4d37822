//! CariKerja core: pure listing state machine, search filter and view-model helpers.
mod effect;
mod filter;
mod model;
mod msg;
mod settings;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use filter::{derive_visible_jobs, job_matches};
pub use model::{
    Article, ArticleId, Category, CategoryId, CategoryRef, Collection, FetchFailure, Job, JobId,
};
pub use msg::Msg;
pub use settings::{SyncSettings, DEFAULT_MIN_LOADING_WINDOW, DEFAULT_TRANSITION_WINDOW};
pub use state::{AppState, DetailState, RequestId};
pub use update::update;
pub use view_model::{
    clamp_text, AppViewModel, ArticleCardView, CategoryOption, JobCardView, JobDetailCard,
    JobDetailView, JobListView, EXCERPT_LIMIT,
};
