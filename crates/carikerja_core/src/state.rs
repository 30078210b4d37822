use std::time::Duration;

use crate::filter::derive_visible_jobs;
use crate::view_model::{self, AppViewModel};
use crate::{Article, Category, CategoryId, Collection, Effect, Job, SyncSettings};

/// Sequence number attached to a fetch and echoed back by its completion.
pub type RequestId = u64;

/// Issues request ids for one collection and remembers the latest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct RequestSeq {
    latest: RequestId,
    /// The latest request has not completed yet.
    pending: bool,
}

impl RequestSeq {
    fn issue(&mut self) -> RequestId {
        self.latest += 1;
        self.pending = true;
        self.latest
    }

    fn is_current(&self, request: RequestId) -> bool {
        request != 0 && request == self.latest
    }

    fn complete(&mut self, request: RequestId) -> bool {
        if !self.is_current(request) {
            return false;
        }
        self.pending = false;
        true
    }

    /// Moves past every issued request without expecting a completion.
    fn abandon(&mut self) {
        self.latest += 1;
        self.pending = false;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailState {
    #[default]
    Idle,
    Loading {
        slug: String,
    },
    Loaded(Box<Job>),
    NotFound {
        slug: String,
    },
    Unavailable {
        slug: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    settings: SyncSettings,
    categories: Vec<Category>,
    jobs: Vec<Job>,
    articles: Vec<Article>,
    selected_category: Option<CategoryId>,
    search_text: String,
    loading: bool,
    transitioning: bool,
    transition_generation: u64,
    categories_seq: RequestSeq,
    jobs_seq: RequestSeq,
    articles_seq: RequestSeq,
    detail_seq: RequestSeq,
    detail: DetailState,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(SyncSettings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The job list starts out loading: the first paint happens before the
    /// initial fetch is issued.
    pub fn with_settings(settings: SyncSettings) -> Self {
        Self {
            settings,
            categories: Vec::new(),
            jobs: Vec::new(),
            articles: Vec::new(),
            selected_category: None,
            search_text: String::new(),
            loading: true,
            transitioning: false,
            transition_generation: 0,
            categories_seq: RequestSeq::default(),
            jobs_seq: RequestSeq::default(),
            articles_seq: RequestSeq::default(),
            detail_seq: RequestSeq::default(),
            detail: DetailState::Idle,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        view_model::build(self)
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn selected_category(&self) -> Option<&CategoryId> {
        self.selected_category.as_ref()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn visible_jobs(&self) -> Vec<&Job> {
        derive_visible_jobs(&self.jobs, &self.search_text)
    }

    /// True when no fetch is awaited and no loading or transition window is open.
    pub fn is_settled(&self) -> bool {
        !self.loading
            && !self.transitioning
            && [
                &self.categories_seq,
                &self.jobs_seq,
                &self.articles_seq,
                &self.detail_seq,
            ]
            .iter()
            .all(|seq| !seq.pending)
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn issue_request(&mut self, collection: Collection) -> RequestId {
        self.seq_mut(collection).issue()
    }

    /// Accepts the completion of `request` if it is the latest one issued.
    pub(crate) fn complete_request(&mut self, collection: Collection, request: RequestId) -> bool {
        self.seq_mut(collection).complete(request)
    }

    pub(crate) fn abandon_requests(&mut self, collection: Collection) {
        self.seq_mut(collection).abandon();
    }

    fn seq_mut(&mut self, collection: Collection) -> &mut RequestSeq {
        match collection {
            Collection::Categories => &mut self.categories_seq,
            Collection::Jobs => &mut self.jobs_seq,
            Collection::Articles => &mut self.articles_seq,
            Collection::JobDetail => &mut self.detail_seq,
        }
    }

    pub(crate) fn begin_jobs_fetch(&mut self) -> Effect {
        let request = self.issue_request(Collection::Jobs);
        self.loading = true;
        self.mark_dirty();
        Effect::FetchJobs {
            request,
            category: self.selected_category.clone(),
        }
    }

    /// Schedules the end of the loading state for `request`, or ends it now
    /// when no minimum window is configured.
    pub(crate) fn release_loading(&mut self, request: RequestId) -> Option<Effect> {
        let delay = self.settings.min_loading_window;
        if delay == Duration::ZERO {
            self.finish_loading(request);
            return None;
        }
        Some(Effect::ReleaseLoadingAfter { request, delay })
    }

    pub(crate) fn finish_loading(&mut self, request: RequestId) -> bool {
        if !self.jobs_seq.is_current(request) || !self.loading {
            return false;
        }
        self.loading = false;
        self.mark_dirty();
        true
    }

    pub(crate) fn begin_transition(&mut self) -> Option<Effect> {
        self.transition_generation += 1;
        let delay = self.settings.transition_window;
        if delay == Duration::ZERO {
            self.transitioning = false;
            return None;
        }
        self.transitioning = true;
        self.mark_dirty();
        Some(Effect::EndTransitionAfter {
            generation: self.transition_generation,
            delay,
        })
    }

    pub(crate) fn end_transition(&mut self, generation: u64) -> bool {
        if generation != self.transition_generation || !self.transitioning {
            return false;
        }
        self.transitioning = false;
        self.mark_dirty();
        true
    }

    pub(crate) fn set_selected_category(&mut self, category: Option<CategoryId>) {
        self.selected_category = category;
        self.mark_dirty();
    }

    pub(crate) fn set_search_text(&mut self, text: String) {
        self.search_text = text;
        self.mark_dirty();
    }

    pub(crate) fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
        self.mark_dirty();
    }

    pub(crate) fn set_jobs(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs;
        self.mark_dirty();
    }

    pub(crate) fn set_articles(&mut self, articles: Vec<Article>) {
        self.articles = articles;
        self.mark_dirty();
    }

    pub(crate) fn set_detail(&mut self, detail: DetailState) {
        self.detail = detail;
        self.mark_dirty();
    }
}
