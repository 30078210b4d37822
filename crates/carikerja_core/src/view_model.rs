use crate::{AppState, ArticleId, CategoryId, DetailState, Job, JobId};

/// Article excerpts are clamped to this many characters on cards.
pub const EXCERPT_LIMIT: usize = 160;
const CLAMP_MARKER: char = '…';

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub categories: Vec<CategoryOption>,
    pub selected_category: Option<CategoryId>,
    /// `None` when every category is shown.
    pub selected_category_name: Option<String>,
    pub search_text: String,
    pub job_list: JobListView,
    pub visible_job_count: usize,
    pub total_job_count: usize,
    pub articles: Vec<ArticleCardView>,
    pub transitioning: bool,
    pub detail: JobDetailView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub id: CategoryId,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobListView {
    #[default]
    Loading,
    Empty,
    Jobs(Vec<JobCardView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCardView {
    pub id: JobId,
    pub title: String,
    /// `company • location`
    pub subtitle: String,
    pub job_type: Option<String>,
    pub category_name: Option<String>,
    pub detail_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCardView {
    pub id: ArticleId,
    pub title: String,
    pub date_posted: Option<String>,
    pub excerpt: String,
    pub image: Option<String>,
    pub detail_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobDetailView {
    #[default]
    Hidden,
    Loading {
        slug: String,
    },
    Ready(JobDetailCard),
    NotFound {
        slug: String,
    },
    Unavailable {
        slug: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetailCard {
    pub title: String,
    pub company: String,
    pub job_type: String,
    pub location: String,
    pub date_posted: Option<String>,
    pub category_name: Option<String>,
    pub description: String,
    pub apply_link: Option<String>,
    /// First poster, shown as the main image.
    pub poster: Option<String>,
    /// Posters beyond the first one.
    pub extra_posters: usize,
}

pub(crate) fn build(state: &AppState) -> AppViewModel {
    let selected = state.selected_category();
    let categories = state
        .categories()
        .iter()
        .map(|category| CategoryOption {
            id: category.id.clone(),
            name: category.name.clone(),
            selected: Some(&category.id) == selected,
        })
        .collect::<Vec<_>>();
    let selected_category_name = categories
        .iter()
        .find(|option| option.selected)
        .map(|option| option.name.clone());

    let visible = state.visible_jobs();
    let visible_job_count = visible.len();
    let job_list = if state.loading() {
        JobListView::Loading
    } else if visible.is_empty() {
        JobListView::Empty
    } else {
        JobListView::Jobs(visible.into_iter().map(job_card).collect())
    };

    let articles = state
        .articles()
        .iter()
        .map(|article| ArticleCardView {
            id: article.id,
            title: article.title.clone(),
            date_posted: article.date_posted.clone(),
            excerpt: clamp_text(&article.excerpt, EXCERPT_LIMIT),
            image: article.image.clone().filter(|image| !image.is_empty()),
            detail_path: article.detail_path(),
        })
        .collect();

    AppViewModel {
        categories,
        selected_category: selected.cloned(),
        selected_category_name,
        search_text: state.search_text().to_string(),
        job_list,
        visible_job_count,
        total_job_count: state.jobs().len(),
        articles,
        transitioning: state.transitioning(),
        detail: detail_view(state.detail()),
        dirty: state.is_dirty(),
    }
}

fn job_card(job: &Job) -> JobCardView {
    JobCardView {
        id: job.id,
        title: job.title.clone(),
        subtitle: format!("{} • {}", job.company, job.location),
        job_type: non_empty(&job.job_type),
        category_name: job.category_name().map(ToOwned::to_owned),
        detail_path: job.detail_path(),
    }
}

fn detail_view(detail: &DetailState) -> JobDetailView {
    match detail {
        DetailState::Idle => JobDetailView::Hidden,
        DetailState::Loading { slug } => JobDetailView::Loading { slug: slug.clone() },
        DetailState::NotFound { slug } => JobDetailView::NotFound { slug: slug.clone() },
        DetailState::Unavailable { slug } => JobDetailView::Unavailable { slug: slug.clone() },
        DetailState::Loaded(job) => JobDetailView::Ready(JobDetailCard {
            title: job.title.clone(),
            company: job.company.clone(),
            job_type: job.job_type.clone(),
            location: job.location.clone(),
            date_posted: job.date_posted.clone(),
            category_name: job.category_name().map(ToOwned::to_owned),
            description: job.description.clone(),
            apply_link: job.apply_url().map(|url| url.to_string()),
            poster: job.primary_poster().map(ToOwned::to_owned),
            extra_posters: job.posters.len().saturating_sub(1),
        }),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Cuts `text` to at most `limit` characters, ending in an ellipsis when cut.
pub fn clamp_text(text: &str, limit: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(limit) {
        None => text.to_string(),
        Some((end, _)) => {
            let mut clamped = text[..end].trim_end().to_string();
            clamped.push(CLAMP_MARKER);
            clamped
        }
    }
}
