use crate::{AppState, Collection, DetailState, Effect, FetchFailure, Msg, RequestId};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            // The three collections are independent; the runner may execute
            // these in any order.
            let categories = state.issue_request(Collection::Categories);
            let jobs = state.begin_jobs_fetch();
            let articles = state.issue_request(Collection::Articles);
            vec![
                Effect::FetchCategories {
                    request: categories,
                },
                jobs,
                Effect::FetchArticles { request: articles },
            ]
        }
        Msg::CategorySelected(category) => {
            if state.selected_category() == category.as_ref() {
                return (state, Vec::new());
            }
            state.set_selected_category(category);
            let mut effects = vec![state.begin_jobs_fetch()];
            effects.extend(state.begin_transition());
            effects
        }
        Msg::SearchChanged(text) => {
            if text == state.search_text() {
                return (state, Vec::new());
            }
            state.set_search_text(text);
            state.begin_transition().into_iter().collect()
        }
        Msg::CategoriesLoaded { request, result } => {
            if !state.complete_request(Collection::Categories, request) {
                return (state, Vec::new());
            }
            match result {
                Ok(categories) => {
                    state.set_categories(categories);
                    Vec::new()
                }
                // Keep whatever categories were shown before.
                Err(failure) => vec![report(Collection::Categories, failure)],
            }
        }
        Msg::JobsLoaded { request, result } => {
            if !state.complete_request(Collection::Jobs, request) {
                return (state, Vec::new());
            }
            let mut effects = Vec::new();
            match result {
                Ok(jobs) => state.set_jobs(jobs),
                Err(failure) => {
                    state.set_jobs(Vec::new());
                    effects.push(report(Collection::Jobs, failure));
                }
            }
            effects.extend(state.release_loading(request));
            effects
        }
        Msg::ArticlesLoaded { request, result } => {
            if !state.complete_request(Collection::Articles, request) {
                return (state, Vec::new());
            }
            match result {
                Ok(articles) => {
                    state.set_articles(articles);
                    Vec::new()
                }
                Err(failure) => vec![report(Collection::Articles, failure)],
            }
        }
        Msg::LoadingWindowElapsed { request } => {
            state.finish_loading(request);
            Vec::new()
        }
        Msg::TransitionElapsed { generation } => {
            state.end_transition(generation);
            Vec::new()
        }
        Msg::JobDetailRequested { slug } => {
            let slug = slug.trim().to_string();
            if slug.is_empty() {
                return (state, Vec::new());
            }
            let request = state.issue_request(Collection::JobDetail);
            state.set_detail(DetailState::Loading { slug: slug.clone() });
            vec![Effect::FetchJobBySlug { request, slug }]
        }
        Msg::JobDetailLoaded { request, result } => {
            apply_detail(&mut state, request, result).into_iter().collect()
        }
        Msg::JobDetailClosed => {
            if *state.detail() != DetailState::Idle {
                // A lookup still in flight is dropped when it completes.
                state.abandon_requests(Collection::JobDetail);
                state.set_detail(DetailState::Idle);
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn apply_detail(
    state: &mut AppState,
    request: RequestId,
    result: Result<Option<crate::Job>, FetchFailure>,
) -> Option<Effect> {
    if !state.complete_request(Collection::JobDetail, request) {
        return None;
    }
    let slug = match state.detail() {
        DetailState::Loading { slug } => slug.clone(),
        _ => return None,
    };
    match result {
        Ok(Some(job)) => {
            state.set_detail(DetailState::Loaded(Box::new(job)));
            None
        }
        Ok(None) => {
            state.set_detail(DetailState::NotFound { slug });
            None
        }
        Err(failure) => {
            state.set_detail(DetailState::Unavailable { slug });
            Some(report(Collection::JobDetail, failure))
        }
    }
}

fn report(collection: Collection, failure: FetchFailure) -> Effect {
    Effect::ReportFailure {
        collection,
        failure,
    }
}
