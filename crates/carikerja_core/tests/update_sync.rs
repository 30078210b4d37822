use std::sync::Once;
use std::time::Duration;

use carikerja_core::{
    update, AppState, Article, Category, CategoryId, Collection, Effect, FetchFailure, Job,
    JobListView, Msg, RequestId, SyncSettings, DEFAULT_MIN_LOADING_WINDOW,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(carikerja_logging::initialize_for_tests);
}

fn job(id: i64, title: &str, location: &str) -> Job {
    Job {
        id,
        title: title.to_string(),
        company: "Acme".to_string(),
        location: location.to_string(),
        job_type: "Full-time".to_string(),
        date_posted: Some("2024-05-01".to_string()),
        apply_link: None,
        posters: Vec::new(),
        category_id: None,
        category: None,
        slug: format!("job-{id}"),
        description: String::new(),
    }
}

fn category(id: &str, name: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
    }
}

fn article(id: i64) -> Article {
    Article {
        id,
        title: format!("Artikel {id}"),
        excerpt: "Tips karier".to_string(),
        image: None,
        date_posted: Some("2024-05-02".to_string()),
    }
}

fn jobs_request(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchJobs { request, .. } => Some(*request),
            _ => None,
        })
        .expect("jobs fetch effect")
}

fn count_fetches(effects: &[Effect]) -> (usize, usize, usize) {
    effects.iter().fold((0, 0, 0), |(c, j, a), effect| match effect {
        Effect::FetchCategories { .. } => (c + 1, j, a),
        Effect::FetchJobs { .. } => (c, j + 1, a),
        Effect::FetchArticles { .. } => (c, j, a + 1),
        _ => (c, j, a),
    })
}

fn mounted(settings: SyncSettings) -> (AppState, Vec<Effect>) {
    update(AppState::with_settings(settings), Msg::Mounted)
}

#[test]
fn mount_fetches_all_three_collections() {
    init_logging();
    let (state, effects) = mounted(SyncSettings::default());

    assert!(state.loading());
    assert_eq!(
        effects,
        vec![
            Effect::FetchCategories { request: 1 },
            Effect::FetchJobs {
                request: 1,
                category: None,
            },
            Effect::FetchArticles { request: 1 },
        ]
    );
}

#[test]
fn category_change_refetches_only_jobs() {
    init_logging();
    let (state, _) = mounted(SyncSettings::default());

    let (state, effects) = update(
        state,
        Msg::CategorySelected(Some(CategoryId::new("it"))),
    );

    assert_eq!(count_fetches(&effects), (0, 1, 0));
    assert!(effects.contains(&Effect::FetchJobs {
        request: 2,
        category: Some(CategoryId::new("it")),
    }));
    assert!(state.loading());
    assert_eq!(state.selected_category(), Some(&CategoryId::new("it")));
}

#[test]
fn reselecting_current_category_is_noop() {
    init_logging();
    let (state, _) = mounted(SyncSettings::default());
    let (state, _) = update(state, Msg::CategorySelected(Some(CategoryId::new("it"))));

    let before = state.clone();
    let (state, effects) = update(state, Msg::CategorySelected(Some(CategoryId::new("it"))));
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn clearing_category_fetches_unfiltered_jobs() {
    init_logging();
    let (state, _) = mounted(SyncSettings::default());
    let (state, _) = update(state, Msg::CategorySelected(Some(CategoryId::new("it"))));
    let (_, effects) = update(state, Msg::CategorySelected(None));

    assert!(effects.contains(&Effect::FetchJobs {
        request: 3,
        category: None,
    }));
}

#[test]
fn search_never_fetches() {
    init_logging();
    let (state, _) = mounted(SyncSettings::default());
    let (state, effects) = update(state, Msg::SearchChanged("jakarta".to_string()));

    assert_eq!(count_fetches(&effects), (0, 0, 0));
    assert_eq!(state.search_text(), "jakarta");
}

#[test]
fn jobs_stay_loading_for_minimum_window() {
    init_logging();
    let (state, effects) = mounted(SyncSettings::default());
    let request = jobs_request(&effects);

    let (state, effects) = update(
        state,
        Msg::JobsLoaded {
            request,
            result: Ok(vec![job(2, "Backend Engineer", "Jakarta")]),
        },
    );
    assert_eq!(state.jobs().len(), 1);
    assert!(state.loading());
    assert_eq!(state.view().job_list, JobListView::Loading);
    assert_eq!(
        effects,
        vec![Effect::ReleaseLoadingAfter {
            request,
            delay: DEFAULT_MIN_LOADING_WINDOW,
        }]
    );

    let (state, effects) = update(state, Msg::LoadingWindowElapsed { request });
    assert!(effects.is_empty());
    assert!(!state.loading());
    match state.view().job_list {
        JobListView::Jobs(cards) => {
            assert_eq!(cards.len(), 1);
            assert_eq!(cards[0].subtitle, "Acme • Jakarta");
            assert_eq!(cards[0].detail_path, "/job/job-2");
        }
        other => panic!("expected job cards, got {other:?}"),
    }
}

#[test]
fn failed_jobs_fetch_clears_list_and_reports() {
    init_logging();
    let (state, effects) = mounted(SyncSettings::default());
    let first = jobs_request(&effects);
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request: first,
            result: Ok(vec![job(1, "Designer", "Bandung")]),
        },
    );
    let (state, _) = update(state, Msg::LoadingWindowElapsed { request: first });

    let (state, effects) = update(state, Msg::CategorySelected(Some(CategoryId::new("7"))));
    let second = jobs_request(&effects);
    let failure = FetchFailure::new("http status 500");
    let (state, effects) = update(
        state,
        Msg::JobsLoaded {
            request: second,
            result: Err(failure.clone()),
        },
    );

    assert!(state.jobs().is_empty());
    assert_eq!(
        effects,
        vec![
            Effect::ReportFailure {
                collection: Collection::Jobs,
                failure,
            },
            Effect::ReleaseLoadingAfter {
                request: second,
                delay: DEFAULT_MIN_LOADING_WINDOW,
            },
        ]
    );

    let (state, _) = update(state, Msg::LoadingWindowElapsed { request: second });
    assert!(!state.loading());
    assert!(state.jobs().is_empty());
    assert_eq!(state.view().job_list, JobListView::Empty);
}

#[test]
fn empty_result_shows_empty_not_loading() {
    init_logging();
    let (state, effects) = mounted(SyncSettings::immediate());
    let request = jobs_request(&effects);

    let (state, effects) = update(
        state,
        Msg::JobsLoaded {
            request,
            result: Ok(Vec::new()),
        },
    );

    assert!(effects.is_empty());
    assert!(!state.loading());
    let view = state.view();
    assert_eq!(view.job_list, JobListView::Empty);
    assert_eq!(view.visible_job_count, 0);
}

#[test]
fn stale_jobs_response_is_discarded() {
    init_logging();
    let (state, effects) = mounted(SyncSettings::default());
    let stale = jobs_request(&effects);
    let (state, effects) = update(state, Msg::CategorySelected(Some(CategoryId::new("it"))));
    let latest = jobs_request(&effects);

    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request: latest,
            result: Ok(vec![job(9, "Rust Engineer", "Jakarta")]),
        },
    );
    let (state, effects) = update(
        state,
        Msg::JobsLoaded {
            request: stale,
            result: Ok(vec![job(1, "Designer", "Bandung")]),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.jobs()[0].title, "Rust Engineer");
}

#[test]
fn stale_loading_release_keeps_newer_fetch_loading() {
    init_logging();
    let (state, effects) = mounted(SyncSettings::default());
    let first = jobs_request(&effects);
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request: first,
            result: Ok(vec![job(1, "Designer", "Bandung")]),
        },
    );
    let (state, _) = update(state, Msg::CategorySelected(Some(CategoryId::new("it"))));

    let (state, _) = update(state, Msg::LoadingWindowElapsed { request: first });
    assert!(state.loading());
}

#[test]
fn zero_window_releases_loading_immediately() {
    init_logging();
    let settings = SyncSettings {
        min_loading_window: Duration::ZERO,
        ..SyncSettings::default()
    };
    let (state, effects) = mounted(settings);
    let request = jobs_request(&effects);

    let (state, effects) = update(
        state,
        Msg::JobsLoaded {
            request,
            result: Ok(vec![job(1, "Designer", "Bandung")]),
        },
    );
    assert!(effects.is_empty());
    assert!(!state.loading());
}

#[test]
fn categories_failure_keeps_previous_list() {
    init_logging();
    let (state, _) = mounted(SyncSettings::default());
    let (state, _) = update(
        state,
        Msg::CategoriesLoaded {
            request: 1,
            result: Ok(vec![category("1", "IT"), category("2", "Keuangan")]),
        },
    );

    let (state, effects) = update(state, Msg::Mounted);
    let request = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchCategories { request } => Some(*request),
            _ => None,
        })
        .expect("categories fetch");
    let (mut state, effects) = update(
        state,
        Msg::CategoriesLoaded {
            request,
            result: Err(FetchFailure::new("network error")),
        },
    );

    assert_eq!(state.categories().len(), 2);
    assert_eq!(
        effects,
        vec![Effect::ReportFailure {
            collection: Collection::Categories,
            failure: FetchFailure::new("network error"),
        }]
    );
    assert!(state.consume_dirty());
}

#[test]
fn articles_failure_does_not_touch_jobs() {
    init_logging();
    let (state, effects) = mounted(SyncSettings::immediate());
    let request = jobs_request(&effects);
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request,
            result: Ok(vec![job(1, "Designer", "Bandung")]),
        },
    );
    let (state, effects) = update(
        state,
        Msg::ArticlesLoaded {
            request: 1,
            result: Err(FetchFailure::new("timeout")),
        },
    );

    assert_eq!(state.jobs().len(), 1);
    assert!(state.articles().is_empty());
    assert_eq!(effects.len(), 1);
}

#[test]
fn articles_are_rendered_as_cards() {
    init_logging();
    let (state, _) = mounted(SyncSettings::default());
    let (state, _) = update(
        state,
        Msg::ArticlesLoaded {
            request: 1,
            result: Ok(vec![article(5), article(4)]),
        },
    );

    let view = state.view();
    assert_eq!(view.articles.len(), 2);
    assert_eq!(view.articles[0].detail_path, "/article/5");
    assert_eq!(view.articles[1].title, "Artikel 4");
}

#[test]
fn search_filters_category_filtered_jobs() {
    init_logging();
    let (state, _) = mounted(SyncSettings::immediate());
    let (state, effects) = update(state, Msg::CategorySelected(Some(CategoryId::new("it"))));
    let request = jobs_request(&effects);
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request,
            result: Ok(vec![
                job(3, "Backend Engineer", "Jakarta"),
                job(2, "Frontend Engineer", "Bandung"),
            ]),
        },
    );
    let (state, _) = update(state, Msg::SearchChanged("BANDUNG".to_string()));

    let view = state.view();
    assert_eq!(view.total_job_count, 2);
    assert_eq!(view.visible_job_count, 1);
}

#[test]
fn selected_category_name_is_resolved() {
    init_logging();
    let (state, _) = mounted(SyncSettings::default());
    let (state, _) = update(
        state,
        Msg::CategoriesLoaded {
            request: 1,
            result: Ok(vec![category("1", "IT"), category("2", "Keuangan")]),
        },
    );
    assert_eq!(state.view().selected_category_name, None);

    let (state, _) = update(state, Msg::CategorySelected(Some(CategoryId::new("2"))));
    let view = state.view();
    assert_eq!(view.selected_category_name.as_deref(), Some("Keuangan"));
    assert!(view.categories[1].selected);
    assert!(!view.categories[0].selected);
}

#[test]
fn settles_once_every_fetch_and_window_is_done() {
    init_logging();
    let (state, effects) = mounted(SyncSettings::immediate());
    assert!(!state.is_settled());
    let jobs = jobs_request(&effects);

    let (state, _) = update(
        state,
        Msg::CategoriesLoaded {
            request: 1,
            result: Ok(vec![category("1", "IT")]),
        },
    );
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request: jobs,
            result: Ok(vec![job(1, "QA", "Jakarta")]),
        },
    );
    assert!(!state.is_settled(), "articles are still awaited");

    let (state, _) = update(
        state,
        Msg::ArticlesLoaded {
            request: 1,
            result: Err(FetchFailure::new("HTTP 500")),
        },
    );
    assert!(state.is_settled());
}

#[test]
fn superseded_jobs_fetch_keeps_state_unsettled() {
    init_logging();
    let (state, _) = mounted(SyncSettings::immediate());
    let (state, effects) = update(state, Msg::CategorySelected(Some(CategoryId::new("2"))));
    let newer = jobs_request(&effects);

    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request: newer - 1,
            result: Ok(Vec::new()),
        },
    );
    assert!(!state.is_settled());
    assert!(state.loading());
}
