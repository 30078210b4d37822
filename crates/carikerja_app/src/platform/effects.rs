use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use carikerja_core::{Effect, FetchFailure, Msg};
use carikerja_engine::{EngineEvent, EngineHandle, EventSink, ListingStore};
use carikerja_logging::DiagnosticSink;

use super::commands::Command;

/// Everything the main loop reacts to, funneled through one channel.
#[derive(Debug)]
pub enum AppEvent {
    Core(Msg),
    Input(Command),
    InputClosed,
}

/// Executes effects produced by `update`: fetches go to the engine, timers
/// become sleeping threads, failures go to the diagnostics sink.
pub struct EffectRunner {
    engine: EngineHandle,
    tx: mpsc::Sender<AppEvent>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl EffectRunner {
    pub fn new(
        store: Arc<dyn ListingStore>,
        tx: mpsc::Sender<AppEvent>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> io::Result<Self> {
        let sink = Arc::new(MsgSink { tx: tx.clone() });
        let engine = EngineHandle::spawn(store, sink)?;
        Ok(Self {
            engine,
            tx,
            diagnostics,
        })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchCategories { request } => self.engine.fetch_categories(request),
                Effect::FetchJobs { request, category } => {
                    self.engine.fetch_jobs(request, category)
                }
                Effect::FetchArticles { request } => self.engine.fetch_articles(request),
                Effect::FetchJobBySlug { request, slug } => {
                    self.engine.fetch_job_by_slug(request, slug)
                }
                Effect::ReleaseLoadingAfter { request, delay } => {
                    self.deliver_after(delay, Msg::LoadingWindowElapsed { request });
                }
                Effect::EndTransitionAfter { generation, delay } => {
                    self.deliver_after(delay, Msg::TransitionElapsed { generation });
                }
                Effect::ReportFailure {
                    collection,
                    failure,
                } => {
                    self.diagnostics
                        .report(&collection.to_string(), &failure.message);
                }
            }
        }
    }

    fn deliver_after(&self, delay: Duration, msg: Msg) {
        if delay.is_zero() {
            let _ = self.tx.send(AppEvent::Core(msg));
            return;
        }
        let tx = self.tx.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = tx.send(AppEvent::Core(msg));
        });
    }
}

struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Core(event_to_msg(event)));
    }
}

pub fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::CategoriesFetched { request, result } => Msg::CategoriesLoaded {
            request,
            result: result.map_err(FetchFailure::from),
        },
        EngineEvent::JobsFetched { request, result } => Msg::JobsLoaded {
            request,
            result: result.map_err(FetchFailure::from),
        },
        EngineEvent::ArticlesFetched { request, result } => Msg::ArticlesLoaded {
            request,
            result: result.map_err(FetchFailure::from),
        },
        EngineEvent::JobFetched { request, result } => Msg::JobDetailLoaded {
            request,
            result: result.map_err(FetchFailure::from),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{mpsc, Arc};
    use std::time::Duration;

    use carikerja_core::{
        Article, Category, CategoryId, Collection, Effect, FetchFailure, Job, Msg,
    };
    use carikerja_engine::{EngineEvent, FailureKind, FetchError, ListingStore};
    use carikerja_logging::{Diagnostic, MemorySink};

    use super::{event_to_msg, AppEvent, EffectRunner};

    const WAIT: Duration = Duration::from_secs(5);

    struct FakeStore;

    #[async_trait::async_trait]
    impl ListingStore for FakeStore {
        async fn categories(&self) -> Result<Vec<Category>, FetchError> {
            Ok(vec![Category {
                id: CategoryId::new("7"),
                name: "Desain".to_string(),
            }])
        }

        async fn jobs(&self, _category: Option<&CategoryId>) -> Result<Vec<Job>, FetchError> {
            Ok(Vec::new())
        }

        async fn articles(&self) -> Result<Vec<Article>, FetchError> {
            Ok(Vec::new())
        }

        async fn job_by_slug(&self, _slug: &str) -> Result<Option<Job>, FetchError> {
            Ok(None)
        }
    }

    fn runner() -> (EffectRunner, mpsc::Receiver<AppEvent>, Arc<MemorySink>) {
        let (tx, rx) = mpsc::channel();
        let diagnostics = Arc::new(MemorySink::new());
        let runner = EffectRunner::new(Arc::new(FakeStore), tx, diagnostics.clone()).unwrap();
        (runner, rx, diagnostics)
    }

    #[test]
    fn fetch_results_come_back_as_messages() {
        let (runner, rx, _) = runner();
        runner.run(vec![Effect::FetchCategories { request: 3 }]);

        match rx.recv_timeout(WAIT).unwrap() {
            AppEvent::Core(Msg::CategoriesLoaded { request, result }) => {
                assert_eq!(request, 3);
                assert_eq!(result.unwrap()[0].name, "Desain");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn missing_slug_is_reported_as_none() {
        let (runner, rx, _) = runner();
        runner.run(vec![Effect::FetchJobBySlug {
            request: 1,
            slug: "tidak-ada".to_string(),
        }]);

        assert!(matches!(
            rx.recv_timeout(WAIT).unwrap(),
            AppEvent::Core(Msg::JobDetailLoaded {
                request: 1,
                result: Ok(None)
            })
        ));
    }

    #[test]
    fn timers_deliver_their_message() {
        let (runner, rx, _) = runner();
        runner.run(vec![
            Effect::ReleaseLoadingAfter {
                request: 9,
                delay: Duration::from_millis(10),
            },
            Effect::EndTransitionAfter {
                generation: 2,
                delay: Duration::ZERO,
            },
        ]);

        let mut received = Vec::new();
        for _ in 0..2 {
            match rx.recv_timeout(WAIT).unwrap() {
                AppEvent::Core(msg) => received.push(msg),
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert!(received.contains(&Msg::LoadingWindowElapsed { request: 9 }));
        assert!(received.contains(&Msg::TransitionElapsed { generation: 2 }));
    }

    #[test]
    fn failures_go_to_diagnostics() {
        let (runner, _rx, diagnostics) = runner();
        runner.run(vec![Effect::ReportFailure {
            collection: Collection::Jobs,
            failure: FetchFailure::new("HTTP 500"),
        }]);

        assert_eq!(
            diagnostics.take(),
            vec![Diagnostic {
                source: "jobs".to_string(),
                message: "HTTP 500".to_string(),
            }]
        );
    }

    #[test]
    fn engine_errors_become_failures() {
        let msg = event_to_msg(EngineEvent::JobsFetched {
            request: 4,
            result: Err(FetchError {
                kind: FailureKind::Timeout,
                message: "no response".to_string(),
            }),
        });

        match msg {
            Msg::JobsLoaded {
                request: 4,
                result: Err(failure),
            } => assert!(failure.message.contains("no response")),
            other => panic!("unexpected msg {other:?}"),
        }
    }
}
