use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use carikerja_core::{CategoryId, RequestId};
use carikerja_logging::{ck_debug, ck_warn};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, ListingStore};

/// Receives fetch completions from the engine's runtime threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
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
}

/// Owns a tokio runtime on a dedicated thread. Every command runs as its own
/// task, so independent fetches overlap. Dropping the handle cancels fetches
/// still in flight; their completions are never emitted.
pub struct EngineHandle {
    cmd_tx: Option<mpsc::Sender<EngineCommand>>,
    shutdown: CancellationToken,
    worker: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn spawn(store: Arc<dyn ListingStore>, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("carikerja-fetch")
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();

        let worker = thread::Builder::new()
            .name("carikerja-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let store = store.clone();
                    let sink = sink.clone();
                    let token = token.clone();
                    runtime.spawn(async move {
                        tokio::select! {
                            _ = token.cancelled() => {
                                ck_debug!("engine shutting down; fetch dropped");
                            }
                            event = handle_command(store.as_ref(), command) => {
                                sink.emit(event);
                            }
                        }
                    });
                }
                runtime.shutdown_background();
            })?;

        Ok(Self {
            cmd_tx: Some(cmd_tx),
            shutdown,
            worker: Some(worker),
        })
    }

    pub fn fetch_categories(&self, request: RequestId) {
        self.send(EngineCommand::FetchCategories { request });
    }

    pub fn fetch_jobs(&self, request: RequestId, category: Option<CategoryId>) {
        self.send(EngineCommand::FetchJobs { request, category });
    }

    pub fn fetch_articles(&self, request: RequestId) {
        self.send(EngineCommand::FetchArticles { request });
    }

    pub fn fetch_job_by_slug(&self, request: RequestId, slug: impl Into<String>) {
        self.send(EngineCommand::FetchJobBySlug {
            request,
            slug: slug.into(),
        });
    }

    fn send(&self, command: EngineCommand) {
        let sent = self
            .cmd_tx
            .as_ref()
            .map(|tx| tx.send(command).is_ok())
            .unwrap_or(false);
        if !sent {
            ck_warn!("engine worker is gone; command dropped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
        self.cmd_tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

async fn handle_command(store: &dyn ListingStore, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::FetchCategories { request } => {
            ck_debug!("fetch categories request={}", request);
            EngineEvent::CategoriesFetched {
                request,
                result: store.categories().await,
            }
        }
        EngineCommand::FetchJobs { request, category } => {
            ck_debug!("fetch jobs request={} category={:?}", request, category);
            EngineEvent::JobsFetched {
                request,
                result: store.jobs(category.as_ref()).await,
            }
        }
        EngineCommand::FetchArticles { request } => {
            ck_debug!("fetch articles request={}", request);
            EngineEvent::ArticlesFetched {
                request,
                result: store.articles().await,
            }
        }
        EngineCommand::FetchJobBySlug { request, slug } => {
            ck_debug!("fetch job detail request={} slug={}", request, slug);
            EngineEvent::JobFetched {
                request,
                result: store.job_by_slug(&slug).await,
            }
        }
    }
}
