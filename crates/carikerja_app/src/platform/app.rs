use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use carikerja_core::{update, AppState, CategoryId, Msg};
use carikerja_engine::RestStore;
use carikerja_logging::{ck_debug, ck_info, ck_warn, LogSink};
use clap::Parser;

use super::cli::Cli;
use super::commands::{parse_command, resolve_category, Command, HELP};
use super::config::AppConfig;
use super::effects::{AppEvent, EffectRunner};
use super::{logging, ui};

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);
    let _ = dotenvy::dotenv();

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let store = RestStore::new(config.store_settings()).context("creating listing store")?;
    ck_info!("CariKerja starting against {}", config.store.base_url);

    let (tx, rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(Arc::new(store), tx.clone(), Arc::new(LogSink))
        .context("starting fetch engine")?;
    spawn_input_reader(tx);

    let mut session = Session {
        state: AppState::with_settings(config.sync_settings()),
        runner,
    };
    session.dispatch(Msg::Mounted);
    if let Some(category) = cli.category.filter(|id| !id.trim().is_empty()) {
        session.dispatch(Msg::CategorySelected(Some(CategoryId::new(category.trim()))));
    }
    if let Some(search) = cli.search {
        session.dispatch(Msg::SearchChanged(search));
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    session.state.consume_dirty();
    draw(&mut out, &session)?;

    // Piped input ends early; keep going until the fetches it started land.
    let mut input_closed = false;
    for event in rx.iter() {
        let mut force_draw = false;
        match event {
            AppEvent::Core(msg) => session.dispatch(msg),
            AppEvent::Input(Command::Quit) => break,
            AppEvent::InputClosed => {
                ck_debug!("stdin closed; waiting for in-flight fetches");
                input_closed = true;
            }
            AppEvent::Input(command) => {
                force_draw = session.handle_command(command, &mut out)?;
            }
        }
        if session.state.consume_dirty() || force_draw {
            draw(&mut out, &session)?;
        }
        if input_closed && session.state.is_settled() {
            break;
        }
    }

    ck_info!("CariKerja exiting");
    Ok(())
}

struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    /// Returns whether the screen should be redrawn even if nothing changed.
    fn handle_command(&mut self, command: Command, out: &mut impl Write) -> io::Result<bool> {
        match command {
            Command::Search(text) => self.dispatch(Msg::SearchChanged(text)),
            Command::Category(choice) => {
                match resolve_category(&choice, self.state.categories()) {
                    Some(category) => self.dispatch(Msg::CategorySelected(category)),
                    None => {
                        writeln!(out, "Kategori tidak dikenal: {}", choice)?;
                        return Ok(false);
                    }
                }
            }
            Command::Job(slug) if slug.is_empty() => {
                writeln!(out, "Gunakan: job <slug>")?;
                return Ok(false);
            }
            Command::Job(slug) => self.dispatch(Msg::JobDetailRequested { slug }),
            Command::Back => self.dispatch(Msg::JobDetailClosed),
            Command::Reload => self.dispatch(Msg::Mounted),
            Command::Help => {
                writeln!(out, "{}", HELP)?;
                return Ok(false);
            }
            Command::Redraw => return Ok(true),
            Command::Quit => {}
        }
        Ok(false)
    }
}

fn draw(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let view = session.state.view();
    writeln!(out)?;
    write!(out, "{}", ui::render::render(&view))?;
    write!(out, "{}", ui::constants::PROMPT)?;
    out.flush()
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    let command = parse_command(&line);
                    ck_debug!("input command {:?}", command);
                    if tx.send(AppEvent::Input(command)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    ck_warn!("stdin read failed: {}", err);
                    break;
                }
            }
        }
        let _ = tx.send(AppEvent::InputClosed);
    });
}
