use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use review_bridge::{decode_inbound, HostSink, WriterSink};
use review_core::{update, Action, AppState, BookmarkId, EditMode, Msg};
use review_logging::{review_debug, review_info, review_warn};

use super::config::ReviewConfig;
use super::effects::EffectRunner;
use super::ui;
use super::ui::commands::Command;

pub struct AppOptions {
    pub script: Option<PathBuf>,
    pub outbound: Option<PathBuf>,
    pub config: ReviewConfig,
}

pub fn run_app(options: AppOptions) -> Result<()> {
    let reader: Box<dyn BufRead + Send> = match &options.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open script {:?}", path))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let sink: Box<dyn HostSink> = match &options.outbound {
        Some(path) => Box::new(WriterSink::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open outbound file {:?}", path))?,
        )),
        None => Box::new(WriterSink::new(io::stdout())),
    };

    // Script lines arrive on their own thread, the way engine messages would.
    let (line_tx, line_rx) = mpsc::channel::<String>();
    let reader_thread = thread::spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    review_warn!("Stopped reading script: {}", err);
                    break;
                }
            }
        }
    });

    let mut session = Session::new(options.config, EffectRunner::new(sink));
    let stdout = io::stdout();
    for line in line_rx {
        if let Some(text) = session.handle_line(&line) {
            let mut out = stdout.lock();
            out.write_all(text.as_bytes())
                .and_then(|()| out.flush())
                .context("Failed to write view")?;
        }
    }

    if reader_thread.join().is_err() {
        review_warn!("Script reader thread panicked");
    }
    review_info!("Script finished");
    Ok(())
}

/// One review session: owns the core state and turns script lines into messages.
struct Session {
    state: AppState,
    config: ReviewConfig,
    effects: EffectRunner,
}

impl Session {
    fn new(config: ReviewConfig, effects: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            config,
            effects,
        }
    }

    /// Returns the rendered view when the line changed something or asked for it.
    fn handle_line(&mut self, line: &str) -> Option<String> {
        let command = match ui::commands::parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return None,
            Err(err) => {
                review_warn!("Ignoring script line {:?}: {}", line, err);
                return None;
            }
        };

        match command {
            Command::Show => Some(self.render()),
            Command::Inbound(json) => match decode_inbound(&json) {
                Ok(msg) => self.dispatch_msg(msg),
                Err(err) => {
                    review_warn!("Dropping inbound message: {}", err);
                    None
                }
            },
            command => {
                let msg = self.command_to_msg(command)?;
                self.dispatch_msg(msg)
            }
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) -> Option<String> {
        review_debug!("Dispatching {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.effects.enqueue(effects);

        if self.state.consume_dirty() {
            Some(self.render())
        } else {
            None
        }
    }

    fn render(&self) -> String {
        ui::render::render(&self.state.view(), &self.config.labels)
    }

    fn command_to_msg(&self, command: Command) -> Option<Msg> {
        let msg = match command {
            Command::Start(mode) => Msg::StartClicked {
                mode: mode.unwrap_or_else(|| self.config.default_mode.clone()),
            },
            Command::Search(pattern) => Msg::SearchChanged(pattern),
            Command::Toggle { tag, enabled } => Msg::CategoryToggled { tag, enabled },
            Command::Remove(id) => Msg::ActionRequested(Action::Remove { id }),
            Command::Repair { id, new_url } => {
                let Some(new_url) = new_url.or_else(|| self.known_new_url(&id)) else {
                    review_warn!("No new URL known for {}", id);
                    return None;
                };
                Msg::ActionRequested(Action::RepairRedirect { id, new_url })
            }
            Command::Edit(id) => {
                let mode = if self.state.duplicates().is_some() {
                    EditMode::Duplicate
                } else {
                    EditMode::Default
                };
                Msg::ActionRequested(Action::Edit { id, mode })
            }
            Command::Submit { title, url } => Msg::EditSubmitted { title, url },
            Command::Cancel => Msg::EditCancelled,
            Command::Yes => Msg::ConfirmationAnswered(true),
            Command::No => Msg::ConfirmationAnswered(false),
            Command::RepairAll => Msg::RepairAllRedirectsClicked,
            Command::RemoveErrors => Msg::RemoveAllErrorsClicked,
            Command::Close => Msg::ViewClosed,
            Command::Show | Command::Inbound(_) => Msg::NoOp,
        };
        Some(msg)
    }

    fn known_new_url(&self, id: &BookmarkId) -> Option<String> {
        self.state
            .results()?
            .tree()
            .get(id)?
            .leaf()?
            .new_url
            .clone()
    }
}
