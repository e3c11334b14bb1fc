use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use status_core::{update, AppState, FailureGate, Msg, RandomFailureGate, RequestId};
use status_engine::{ClientConfig, EnvTokenProvider, ReqwestStatusClient, StatusClient};
use status_logging::{status_info, status_warn};

use super::config::{AppConfig, Args};
use super::effects::EffectRunner;
use super::logging;
use super::ui::constants::HELP;
use super::ui::input::{parse_line, Command};
use super::ui::render::{render, RenderOptions};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::from_args(Args::parse())?;
    logging::initialize(config.log, config.log_level);
    status_info!(
        "status_app v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.base_url
    );

    let provider = Arc::new(EnvTokenProvider::new(config.token_env.clone()));
    let client_config = ClientConfig::new(&config.base_url, provider, config.client_settings())
        .context("building client configuration")?;
    let client: Arc<dyn StatusClient> = Arc::new(ReqwestStatusClient::new(client_config)?);

    let gate = match config.seed {
        Some(seed) => RandomFailureGate::from_seed(seed),
        None => RandomFailureGate::from_entropy(),
    }
    .with_probability(config.failure_rate);

    let mut session = Session {
        state: AppState::new(),
        gate: Box::new(gate),
        runner: EffectRunner::new(client),
        options: RenderOptions {
            color: config.color,
        },
        last_frame: String::new(),
        rendered_request: None,
    };

    println!("{HELP}\n");
    session.render(true)?;
    session.run(spawn_stdin_reader())
}

struct Session {
    state: AppState,
    gate: Box<dyn FailureGate>,
    runner: EffectRunner,
    options: RenderOptions,
    last_frame: String,
    rendered_request: Option<RequestId>,
}

impl Session {
    fn run(&mut self, lines: mpsc::Receiver<String>) -> anyhow::Result<()> {
        let mut quitting = false;
        loop {
            // Input is only read while the form is enabled.
            if !quitting && !self.state.is_loading() {
                match lines.try_recv() {
                    Ok(line) => match parse_line(&line) {
                        Command::Dispatch(msgs) => {
                            for msg in msgs {
                                self.dispatch(msg);
                            }
                        }
                        Command::Help => println!("{HELP}"),
                        Command::Quit => quitting = true,
                        Command::Nothing => {}
                        Command::Unknown(word) => {
                            println!("Unknown command '{word}'. Type 'help' for commands.")
                        }
                    },
                    Err(mpsc::TryRecvError::Empty) => {}
                    Err(mpsc::TryRecvError::Disconnected) => quitting = true,
                }
            }

            while let Some(msg) = self.runner.try_recv() {
                self.dispatch(msg);
            }

            self.dispatch(Msg::Tick);
            self.render(false)?;

            if quitting && !self.state.is_loading() {
                status_info!("input closed; exiting");
                return Ok(());
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg, self.gate.as_mut());
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn render(&mut self, force: bool) -> anyhow::Result<()> {
        if !self.state.consume_dirty() && !force {
            return Ok(());
        }
        let view = self.state.view();
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        let frame = render(&view, self.options, &timestamp);
        // Identical frames apart from the clock are not worth repeating, unless a
        // request started since the last one was printed.
        let request = self.state.last_request_id();
        if !should_print(&frame, &self.last_frame, request != self.rendered_request) && !force {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{frame}")?;
        stdout.flush()?;
        self.last_frame = frame;
        self.rendered_request = request;
        Ok(())
    }
}

fn should_print(frame: &str, last_frame: &str, new_request: bool) -> bool {
    new_request || strip_timestamp(frame) != strip_timestamp(last_frame)
}

fn strip_timestamp(frame: &str) -> &str {
    frame.split_once("] ").map_or(frame, |(_, rest)| rest)
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    status_warn!("stdin read failed: {}", err);
                    break;
                }
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::{should_print, strip_timestamp};

    #[test]
    fn strip_timestamp_drops_clock_prefix() {
        assert_eq!(strip_timestamp("[10:00:00] Ready\nPHONE"), "Ready\nPHONE");
        assert_eq!(strip_timestamp("no clock"), "no clock");
    }

    #[test]
    fn repeated_frame_is_printed_only_after_a_new_request() {
        let error = "[10:00:00] ERROR: An error occurred\nPHONE | STATUS\n";
        let later = "[10:00:05] ERROR: An error occurred\nPHONE | STATUS\n";
        assert!(!should_print(later, error, false));
        assert!(should_print(later, error, true));
        assert!(should_print("[10:00:05] Ready\n", error, false));
    }
}
