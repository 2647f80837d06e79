use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use client_logging::{client_debug, client_info, client_warn};
use tubelens_core::{update, AppState, Diagnostic, Msg};
use tubelens_engine::ConnectionHandle;

use super::config::{self, ClientConfig};
use super::effects::{self, EffectRunner};
use super::logging;
use super::ui;
use super::ui::input::UserCommand;

/// Everything the dispatch loop reacts to.
#[derive(Debug)]
pub enum Inbound {
    Core(Msg),
    /// A raw line typed at the prompt.
    Line(String),
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let path = config::config_path(std::env::args().nth(1));
    let (config, config_error) = match config::load_config(&path) {
        Ok(loaded) => (loaded.unwrap_or_default(), None),
        Err(err) => (ClientConfig::default(), Some(err)),
    };

    logging::initialize(config.log_destination);
    if let Some(err) = config_error {
        client_warn!("Using default configuration: {}", err);
    }
    client_info!("Tubelens starting, endpoint {}", config.endpoint);

    let (connection, events) = ConnectionHandle::open(config.connection_settings());
    let (msg_tx, msg_rx) = mpsc::channel::<Inbound>();

    effects::spawn_event_pump(events, msg_tx.clone());
    spawn_stdin_reader(msg_tx.clone());

    let runner = EffectRunner::new(connection.clone(), msg_tx);
    let mut state = AppState::with_options(config.reconciler_options());

    println!("{}", ui::constants::HELP_TEXT);
    print_view(&state);

    while let Ok(inbound) = msg_rx.recv() {
        let msgs = match inbound {
            Inbound::Core(msg) => vec![msg],
            Inbound::Line(line) => match ui::input::parse_line(&line) {
                UserCommand::Quit => break,
                UserCommand::Help => {
                    println!("{}", ui::constants::HELP_TEXT);
                    prompt();
                    continue;
                }
                command => ui::input::to_msgs(command),
            },
            Inbound::Quit => break,
        };

        for msg in msgs {
            let (next, effects) = update(state, msg);
            state = next;
            report(state.take_diagnostics());
            for alert in runner.run(effects) {
                println!("! {alert}");
            }
        }
        if state.consume_dirty() {
            print_view(&state);
        }
    }

    client_info!("Tubelens shutting down");
    connection.close();
    Ok(())
}

fn spawn_stdin_reader(msg_tx: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if msg_tx.send(Inbound::Line(line)).is_err() {
                return;
            }
        }
        client_debug!("Standard input closed");
        let _ = msg_tx.send(Inbound::Quit);
    });
}

fn report(diagnostics: Vec<Diagnostic>) {
    for diagnostic in diagnostics {
        if matches!(
            diagnostic,
            Diagnostic::Transport(_)
                | Diagnostic::SendRejected { .. }
                | Diagnostic::InvalidRequest(_)
        ) {
            println!("! {diagnostic}");
        }
    }
}

fn print_view(state: &AppState) {
    for line in ui::render::render(&state.view()) {
        println!("{line}");
    }
    prompt();
}

fn prompt() {
    print!("{}", ui::constants::PROMPT);
    let _ = io::stdout().flush();
}
