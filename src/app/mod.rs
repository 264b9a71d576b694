//! Application shell: the serialized runtime and the headless command driver.

pub mod commands;
pub mod runtime;

use std::path::Path;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::actions::{Action, AppDelegateAction, InitializationAction};
use crate::env::live::LiveHandles;
use crate::state::AppState;
use commands::{Command, HELP, describe, parse_command};

pub use runtime::{Runtime, Store};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Run the root headlessly: launch, then apply commands until EOF or `quit`.
///
/// Inputs:
/// - `app`: Initial root state
/// - `handles`: Live environment plus simulated battery/synchronizer handles
/// - `script`: Command file; stdin when `None`
///
/// Output:
/// - `Ok(())` after a clean shutdown; `Err` if the script cannot be read or the
///   runtime task panicked.
///
/// Details:
/// - Sends `DidFinishLaunching` first, so the splash delay and initial setup run
///   exactly as on a device.
/// - Prints the view after every command that changes it.
pub async fn run_headless(app: AppState, handles: LiveHandles, script: Option<&Path>) -> Result<()> {
    let (runtime, store) = Runtime::new(app, handles.env.clone());
    let loop_task = tokio::spawn(runtime.run());
    store.send(Action::Initialization(InitializationAction::AppDelegate(
        AppDelegateAction::DidFinishLaunching,
    )));

    match script {
        Some(path) => {
            let file = tokio::fs::File::open(path).await?;
            drive(BufReader::new(file), &store, &handles).await?;
        }
        None => drive(BufReader::new(tokio::io::stdin()), &store, &handles).await?,
    }

    store.shutdown();
    let final_state = loop_task.await?;
    println!("{}", describe(&final_state.snapshot()));
    Ok(())
}

/// Apply commands read from `input` until EOF or `quit`.
async fn drive<R: AsyncBufRead + Unpin>(input: R, store: &Store, handles: &LiveHandles) -> Result<()> {
    let mut lines = input.lines();
    let mut last = String::new();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        tracing::debug!(?command, "[Headless] command");
        match command {
            Command::Send(action) => {
                store.send(action);
            }
            Command::Battery(state) => handles.battery.set(state),
            Command::Sync(connection) => handles.synchronizer.set_connection(connection),
            Command::AlertButton(index) => {
                if !store.press_alert(index) {
                    eprintln!("no alert button {index}");
                }
            }
            Command::DialogButton(index) => {
                if !store.press_dialog(index) {
                    eprintln!("no dialog button {index}");
                }
            }
            Command::Wait(duration) => tokio::time::sleep(duration).await,
            Command::Status => {
                // Let queued actions settle before reporting.
                tokio::task::yield_now().await;
                last = describe(&store.view());
                println!("{last}");
                if let Some(alert) = store.alert() {
                    println!("  alert: {}", alert.title);
                    for (i, button) in alert.buttons.iter().enumerate() {
                        println!("    [{i}] {}", button.label);
                    }
                }
                if let Some(dialog) = store.dialog() {
                    println!("  dialog: {}", dialog.title);
                    for (i, button) in dialog.buttons.iter().enumerate() {
                        println!("    [{i}] {}", button.label);
                    }
                }
                continue;
            }
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Quit => break,
        }
        tokio::task::yield_now().await;
        let now = describe(&store.view());
        if now != last {
            println!("{now}");
            last = now;
        }
    }
    Ok(())
}
