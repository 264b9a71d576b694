//! Line-oriented command language for driving the root without a UI.
//!
//! One command per line; blank lines and `#` comments are ignored.

use std::fmt::Write as _;
use std::time::Duration;

use crate::actions::{Action, AppDelegateAction, DestinationAction, InitializationAction};
use crate::features::debug::DebugAction;
use crate::features::export_logs::ExportLogsAction;
use crate::features::not_enough_free_space::NotEnoughFreeSpaceAction;
use crate::features::onboarding::OnboardingAction;
use crate::features::phrase_display::PhraseDisplayAction;
use crate::features::phrase_validation::PhraseValidationAction;
use crate::features::welcome::WelcomeAction;
use crate::state::ViewSnapshot;
use crate::state::types::{BatteryState, ConnectionState, Destination, SeedPhrase};

/// Usage text printed by `help`.
pub const HELP: &str = "\
commands:
  launch | foreground | background     platform lifecycle events
  splash                               request splash removal
  get-started | debug-menu             welcome screen buttons
  create                               create a new wallet
  import <birthday> <words...>         import a wallet
  goto <destination> | back            navigation
  deeplink <url>                       open a link
  phrase-finished                      leave the phrase display
  validate <words...>                  submit the backup test
  alert <n> | dialog <n>               press a button (0-based)
  wipe                                 request wallet wipe
  rescan                               ask for a rescan
  flag <name> <on|off>                 set a wallet-config flag
  export-logs                          export logs
  space-retry                          re-check free space
  server                               open server selection
  battery <unplugged|charging|full>    change battery state
  sync <connected|disconnected|unavailable>
  wait <ms>                            pause the script
  status                               print the current view
  help | quit";

/// Parsed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Queue an action.
    Send(Action),
    /// Change the simulated battery state.
    Battery(BatteryState),
    /// Change the simulated synchronizer connection.
    Sync(ConnectionState),
    /// Press an alert button.
    AlertButton(usize),
    /// Press a dialog button.
    DialogButton(usize),
    /// Pause.
    Wait(Duration),
    /// Print the view.
    Status,
    /// Print usage.
    Help,
    /// Stop.
    Quit,
}

/// Parse failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// First word is not a command.
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    /// Arguments missing or malformed.
    #[error("usage: {0}")]
    Usage(&'static str),
}

fn action(a: Action) -> Command {
    Command::Send(a)
}

fn init(a: InitializationAction) -> Command {
    action(Action::Initialization(a))
}

fn index(arg: Option<&str>, usage: &'static str) -> Result<usize, CommandError> {
    arg.and_then(|s| s.parse().ok())
        .ok_or(CommandError::Usage(usage))
}

/// What: Parse one command line.
///
/// Inputs:
/// - `line`: Raw line.
///
/// Output:
/// - `Ok(None)` for blank and comment lines, `Ok(Some(cmd))` otherwise.
///
/// # Errors
/// - `Unknown` for an unrecognised first word, `Usage` for bad arguments.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();
    let first = rest.first().copied();
    let cmd = match head.to_ascii_lowercase().as_str() {
        "launch" => init(InitializationAction::AppDelegate(
            AppDelegateAction::DidFinishLaunching,
        )),
        "foreground" => init(InitializationAction::AppDelegate(
            AppDelegateAction::WillEnterForeground,
        )),
        "background" => init(InitializationAction::AppDelegate(
            AppDelegateAction::DidEnterBackground,
        )),
        "splash" => action(Action::SplashRemovalRequested),
        "get-started" => action(Action::Welcome(WelcomeAction::GetStarted)),
        "debug-menu" => action(Action::Welcome(WelcomeAction::DebugMenuStartup)),
        "create" => action(Action::Onboarding(OnboardingAction::CreateNewWallet)),
        "import" => {
            let birthday = first
                .and_then(|s| s.parse().ok())
                .ok_or(CommandError::Usage("import <birthday> <words...>"))?;
            if rest.len() < 2 {
                return Err(CommandError::Usage("import <birthday> <words...>"));
            }
            action(Action::Onboarding(OnboardingAction::ImportWallet {
                seed: SeedPhrase::new(&rest[1..].join(" ")),
                birthday,
            }))
        }
        "goto" => {
            let dest = first
                .and_then(Destination::from_config_key)
                .ok_or(CommandError::Usage("goto <destination>"))?;
            action(Action::Destination(DestinationAction::GoTo(dest)))
        }
        "back" => action(Action::Destination(DestinationAction::Back)),
        "deeplink" => {
            let url = first.ok_or(CommandError::Usage("deeplink <url>"))?;
            action(Action::Destination(DestinationAction::Deeplink(
                url.to_string(),
            )))
        }
        "phrase-finished" => action(Action::PhraseDisplay(PhraseDisplayAction::Finished)),
        "validate" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("validate <words...>"));
            }
            action(Action::PhraseValidation(PhraseValidationAction::Submit(
                rest.iter().map(|w| (*w).to_string()).collect(),
            )))
        }
        "alert" => Command::AlertButton(index(first, "alert <n>")?),
        "dialog" => Command::DialogButton(index(first, "dialog <n>")?),
        "wipe" => init(InitializationAction::NukeWalletRequest),
        "rescan" => action(Action::Debug(DebugAction::RescanBlockchain)),
        "flag" => {
            let usage = "flag <name> <on|off>";
            let name = first.ok_or(CommandError::Usage(usage))?;
            let enabled = match rest.get(1).map(|s| s.to_ascii_lowercase()).as_deref() {
                Some("on" | "true" | "1") => true,
                Some("off" | "false" | "0") => false,
                _ => return Err(CommandError::Usage(usage)),
            };
            action(Action::Debug(DebugAction::UpdateFlag {
                name: name.to_string(),
                enabled,
            }))
        }
        "export-logs" => action(Action::ExportLogs(ExportLogsAction::Start)),
        "space-retry" => action(Action::NotEnoughFreeSpace(NotEnoughFreeSpaceAction::Retry)),
        "server" => action(Action::Destination(DestinationAction::ServerSwitch)),
        "battery" => Command::Battery(
            first
                .and_then(BatteryState::from_config_key)
                .ok_or(CommandError::Usage("battery <unplugged|charging|full>"))?,
        ),
        "sync" => Command::Sync(
            match first.map(str::to_ascii_lowercase).as_deref() {
                Some("connected") => ConnectionState::Connected,
                Some("disconnected") => ConnectionState::Disconnected,
                Some("unavailable") => ConnectionState::ServiceUnavailable,
                _ => {
                    return Err(CommandError::Usage(
                        "sync <connected|disconnected|unavailable>",
                    ));
                }
            },
        ),
        "wait" => Command::Wait(Duration::from_millis(
            first
                .and_then(|s| s.parse().ok())
                .ok_or(CommandError::Usage("wait <ms>"))?,
        )),
        "status" => Command::Status,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(cmd))
}

/// One-line rendering of the view for the headless driver.
#[must_use]
pub fn describe(view: &ViewSnapshot) -> String {
    let mut out = format!(
        "destination={:?} state={} start={:?} status={:?}",
        view.destination, view.initialization_state, view.start_state, view.wallet_status
    );
    if view.low_space {
        out.push_str(" low_space");
    }
    if view.is_restoring_wallet {
        out.push_str(" restoring");
    }
    if let Some(kind) = view.alert {
        let _ = write!(out, " alert={kind:?}");
    }
    if let Some(kind) = view.dialog {
        let _ = write!(out, " dialog={kind:?}");
    }
    if view.server_setup_shown {
        out.push_str(" server_setup");
    }
    out
}
