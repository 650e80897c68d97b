// history-onboard - learns how you work from your shell history
//
// This is the main entry point. Parses CLI args and dispatches to handlers.
// Results go to stdout as JSON; logs go to stderr.

use anyhow::Context;
use history_onboard_lib::{
    config, intelligence::ErrorRecord, logger, Onboarder, OnboardError, OnboardResponse,
};
use serde::Serialize;
use std::env;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(ExitCode::SUCCESS);
    }

    let command = &args[1];

    match command.as_str() {
        "version" | "-v" | "--version" => {
            println!("history-onboard v{}", env!("CARGO_PKG_VERSION"));
            return Ok(ExitCode::SUCCESS);
        }
        "help" | "-h" | "--help" => {
            print_usage();
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let settings = config::load().context("failed to load settings")?;
    logger::init(&settings.log_level).context("failed to start logging")?;
    let onboarder = Onboarder::from_settings(&settings);

    match command.as_str() {
        "onboard" => handle_onboard(&onboarder, &args[2..]),
        "config" => handle_config(&onboarder, &args[2..]),
        "profile" => handle_profile(&onboarder, &args[2..]),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(ExitCode::FAILURE)
        }
    }
}

fn handle_onboard(onboarder: &Onboarder, args: &[String]) -> anyhow::Result<ExitCode> {
    let (user_id, history) = match parse_onboard_args(args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("Error: {}", message);
            return Ok(ExitCode::FAILURE);
        }
    };

    let response = match history {
        Some(path) => onboarder.onboard_from(user_id, &config::expand_home(path)),
        None => onboarder.onboard(user_id),
    };

    print_json(&response)?;
    Ok(match response {
        OnboardResponse::Onboarded(_) => ExitCode::SUCCESS,
        OnboardResponse::Failed(_) => ExitCode::FAILURE,
    })
}

/// Split `onboard` arguments into the user id and an optional `--history` path
fn parse_onboard_args(args: &[String]) -> Result<(&str, Option<&str>), String> {
    let mut user_id: Option<&str> = None;
    let mut history: Option<&str> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--history" => {
                i += 1;
                match args.get(i) {
                    Some(path) if !path.starts_with("--") => history = Some(path.as_str()),
                    _ => return Err("--history needs a path".to_string()),
                }
            }
            arg => user_id = Some(arg),
        }
        i += 1;
    }

    match user_id {
        Some(user_id) => Ok((user_id, history)),
        None => Err("No user id provided".to_string()),
    }
}

fn handle_config(onboarder: &Onboarder, args: &[String]) -> anyhow::Result<ExitCode> {
    let Some(user_id) = args.first() else {
        eprintln!("Error: No user id provided");
        return Ok(ExitCode::FAILURE);
    };

    respond(onboarder.generate_config(user_id))
}

fn handle_profile(onboarder: &Onboarder, args: &[String]) -> anyhow::Result<ExitCode> {
    let Some(user_id) = args.first() else {
        eprintln!("Error: No user id provided");
        return Ok(ExitCode::FAILURE);
    };

    respond(onboarder.profile(user_id))
}

/// Print the value, or the error record for a failed lookup
fn respond<T: Serialize>(result: Result<T, OnboardError>) -> anyhow::Result<ExitCode> {
    match result {
        Ok(value) => {
            print_json(&value)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            print_json(&ErrorRecord::from(&e))?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn print_usage() {
    println!(
        r#"history-onboard v{} - Learns how you work from your shell history

USAGE:
    history-onboard <COMMAND> [OPTIONS]

COMMANDS:
    onboard <user_id> [--history <path>]   Learn a profile from shell history
    config <user_id>                       Print the agent config for a user
    profile <user_id>                      Print the stored profile for a user
    version                                Show version
    help                                   Show this help

EXAMPLES:
    history-onboard onboard alice
    history-onboard onboard alice --history ~/.zsh_history
    history-onboard config alice

CONFIGURATION:
    Settings are read from $HISTORY_ONBOARD_CONFIG or config/default.toml.
    HISTORY_ONBOARD_PROFILES_DIR, HISTORY_ONBOARD_HISTORY_FILE and
    HISTORY_ONBOARD_LOG_LEVEL override individual keys.
"#,
        env!("CARGO_PKG_VERSION")
    );
}
