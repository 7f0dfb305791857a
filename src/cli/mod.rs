mod check;

use anyhow::{Result, bail};
use console::style;
use std::path::PathBuf;
use tracing::info;

use crate::core::api::PracticumClient;
use crate::core::config::Config;
use crate::core::notifier::Notifier;
use crate::core::poller::Poller;
use crate::interfaces::telegram::TelegramMessenger;

fn print_help() {
    println!(
        "\n{}\n",
        style("homework-bot: review status notifications in Telegram").bold()
    );
    println!("  {}     Poll the review API forever (default)", style("run").green());
    println!("  {}   Validate the environment and exit", style("check").green());
    println!("  {}    Show this help message", style("help").green());
    println!();
    println!("  --log-file <path>   Log file (default: $BOT_LOG_FILE or program.log)");
    println!("  --verbose, -v       Log debug events");
    println!(
        "\n {} {} [command] [flags]\n",
        style("Usage:").bold(),
        style("homework-bot").green()
    );
    println!(
        " Environment: PRACTICUM_TOKEN, TELEGRAM_TOKEN, TELEGRAM_CHAT_ID,\n              PRACTICUM_ENDPOINT, RETRY_TIME, BOT_LOG_FILE (.env is read)\n"
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Run,
    Check,
    Help,
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CliArgs {
    pub command: Command,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}

pub(crate) fn parse_cli_args(args: &[String], start: usize) -> CliArgs {
    let mut command = None;
    let mut log_file = None;
    let mut verbose = false;
    let mut i = start;
    while i < args.len() {
        match args[i].as_str() {
            "--log-file" => {
                if i + 1 < args.len() {
                    log_file = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--verbose" | "-v" => {
                verbose = true;
                i += 1;
            }
            "--help" | "-h" | "help" => {
                command = Some(Command::Help);
                i += 1;
            }
            other if command.is_none() => {
                command = Some(match other {
                    "run" => Command::Run,
                    "check" => Command::Check,
                    _ => Command::Unknown(other.to_string()),
                });
                i += 1;
            }
            _ => i += 1,
        }
    }
    CliArgs {
        command: command.unwrap_or(Command::Run),
        log_file,
        verbose,
    }
}

pub async fn run_main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let parsed = parse_cli_args(&args, 1);

    match parsed.command {
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Unknown(cmd) => {
            print_help();
            bail!("unknown command '{}'", cmd)
        }
        Command::Check => {
            let config = Config::from_env()?;
            check::run_check(&config)?;
            Ok(())
        }
        Command::Run => {
            let mut config = Config::from_env()?;
            if let Some(path) = parsed.log_file {
                config.log_file = path;
            }
            crate::logging::init(&config.log_file, parsed.verbose)?;
            config.dotenv.log();
            config.require_tokens()?;

            info!("Starting homework bot, endpoint {}", config.endpoint);
            let client = PracticumClient::from_config(&config);
            let notifier = Notifier::new(TelegramMessenger::from_config(&config));
            let mut poller = Poller::new(client, notifier, config.retry_interval);
            poller.run_forever().await;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliArgs, Command, parse_cli_args};
    use std::path::PathBuf;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_means_run() {
        let parsed = parse_cli_args(&args(&["homework-bot"]), 1);
        assert_eq!(
            parsed,
            CliArgs {
                command: Command::Run,
                log_file: None,
                verbose: false
            }
        );
    }

    #[test]
    fn flags_are_read_around_the_command() {
        let parsed = parse_cli_args(
            &args(&["homework-bot", "--log-file", "/var/log/bot.log", "run", "-v"]),
            1,
        );
        assert_eq!(parsed.command, Command::Run);
        assert_eq!(parsed.log_file, Some(PathBuf::from("/var/log/bot.log")));
        assert!(parsed.verbose);
    }

    #[test]
    fn check_and_help_commands() {
        assert_eq!(
            parse_cli_args(&args(&["homework-bot", "check"]), 1).command,
            Command::Check
        );
        assert_eq!(
            parse_cli_args(&args(&["homework-bot", "run", "--help"]), 1).command,
            Command::Help
        );
    }

    #[test]
    fn unknown_command_is_kept_for_reporting() {
        assert_eq!(
            parse_cli_args(&args(&["homework-bot", "serve"]), 1).command,
            Command::Unknown("serve".to_string())
        );
    }

    #[test]
    fn dangling_log_file_flag_is_ignored() {
        let parsed = parse_cli_args(&args(&["homework-bot", "--log-file"]), 1);
        assert_eq!(parsed.log_file, None);
        assert_eq!(parsed.command, Command::Run);
    }
}
