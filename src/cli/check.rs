use anyhow::Result;

use crate::core::config::{Config, DotenvStatus, PRACTICUM_TOKEN, TELEGRAM_CHAT_ID, TELEGRAM_TOKEN};
use crate::core::terminal::{Mark, heading, mask_secret, report, setting};

/// Prints what the bot would start with. Fails when a credential is missing.
pub fn run_check(config: &Config) -> Result<()> {
    heading("Homework bot configuration");

    match &config.dotenv {
        DotenvStatus::Loaded(path) => setting(".env", &path.display().to_string()),
        DotenvStatus::NotFound => setting(".env", "not found"),
        DotenvStatus::Failed(e) => report(Mark::Missing, &format!(".env could not be read: {}", e)),
    }

    let tokens = [
        (PRACTICUM_TOKEN, mask_secret(config.practicum_token.trim())),
        (TELEGRAM_TOKEN, mask_secret(config.telegram_token.trim())),
        (TELEGRAM_CHAT_ID, config.telegram_chat_id.trim().to_string()),
    ];
    for (name, shown) in tokens {
        if shown.is_empty() {
            report(Mark::Missing, &format!("{} is not set", name));
        } else {
            report(Mark::Ok, &format!("{} is set: {}", name, shown));
        }
    }

    println!();
    setting("Endpoint", &config.endpoint);
    setting(
        "Retry interval",
        &format!("{}s", config.retry_interval.as_secs()),
    );
    setting("Log file", &config.log_file.display().to_string());
    println!();

    if let Err(e) = config.require_tokens() {
        report(Mark::Failed, "Configuration is incomplete.");
        return Err(e.into());
    }
    report(Mark::Ok, "Configuration looks good.");
    Ok(())
}
