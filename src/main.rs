mod cli;
mod core;
mod interfaces;
mod logging;

use crate::core::terminal::{Mark, report};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = cli::run_main().await {
        report(Mark::Failed, &e.to_string());
        std::process::exit(1);
    }
}
