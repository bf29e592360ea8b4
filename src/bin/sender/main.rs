#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Terminal compose form that sends one email at a time over SMTP

use std::{fs::File, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use mail_sender::{
    domain::{communication::dispatcher::MailDispatcher, compose::ComposeForm},
    infrastructure::{
        email::smtp::{SMTPConfig, SMTPConnector},
        tui::ComposeApp,
    },
};
use tracing::Level;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// The SMTP submission server
    #[clap(flatten)]
    pub smtp: SMTPConfig,

    /// Write logs to this file; the terminal is taken by the form
    #[arg(long, env = "SENDER_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Most verbose level written to the log file
    #[arg(long, env = "SENDER_LOG_LEVEL", default_value = "info")]
    pub log_level: Level,
}

#[mutants::skip]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // A missing .env is normal for a desktop tool.
    dotenvy::dotenv().ok();

    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;

        tracing_subscriber::fmt()
            .with_max_level(args.log_level)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    }

    let connector = Arc::new(SMTPConnector::new(args.smtp));
    let form = ComposeForm::new(Arc::new(MailDispatcher::new(connector)));

    ComposeApp::new(form).run().await
}
