//! Slack Notify CLI
//!
//! 在 GitHub Actions 中运行：组装 job 结果通知并发送到 Slack

use clap::Parser;
use slack_notify::cli::{handle_notify, NotifyArgs};
use slack_notify::github::workflow_command;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "slack-notify")]
#[command(about = "Slack Notify - 把 GitHub Actions job 结果发送到 Slack")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    notify: NotifyArgs,
}

#[tokio::main]
async fn main() {
    // 通过 RUST_LOG 控制日志级别；开启 Actions step debug (RUNNER_DEBUG=1) 时默认 debug
    let default_level = if std::env::var("RUNNER_DEBUG").as_deref() == Ok("1") {
        "slack_notify=debug"
    } else {
        "slack_notify=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    match handle_notify(cli.notify).await {
        Ok(result) => info!(?result, "Done"),
        Err(e) => {
            error!(error = %e, "Notification failed");
            workflow_command::error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}
