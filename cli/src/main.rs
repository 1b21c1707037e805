mod render;

use std::io::{self, IsTerminal};

use chatbox::api::http::HttpChatApi;
use chatbox::config::ConfigError;
use chatbox::widget::ENTER_KEY;
use chatbox::{ChatError, ChatWidget, WidgetConfig, WidgetEvent};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use render::TranscriptPrinter;

const QUIT_COMMANDS: [&str; 2] = ["/quit", "/exit"];

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Chat(#[from] ChatError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Flags override the `CHATBOX_*` environment variables.
#[derive(Parser, Debug)]
#[command(name = "chatbox", about = "Chat with a /chat backend from the terminal")]
struct Cli {
    /// Backend origin, e.g. `http://127.0.0.1:5000`.
    #[arg(long)]
    base_url: Option<String>,

    /// Language hint sent with each message.
    #[arg(long)]
    lang: Option<String>,

    /// Resume an existing session.
    #[arg(long)]
    session_id: Option<String>,

    /// With `--session-id`, print up to this many earlier exchanges first.
    #[arg(long, default_value_t = 0)]
    history: u32,

    /// Remove the typing indicator when a request fails.
    #[arg(long, default_value_t = false)]
    clear_placeholder_on_error: bool,

    #[arg(long)]
    request_timeout_secs: Option<u64>,

    /// Log debug events to stderr.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Cli {
    fn into_config(self, mut config: WidgetConfig) -> Result<(WidgetConfig, Option<String>, u32), ConfigError> {
        if let Some(base_url) = self.base_url {
            config.base_url = chatbox::config::parse_base_url(&base_url)?;
        }
        if let Some(lang) = self.lang {
            config.lang = Some(lang.trim().to_lowercase()).filter(|l| !l.is_empty());
        }
        if let Some(secs) = self.request_timeout_secs {
            config.timeouts.request_secs = secs;
        }
        config.clear_placeholder_on_error |= self.clear_placeholder_on_error;
        Ok((config, self.session_id, self.history))
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();

    let (config, session_id, history) = cli.into_config(WidgetConfig::from_env()?)?;
    let api = HttpChatApi::new(&config)?;
    tracing::info!(base_url = api.base_url(), "chatbox ready");

    let mut widget = ChatWidget::new(config);
    widget.set_session_id(session_id);

    let mut stdout = io::stdout();
    let mut printer = TranscriptPrinter::new(stdout.is_terminal());

    if history > 0 {
        if let Err(e) = widget.load_history(&api, history).await {
            tracing::warn!(error = %e, "could not load session history");
        }
        printer.sync(widget.transcript(), &mut stdout)?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if QUIT_COMMANDS.contains(&line.trim()) {
            break;
        }

        widget.handle_event(WidgetEvent::InputChanged(line));
        let Some(pending) = widget.handle_event(WidgetEvent::KeyPressed(ENTER_KEY.to_owned())) else {
            continue;
        };
        printer.sync(widget.transcript(), &mut stdout)?;

        let completion = ChatWidget::dispatch(&api, pending).await;
        widget.complete(completion);
        printer.sync(widget.transcript(), &mut stdout)?;
    }

    if let Some(session_id) = widget.session_id() {
        tracing::info!(session_id, "session ended");
    }
    Ok(())
}
