use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::ValueEnum;
use eyre::{Result, WrapErr, bail};
use log::{debug, info, warn};

mod cli;

use cli::{Cli, OutputFormat};
use ytcap::config::Config;
use ytcap::youtube::YouTube;

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytcap.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytcap")
        .join("logs")
}

fn build_after_help() -> String {
    format!(
        "\nConfig is read from: {}\nLogs are written to: {}",
        ytcap::config::config_path().display(),
        log_dir().join("ytcap.log").display()
    )
}

fn output_format(cli: &Cli, config: &Config) -> OutputFormat {
    if let Some(format) = cli.format {
        return format;
    }
    match config.default_format.as_deref() {
        Some(name) => OutputFormat::from_str(name, true).unwrap_or_else(|_| {
            warn!("Ignoring unknown default_format {name:?} in config");
            OutputFormat::Text
        }),
        None => OutputFormat::Text,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Ignoring config file: {e}");
        Config::default()
    });
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = Some(timeout);
    }

    let matrix = config.matrix(&cli.langs);
    let format = output_format(&cli, &config);
    debug!("Retrieval matrix has {} attempts, timeout {:?}", matrix.len(), config.timeout());

    if cli.verbose {
        let config_path = ytcap::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
    }

    let host = YouTube::new(config.base_url(), config.timeout())?;

    // Collect URLs: from arg or stdin
    let urls = if let Some(ref url) = cli.url {
        vec![url.clone()]
    } else {
        let stdin = io::stdin();
        stdin.lock().lines().collect::<Result<Vec<_>, _>>()?
    };

    if urls.is_empty() {
        bail!("no URL or video ID provided\n\nUsage: ytcap <URL>\n       echo <URL> | ytcap");
    }

    for url_input in &urls {
        let url_input = url_input.trim();
        if url_input.is_empty() {
            continue;
        }

        let transcript = match ytcap::fetch_transcript(&host, url_input, &matrix).await {
            Ok(t) => t,
            Err(e @ ytcap::Error::InvalidIdentifier(_)) => {
                return Err(e).wrap_err("Supported formats:\n  https://www.youtube.com/watch?v=ID\n  https://youtu.be/ID\n  https://www.youtube.com/embed/ID\n  https://www.youtube.com/shorts/ID\n  <11-character video ID>");
            }
            Err(e) => {
                return Err(e).wrap_err("could not reach the caption service; check your connection and try again");
            }
        };

        if cli.verbose {
            eprintln!(
                "Video: {} ({})\nLanguage: {}\nFormat: {}\nLines: {}",
                transcript.video_title,
                transcript.video_id,
                transcript.language,
                transcript.format.map(|f| f.to_string()).unwrap_or_else(|| "-".to_string()),
                transcript.transcript.lines().count(),
            );
        }

        if let Some(ref info) = transcript.info {
            eprintln!("{}: {info}", transcript.video_id);
        }

        let rendered = match format {
            OutputFormat::Text => ytcap::output::render_text(&transcript),
            OutputFormat::Json => ytcap::output::render_json(&transcript)?,
        };

        if let Some(ref path) = cli.output {
            std::fs::write(path, &rendered)?;
            if cli.verbose {
                eprintln!("Output written to: {}", path.display());
            }
        } else if !rendered.is_empty() {
            println!("{rendered}");
        }

        if cli.save && !transcript.no_captions_found {
            let path = PathBuf::from(ytcap::output::document_filename(&transcript.video_title));
            std::fs::write(&path, ytcap::output::render_document(&transcript))?;
            eprintln!("Saved: {}", path.display());
        }
    }

    Ok(())
}
