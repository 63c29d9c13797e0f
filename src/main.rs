//! CLI entry point for `msgShell`.

use std::path::{Path, PathBuf};

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use humansize::{format_size, BINARY};

use msgshell::config::Config;
use msgshell::i18n;
use msgshell::model::message::Message;
use msgshell::render;

#[derive(Parser)]
#[command(name = "msgshell", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// MSG file to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Language (en, es). Defaults to system locale.
    #[arg(long, value_name = "LANG")]
    lang: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a file in the TUI
    Open {
        path: PathBuf,
    },
    /// Print message metadata and body to stdout
    Show {
        path: PathBuf,
        #[arg(long)]
        json: bool,
        /// Include raw transport headers
        #[arg(long)]
        headers: bool,
    },
    /// Extract all attachments
    Attachments {
        path: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

/// Detect language early from --lang arg, config, or system env,
/// before clap processes --help.
fn detect_lang_early(config: &Config) -> i18n::Lang {
    // Check --lang flag in raw args
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--lang" {
            if let Some(code) = args.get(i + 1) {
                if let Some(lang) = i18n::Lang::from_code(code) {
                    return lang;
                }
            }
        }
        if let Some(code) = args[i].strip_prefix("--lang=") {
            if let Some(lang) = i18n::Lang::from_code(code) {
                return lang;
            }
        }
    }
    if let Some(code) = &config.general.language {
        if let Some(lang) = i18n::Lang::from_code(code) {
            return lang;
        }
    }
    i18n::detect_system_lang()
}

/// Build a localized clap Command using i18n strings.
fn build_localized_command() -> clap::Command {
    let mut cmd = Cli::command();
    cmd = cmd
        .about(i18n::app_about())
        .long_about(i18n::app_long_about())
        .after_help(i18n::app_after_help());

    // Localize subcommands
    let subcommands: Vec<clap::Command> = cmd
        .get_subcommands()
        .map(|sub| {
            let mut s = sub.clone();
            match s.get_name() {
                "open" => {
                    s = s.about(i18n::help_cmd_open());
                }
                "show" => {
                    s = s.about(i18n::help_cmd_show());
                }
                "attachments" => {
                    s = s.about(i18n::help_cmd_attachments());
                }
                "completions" => {
                    s = s.about(i18n::help_cmd_completions());
                }
                "manpage" => {
                    s = s.about(i18n::help_cmd_manpage());
                }
                _ => {}
            }
            s
        })
        .collect();

    // Replace subcommands (clear and re-add)
    for sub in subcommands {
        cmd = cmd.mut_subcommand(sub.get_name(), |_| sub.clone());
    }

    cmd
}

fn main() -> anyhow::Result<()> {
    // Detect language BEFORE clap parsing so --help is localized
    let config = msgshell::config::load_config();
    let lang = detect_lang_early(&config);
    i18n::set_lang(lang);

    // Build localized command and parse
    let cmd = build_localized_command();
    let matches = cmd.get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    // Configure logging: stderr + optional log file
    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    match cli.command {
        Some(Commands::Open { path }) => cmd_open(Some(path), config),
        Some(Commands::Show {
            path,
            json,
            headers,
        }) => cmd_show(&path, json, headers),
        Some(Commands::Attachments { path, output }) => {
            cmd_attachments(&path, output.as_deref())
        }
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Manpage) => cmd_manpage(),
        None => cmd_open(cli.file, config),
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    // Try to set up file logging
    let log_dir = msgshell::config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "msgshell.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Open the TUI, with or without an initial file. A bad path is
/// reported inside the TUI; the window stays open.
fn cmd_open(path: Option<PathBuf>, config: Config) -> anyhow::Result<()> {
    msgshell::tui::run_tui(path, config)
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "msgshell", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

/// Print message metadata and body to stdout.
fn cmd_show(path: &Path, json: bool, headers: bool) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("{}: {}", i18n::err_file_not_found(), path.display());
    }

    let message = msgshell::parser::parse_msg(path)?;

    if json {
        print_message_json(&message, headers)?;
    } else {
        print_message_table(&message, headers);
    }

    Ok(())
}

/// Extract all attachments of a message into a directory.
fn cmd_attachments(path: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("{}: {}", i18n::err_file_not_found(), path.display());
    }

    let message = msgshell::parser::parse_msg(path)?;

    if !message.has_attachments() {
        println!("  {}", i18n::cli_no_attachments_found());
        return Ok(());
    }

    let dir = output.unwrap_or_else(|| Path::new("."));
    println!(
        "  {} {}",
        i18n::cli_extracting_from(),
        path.display()
    );

    let paths = msgshell::export::attachment::save_all_attachments(&message, dir)?;

    println!(
        "  {} {} {} {}",
        i18n::cli_extracted(),
        paths.len(),
        i18n::cli_attachments_to(),
        dir.display()
    );

    Ok(())
}

/// Plain-text body for CLI output; no temp files are created, so
/// inline images stay as markers.
fn body_text(message: &Message) -> Option<String> {
    if let Some(html) = &message.body_html {
        let text = render::html::html_to_text(html);
        if !text.trim().is_empty() {
            return Some(text);
        }
    }
    message.body_text.clone()
}

/// Print a message in a human-readable layout.
fn print_message_table(message: &Message, headers: bool) {
    println!();
    if let Some(date) = &message.date {
        println!(
            "  {}{}",
            i18n::tui_header_date(),
            date.format("%a, %d %b %Y %H:%M:%S %z")
        );
    }
    println!(
        "  {}{}",
        i18n::tui_header_from(),
        message
            .sender_display()
            .unwrap_or_else(|| i18n::fallback_sender().to_string())
    );
    println!(
        "  {}{}",
        i18n::tui_header_to(),
        message
            .recipients_display()
            .unwrap_or_else(|| i18n::fallback_recipients().to_string())
    );
    if let Some(cc) = message.cc_display() {
        println!("  {}{}", i18n::tui_header_cc(), cc);
    }
    println!(
        "  {}{}",
        i18n::tui_header_subject(),
        message
            .subject
            .as_deref()
            .unwrap_or(i18n::fallback_subject())
    );

    if headers {
        println!();
        match &message.transport_headers {
            Some(raw) => {
                for line in raw.lines() {
                    println!("  {line}");
                }
            }
            None => println!("  {}", i18n::tui_no_headers()),
        }
    }

    println!();
    match body_text(message) {
        Some(text) => {
            for line in text.lines() {
                println!("  {line}");
            }
        }
        None => println!("  {}", i18n::fallback_body()),
    }

    if message.has_attachments() {
        println!();
        println!(
            "  {} ({}):",
            i18n::tui_attachments_count(),
            message.attachments.len()
        );
        for (i, att) in message.attachments.iter().enumerate() {
            println!(
                "    {:>2}. {} ({})",
                i + 1,
                att.display_name(i),
                format_size(att.size(), BINARY)
            );
        }
    }
    println!();
}

/// Print a message as JSON.
fn print_message_json(message: &Message, headers: bool) -> anyhow::Result<()> {
    let attachments: Vec<serde_json::Value> = message
        .attachments
        .iter()
        .enumerate()
        .map(|(i, att)| {
            serde_json::json!({
                "name": att.display_name(i),
                "size": att.size(),
                "mime_type": att.mime_type,
                "content_id": att.content_id,
                "is_embedded_message": att.is_embedded_message,
            })
        })
        .collect();

    let mut output = serde_json::json!({
        "subject": message.subject,
        "sender": {
            "name": message.sender_name,
            "email": message.sender_email,
        },
        "date": message.date.map(|d| d.to_rfc3339()),
        "to": message.recipients_display(),
        "cc": message.cc_display(),
        "recipients": message.recipients,
        "body": body_text(message),
        "attachments": attachments,
    });

    if headers {
        output["transport_headers"] = serde_json::json!(message.transport_headers);
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
