//! # clickcopy
//!
//! Runs the click-to-copy engine over files from the command line.
//!
//! ```bash
//! clickcopy scan notes.md
//! clickcopy render notes.md > notes.html
//! clickcopy decorate notes.md --cursor 120
//! clickcopy copy 's3cret' --clear
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clickcopy_config::Settings;
use clickcopy_engine::copy::{ClearOutcome, CopyHandler, Message, Reply, SystemClipboard};
use clickcopy_engine::editor::{DecorationKind, EditorView, RopeView, decorate};
use clickcopy_engine::rope::{lines_with_spans, slice_to_string};
use clickcopy_engine::{render_html, scan};
use xi_rope::Rope;

/// Click-to-copy spans: scan, render and copy
#[derive(Parser, Debug)]
#[command(name = "clickcopy")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (defaults to ~/.config/click-to-copy/config.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every span found, line by line
    Scan {
        file: PathBuf,
        /// One JSON object per match
        #[arg(long)]
        json: bool,
    },
    /// Render a markdown file to HTML
    Render { file: PathBuf },
    /// Print the editor decorations for a file
    Decorate {
        file: PathBuf,
        /// Cursor offset; its line is left undecorated
        #[arg(long)]
        cursor: Option<usize>,
    },
    /// Copy text to the system clipboard
    Copy {
        text: String,
        /// Clear the clipboard again after the delay
        #[arg(long)]
        clear: bool,
    },
    /// Print the effective settings
    Settings {
        /// Also write them to the config file
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = Settings::load_or_default(args.config.as_deref())
        .context("loading click-to-copy settings")?;

    match args.command {
        Command::Scan { file, json } => scan_file(&file, &settings, json),
        Command::Render { file } => {
            print!("{}", render_html(&read(&file)?, &settings)?);
            Ok(())
        }
        Command::Decorate { file, cursor } => decorate_file(&file, &settings, cursor),
        Command::Copy { text, clear } => copy(text, clear, settings).await,
        Command::Settings { write } => {
            print!("{}", settings.to_toml()?);
            if write {
                let path = settings_path(args.config.as_deref());
                settings.save_to_path(&path)?;
                log::info!("wrote {}", path.display());
            }
            Ok(())
        }
    }
}

/// The file `settings --write` saves to; the same one loading reads.
fn settings_path(config: Option<&Path>) -> PathBuf {
    config.map_or_else(Settings::config_path, Settings::resolve_path)
}

fn read(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))
}

fn scan_file(file: &Path, settings: &Settings, json: bool) -> Result<()> {
    let rope = Rope::from(read(file)?);
    for line in lines_with_spans(&rope) {
        for m in scan(&line.text, settings) {
            if json {
                let value = serde_json::json!({ "line": line.number, "match": m });
                println!("{value}");
            } else {
                let mut flags = vec![];
                if m.is_password {
                    flags.push("password");
                }
                if m.clear_clipboard {
                    flags.push("clear");
                }
                if m.is_code_styled {
                    flags.push("code");
                }
                println!(
                    "{}:{}-{} [{}] {:?}",
                    line.number,
                    m.full.start,
                    m.full.end,
                    flags.join(","),
                    m.copy_text
                );
            }
        }
    }
    Ok(())
}

fn decorate_file(file: &Path, settings: &Settings, cursor: Option<usize>) -> Result<()> {
    let mut view = RopeView::new(&read(file)?);
    if let Some(at) = cursor {
        view.set_cursor(at.min(view.doc_len()));
    }
    let decorations = decorate(&view, settings)?;
    for d in &decorations {
        let source = slice_to_string(view.rope(), d.range);
        match &d.kind {
            DecorationKind::Mark { class } => {
                println!("{}..{} mark {class} {source:?}", d.range.start, d.range.end);
            }
            DecorationKind::Replace(widget) => {
                let attributes: Vec<_> = widget
                    .attributes()
                    .iter()
                    .map(|(name, value)| format!("{name}={value}"))
                    .collect();
                println!(
                    "{}..{} widget {} [{}] {:?} <- {source:?}",
                    d.range.start,
                    d.range.end,
                    widget.classes().join(" "),
                    attributes.join(" "),
                    widget.text()
                );
            }
        }
    }
    log::info!("{} decorations", decorations.len());
    Ok(())
}

async fn copy(text: String, clear: bool, settings: Settings) -> Result<()> {
    let clipboard = SystemClipboard::new().context("opening the system clipboard")?;
    let handler = CopyHandler::new(Arc::new(clipboard), settings);

    match handler.handle(Message::copy(text, clear))? {
        Reply::ClearScheduled(pending) => {
            log::info!("copied; clearing in {:?}", clickcopy_engine::copy::CLEAR_DELAY);
            match pending.await? {
                ClearOutcome::Cleared => log::info!("clipboard cleared"),
                ClearOutcome::Superseded => log::info!("clipboard changed since, left alone"),
                ClearOutcome::Failed => log::warn!("could not clear the clipboard"),
            }
        }
        _ => log::info!("copied"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_config_after_subcommand() {
        let args = Args::parse_from(["clickcopy", "scan", "notes.md", "--config", "/tmp/c.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(args.command, Command::Scan { json: false, .. }));
    }

    #[test]
    fn parses_copy_with_clear() {
        let args = Args::parse_from(["clickcopy", "copy", "hunter2", "--clear"]);
        match args.command {
            Command::Copy { text, clear } => {
                assert_eq!(text, "hunter2");
                assert!(clear);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn written_settings_go_where_they_are_read_from() {
        let path = settings_path(Some(Path::new("~/c.toml")));
        assert!(!path.to_string_lossy().starts_with('~'));
        assert_eq!(settings_path(None), Settings::config_path());
    }

    #[test]
    fn decorate_cursor_is_optional() {
        let args = Args::parse_from(["clickcopy", "decorate", "a.md"]);
        assert!(matches!(args.command, Command::Decorate { cursor: None, .. }));
    }
}
