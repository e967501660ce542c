//! Markdraft - Markdown authoring from the command line.
//!
//! # Usage
//!
//! ```bash
//! markdraft render notes.md -o notes.html
//! markdraft --typography novel render --watch notes.md
//! markdraft format notes.md --op bold --select 0:5 --in-place
//! markdraft export notes.md --dir ~/Downloads
//! markdraft stats --detailed --json notes.md
//! markdraft links notes.md
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use markdraft::app::{App, Message, Model, ToastLevel, update};
use markdraft::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_layered, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use markdraft::document::{self, DocumentStats};
use markdraft::editor::FormatOp;
use markdraft::export::standalone_html;
use markdraft::host::TerminalHost;
use markdraft::perf;
use markdraft::theme::{self, CODE_THEMES, CodeTheme, TYPOGRAPHY_THEMES, TypographyTheme};
use markdraft::watcher::{DEFAULT_DEBOUNCE, SourceWatcher};

/// Markdown authoring: formatting, themed preview, export
#[derive(Parser, Debug)]
#[command(name = "markdraft", version, about, long_about = None)]
struct Cli {
    /// Typography theme id (see `markdraft themes`)
    #[arg(long, global = true, value_name = "ID")]
    typography: Option<String>,

    /// Code theme id (see `markdraft themes`)
    #[arg(long, global = true, value_name = "ID")]
    code_theme: Option<String>,

    /// Log render timings
    #[arg(long, global = true)]
    perf: bool,

    /// Write detailed render debug events to a file
    #[arg(long, global = true, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long, global = true)]
    save: bool,

    /// Clear saved defaults
    #[arg(long, global = true)]
    clear: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a Markdown file to themed HTML
    Render {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
        /// Re-render whenever the file changes
        #[arg(short, long)]
        watch: bool,
        /// Emit only the preview container, not a full page
        #[arg(long)]
        fragment: bool,
    },
    /// Print character and line counts
    Stats {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Add words, paragraphs, headings and other structure counts
        #[arg(short, long)]
        detailed: bool,
        /// Print the detailed counts as JSON
        #[arg(long, requires = "detailed")]
        json: bool,
    },
    /// Print the document as plain text
    Plain {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// List links in document order
    Links {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// List images in document order
    Images {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Backslash-escape Markdown punctuation
    Escape {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Remove backslash escapes from Markdown punctuation
    Unescape {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Apply a formatting operation around a selection
    Format {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Operation tag: bold, italic, h1, link, table, emoji, ...
        #[arg(long, value_name = "TAG")]
        op: String,
        /// Text for payload-carrying operations (emoji)
        #[arg(long, value_name = "TEXT")]
        payload: Option<String>,
        /// Selection as START:END char offsets
        #[arg(long, value_name = "START:END", value_parser = parse_selection)]
        select: Option<(usize, usize)>,
        /// Rewrite the file instead of printing the result
        #[arg(long)]
        in_place: bool,
    },
    /// Save a dated Markdown copy of a file
    Export {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Download directory
        #[arg(long, value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },
    /// Empty a file after confirmation
    Clear {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// List typography and code themes
    Themes {
        #[arg(long)]
        json: bool,
    },
}

fn parse_selection(s: &str) -> Result<(usize, usize), String> {
    let (start, end) = s
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<usize>()
            .map_err(|err| format!("invalid offset {v:?}: {err}"))
    };
    Ok((parse(start)?, parse(end)?))
}

#[derive(Serialize)]
struct ThemeCatalog {
    typography: &'static [TypographyTheme],
    code: &'static [CodeTheme],
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn warn_unknown_theme(flags: &ConfigFlags) {
    if let Some(id) = &flags.typography
        && !TYPOGRAPHY_THEMES.iter().any(|t| t.id == id.as_str())
    {
        tracing::warn!(id = %id, "unknown typography theme, using default");
    }
    if let Some(id) = &flags.code_theme
        && !CODE_THEMES.iter().any(|t| t.id == id.as_str())
    {
        tracing::warn!(id = %id, "unknown code theme, using default");
    }
}

fn load_model(path: &Path, flags: &ConfigFlags) -> Result<Model> {
    let text = read_source(path)?;
    let typography = flags
        .typography
        .clone()
        .unwrap_or_else(|| theme::default_typography().id.to_string());
    let code = flags
        .code_theme
        .clone()
        .unwrap_or_else(|| theme::default_code().id.to_string());
    Ok(Model::new(&text).with_themes(typography, code))
}

fn report_toast(model: &Model) {
    if let Some((message, level)) = model.active_toast() {
        let tag = match level {
            ToastLevel::Info => "info",
            ToastLevel::Success => "ok",
            ToastLevel::Warning => "warn",
            ToastLevel::Error => "error",
        };
        eprintln!("[{tag}] {message}");
    }
}

fn render_output(model: &Model, title: &str, fragment: bool) -> String {
    let Some(container) = model.themed_preview() else {
        return String::new();
    };
    if fragment {
        format!("{}\n", container.to_html())
    } else {
        standalone_html(title, &container)
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn run_render(
    file: &Path,
    output: Option<&Path>,
    watch: bool,
    fragment: bool,
    flags: &ConfigFlags,
) -> Result<()> {
    let title = file
        .file_stem()
        .map_or_else(|| "markdraft".to_string(), |s| s.to_string_lossy().into_owned());
    let mut model = load_model(file, flags)?;
    write_output(output, &render_output(&model, &title, fragment))?;
    if !watch {
        return Ok(());
    }

    let mut watcher = SourceWatcher::new(file, DEFAULT_DEBOUNCE)
        .with_context(|| format!("Failed to watch {}", file.display()))?;
    eprintln!("watching {} (Ctrl-C to stop)", watcher.source().display());
    loop {
        if !watcher.wait_for_change(Duration::from_secs(60)) {
            continue;
        }
        let text = match read_source(file) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(%err, "reload failed");
                continue;
            }
        };
        model = update(model, Message::SetContent(text));
        write_output(output, &render_output(&model, &title, fragment))?;
        tracing::info!(file = %file.display(), "re-rendered");
    }
}

fn run_format(
    file: &Path,
    op: &str,
    payload: Option<&str>,
    select: Option<(usize, usize)>,
    in_place: bool,
    flags: &ConfigFlags,
) -> Result<()> {
    let op = FormatOp::from_tag(op, payload)?;
    let mut model = load_model(file, flags)?;
    let (start, end) = select.unwrap_or_else(|| {
        let len = model.buffer().len_chars();
        (len, len)
    });
    model = update(model, Message::Select(start, end));
    model = update(model, Message::Format(op));
    model = update(model, Message::CaretReflected);

    let text = model.text();
    if in_place {
        fs::write(file, &text).with_context(|| format!("Failed to write {}", file.display()))?;
    } else {
        write_output(None, &text)?;
    }
    eprintln!("cursor: {}", model.buffer().selection().start);
    Ok(())
}

fn run_stats(file: &Path, detailed: bool, json: bool, flags: &ConfigFlags) -> Result<()> {
    if !detailed {
        let stats = load_model(file, flags)?.stats();
        println!("characters: {}", stats.characters);
        println!("lines: {}", stats.lines);
        return Ok(());
    }
    let stats = document::detailed_stats(&read_source(file)?);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_detailed_stats(&stats);
    }
    Ok(())
}

fn print_detailed_stats(stats: &DocumentStats) {
    println!("characters: {}", stats.characters);
    println!("characters (no spaces): {}", stats.characters_no_spaces);
    println!("words: {}", stats.words);
    println!("lines: {}", stats.lines);
    println!("paragraphs: {}", stats.paragraphs);
    let h = &stats.headings;
    println!(
        "headings: {} (h1 {}, h2 {}, h3 {}, h4 {}, h5 {}, h6 {})",
        h.total, h.h1, h.h2, h.h3, h.h4, h.h5, h.h6
    );
    println!("links: {}", stats.links);
    println!("images: {}", stats.images);
    println!("code blocks: {}", stats.code_blocks);
    println!("inline code: {}", stats.inline_code);
    println!(
        "list items: {} unordered, {} ordered",
        stats.lists.unordered, stats.lists.ordered
    );
    println!("tables: {}", stats.tables);
    println!("blockquotes: {}", stats.blockquotes);
}

fn run_links(file: &Path, json: bool) -> Result<()> {
    let links = document::extract_links(&read_source(file)?);
    if json {
        println!("{}", serde_json::to_string_pretty(&links)?);
        return Ok(());
    }
    for link in &links {
        println!("{}\t{}", link.text, link.url);
    }
    eprintln!("{} link(s)", links.len());
    Ok(())
}

fn run_images(file: &Path, json: bool) -> Result<()> {
    let images = document::extract_images(&read_source(file)?);
    if json {
        println!("{}", serde_json::to_string_pretty(&images)?);
        return Ok(());
    }
    for image in &images {
        println!("{}\t{}", image.alt, image.url);
    }
    eprintln!("{} image(s)", images.len());
    Ok(())
}

fn run_themes(json: bool) -> Result<()> {
    if json {
        let catalog = ThemeCatalog {
            typography: TYPOGRAPHY_THEMES,
            code: CODE_THEMES,
        };
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }
    println!("Typography themes:");
    for t in TYPOGRAPHY_THEMES {
        println!("  {:<10} {} - {}", t.id, t.name, t.description);
    }
    println!("Code themes:");
    for t in CODE_THEMES {
        println!("  {:<10} {} - {}", t.id, t.name, t.description);
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        load_layered(&global_path, &local_path)?
    };
    let effective = file_flags.union(&cli_flags);
    tracing::debug!(?effective, "effective flags");
    warn_unknown_theme(&effective);

    perf::set_enabled(effective.perf || cli.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| cli.render_debug_log.clone())
        .or_else(|| std::env::var_os(perf::DEBUG_LOG_ENV).map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        tracing::warn!(
            %err,
            path = ?render_debug_log_path,
            "failed to initialize render debug log"
        );
    }

    match cli.command {
        Command::Render {
            file,
            output,
            watch,
            fragment,
        } => run_render(
            &file,
            output.as_deref(),
            watch || effective.watch,
            fragment,
            &effective,
        ),
        Command::Stats {
            file,
            detailed,
            json,
        } => run_stats(&file, detailed, json, &effective),
        Command::Plain { file } => {
            let text = document::plain_text(&read_source(&file)?);
            println!("{text}");
            Ok(())
        }
        Command::Links { file, json } => run_links(&file, json),
        Command::Images { file, json } => run_images(&file, json),
        Command::Escape { file } => {
            write_output(None, &document::escape_markdown(&read_source(&file)?))
        }
        Command::Unescape { file } => {
            write_output(None, &document::unescape_markdown(&read_source(&file)?))
        }
        Command::Format {
            file,
            op,
            payload,
            select,
            in_place,
        } => run_format(
            &file,
            &op,
            payload.as_deref(),
            select,
            in_place,
            &effective,
        ),
        Command::Export { file, dir } => {
            let model = load_model(&file, &effective)?;
            let mut app = App::new(TerminalHost::new(dir));
            let model = app.dispatch(model, Message::Export);
            report_toast(&model);
            if let Some(path) = app.host().last_download() {
                println!("{}", path.display());
            }
            Ok(())
        }
        Command::Clear { file, yes } => {
            let model = load_model(&file, &effective)?;
            let mut app = App::new(TerminalHost::new(".").with_assume_yes(yes));
            let model = app.dispatch(model, Message::RequestClear);
            if model.buffer().is_dirty() {
                fs::write(&file, model.text())
                    .with_context(|| format!("Failed to write {}", file.display()))?;
            }
            report_toast(&model);
            Ok(())
        }
        Command::Themes { json } => run_themes(json),
    }
}
