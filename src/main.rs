//! ContentMorph - Main Entry Point
//!
//! Command-line front end over the session: render previews, inline
//! templates, copy to the clipboard, and generate variants.

use clap::{Parser, Subcommand};
use contentmorph::config::{
    load_config, load_config_from, save_config, save_config_to, Settings, Theme, WireFormat,
};
use contentmorph::error::{Error, Result, ResultExt};
use contentmorph::export::{
    export_to_html_file, generate_inlined_fragment, write_html_file, CopyOutcome, SystemClipboard,
};
use contentmorph::generate::{GenerationClient, GenerationDispatcher};
use contentmorph::markdown::FormatCommand;
use contentmorph::samples;
use contentmorph::state::Session;
use contentmorph::style::TemplateRegistry;
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Application name constant.
const APP_NAME: &str = "ContentMorph";

#[derive(Parser)]
#[command(name = "contentmorph", version)]
#[command(about = "Turn Markdown into inline-styled HTML and AI-rewritten variants")]
struct Cli {
    /// Settings file to use instead of the platform config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the preview document (template stylesheet plus override sheet)
    Preview {
        /// Markdown input file
        input: PathBuf,
        /// Template to style with
        #[arg(short, long)]
        template: Option<String>,
        /// Override stylesheet appended after the template's
        #[arg(long)]
        css: Option<PathBuf>,
        /// Write here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print or write the inlined HTML fragment
    Inline {
        input: PathBuf,
        #[arg(short, long)]
        template: Option<String>,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Copy the inlined fragment to the system clipboard
    Copy {
        input: PathBuf,
        #[arg(short, long)]
        template: Option<String>,
    },
    /// Generate one variant per prompt, concurrently
    Generate {
        input: PathBuf,
        /// Rewrite instruction; repeat for more variants
        #[arg(short, long = "prompt", required = true)]
        prompts: Vec<String>,
        /// Template for the generated variants
        #[arg(short, long)]
        template: Option<String>,
        /// Copy the first successful variant
        #[arg(long)]
        copy: bool,
    },
    /// Apply a toolbar formatting command to a Markdown file
    Format {
        input: PathBuf,
        /// h1-h3, bold, italic, strikethrough, quote, code, codeblock, ul,
        /// ol, task, link, image, table or hr
        #[arg(short, long)]
        command: String,
        /// Byte range to wrap, as START..END; omit to insert a placeholder
        #[arg(short, long, value_parser = parse_selection)]
        selection: Option<(usize, usize)>,
        /// Write here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List the available templates
    Templates,
    /// Print an example document (basic, full, article, code)
    Sample { name: String },
    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current settings
    Show,
    /// Set the generation endpoint
    Set {
        #[arg(long)]
        url: String,
        #[arg(long)]
        key: String,
        #[arg(long)]
        model: String,
        /// Wire format: chat or proxy
        #[arg(long)]
        format: Option<String>,
    },
    /// Set the page theme: light, dark or toggle
    Theme { mode: String },
    /// Set the template new sessions start with
    Template { name: String },
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    info!("Starting {}", APP_NAME);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    let mut settings = load_settings(config_path);
    let registry = TemplateRegistry::builtin();
    let clock = Instant::now();
    let now = || clock.elapsed().as_secs_f64();

    match cli.command {
        Command::Preview {
            input,
            template,
            css,
            out,
        } => {
            let mut session = session_for(&input, &settings, &registry, template.as_deref())?;
            let html =
                render_preview(&mut session, &registry, settings.theme, css.as_deref(), now())?;
            emit(&html, out.as_deref())
        }

        Command::Inline {
            input,
            template,
            out,
        } => {
            let name = template.unwrap_or_else(|| settings.default_template.clone());
            let template = registry.get(&name)?;
            match out {
                Some(out) => export_to_html_file(&input, &out, template),
                None => {
                    println!("{}", generate_inlined_fragment(&read_input(&input)?, template));
                    Ok(())
                }
            }
        }

        Command::Copy { input, template } => {
            let mut session = session_for(&input, &settings, &registry, template.as_deref())?;
            let mut clipboard = SystemClipboard::new()?;
            let outcome = session.copy_active(&registry, &mut clipboard, now())?;
            report_copy(outcome);
            Ok(())
        }

        Command::Generate {
            input,
            prompts,
            template,
            copy,
        } => generate(&input, &prompts, template.as_deref(), copy, &settings, &registry),

        Command::Format {
            input,
            command,
            selection,
            out,
        } => {
            let command = FormatCommand::from_name(&command)
                .ok_or(Error::UnknownFormatCommand(command))?;
            let mut session = session_for(&input, &settings, &registry, None)?;
            let result = session.format_base(selection, command);
            info!("Cursor at byte {}", result.cursor);
            emit(session.base_content(), out.as_deref())
        }

        Command::Templates => {
            for template in registry.templates() {
                let marker = if template.name == settings.default_template {
                    "*"
                } else {
                    " "
                };
                println!("{} {:<8} {}", marker, template.name, template.description);
            }
            Ok(())
        }

        Command::Sample { name } => {
            let content = samples::sample(&name).ok_or(Error::UnknownSample(name))?;
            println!("{}", content);
            Ok(())
        }

        Command::Config { action } => {
            match action {
                ConfigAction::Show => {
                    print_settings(&settings);
                    return Ok(());
                }
                ConfigAction::Set {
                    url,
                    key,
                    model,
                    format,
                } => {
                    if let Some(format) = format {
                        settings.api_format = WireFormat::from_name(&format)
                            .ok_or(Error::MissingSetting("wire format (chat or proxy)"))?;
                    }
                    settings.set_api(&url, &key, &model)?;
                    println!("API configuration saved");
                }
                ConfigAction::Theme { mode } => {
                    settings.theme = match mode.to_ascii_lowercase().as_str() {
                        "light" => Theme::Light,
                        "dark" => Theme::Dark,
                        "toggle" => settings.theme.toggle(),
                        _ => return Err(Error::MissingSetting("theme (light, dark or toggle)")),
                    };
                    println!("Switched to the {} theme", settings.theme.label());
                }
                ConfigAction::Template { name } => {
                    if !registry.contains(&name) {
                        return Err(Error::InvalidTemplate(name));
                    }
                    settings.default_template = name;
                    println!("Default template set to '{}'", settings.default_template);
                }
            }
            store_settings(&settings, config_path)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Generation
// ─────────────────────────────────────────────────────────────────────────────

fn generate(
    input: &Path,
    prompts: &[String],
    template: Option<&str>,
    copy: bool,
    settings: &Settings,
    registry: &TemplateRegistry,
) -> Result<()> {
    let client = GenerationClient::new(settings.api_config()?)?;
    let mut dispatcher = GenerationDispatcher::new(Arc::new(client));
    let mut session = session_for(input, settings, registry, None)?;

    let mut ids = Vec::with_capacity(prompts.len());
    for (index, prompt) in prompts.iter().enumerate() {
        let id = match session.variants().get(index) {
            Some(existing) => existing.id.clone(),
            None => session.add_variant(),
        };
        session.toggle_variant(&id)?;
        session.set_variant_prompt(&id, prompt.as_str())?;
        if let Some(template) = template {
            session.apply_template(registry, template)?;
        }
        dispatcher.dispatch(session.begin_generation(&id)?);
        ids.push(id);
    }

    let mut last_failure = None;
    while dispatcher.in_flight() > 0 {
        let mut arrived = dispatcher.poll_responses();
        if arrived.is_empty() {
            arrived.extend(dispatcher.wait_next(Duration::from_millis(250)));
        }
        for response in arrived {
            if let Err(e) = &response.result {
                last_failure = Some(e.clone());
            }
            session.complete_generation(response);
        }
    }

    let mut first_success = None;
    for id in &ids {
        let Some(variant) = session.variant(id) else {
            continue;
        };
        println!("── {} ({}) ──", variant.title, variant.style.template);
        match variant.error() {
            Some(message) => eprintln!("{}", message),
            None => {
                println!("{}\n", variant.content);
                first_success.get_or_insert_with(|| id.clone());
            }
        }
    }

    if let (None, Some(failure)) = (&first_success, last_failure) {
        return Err(Error::Generation(failure));
    }

    if let (true, Some(id)) = (copy, first_success) {
        session.toggle_variant(&id)?;
        let mut clipboard = SystemClipboard::new()?;
        let outcome = session.copy_active(registry, &mut clipboard, 0.0)?;
        report_copy(outcome);
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn load_settings(path: Option<&Path>) -> Settings {
    match path {
        Some(path) => load_config_from(path)
            .unwrap_or_warn_default(Settings::default(), "Failed to load configuration"),
        None => load_config(),
    }
}

fn store_settings(settings: &Settings, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => save_config_to(settings, path),
        None => save_config(settings),
    }
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// A session whose base document is the input file, styled with `template`
/// or the configured default.
fn session_for(
    input: &Path,
    settings: &Settings,
    registry: &TemplateRegistry,
    template: Option<&str>,
) -> Result<Session> {
    let mut session = Session::with_template(&settings.default_template);
    session.set_base_content_immediately(read_input(input)?);
    session.select_base();
    if let Some(template) = template {
        session.apply_template(registry, template)?;
    }
    Ok(session)
}

/// The preview page, with `css` as the override sheet when it loads.
///
/// A rejected or unreadable sheet is reported and the page is rendered
/// without it.
fn render_preview(
    session: &mut Session,
    registry: &TemplateRegistry,
    theme: Theme,
    css: Option<&Path>,
    now: f64,
) -> Result<String> {
    if let Some(css) = css {
        if let Err(e) = session.load_override_sheet(css, now) {
            warn!("{}", e);
            if let Some(message) = session.toast_message() {
                eprintln!("{}", message);
            }
        }
    }
    session.preview_document(registry, theme)
}

/// Parse a `START..END` byte range.
fn parse_selection(value: &str) -> std::result::Result<(usize, usize), String> {
    let (start, end) = value
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got '{}'", value))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid offset '{}': {}", part, e))
    };
    Ok((parse(start)?, parse(end)?))
}

fn emit(text: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(out) => {
            write_html_file(out, text)?;
            info!("Wrote {}", out.display());
            Ok(())
        }
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}

fn report_copy(outcome: CopyOutcome) {
    match outcome {
        CopyOutcome::Rich => println!("Copied"),
        CopyOutcome::PlainText => println!("Copied as plain text"),
    }
}

fn print_settings(settings: &Settings) {
    let masked_key = if settings.api_key.is_empty() {
        "(not set)".to_string()
    } else {
        let tail: String = settings
            .api_key
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("****{}", tail)
    };

    println!("api_url          {}", settings.api_url);
    println!("api_key          {}", masked_key);
    println!("api_model        {}", settings.api_model);
    println!("api_format       {:?}", settings.api_format);
    println!("theme            {}", settings.theme.label());
    println!("default_template {}", settings.default_template);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
