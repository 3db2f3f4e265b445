use std::collections::HashMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use doc_outline::{DocPage, Document};
use doc_outline_config::{Config, LoadOptions, PageSettings};
use doc_outline_format::{OutputFormat, Renderer};
use doc_outline_utils::{atomic_write, parallel_map};
use tracing_subscriber::EnvFilter;

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut load = LoadOptions::default();
    if let Some(path) = &cli.config {
        load = load.with_override_path(path);
    }
    let config = Config::load(load).context("failed to load configuration")?;

    match cli.command {
        Command::Sections(args) => handle_sections(&config, args),
        Command::Outline(args) => handle_outline(&config, args),
        Command::Page(args) => handle_page(&config, args),
        Command::Render(args) => handle_render(&config, args),
    }
}

// --verbose forces info; otherwise RUST_LOG, falling back to warn.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn handle_sections(config: &Config, args: SectionArgs) -> Result<i32> {
    let SectionArgs { input, output } = args;
    let text = read_input(input.file.as_deref())?;
    let document = Document::parse(&text);
    tracing::info!(sections = document.sections.len(), "segmented input");

    let renderer = renderer_for(config, output.format);
    write_output(&renderer.render_sections(&document.sections), output.output.as_deref())?;
    Ok(0)
}

fn handle_outline(config: &Config, args: SectionArgs) -> Result<i32> {
    let SectionArgs { input, output } = args;
    let text = read_input(input.file.as_deref())?;
    let document = Document::parse(&text);
    tracing::info!(
        sections = document.sections.len(),
        roots = document.outline.len(),
        "built outline"
    );

    let renderer = renderer_for(config, output.format);
    write_output(&renderer.render_outline(&document.outline), output.output.as_deref())?;
    Ok(0)
}

fn handle_page(config: &Config, args: PageArgs) -> Result<i32> {
    let PageArgs {
        input,
        output,
        title,
        author,
        updated_at,
    } = args;

    let text = read_input(input.file.as_deref())?;
    let settings = PageSettings {
        title: title.unwrap_or_else(|| config.page.title.clone()),
        author: author.or_else(|| config.page.author.clone()),
        updated_at: updated_at.or_else(|| config.page.updated_at.clone()),
    };
    let page = build_page(&settings, &text);
    tracing::info!(title = %page.title, sections = page.sections().len(), "built page");

    let renderer = renderer_for(config, output.format);
    write_output(&renderer.render_page(&page), output.output.as_deref())?;
    Ok(0)
}

fn handle_render(config: &Config, args: RenderArgs) -> Result<i32> {
    let RenderArgs {
        files,
        out_dir,
        format,
    } = args;

    if files.is_empty() {
        bail!("no input files given");
    }

    let renderer = renderer_for(config, format);
    let jobs = plan_render_targets(files, &out_dir, renderer.format().extension())?;

    let results = parallel_map(jobs, |job| -> Result<PathBuf> {
        let RenderJob {
            source,
            stem,
            target,
        } = job;
        let text = fs::read_to_string(&source)
            .with_context(|| format!("failed to read {}", source.display()))?;

        let settings = PageSettings {
            title: stem,
            ..config.page.clone()
        };
        let page = build_page(&settings, &text);

        atomic_write(&target, &renderer.render_page(&page))
            .with_context(|| format!("failed to write {}", target.display()))?;
        tracing::info!(
            input = %source.display(),
            output = %target.display(),
            sections = page.sections().len(),
            "rendered page"
        );
        Ok(target)
    });

    let mut written = Vec::with_capacity(results.len());
    for result in results {
        written.push(result?);
    }

    let listing: String = written
        .iter()
        .map(|path| format!("{}\n", path.display()))
        .collect();
    emit(&listing)?;
    Ok(0)
}

struct RenderJob {
    source: PathBuf,
    stem: String,
    target: PathBuf,
}

/// Map each input to `out_dir/<stem>.<extension>`, refusing inputs that would
/// write the same target.
fn plan_render_targets(
    files: Vec<PathBuf>,
    out_dir: &Path,
    extension: &str,
) -> Result<Vec<RenderJob>> {
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::with_capacity(files.len());
    let mut jobs = Vec::with_capacity(files.len());

    for source in files {
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .with_context(|| format!("input has no file name: {}", source.display()))?;
        let target = out_dir.join(format!("{stem}.{extension}"));

        if let Some(previous) = claimed.insert(target.clone(), source.clone()) {
            bail!(
                "{} and {} would both render to {}",
                previous.display(),
                source.display(),
                target.display()
            );
        }
        jobs.push(RenderJob {
            source,
            stem,
            target,
        });
    }

    Ok(jobs)
}

fn build_page(settings: &PageSettings, text: &str) -> DocPage {
    let mut page = DocPage::new(settings.title.clone(), text);
    if let Some(author) = &settings.author {
        page = page.with_author(author.clone());
    }
    if let Some(updated_at) = &settings.updated_at {
        page = page.with_updated_at(updated_at.clone());
    }
    page
}

fn renderer_for(config: &Config, format: Option<FormatValue>) -> Renderer {
    let renderer = Renderer::from_settings(config.render.clone());
    match format {
        Some(value) => renderer.with_format(value.into()),
        None => renderer,
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        None => read_stdin(),
        Some(path) if path == Path::new("-") => read_stdin(),
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
    }
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .lock()
        .read_to_string(&mut buffer)
        .context("failed to read stdin")?;
    Ok(buffer)
}

fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            atomic_write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = content.len(), "wrote output");
            Ok(())
        }
        None => emit(content),
    }
}

fn emit(content: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match write_terminated(&mut handle, content) {
        Ok(()) => Ok(()),
        Err(err) if should_ignore_pipe_error(&err) => Ok(()),
        Err(err) => Err(err).context("failed to write to stdout"),
    }
}

fn write_terminated<W: Write>(writer: &mut W, content: &str) -> io::Result<()> {
    writer.write_all(content.as_bytes())?;
    if !content.is_empty() && !content.ends_with('\n') {
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

fn should_ignore_pipe_error(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::BrokenPipe | io::ErrorKind::WouldBlock
    )
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Split heading-delimited text into sections and outlines",
    propagate_version = true
)]
struct Cli {
    /// Use this config file instead of discovered `.doc-outline.toml` files
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log progress at info level (otherwise RUST_LOG, default warn)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the flat list of sections
    Sections(SectionArgs),
    /// Print the outline tree
    Outline(SectionArgs),
    /// Render a full page with metadata, outline, and section bodies
    Page(PageArgs),
    /// Render many files to a directory in parallel
    Render(RenderArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Input file; omit or use `-` to read stdin
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct OutputArgs {
    /// Output format (defaults to `render.format` from config)
    #[arg(long, value_enum)]
    format: Option<FormatValue>,
    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct SectionArgs {
    #[command(flatten)]
    input: InputArgs,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct PageArgs {
    #[command(flatten)]
    input: InputArgs,
    #[command(flatten)]
    output: OutputArgs,
    /// Page title (defaults to `page.title`)
    #[arg(long)]
    title: Option<String>,
    /// Author shown in the page footer
    #[arg(long)]
    author: Option<String>,
    /// Last-updated label shown in the page footer
    #[arg(long = "updated-at")]
    updated_at: Option<String>,
}

#[derive(Args)]
struct RenderArgs {
    /// Files to render; each becomes `<stem>.<ext>` in the output directory
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,
    /// Directory receiving rendered pages
    #[arg(long = "out-dir", value_name = "DIR")]
    out_dir: PathBuf,
    /// Output format (defaults to `render.format` from config)
    #[arg(long, value_enum)]
    format: Option<FormatValue>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatValue {
    Plain,
    Markdown,
    Json,
    Html,
}

impl From<FormatValue> for OutputFormat {
    fn from(value: FormatValue) -> Self {
        match value {
            FormatValue::Plain => OutputFormat::Plain,
            FormatValue::Markdown => OutputFormat::Markdown,
            FormatValue::Json => OutputFormat::Json,
            FormatValue::Html => OutputFormat::Html,
        }
    }
}
