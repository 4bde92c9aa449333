use clap::Parser;
use diffmark::render::{HeadlessRenderer, comparison_title};
use diffmark::{DiffmarkConfig, text};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{}", invalid_paths_message(.0))]
    InvalidPaths(Vec<PathBuf>),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] diffmark::Error),
    #[error(transparent)]
    Render(#[from] diffmark::render::HeadlessError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn invalid_paths_message(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("invalid path: {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

impl CliError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Compare two text files and write a self-contained HTML review page.
#[derive(Parser, Debug)]
#[command(name = "diffmark-cli", version)]
struct Args {
    /// Original file.
    #[arg(long, value_name = "PATH")]
    origin: PathBuf,

    /// Revised file.
    #[arg(long, value_name = "PATH")]
    revised: PathBuf,

    /// Output file. Defaults to `<revised dir>/<revised stem>_diff_from_<origin stem>.html`.
    /// An empty value is treated like an absent flag.
    #[arg(long, value_name = "PATH")]
    out: Option<OsString>,

    /// JSON config deep-merged over the built-in defaults.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Value of the document's `lang` attribute.
    #[arg(long, value_name = "TAG")]
    lang: Option<String>,

    /// Print the edit script as JSON instead of writing HTML.
    #[arg(long)]
    dump_ops: bool,

    /// Pretty-print `--dump-ops` output.
    #[arg(long, requires = "dump_ops")]
    pretty: bool,

    /// Log debug events to stderr (overridden by `RUST_LOG`).
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Lists every input path that does not exist, in argument order.
fn missing_paths(paths: &[&Path]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|p| !p.exists())
        .map(|p| p.to_path_buf())
        .collect()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn default_out_path(origin: &Path, revised: &Path) -> PathBuf {
    let name = format!(
        "{}_diff_from_{}.html",
        file_stem(revised),
        file_stem(origin)
    );
    revised
        .parent()
        .map(|dir| dir.join(&name))
        .unwrap_or_else(|| PathBuf::from(&name))
}

/// Appends `.html` unless the path already ends with it.
fn ensure_html_extension(path: PathBuf) -> PathBuf {
    if path.to_string_lossy().ends_with(".html") {
        return path;
    }
    let mut raw = path.into_os_string();
    raw.push(".html");
    PathBuf::from(raw)
}

fn resolve_out_path(args: &Args) -> PathBuf {
    let chosen = match &args.out {
        Some(out) if !out.is_empty() => PathBuf::from(out),
        _ => default_out_path(&args.origin, &args.revised),
    };
    ensure_html_extension(chosen)
}

/// Reads a file as UTF-8 (invalid sequences replaced, leading BOM dropped) with `\n` line
/// endings.
fn read_text(path: &Path) -> Result<String, CliError> {
    let bytes = std::fs::read(path).map_err(|err| CliError::io(path, err))?;
    let decoded = String::from_utf8_lossy(&bytes);
    Ok(text::normalize_line_endings(text::strip_bom(&decoded)).into_owned())
}

fn load_config(args: &Args) -> Result<DiffmarkConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|err| CliError::io(path, err))?;
            DiffmarkConfig::from_json_str(&raw)?
        }
        None => DiffmarkConfig::empty_object(),
    };
    if let Some(lang) = &args.lang {
        config.set_value("document.lang", serde_json::Value::String(lang.clone()));
    }
    Ok(config)
}

fn run(args: Args) -> Result<(), CliError> {
    let missing = missing_paths(&[args.origin.as_path(), args.revised.as_path()]);
    if !missing.is_empty() {
        return Err(CliError::InvalidPaths(missing));
    }

    let renderer = HeadlessRenderer::new().with_site_config(load_config(&args)?)?;
    let original = read_text(&args.origin)?;
    let revised = read_text(&args.revised)?;

    if args.dump_ops {
        let ops = renderer.diff(&original, &revised)?;
        let json = if args.pretty {
            serde_json::to_string_pretty(&ops)?
        } else {
            serde_json::to_string(&ops)?
        };
        println!("{json}");
        return Ok(());
    }

    let title = comparison_title(&file_name(&args.origin), &file_name(&args.revised));
    let html = renderer.render_diff_html_sync(&title, &original, &revised)?;

    let out = resolve_out_path(&args);
    std::fs::write(&out, html).map_err(|err| CliError::io(&out, err))?;
    tracing::debug!(out = %out.display(), "wrote diff page");
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
