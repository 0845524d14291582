mod config;

use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::{Config, LineEnding};
use mimalloc::MiMalloc;
use salsa::DatabaseImpl;
use sharpen_errors::{Diagnostic, Renderer};
use sharpen_inputs::File;
use sharpen_parse::FileParse;
use sharpen_syntax::Encoding;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(version, about = "Parse, check and normalize C# sources")]
struct Cli {
    /// Configuration file to use instead of the nearest `sharpen.toml`.
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report syntax diagnostics.
    Check {
        #[arg(required = true)]
        paths: Vec<Utf8PathBuf>,
    },
    /// Rewrite files with normalized whitespace.
    Fmt {
        #[arg(required = true)]
        paths: Vec<Utf8PathBuf>,
        /// List files that would change instead of writing them.
        #[arg(long)]
        check: bool,
        /// Spaces per indentation level.
        #[arg(long)]
        indent: Option<usize>,
        #[arg(long, value_enum)]
        eol: Option<LineEnding>,
    },
    /// Print the syntax tree of a file.
    Dump { path: Utf8PathBuf },
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => {
            let cwd = Utf8PathBuf::try_from(std::env::current_dir()?)?;
            Config::discover(&cwd)?
        }
    };
    let db = DatabaseImpl::default();

    match cli.command {
        Command::Check { paths } => check(&db, &config, &paths),
        Command::Fmt { paths, check, indent, eol } => {
            let mut options = config.normalize_options();
            if let Some(indent) = indent {
                options = options.with_indentation(" ".repeat(indent));
            }
            if let Some(eol) = eol {
                options = options.with_end_of_line(eol.as_str());
            }
            format(&db, &config, &paths, &options, check)
        }
        Command::Dump { path } => {
            let file = read(&db, &config, &path)?;
            print!("{}", file.parse(&db).root().debug_dump());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_env("SHARPEN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn read(db: &DatabaseImpl, config: &Config, path: &Utf8Path) -> anyhow::Result<File> {
    let bytes = fs::read(path).with_context(|| format!("failed to read `{path}`"))?;
    File::from_bytes(db, path, &bytes, config.parse_options())
        .with_context(|| format!("`{path}` is not valid {:?}", Encoding::detect(&bytes)))
}

fn check(db: &DatabaseImpl, config: &Config, paths: &[Utf8PathBuf]) -> anyhow::Result<ExitCode> {
    let renderer = Renderer::styled();
    let mut errors = 0;

    for path in paths {
        let file = read(db, config, path)?;
        for diagnostic in file.parse(db).diagnostics() {
            errors += usize::from(diagnostic.is_error());
            eprintln!("{}", diagnostic.render(&renderer, path.as_str(), file.text(db)));
        }
    }

    if errors > 0 {
        eprintln!("found {errors} error(s)");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn format(
    db: &DatabaseImpl,
    config: &Config,
    paths: &[Utf8PathBuf],
    options: &sharpen_fmt::NormalizeOptions,
    check: bool,
) -> anyhow::Result<ExitCode> {
    let mut changed = 0;

    for path in paths {
        let file = read(db, config, path)?;
        let tree = file.parse(db);
        if tree.diagnostics().iter().any(Diagnostic::is_error) {
            tracing::warn!(%path, "skipping file with syntax errors");
            continue;
        }

        let mut text = sharpen_fmt::normalize_whitespace(tree.root(), options)?.to_full_string();
        if !text.is_empty() && !text.ends_with('\n') {
            text.push_str(&options.end_of_line);
        }
        if text == file.text(db) {
            continue;
        }

        changed += 1;
        if check {
            println!("{path}");
        } else {
            fs::write(path, file.encoding(db).encode(&text))
                .with_context(|| format!("failed to write `{path}`"))?;
            tracing::info!(%path, "formatted");
        }
    }

    if check && changed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
