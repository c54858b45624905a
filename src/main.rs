//! prettify - syntax highlight source files for HTML or the terminal

use std::env;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process;

use prettify::{Config, HighlightError, Highlighter, OutputFormat, Result};
use tracing_subscriber::EnvFilter;

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    lang: Option<String>,
    line_numbers: Option<usize>,
    format: Option<OutputFormat>,
    list: bool,
    save_config: bool,
    file: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(options) = parse_args(&args)? else {
        return Ok(());
    };

    let config = Config::load();
    if options.save_config {
        let path = config.save()?;
        println!("Saved configuration to {}", path.display());
        return Ok(());
    }
    let highlighter = Highlighter::new(config)?;

    if options.list {
        for lang in highlighter.registry().languages() {
            println!("{}", lang);
        }
        return Ok(());
    }

    let source = match &options.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let lang = options.lang.clone().or_else(|| {
        options
            .file
            .as_deref()
            .and_then(|path| highlighter.registry().detect_language(path))
    });

    let config = highlighter.config();
    let format = options.format.unwrap_or(if config.color && io::stdout().is_terminal() {
        OutputFormat::Ansi
    } else {
        OutputFormat::Html
    });
    let line_numbers = options.line_numbers.or(config.line_numbers.then_some(1));

    let output = highlighter.render_source(&source, lang.as_deref(), format, line_numbers);
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

/// Parse arguments; `None` means a help or version request was served
fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--lang" | "-l" => {
                let lang = iter.next().ok_or_else(|| usage_error("--lang needs a language id"))?;
                options.lang = Some(lang.clone());
            }
            "--linenums" | "-n" => options.line_numbers = Some(1),
            "--html" => options.format = Some(OutputFormat::Html),
            "--ansi" => options.format = Some(OutputFormat::Ansi),
            "--list" => options.list = true,
            "--save-config" => options.save_config = true,
            other => {
                if let Some(start) = other.strip_prefix("--linenums=") {
                    let start = start
                        .parse()
                        .map_err(|_| usage_error(&format!("invalid line number `{}`", start)))?;
                    options.line_numbers = Some(start);
                } else if let Some(lang) = other.strip_prefix("--lang=") {
                    options.lang = Some(lang.to_string());
                } else if other.starts_with('-') && other != "-" {
                    return Err(usage_error(&format!("unknown option `{}`", other)));
                } else if other != "-" {
                    options.file = Some(PathBuf::from(other));
                }
            }
        }
    }

    Ok(Some(options))
}

fn usage_error(message: &str) -> HighlightError {
    HighlightError::Usage(format!("{} (try --help)", message))
}

fn print_usage() {
    println!("prettify {} - syntax highlighting for source files", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: prettify [OPTIONS] [FILE]");
    println!();
    println!("Reads FILE, or standard input when FILE is missing or `-`.");
    println!();
    println!("Options:");
    println!("  -l, --lang LANG      Language id or extension (default: from FILE, then content)");
    println!("  -n, --linenums[=N]   Number lines, starting at N (default 1)");
    println!("      --html           Emit HTML spans");
    println!("      --ansi           Emit ANSI colors");
    println!("      --list           List registered languages");
    println!("      --save-config    Write current settings to ~/.prettify.toml");
    println!("  -h, --help           Show this help message");
    println!("  -V, --version        Show version information");
    println!();
    println!("Settings are read from ~/.prettify.toml. Set RUST_LOG=debug for diagnostics.");
}

fn print_version() {
    println!("prettify {}", env!("CARGO_PKG_VERSION"));
}
