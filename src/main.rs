use clap::Parser;
use mdstyle_lint::{
    lint_path, load_style, resolve_config, BasePolicy, OutputFormat, Registry, Reporter, StyleFile,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "mdstyle-lint")]
#[command(author, version, about = "Lint Markdown files against a style", long_about = None)]
struct Cli {
    /// Markdown file(s) to lint
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Path to a style file
    #[arg(short = 's', long, value_name = "STYLE_FILE")]
    style: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    format: Format,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let reporter = Reporter::with_color(cli.format.into(), !cli.no_color);
    let registry = Registry::builtin();

    // Without a style file every rule runs with its default enablement and
    // default options.
    let style = match &cli.style {
        Some(path) => match load_style(path) {
            Ok(style) => style,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(2);
            }
        },
        None => StyleFile {
            base: BasePolicy::Default,
            directives: Vec::new(),
        },
    };

    let config = match resolve_config(&registry, style.base, &style.directives) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let mut exit = 0u8;
    for file in &cli.files {
        if cli.verbose {
            eprintln!("Linting: {}", file.display());
        }

        let report = match lint_path(&registry, &config, file) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Error: {}: {}", file.display(), e);
                exit = 2;
                continue;
            }
        };

        reporter.print(&report, file);
        if !report.is_empty() && exit == 0 {
            exit = 1;
        }
    }
    ExitCode::from(exit)
}
