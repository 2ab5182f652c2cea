use clap::Parser;
use mdsite::config::Config;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "mdsite", about = "mdsite — convert Markdown documents to HTML pages")]
struct Cli {
    /// Markdown file to convert (default: build the whole site)
    input: Option<PathBuf>,

    /// Output file for a single document (default: stdout)
    #[arg(short, long, requires = "input")]
    output: Option<PathBuf>,

    /// Wrap a single document in the page template
    #[arg(long, requires = "input")]
    page: bool,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Markdown source directory
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Static asset directory
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Destination directory (recreated on every build)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Page template with {{ Title }} and {{ Content }} placeholders
    #[arg(long)]
    template: Option<PathBuf>,

    /// Deployment base path for root-relative links (default: /)
    #[arg(long)]
    base_path: Option<String>,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn die(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    process::exit(1);
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| die(&format!("cannot read {}: {}", path.display(), e)))
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    // Load config
    let loaded = match cli.config {
        Some(ref config_path) => Config::load(config_path),
        None => Config::discover(Path::new(".")),
    };
    let mut config = loaded.unwrap_or_else(|e| die(&e.to_string()));

    // CLI overrides
    if let Some(dir) = cli.content_dir {
        config.content_dir = dir;
    }
    if let Some(dir) = cli.static_dir {
        config.static_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(template) = cli.template {
        config.template = template;
    }
    if let Some(base_path) = cli.base_path {
        config.base_path = base_path;
    }

    let Some(input) = cli.input else {
        let report = mdsite::site::generate_site(&config).unwrap_or_else(|e| die(&e.to_string()));
        log::info!(
            "built {} page(s), copied {} static file(s) -> {}",
            report.pages,
            report.static_files,
            config.output_dir.display()
        );
        return;
    };

    let markdown = read(&input);
    let result = if cli.page {
        let template = read(&config.template);
        mdsite::site::generate_page(&markdown, &template, &config.base_path)
    } else {
        mdsite::markdown_to_html(&markdown)
    };
    let html = result.unwrap_or_else(|e| die(&format!("{}: {}", input.display(), e)));

    if let Some(ref output_path) = cli.output {
        fs::write(output_path, &html)
            .unwrap_or_else(|e| die(&format!("cannot write {}: {}", output_path.display(), e)));
        log::info!("converted {} -> {}", input.display(), output_path.display());
    } else {
        println!("{}", html);
    }
}
