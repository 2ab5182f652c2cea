use crate::assemble::extract_title;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::markdown_to_html;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

static RE_MARKDOWN_EXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(md|markdown)$").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteReport {
    pub pages: usize,
    pub static_files: usize,
}

pub fn apply_template(template: &str, title: &str, content: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content)
}

/// Points root-relative `href="/` and `src="/` at `base_path`.
pub fn rewrite_base_path(html: &str, base_path: &str) -> String {
    if base_path.is_empty() || base_path == "/" {
        return html.to_string();
    }
    let base = if base_path.ends_with('/') {
        base_path.to_string()
    } else {
        format!("{}/", base_path)
    };
    html.replace("href=\"/", &format!("href=\"{}", base))
        .replace("src=\"/", &format!("src=\"{}", base))
}

/// Converts one document and fills `template` with its title and body.
pub fn generate_page(markdown: &str, template: &str, base_path: &str) -> Result<String> {
    let content = markdown_to_html(markdown)?;
    let title = extract_title(markdown)?;
    let page = apply_template(template, &title, &content);
    Ok(rewrite_base_path(&page, base_path))
}

pub fn list_markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut out: Vec<PathBuf> = Vec::new();
    collect_markdown_files(dir, &mut out)?;
    out.sort();
    Ok(out)
}

fn collect_markdown_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if path.is_dir() {
            collect_markdown_files(&path, out)?;
        } else if path.is_file() && RE_MARKDOWN_EXT.is_match(&path.to_string_lossy()) {
            out.push(path);
        }
    }
    Ok(())
}

/// Recreates `dst` and copies every file under `src` into it. A missing or
/// empty `src` leaves `dst` empty.
pub fn copy_static(src: &Path, dst: &Path) -> Result<usize> {
    if dst.exists() {
        log::info!("removing {}", dst.display());
        fs::remove_dir_all(dst).map_err(|e| Error::io(dst, e))?;
    }
    fs::create_dir_all(dst).map_err(|e| Error::io(dst, e))?;

    let is_empty = match fs::read_dir(src) {
        Ok(mut entries) => entries.next().is_none(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
        Err(e) => return Err(Error::io(src, e)),
    };
    if is_empty {
        log::warn!(
            "static directory {} is missing or empty; nothing to copy",
            src.display()
        );
        return Ok(0);
    }
    copy_tree(src, dst)
}

fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    let mut copied = 0;
    for entry in fs::read_dir(src).map_err(|e| Error::io(src, e))? {
        let path = entry.map_err(|e| Error::io(src, e))?.path();
        let Some(name) = path.file_name() else {
            continue;
        };
        let target = dst.join(name);
        if path.is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::io(&target, e))?;
            copied += copy_tree(&path, &target)?;
        } else {
            log::info!("copying {} -> {}", path.display(), target.display());
            fs::copy(&path, &target).map_err(|e| Error::io(&path, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// The output directory is wiped on every build, so it must not contain
/// any of the inputs.
fn check_output_dir(config: &Config) -> Result<()> {
    let resolve = |p: &Path| fs::canonicalize(p).unwrap_or_else(|_| p.to_path_buf());
    let output = resolve(config.output_dir.as_path());
    for input in [&config.content_dir, &config.static_dir, &config.template] {
        if resolve(input.as_path()).starts_with(&output) {
            return Err(Error::UnsafeOutputDir {
                output: config.output_dir.clone(),
                input: input.clone(),
            });
        }
    }
    Ok(())
}

/// Copies static assets, then renders every markdown file under the content
/// directory to the mirrored `.html` path in the output directory.
pub fn generate_site(config: &Config) -> Result<SiteReport> {
    check_output_dir(config)?;
    let mut report = SiteReport {
        static_files: copy_static(&config.static_dir, &config.output_dir)?,
        ..SiteReport::default()
    };

    let template =
        fs::read_to_string(&config.template).map_err(|e| Error::io(&config.template, e))?;

    for src in list_markdown_files(&config.content_dir)? {
        let rel = src.strip_prefix(&config.content_dir).unwrap_or(&src);
        let dest = config.output_dir.join(rel).with_extension("html");
        log::info!(
            "generating page {} -> {} using {}",
            src.display(),
            dest.display(),
            config.template.display()
        );

        let markdown = fs::read_to_string(&src).map_err(|e| Error::io(&src, e))?;
        let page = generate_page(&markdown, &template, &config.base_path)?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(&dest, page).map_err(|e| Error::io(&dest, e))?;
        report.pages += 1;
    }
    Ok(report)
}
