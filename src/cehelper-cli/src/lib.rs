//! CLI for create-content-engine: scaffold projects from remote templates.
//!
//! The whole tool is one linear pipeline: resolve the project name and
//! template (prompting for whatever the command line didn't provide),
//! download a branch snapshot of the template repository, extract it into a
//! temporary workspace, and copy the chosen template into a new directory
//! named after the project.

mod output;
mod prompt;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const DEFAULT_OWNER: &str = "coreutility";
const DEFAULT_REPO: &str = "content-engine";
const DEFAULT_BRANCH: &str = "main";

/// Catalog used when the template manifest cannot be fetched.
pub const FALLBACK_TEMPLATES: &[&str] = &["vanilla-ts"];

const USER_AGENT: &str = "create-content-engine (https://github.com/coreutility/content-engine)";

#[derive(Parser)]
#[command(name = "create-content-engine")]
#[command(version, about = "Scaffold a new project from a content-engine template", long_about = None)]
pub struct Cli {
    /// Name for the new project (prompted interactively if not provided)
    pub name: Option<String>,

    /// Which template to use (prompted interactively if not provided)
    #[arg(long, short = 't')]
    pub template: Option<String>,

    /// Override the template repository owner (for development/testing)
    #[arg(long, hide = true, env = "CREATE_CE_OWNER", default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// Override the template repository name (for development/testing)
    #[arg(long, hide = true, env = "CREATE_CE_REPO", default_value = DEFAULT_REPO)]
    pub repo: String,

    /// Override the template repository branch (for development/testing)
    #[arg(long, hide = true, env = "CREATE_CE_BRANCH", default_value = DEFAULT_BRANCH)]
    pub branch: String,
}

/// Main entry point for the CLI.
pub fn main() -> Result<()> {
    run(Cli::parse())
}

/// Run the full scaffolding pipeline for already-parsed arguments.
pub fn run(cli: Cli) -> Result<()> {
    let source = RepoSource {
        owner: cli.owner,
        repo: cli.repo,
        branch: cli.branch,
    };

    // An empty name or template counts as "not provided" and falls through
    // to the interactive prompt, so both are non-empty past this point.
    let project_name = match cli.name.filter(|name| !name.is_empty()) {
        Some(name) => name,
        None => prompt::project_name()?,
    };

    let template_name = match cli.template.filter(|template| !template.is_empty()) {
        Some(template) => template,
        None => {
            let catalog = fetch_template_catalog(&source);
            match prompt::choose_template(&catalog)? {
                Some(template) => template,
                None => {
                    output::info("Cancelled");
                    return Ok(());
                }
            }
        }
    };

    output::info("Downloading template...");

    // Both temporary paths live inside a single tempdir so cleanup is one
    // drop, on error paths included.
    let workspace = tempfile::tempdir().context("Failed to create temp directory")?;
    let archive_path = workspace.path().join("repo.zip");
    let extract_dir = workspace.path().join("extract");

    download_snapshot(&source, &archive_path)?;
    extract_snapshot(&archive_path, &extract_dir)?;

    let template_dir = locate_template(&extract_dir, &source.repo, &template_name)?;
    copy_template(&template_dir, Path::new(&project_name))?;

    workspace
        .close()
        .context("Failed to remove temp directory")?;

    output::success(&format!("Project created: {}", project_name));
    println!();
    println!("Next steps:");
    println!("  cd {}", project_name);
    println!("  npm install");
    println!("  npm run dev");

    Ok(())
}

// ============================================================================
// Repository source
// ============================================================================

/// The GitHub repository that templates are fetched from.
#[derive(Clone, Debug)]
pub struct RepoSource {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl RepoSource {
    /// URL of the JSON manifest listing available templates.
    pub fn manifest_url(&self) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/{}/template-list.json",
            self.owner, self.repo, self.branch
        )
    }

    /// URL of the zipped branch snapshot containing the templates.
    pub fn archive_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/archive/refs/heads/{}.zip",
            self.owner, self.repo, self.branch
        )
    }
}

// ============================================================================
// Manifest types
// ============================================================================

/// One entry of `template-list.json`. Fields default to empty strings so a
/// malformed entry is filtered out instead of failing the whole manifest.
#[derive(Deserialize)]
pub struct ManifestEntry {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
}

// ============================================================================
// Template catalog
// ============================================================================

/// Fetch the list of available template names, falling back to
/// [`FALLBACK_TEMPLATES`] on any failure. Never returns an empty list.
pub fn fetch_template_catalog(source: &RepoSource) -> Vec<String> {
    match try_fetch_catalog(source) {
        Ok(templates) if !templates.is_empty() => templates,
        Ok(_) | Err(_) => {
            output::warn("Could not fetch templates from GitHub, using fallback.");
            FALLBACK_TEMPLATES.iter().map(|t| (*t).to_string()).collect()
        }
    }
}

fn try_fetch_catalog(source: &RepoSource) -> Result<Vec<String>> {
    let client = http_client()?;
    let url = source.manifest_url();

    let response = client
        .get(&url)
        .send()
        .with_context(|| format!("Failed to fetch {}", url))?;

    if !response.status().is_success() {
        bail!("Manifest request returned status {}", response.status());
    }

    let entries: Vec<ManifestEntry> = response
        .json()
        .context("Failed to parse template manifest")?;

    Ok(filter_templates(entries))
}

/// Keep the `dir` entries of the manifest, in input order.
pub fn filter_templates(entries: Vec<ManifestEntry>) -> Vec<String> {
    entries
        .into_iter()
        .filter(|entry| entry.kind == "dir" && !entry.name.is_empty())
        .map(|entry| entry.name)
        .collect()
}

// ============================================================================
// Snapshot download & extraction
// ============================================================================

fn http_client() -> Result<reqwest::blocking::Client> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Download the branch snapshot archive to `dest`.
pub fn download_snapshot(source: &RepoSource, dest: &Path) -> Result<()> {
    let client = http_client()?;
    let url = source.archive_url();

    let response = client
        .get(&url)
        .send()
        .with_context(|| format!("Failed to download archive from {}", url))?;

    if !response.status().is_success() {
        bail!(
            "Failed to download '{}/{}' snapshot (status: {})",
            source.owner,
            source.repo,
            response.status()
        );
    }

    let bytes = response.bytes().context("Failed to read archive response")?;

    fs::write(dest, &bytes).with_context(|| format!("Failed to write {}", dest.display()))?;

    Ok(())
}

/// Unpack the downloaded zip archive into `dest`, creating it if absent.
pub fn extract_snapshot(archive: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest).with_context(|| format!("Failed to create {}", dest.display()))?;

    let file =
        fs::File::open(archive).with_context(|| format!("Failed to open {}", archive.display()))?;

    let mut snapshot = zip::ZipArchive::new(file)
        .with_context(|| format!("Failed to read archive {}", archive.display()))?;
    snapshot
        .extract(dest)
        .with_context(|| format!("Failed to extract archive {}", archive.display()))?;

    Ok(())
}

// ============================================================================
// Materialization
// ============================================================================

/// Resolve the chosen template inside the extracted snapshot.
///
/// Branch snapshots unpack to a single root folder named `<repo>-<branch>`,
/// so the root is found by name rather than assumed. The template itself
/// must be a directory under `templates/` inside that root.
pub fn locate_template(extract_dir: &Path, repo: &str, template: &str) -> Result<PathBuf> {
    let root = find_extraction_root(extract_dir, repo)?;

    let template_dir = root.join("templates").join(template);
    if !template_dir.is_dir() {
        bail!("Template not found: {}", template);
    }

    Ok(template_dir)
}

fn find_extraction_root(extract_dir: &Path, repo: &str) -> Result<PathBuf> {
    let entries = fs::read_dir(extract_dir)
        .with_context(|| format!("Failed to read {}", extract_dir.display()))?;

    for entry in entries {
        let entry = entry?;
        if entry.file_name().to_string_lossy().contains(repo) {
            return Ok(entry.path());
        }
    }

    bail!("Could not find extracted folder");
}

/// Recursively copy the template tree into `dest`, creating it (and any
/// missing parents) first. Existing contents are merged; files that already
/// exist are overwritten.
pub fn copy_template(template_dir: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest).with_context(|| format!("Failed to create {}", dest.display()))?;

    for entry in WalkDir::new(template_dir) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(template_dir)?;
        if relative.as_os_str().is_empty() {
            continue;
        }

        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
        }
    }

    Ok(())
}
