use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use colored::*;

use crate::error::HunterError;
use crate::extractor::ParameterIndex;

const WORKSPACE_FOLDERS: [&str; 3] = ["recon", "crawled_data", "reports"];

/// One positive detection. Immutable once created; the record id is
/// `<title>_<sanitized-param>`, so two parameters that sanitize to the
/// same identifier overwrite each other's record. Known collision, kept
/// as-is because the payload is fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub title: String,
    pub severity: String,
    pub asset_url: String,
    pub parameter: String,
    pub payload: String,
}

impl Finding {
    pub fn reflected_xss(asset_url: &str, parameter: &str, payload: &str) -> Self {
        Self {
            title: "Reflected_XSS".to_string(),
            severity: "Medium".to_string(),
            asset_url: asset_url.to_string(),
            parameter: parameter.to_string(),
            payload: payload.to_string(),
        }
    }

    pub fn record_id(&self) -> String {
        format!("{}_{}", self.title, sanitize_param(&self.parameter))
    }

    pub fn render(&self) -> String {
        format!(
            "TITLE: {}\nSEVERITY: {}\nASSET: {}\nPARAM: {}\nPAYLOAD: {}\n",
            self.title, self.severity, self.asset_url, self.parameter, self.payload
        )
    }
}

/// Keeps only alphanumerics, `_` and `-` so the parameter name is safe
/// to use in a file name.
pub fn sanitize_param(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Per-run output directory tree:
/// `<root>/<host>/<timestamp>/{recon,crawled_data,reports}`.
#[derive(Debug)]
pub struct Workspace {
    base_dir: PathBuf,
}

impl Workspace {
    pub fn create(root: impl AsRef<Path>, host: &str) -> Result<Self, HunterError> {
        let timestamp = Local::now().format("%Y-%m-%d_%H%M").to_string();
        let base_dir = root.as_ref().join(host).join(timestamp);

        for folder in WORKSPACE_FOLDERS {
            let path = base_dir.join(folder);
            fs::create_dir_all(&path).map_err(|source| HunterError::Workspace {
                path: path.clone(),
                source,
            })?;
            println!("{} Created directory: {}", "[+]".green(), path.display());
        }

        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// One line per discovered path, parameter names comma-joined in
    /// sorted order. A failed or empty crawl leaves no report file behind.
    pub fn write_parameter_report(&self, index: &ParameterIndex) -> io::Result<()> {
        if index.is_empty() {
            return Ok(());
        }
        let mut report = String::new();
        for (path, params) in index.iter() {
            let names: Vec<&str> = params.iter().map(String::as_str).collect();
            report.push_str(&format!("Path: {} | Params: {}\n", path, names.join(", ")));
        }
        fs::write(
            self.base_dir.join("crawled_data").join("parameters.txt"),
            report,
        )
    }

    pub fn record_finding(&self, finding: &Finding) -> io::Result<()> {
        let path = self
            .base_dir
            .join("reports")
            .join(format!("{}.txt", finding.record_id()));
        fs::write(path, finding.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("xsshunter-{}-{}", tag, std::process::id()))
    }

    #[test]
    fn sanitize_keeps_only_safe_characters() {
        assert_eq!(sanitize_param("q[]=1"), "q1");
        assert_eq!(sanitize_param("user_name-2"), "user_name-2");
        assert_eq!(sanitize_param("<evil>"), "evil");
    }

    #[test]
    fn differently_spelled_parameters_can_collide() {
        // Accepted behavior: the later record overwrites the earlier one.
        let a = Finding::reflected_xss("https://example.com/", "q", "x");
        let b = Finding::reflected_xss("https://example.com/", "q!", "x");
        assert_eq!(a.record_id(), b.record_id());
    }

    #[test]
    fn finding_renders_five_labeled_lines() {
        let finding = Finding::reflected_xss(
            "https://example.com/search",
            "q",
            "<script>alert('XSS')</script>",
        );
        let rendered = finding.render();
        assert_eq!(rendered.lines().count(), 5);
        assert!(rendered.starts_with("TITLE: Reflected_XSS\n"));
        assert!(rendered.contains("SEVERITY: Medium\n"));
        assert!(rendered.contains("ASSET: https://example.com/search\n"));
        assert!(rendered.contains("PARAM: q\n"));
        assert!(rendered.ends_with("PAYLOAD: <script>alert('XSS')</script>\n"));
    }

    #[test]
    fn empty_index_leaves_no_parameter_report() {
        let root = temp_root("empty-report");
        let workspace = Workspace::create(&root, "example.com").unwrap();

        workspace
            .write_parameter_report(&ParameterIndex::new())
            .unwrap();
        assert!(!workspace
            .base_dir()
            .join("crawled_data")
            .join("parameters.txt")
            .exists());

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn workspace_creates_folder_tree_and_persists_records() {
        let root = temp_root("workspace");
        let workspace = Workspace::create(&root, "example.com").unwrap();

        for folder in WORKSPACE_FOLDERS {
            assert!(workspace.base_dir().join(folder).is_dir());
        }

        let mut index = ParameterIndex::new();
        index.insert("/search", "q");
        index.insert("/search", "page");
        workspace.write_parameter_report(&index).unwrap();

        let report = fs::read_to_string(
            workspace.base_dir().join("crawled_data").join("parameters.txt"),
        )
        .unwrap();
        assert_eq!(report, "Path: /search | Params: page, q\n");

        let finding = Finding::reflected_xss("https://example.com/search", "q", "x");
        workspace.record_finding(&finding).unwrap();
        let record = workspace
            .base_dir()
            .join("reports")
            .join("Reflected_XSS_q.txt");
        assert!(record.is_file());

        fs::remove_dir_all(&root).unwrap();
    }
}
