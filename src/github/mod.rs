//! GitHub issue and pull request lookups
//!
//! Branch names for `new --issue` / `new --pr` are derived from the item's
//! title. Lookups go through the `gh` CLI, which owns authentication.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::process;

/// Longest slug produced by [`slugify`], in bytes
pub const MAX_SLUG_LEN: usize = 50;

/// Deadline for a single `gh` call
pub const GH_TIMEOUT: Duration = Duration::from_secs(120);

const ISSUE_FIELDS: &str = "number,title,body,labels,url";
const PR_FIELDS: &str = "number,title,body,author,state,url,files";

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9-]").expect("slug character class must compile"));
static HYPHEN_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-+").expect("hyphen run pattern must compile"));

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub url: String,
}

impl Issue {
    pub fn label_names(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub author: Author,
    /// `OPEN`, `CLOSED` or `MERGED`
    pub state: String,
    pub url: String,
    #[serde(default)]
    pub files: Vec<ChangedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangedFile {
    pub path: String,
}

/// Fetch issue `number` of the repository in the current directory.
#[instrument]
pub fn fetch_issue(number: u64) -> Result<Issue> {
    let number = number.to_string();
    let json = process::run_command(
        None,
        "gh",
        &["issue", "view", &number, "--json", ISSUE_FIELDS],
        GH_TIMEOUT,
    )?;
    parse_issue(&json)
}

/// Fetch pull request `number` of the repository in the current directory.
#[instrument]
pub fn fetch_pull_request(number: u64) -> Result<PullRequest> {
    let number = number.to_string();
    let json = process::run_command(
        None,
        "gh",
        &["pr", "view", &number, "--json", PR_FIELDS],
        GH_TIMEOUT,
    )?;
    parse_pull_request(&json)
}

fn parse_issue(json: &str) -> Result<Issue> {
    Ok(serde_json::from_str(json)?)
}

fn parse_pull_request(json: &str) -> Result<PullRequest> {
    Ok(serde_json::from_str(json)?)
}

/// Whether `gh` is installed and logged in
pub fn gh_available() -> bool {
    let available = process::run_command(None, "gh", &["auth", "status"], GH_TIMEOUT).is_ok();
    debug!(available, "Checked gh availability");
    available
}

/// Turn a title into a lowercase, hyphen-separated slug of at most
/// [`MAX_SLUG_LEN`] bytes.
///
/// Only `[a-z0-9-]` survives, hyphen runs collapse to one, and the result
/// never starts or ends with a hyphen.
pub fn slugify(s: &str) -> String {
    let lowered = s.to_lowercase().replace(' ', "-");
    let stripped = NON_SLUG_CHARS.replace_all(&lowered, "");
    let collapsed = HYPHEN_RUNS.replace_all(&stripped, "-");
    let slug = collapsed.trim_matches('-');

    // ASCII only at this point, so byte truncation is safe
    if slug.len() > MAX_SLUG_LEN {
        slug[..MAX_SLUG_LEN].trim_end_matches('-').to_string()
    } else {
        slug.to_string()
    }
}

/// `<prefix>-<number>-<slug(title)>`, e.g. `issue-42-fix-login-redirect`
pub fn generate_branch_name(prefix: &str, number: u64, title: &str) -> String {
    format!("{}-{}-{}", prefix, number, slugify(title))
}
