//! GitHub issue blocks.
//!
//! A GitHub issue block embeds an issue (or pull request) fetched from the
//! GitHub API. Its info panel shows rows derived from that data, followed by
//! the block's custom properties.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::BlockId;
use crate::store::{PropRow, PropertyStore};

// =============================================================================
// URL PATTERNS
// =============================================================================

lazy_static::lazy_static! {
    /// Issue or pull request URL. Group 1 is the repository URL (with a
    /// trailing slash), group 2 the repository name.
    static ref REPO_URL: Regex =
        Regex::new(r"(?i)^(https://github\.com/(?:([^/]+)/)+)(?:issues|pull)/[0-9]+$")
            .expect("valid repository URL pattern");

    /// Issue URL. Group 2 is the issue number.
    static ref ISSUE_URL: Regex =
        Regex::new(r"(?i)^https://github\.com/([^/]+/)+issues/([0-9]+)$")
            .expect("valid issue URL pattern");
}

/// Links derived from an issue's `html_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueLinks {
    pub repo_url: Option<String>,
    pub repo_name: Option<String>,
    pub is_issue: bool,
}

impl IssueLinks {
    pub fn parse(html_url: &str) -> Self {
        let (repo_url, repo_name) = match REPO_URL.captures(html_url) {
            Some(caps) => (
                caps.get(1).map(|m| m.as_str().to_string()),
                caps.get(2).map(|m| m.as_str().to_string()),
            ),
            None => (None, None),
        };
        Self {
            repo_url,
            repo_name,
            is_issue: ISSUE_URL.is_match(html_url),
        }
    }
}

// =============================================================================
// BLOCK DATA
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubUser {
    pub login: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubOrganization {
    pub login: String,
    pub html_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubRepository {
    pub name: Option<String>,
    pub organization: Option<GithubOrganization>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestRef {
    pub html_url: Option<String>,
    pub number: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubLabel {
    pub name: String,
    pub color: Option<String>,
}

/// Issue payload stored in a GitHub issue block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubIssueData {
    pub title: String,
    pub number: u64,
    pub html_url: Option<String>,
    pub body: Option<String>,
    pub state: Option<String>,
    pub repository: Option<GithubRepository>,
    pub pull_request: Option<PullRequestRef>,
    pub user: Option<GithubUser>,
    pub creator: Option<GithubUser>,
    pub assignees: Vec<GithubUser>,
    pub labels: Vec<GithubLabel>,
}

impl GithubIssueData {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// URL of the linked pull request, or `""`.
    pub fn pull_request_url(&self) -> &str {
        self.pull_request
            .as_ref()
            .and_then(|pr| pr.html_url.as_deref())
            .unwrap_or("")
    }
}

/// A GitHub issue block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubIssueBlock {
    pub id: BlockId,
    pub data: GithubIssueData,
}

// =============================================================================
// INFO ROWS
// =============================================================================

/// Content of one info panel row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoValue {
    Link { href: String, text: String },
    Avatar { src: String, alt: String },
    Text(String),
}

/// A labelled row of the info panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: InfoValue,
}

impl InfoRow {
    fn link(label: &'static str, href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label,
            value: InfoValue::Link {
                href: href.into(),
                text: text.into(),
            },
        }
    }
}

impl GithubIssueBlock {
    /// Rows derived from the issue data, in display order.
    pub fn info_rows(&self) -> Vec<InfoRow> {
        info_rows(&self.data)
    }

    /// Rows of the block's custom properties, in insertion order.
    pub fn custom_rows<'a>(&self, props: &'a PropertyStore) -> Vec<PropRow<'a>> {
        props.props().collect()
    }
}

/// Derives the info panel rows of an issue.
///
/// Assignees, status and labels are rendered by their own widgets and are
/// not part of these rows.
pub fn info_rows(data: &GithubIssueData) -> Vec<InfoRow> {
    let html_url = data.html_url.as_deref().unwrap_or("");
    let links = IssueLinks::parse(html_url);
    let mut rows = Vec::new();

    if let Some(org) = data.repository.as_ref().and_then(|r| r.organization.as_ref()) {
        rows.push(InfoRow::link("Organization", &org.html_url, &org.login));
    }
    if let Some(repo_url) = &links.repo_url {
        let name = links.repo_name.clone().unwrap_or_default();
        rows.push(InfoRow::link("Repository", repo_url, name));
    }
    if links.is_issue {
        rows.push(InfoRow::link("Issue number", html_url, format!("#{}", data.number)));
    }
    let pr_url = data.pull_request_url();
    if !pr_url.is_empty() {
        let number = data
            .pull_request
            .as_ref()
            .and_then(|pr| pr.number)
            .unwrap_or(data.number);
        rows.push(InfoRow::link("Linked PR", pr_url, format!("#{number}")));
    }
    if let Some(creator) = &data.creator {
        let author = data.user.as_ref().unwrap_or(creator);
        rows.push(InfoRow {
            label: "Creator",
            value: InfoValue::Avatar {
                src: author.avatar_url.clone(),
                alt: author.login.chars().next().map(String::from).unwrap_or_default(),
            },
        });
    }
    if let Some(body) = data.body.as_deref().filter(|b| !b.trim().is_empty()) {
        rows.push(InfoRow {
            label: "Body",
            value: InfoValue::Text(body.to_string()),
        });
    }
    rows
}
