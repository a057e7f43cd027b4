use std::collections::{BTreeMap, BTreeSet};

use colored::*;
use log::warn;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::error::HunterError;
use crate::target::Target;

/// Discovered input surfaces: path -> parameter names seen on that path.
/// Built once during extraction, read-only afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParameterIndex {
    paths: BTreeMap<String, BTreeSet<String>>,
}

impl ParameterIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &str, param: &str) {
        let path = if path.is_empty() { "/" } else { path };
        self.paths
            .entry(path.to_string())
            .or_default()
            .insert(param.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of paths that carry at least one parameter.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn params(&self, path: &str) -> Option<&BTreeSet<String>> {
        self.paths.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.paths.iter()
    }
}

/// Fetches the landing page and harvests candidate parameters from link
/// query strings and form fields.
///
/// Transport-level failures degrade to an empty index; a 4xx/5xx answer
/// is an error because probing needs a reachable landing page.
pub async fn extract(client: &Client, target: &Target) -> Result<ParameterIndex, HunterError> {
    println!(
        "{} Crawling {} for parameters...",
        "[*]".blue(),
        target.base_url
    );

    let response = match client.get(&target.base_url).send().await {
        Ok(response) => response,
        Err(e) => {
            println!("{} Request failed: {}", "[!]".red(), e);
            warn!("request to {} failed: {}", target.base_url, e);
            return Ok(ParameterIndex::new());
        }
    };

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(HunterError::Fetch {
            url: target.base_url.clone(),
            status,
        });
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            println!("{} Request failed: {}", "[!]".red(), e);
            warn!("reading response body from {} failed: {}", target.base_url, e);
            return Ok(ParameterIndex::new());
        }
    };

    Ok(harvest(target.url(), &body))
}

/// Builds the index from one page. Never fabricates names: every entry
/// was observed in a link query string or a form field. Unresolvable
/// hrefs and actions are skipped, not fatal.
fn harvest(base: &Url, body: &str) -> ParameterIndex {
    let document = Html::parse_document(body);
    let mut index = ParameterIndex::new();

    let anchor_selector = Selector::parse("a[href]").unwrap();
    let form_selector = Selector::parse("form").unwrap();
    let field_selector = Selector::parse("input[name], textarea[name]").unwrap();

    for anchor in document.select(&anchor_selector) {
        let href = match anchor.value().attr("href") {
            Some(href) => href,
            None => continue,
        };
        let resolved = match base.join(href) {
            Ok(url) => url,
            Err(_) => continue,
        };
        // Pairs with empty values carry no name worth testing.
        let names: Vec<String> = resolved
            .query_pairs()
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, _)| name.into_owned())
            .collect();
        if names.is_empty() {
            continue;
        }
        let path = resolved.path().to_string();
        for name in names {
            index.insert(&path, &name);
        }
    }

    for form in document.select(&form_selector) {
        let action = match form.value().attr("action") {
            Some(action) if !action.is_empty() => action,
            _ => "/",
        };
        let resolved = match base.join(action) {
            Ok(url) => url,
            Err(_) => continue,
        };
        let path = resolved.path().to_string();
        for field in form.select(&field_selector) {
            if let Some(name) = field.value().attr("name") {
                if !name.is_empty() {
                    index.insert(&path, name);
                }
            }
        }
    }

    index
}
