use colored::*;
use log::{info, warn};
use reqwest::Client;
use url::Url;

use crate::extractor::ParameterIndex;
use crate::recorder::{Finding, Workspace};
use crate::target::Target;
use crate::utils::sanitization_hint;

pub const PAYLOAD: &str = "<script>alert('XSS')</script>";

/// Tests every discovered parameter with the fixed payload, one request
/// at a time. A failed probe skips that parameter only; the remaining
/// surfaces are always tested. Findings are recorded as soon as they are
/// detected so partial runs still leave reports behind.
pub async fn probe(
    client: &Client,
    target: &Target,
    index: &ParameterIndex,
    workspace: &Workspace,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    if index.is_empty() {
        println!("{} No parameters found to test.", "[-]".yellow());
        return findings;
    }

    for (path, params) in index.iter() {
        for param in params {
            println!("{} Testing param '{}' on {}", "[*]".blue(), param, path);

            let asset_url = format!("{}{}", target.base_url, path);
            let url = match probe_url(&asset_url, param) {
                Some(url) => url,
                None => {
                    warn!("could not build probe URL for '{}' on {}", param, path);
                    continue;
                }
            };
            info!("injecting payload into '{}' via {}", param, url);

            let body = match fetch_body(client, url).await {
                Ok(body) => body,
                Err(e) => {
                    println!("{} Probe failed for '{}': {}", "[!]".red(), param, e);
                    warn!("probe for '{}' on {} failed: {}", param, path, e);
                    continue;
                }
            };

            if body.contains(PAYLOAD) {
                println!(
                    "    {} Potential vulnerability found. Report generated.",
                    "[!]".red().bold()
                );
                let finding = Finding::reflected_xss(&asset_url, param, PAYLOAD);
                if let Err(e) = workspace.record_finding(&finding) {
                    println!("{} Could not write finding report: {}", "[!]".red(), e);
                    warn!("writing report for '{}' failed: {}", param, e);
                }
                findings.push(finding);
            } else if let Some(reason) = sanitization_hint(PAYLOAD, &body) {
                info!("payload for '{}' came back defused ({})", param, reason);
            }
        }
    }

    findings
}

/// Probe URL: the recorded asset URL plus exactly one query pair carrying
/// the payload. Requested and recorded URLs only ever differ in the query.
fn probe_url(asset_url: &str, param: &str) -> Option<Url> {
    let mut url = Url::parse(asset_url).ok()?;
    url.query_pairs_mut().clear().append_pair(param, PAYLOAD);
    Some(url)
}

async fn fetch_body(client: &Client, url: Url) -> reqwest::Result<String> {
    client.get(url).send().await?.text().await
}
