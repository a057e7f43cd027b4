use url::Url;

use crate::error::HunterError;

/// Canonical scan target, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Absolute base URL with no trailing slash.
    pub base_url: String,
    /// Authority (host or host:port) used to name the workspace.
    pub host: String,
    url: Url,
}

impl Target {
    /// Normalizes a raw host or URL string. Prepends `https://` when no
    /// scheme is given and strips trailing slashes. Reachability is not
    /// checked here; only unparseable syntax fails.
    pub fn resolve(raw: &str) -> Result<Self, HunterError> {
        let trimmed = raw.trim();
        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };
        let base_url = with_scheme.trim_end_matches('/').to_string();

        let url = Url::parse(&base_url).map_err(|source| HunterError::InvalidTarget {
            target: raw.to_string(),
            source,
        })?;

        let host = match (url.host_str(), url.port()) {
            (Some(h), Some(p)) => format!("{}:{}", h, p),
            (Some(h), None) => h.to_string(),
            (None, _) => {
                return Err(HunterError::InvalidTarget {
                    target: raw.to_string(),
                    source: url::ParseError::EmptyHost,
                })
            }
        };

        Ok(Self { base_url, host, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}
