use anyhow::{Context, Result};
use url::Url;

pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const FALLBACK_TOKEN_VAR: &str = "GH_TOKEN";
pub const ORGANIZATION_VAR: &str = "ORGANIZATION";
pub const API_URL_VAR: &str = "GITHUB_API_URL";

/// Run configuration, read once at startup and passed down explicitly.
#[derive(Clone, Default)]
pub struct Config {
    /// Bearer token. A missing token is not rejected here; the API answers
    /// with 401 instead.
    pub token: Option<String>,
    /// Restricts the search to a single organization.
    pub organization: Option<String>,
    /// Alternative API base URL, e.g. a GitHub Enterprise host.
    pub api_url: Option<Url>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let token = read(TOKEN_VAR).or_else(|| read(FALLBACK_TOKEN_VAR));
        let organization = read(ORGANIZATION_VAR);
        let api_url = read(API_URL_VAR)
            .map(|raw| parse_api_url(&raw))
            .transpose()?;

        Ok(Self {
            token,
            organization,
            api_url,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("organization", &self.organization)
            .field("api_url", &self.api_url.as_ref().map(Url::as_str))
            .finish()
    }
}

fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("Invalid {API_URL_VAR}: '{raw}'"))?;

    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("{API_URL_VAR} must be an http(s) URL, got: '{raw}'");
    }

    Ok(url)
}
