use url::Url;

static API_BASE_URL: Option<&'static str> = option_env!("API_BASE_URL");

pub const DEV_BASE: &str = "http://127.0.0.1:5000";
pub const PROD_BASE: &str = "/api";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Url error {0}")]
    Url(#[from] url::ParseError),

    #[error("Base url {0} cannot hold a path")]
    CannotBeABase(String),
}

/// Base configured for this build, before it is resolved against the page.
pub fn configured_base() -> &'static str {
    if let Some(base) = API_BASE_URL {
        base
    } else if cfg!(debug_assertions) {
        DEV_BASE
    } else {
        PROD_BASE
    }
}

/// Resolves `configured` against the page `origin`. The result always ends
/// with a `/` so endpoint segments can be appended to it.
pub fn resolve_base(origin: &str, configured: &str) -> Result<Url, ConfigError> {
    let mut url = match Url::parse(configured) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(origin)?.join(configured)?,
        Err(err) => return Err(err.into()),
    };
    if url.cannot_be_a_base() {
        return Err(ConfigError::CannotBeABase(configured.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
