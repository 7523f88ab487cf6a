//! Verifier configuration.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::warn;
use url::Url;

/// Whether to check revocation and which responders to always ask.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default)
)]
pub struct OcspConfig {
    /// When `false` every check passes without touching any collaborator.
    pub enabled: bool,

    /// Responders queried for every certificate, in addition to the ones the certificate
    /// advertises itself.
    pub responder_urls: Vec<String>,
}

impl OcspConfig {
    /// Enabled configuration with the given static responder URLs.
    pub fn enabled<I, U>(responder_urls: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<String>,
    {
        Self {
            enabled: true,
            responder_urls: responder_urls.into_iter().map(Into::into).collect(),
        }
    }

    /// Disabled configuration.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Parse the static responder URLs.
    ///
    /// Entries that are not valid URLs are logged and dropped; duplicates collapse.
    pub fn static_urls(&self) -> BTreeSet<Url> {
        self.responder_urls
            .iter()
            .filter_map(|raw| match Url::parse(raw.trim()) {
                Ok(url) => Some(url),
                Err(err) => {
                    warn!(url = %raw, error = %err, "OCSP URL is not a URI.");
                    None
                }
            })
            .collect()
    }
}

/// Location of the file backed trust store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default)
)]
pub struct TrustStoreSettings {
    /// Path of the PEM bundle holding the trusted certificates.
    pub path: PathBuf,
}

impl TrustStoreSettings {
    /// Settings pointing at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.path.as_os_str().to_string_lossy().trim().is_empty()
    }
}
