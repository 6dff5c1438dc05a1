//! Remote fetch collaborator.
//!
//! Asset downloads and Pinterest resolution probing go through
//! [`RemoteFetch`] so tests can swap in canned responses.

use crate::constants::{HTTP_TIMEOUT, MAX_REMOTE_ASSET_BYTES, PINIMG_RESOLUTIONS};
use crate::error::FetchError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Read;
use tracing::debug;

static PINIMG_SIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(originals|736x|474x|236x|75x75_RS)/").expect("invalid regex pattern"));

pub trait RemoteFetch {
    /// Download the body of `url`. Non-OK statuses are errors.
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    /// Probe `url` without downloading it. `Ok` means the server answered OK.
    fn head(&self, url: &str) -> Result<(), FetchError>;
}

/// Blocking HTTP client backed by `ureq`.
pub struct UreqFetch {
    agent: ureq::Agent,
    max_bytes: u64,
}

impl UreqFetch {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(HTTP_TIMEOUT).build(),
            max_bytes: MAX_REMOTE_ASSET_BYTES,
        }
    }

    fn call(&self, request: ureq::Request, url: &str) -> Result<ureq::Response, FetchError> {
        request
            .set("User-Agent", concat!("refboard/", env!("CARGO_PKG_VERSION")))
            .call()
            .map_err(|err| match err {
                ureq::Error::Status(status, _) => FetchError::Status {
                    url: url.to_string(),
                    status,
                },
                ureq::Error::Transport(transport) => FetchError::Transport {
                    url: url.to_string(),
                    message: transport.to_string(),
                },
            })
    }
}

impl Default for UreqFetch {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteFetch for UreqFetch {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.call(self.agent.get(url), url)?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(self.max_bytes + 1)
            .read_to_end(&mut bytes)
            .map_err(|err| FetchError::Transport {
                url: url.to_string(),
                message: err.to_string(),
            })?;

        if bytes.len() as u64 > self.max_bytes {
            return Err(FetchError::TooLarge {
                url: url.to_string(),
                limit: self.max_bytes,
            });
        }
        Ok(bytes)
    }

    fn head(&self, url: &str) -> Result<(), FetchError> {
        self.call(self.agent.head(url), url).map(|_| ())
    }
}

pub fn is_pinimg_url(url: &str) -> bool {
    url.contains("pinimg.com")
}

/// Pick the largest Pinterest rendition that answers a HEAD probe.
/// Non-Pinterest URLs, and Pinterest URLs where every probe fails, come back
/// unchanged.
pub fn resolve_pinimg_url<F: RemoteFetch + ?Sized>(fetch: &F, url: &str) -> String {
    if !is_pinimg_url(url) {
        return url.to_string();
    }

    for resolution in PINIMG_RESOLUTIONS {
        let candidate = PINIMG_SIZE_RE.replace(url, format!("/{resolution}/").as_str()).into_owned();
        match fetch.head(&candidate) {
            Ok(()) => {
                debug!(%candidate, "pinimg resolution found");
                return candidate;
            }
            Err(err) => debug!(%candidate, error = %err, "pinimg probe failed"),
        }
    }

    url.to_string()
}
