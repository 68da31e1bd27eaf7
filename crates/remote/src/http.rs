//! Blocking HTTP implementation of [`RemoteIndex`].

use exn::ResultExt;
use reqwest::Url;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::instrument;

use crate::RemoteIndex;
use crate::error::{ErrorKind, Result};

/// Retrieves catalog documents from an opensource.apple.com style server.
///
/// URL scheme, relative to the base URL:
/// - category index: `<category>/`
/// - project page: `<category>/<project>/`
/// - project file: `<category>/<project>/<file>`
///
/// Path segments are percent-encoded, so project names can never alter the
/// structure of the URL.
///
/// # Examples
///
/// ```no_run
/// use aos_remote::{HttpRemote, RemoteIndex};
/// use std::time::Duration;
///
/// # fn example() -> aos_remote::error::Result<()> {
/// let remote = HttpRemote::new("https://opensource.apple.com", Duration::from_secs(30), "aos")?;
/// let html = remote.index_project("tarballs")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpRemote {
    client: Client,
    base_url: Url,
    name: String,
}
impl HttpRemote {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let url = Url::parse(base_url).or_raise(|| ErrorKind::InvalidUrl(base_url.to_string()))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            exn::bail!(ErrorKind::InvalidUrl(base_url.to_string()));
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .or_raise(|| ErrorKind::Client)?;
        Ok(Self { client, name: url.to_string(), base_url: url })
    }

    /// Appends percent-encoded segments to the base URL. Directory URLs get a
    /// trailing slash, which directory listings expect.
    fn url(&self, segments: &[&str], directory: bool) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ErrorKind::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
            if directory {
                path.push("");
            }
        }
        Ok(url)
    }

    #[instrument(level = "debug", skip(self, url), fields(url = %url))]
    fn get(&self, url: Url) -> Result<Vec<u8>> {
        let result = self.client.get(url.clone()).send();
        let timed_out = result.as_ref().is_err_and(|err| err.is_timeout());
        let response = result.or_raise(|| match timed_out {
            true => ErrorKind::Timeout(url.to_string()),
            false => ErrorKind::Network(url.to_string()),
        })?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().or_raise(|| ErrorKind::Network(url.to_string()))?;
        tracing::debug!(size = body.len(), "retrieved document");
        Ok(body.to_vec())
    }
}

impl RemoteIndex for HttpRemote {
    fn name(&self) -> &str {
        &self.name
    }

    fn index_project(&self, category: &str) -> Result<Vec<u8>> {
        self.get(self.url(&[category], true)?)
    }

    fn index_page(&self, category: &str, project: &str) -> Result<Vec<u8>> {
        self.get(self.url(&[category, project], true)?)
    }

    fn download(&self, category: &str, project: &str, file: &str) -> Result<Vec<u8>> {
        self.get(self.url(&[category, project, file], false)?)
    }
}
