//! Blocking HTTP client for the CIS REST API.
//!
//! [`CisClient`] owns one connection pool and exposes the three query
//! operations of the service: exact channel lookup, pattern search, and
//! single-segment description lookup. Every call is one logical
//! request/response round trip (pattern searches transparently follow the
//! service's pagination links); no state is carried between calls, so one
//! client can be shared freely across threads.

use reqwest::blocking::Response;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::channel::{Channel, ChannelList};
use crate::description::{Description, DescriptionDict};
use crate::error::CisError;
use crate::name::NAME_DELIMITERS;
use crate::schema::{ChannelRecord, DescriptionRecord, Page};

/// Base URL of the production CIS REST API.
pub const DEFAULT_API_URL: &str = "https://cis.ligo.org/api";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a [`CisClient`].
///
/// ```
/// use cis_client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(5))
///     .with_auth_token("kerberos-derived-token");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the CIS API; endpoints `channel/` and `description/`
    /// hang off this.
    pub api_url: String,
    /// Timeout applied to each request. A request exceeding it aborts and
    /// surfaces as [`CisError::Transport`].
    pub timeout: Duration,
    /// Bearer token attached to every request, when the deployment
    /// requires one.
    pub auth_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            auth_token: None,
        }
    }
}

impl ClientConfig {
    /// Point the client at a different CIS deployment.
    pub fn with_api_url(mut self, url: impl ToString) -> Self {
        self.api_url = url.to_string();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attach a bearer token to every request.
    pub fn with_auth_token(mut self, token: impl ToString) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }
}

/// Client for the Channel Information System.
#[derive(Debug, Clone)]
pub struct CisClient {
    http: reqwest::blocking::Client,
    config: ClientConfig,
}

impl CisClient {
    /// Client against the production CIS with default configuration.
    pub fn new() -> Result<Self, CisError> {
        Self::with_config(ClientConfig::default())
    }

    /// Client with explicit configuration.
    ///
    /// Fails with [`CisError::Validation`] when the configured base URL
    /// does not parse.
    pub fn with_config(config: ClientConfig) -> Result<Self, CisError> {
        Url::parse(&config.api_url)
            .map_err(|e| CisError::Validation(format!("invalid API url '{}': {e}", config.api_url)))?;
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    /// Query the CIS for the single channel with the given exact name.
    ///
    /// The returned channel is fully populated: metadata from its catalog
    /// record plus one description slot per name segment, resolved via the
    /// channel's `descriptions` endpoint.
    ///
    /// Fails with [`CisError::NotFound`] when no channel matches (a 404
    /// from the search endpoint counts as no match), and with
    /// [`CisError::Validation`] when the name is empty or matches several
    /// channels none of which carries the name exactly (refine the name, or
    /// use [`CisClient::channels`]).
    pub fn channel(&self, name: &str) -> Result<Channel, CisError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CisError::Validation("channel name must not be empty".into()));
        }
        let mut matches: Vec<Channel> = match self.channels(name) {
            Ok(list) => list.into_iter().collect(),
            Err(CisError::Status { status: 404, .. }) => {
                return Err(CisError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e),
        };
        match matches.len() {
            0 => Err(CisError::NotFound(name.to_string())),
            1 => Ok(matches.remove(0)),
            n => {
                let exact: Vec<usize> = matches
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| c.name == name)
                    .map(|(i, _)| i)
                    .collect();
                if let [index] = exact[..] {
                    Ok(matches.remove(index))
                } else {
                    Err(CisError::Validation(format!(
                        "{n} channels found matching '{name}'; refine the name \
                         or use CisClient::channels"
                    )))
                }
            }
        }
    }

    /// Query the CIS for every channel matching the given name pattern.
    ///
    /// Wildcard semantics (`*`, whether it spans segment boundaries) are
    /// the service's; the client only encodes the pattern the way the CIS
    /// expects and follows pagination until the full result set is
    /// assembled. The list is sorted by channel name. Zero matches yield an
    /// empty list, not an error.
    pub fn channels(&self, pattern: &str) -> Result<ChannelList, CisError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(CisError::Validation("channel pattern must not be empty".into()));
        }

        let mut list = ChannelList::new();
        let mut url = format!("{}/channel/?q={}", self.base_url(), encode_pattern(pattern));
        loop {
            let page: Page<ChannelRecord> = self.get_json(&url)?;
            for record in page.results {
                let channel = record.into_channel()?;
                list.push(self.resolve_descriptions(channel)?);
            }
            match page.next {
                Some(next) => {
                    log::debug!("following pagination to {next}");
                    url = next;
                }
                None => break,
            }
        }
        list.sort_by_name();
        Ok(list)
    }

    /// Look up the description of a single name segment.
    ///
    /// Returns `Ok(None)` when the CIS has no record for the segment;
    /// unannotated segments are expected and not an error.
    pub fn description(&self, segment: &str) -> Result<Option<Description>, CisError> {
        let segment = segment.trim();
        if segment.is_empty() {
            return Err(CisError::Validation("segment must not be empty".into()));
        }
        if segment.contains(&NAME_DELIMITERS[..]) {
            return Err(CisError::Validation(format!(
                "'{segment}' is not a single name segment"
            )));
        }

        let url = format!("{}/description/?q={}", self.base_url(), segment);
        let response = self.get(&url)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let page: Page<DescriptionRecord> = read_json(response)?;
        for record in page.results {
            let description = record.into_description()?;
            if description.segment == segment {
                return Ok(Some(description));
            }
        }
        Ok(None)
    }

    /// Fetch the description set recorded for a channel and align it with
    /// the channel's name segments.
    ///
    /// Channels without an API URL, and channels whose `descriptions`
    /// endpoint answers 404, keep every slot unresolved; both are normal
    /// for an incompletely annotated catalog.
    fn resolve_descriptions(&self, channel: Channel) -> Result<Channel, CisError> {
        let Some(api_url) = channel.api_url.clone() else {
            return Ok(channel);
        };
        let url = format!("{}/descriptions", api_url.trim_end_matches('/'));
        let response = self.get(&url)?;
        if response.status() == StatusCode::NOT_FOUND {
            log::debug!("no descriptions recorded for {}", channel.name);
            return Ok(channel);
        }
        let records: Vec<DescriptionRecord> = read_json(response)?;
        let dict: DescriptionDict = records
            .into_iter()
            .map(DescriptionRecord::into_description)
            .collect::<Result<_, _>>()?;
        Ok(channel.with_descriptions(&dict))
    }

    fn base_url(&self) -> &str {
        self.config.api_url.trim_end_matches('/')
    }

    fn get(&self, url: &str) -> Result<Response, CisError> {
        log::debug!("GET {url}");
        let mut request = self.http.get(url);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }
        Ok(request.send()?)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CisError> {
        read_json(self.get(url)?)
    }
}

fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, CisError> {
    let status = response.status();
    let url = response.url().to_string();
    if !status.is_success() {
        return Err(CisError::Status {
            status: status.as_u16(),
            url,
        });
    }
    let body = response.text()?;
    Ok(serde_json::from_str(&body)?)
}

/// Encode a query pattern the way the CIS search endpoint expects:
/// wildcards and whitespace both become `%20`.
fn encode_pattern(pattern: &str) -> String {
    let mut encoded = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c == '*' || c.is_whitespace() {
            encoded.push_str("%20");
        } else {
            encoded.push(c);
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_encoding_matches_service_convention() {
        assert_eq!(encode_pattern("H1:PSL*"), "H1:PSL%20");
        assert_eq!(encode_pattern("H1:PSL ISS"), "H1:PSL%20ISS");
        assert_eq!(encode_pattern("H1:SUS-ETMX"), "H1:SUS-ETMX");
    }

    #[test]
    fn empty_name_is_rejected_before_any_request() {
        let client = CisClient::new().unwrap();
        assert!(client.channel("").unwrap_err().is_validation());
        assert!(client.channel("   ").unwrap_err().is_validation());
        assert!(client.channels("\t").unwrap_err().is_validation());
        assert!(client.description("").unwrap_err().is_validation());
    }

    #[test]
    fn multi_segment_description_lookup_is_rejected() {
        let client = CisClient::new().unwrap();
        assert!(client.description("PSL-ISS").unwrap_err().is_validation());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err =
            CisClient::with_config(ClientConfig::default().with_api_url("not a url")).unwrap_err();
        assert!(err.is_validation());
    }
}
