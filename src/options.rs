use core::fmt;
use std::time::Duration;

use reqwest::{
    blocking::Request,
    header::{HeaderName, HeaderValue},
};
use smallvec::SmallVec;
use tl::ParserOptions;

use crate::errors::{Error, Result};

/// Timeout applied to HTTP requests unless configured otherwise
pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// A modification applied to every outgoing request before it is sent
///
/// Closures taking a `&mut Request` are request configs as well:
/// ```
/// use reqwest::header::{HeaderValue, REFERER};
///
/// let options = restify::LoadOptions::new().config(|request: &mut reqwest::blocking::Request| {
///     request
///         .headers_mut()
///         .insert(REFERER, HeaderValue::from_static("https://example.com/"));
/// });
/// ```
pub trait RequestConfig: Send + Sync {
    /// Applies this configuration to the request
    fn apply(&self, request: &mut Request) -> Result<()>;
}

impl<F> RequestConfig for F
where
    F: Fn(&mut Request) + Send + Sync,
{
    fn apply(&self, request: &mut Request) -> Result<()> {
        self(request);
        Ok(())
    }
}

/// Sets additional headers on the request, overwriting existing values of the same name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WithHeaders {
    headers: SmallVec<[(String, String); 4]>,
}

impl WithHeaders {
    /// Creates a new header configuration from `(name, value)` pairs
    pub fn new<I, K, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the number of headers this configuration sets
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Returns whether this configuration sets no headers at all
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl RequestConfig for WithHeaders {
    fn apply(&self, request: &mut Request) -> Result<()> {
        for (name, value) in &self.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|source| {
                    Error::InvalidHeaderName {
                        name: name.clone(),
                        source,
                    }
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|source| Error::InvalidHeaderValue {
                    name: name.clone(),
                    source,
                })?;

            request.headers_mut().insert(header_name, header_value);
        }

        Ok(())
    }
}

/// Options for loading documents
///
/// The default options parse with [`ParserOptions::default()`], send no `user-agent`
/// and time HTTP requests out after [`HTTP_REQUEST_TIMEOUT`].
pub struct LoadOptions {
    user_agent: Option<String>,
    timeout: Duration,
    parser: ParserOptions,
    configs: Vec<Box<dyn RequestConfig>>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout: HTTP_REQUEST_TIMEOUT,
            parser: ParserOptions::default(),
            configs: Vec::new(),
        }
    }
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("parser", &self.parser)
            .field("configs", &self.configs.len())
            .finish()
    }
}

impl LoadOptions {
    /// Creates a new [LoadOptions] with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `user-agent` header sent with HTTP requests
    ///
    /// An empty string sends no `user-agent` header at all.
    /// If provided, it should follow <https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/User-Agent>.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        let user_agent = user_agent.into();
        self.user_agent = (!user_agent.is_empty()).then(|| user_agent);
        self
    }

    /// Sets the timeout for a whole HTTP request, from connecting until the body is read
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the options passed to the HTML parser
    pub fn parser_options(mut self, options: ParserOptions) -> Self {
        self.parser = options;
        self
    }

    /// Adds a configuration applied to every outgoing request, after the default headers
    pub fn config(mut self, config: impl RequestConfig + 'static) -> Self {
        self.configs.push(Box::new(config));
        self
    }

    /// Shorthand for `config(WithHeaders::new(headers))`
    pub fn headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.config(WithHeaders::new(headers))
    }

    /// Returns the configured `user-agent`, if any
    #[inline]
    pub fn get_user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Returns the HTTP request timeout
    #[inline]
    pub fn get_timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the options passed to the HTML parser
    #[inline]
    pub fn get_parser_options(&self) -> ParserOptions {
        self.parser
    }

    /// Returns whether any option only meaningful for HTTP requests was set
    pub(crate) fn is_request_configured(&self) -> bool {
        self.user_agent.is_some() || !self.configs.is_empty()
    }

    /// Applies every request configuration to `request`, in the order they were added
    pub(crate) fn apply(&self, request: &mut Request) -> Result<()> {
        self.configs
            .iter()
            .try_for_each(|config| config.apply(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::{header::USER_AGENT, Method};

    fn request() -> Request {
        Request::new(Method::GET, "http://localhost/".parse().unwrap())
    }

    #[test]
    fn defaults() {
        let options = LoadOptions::default();

        assert_eq!(options.get_user_agent(), None);
        assert_eq!(options.get_timeout(), HTTP_REQUEST_TIMEOUT);
        assert_eq!(options.get_parser_options(), ParserOptions::default());
    }

    #[test]
    fn empty_user_agent_is_unset() {
        assert_eq!(LoadOptions::new().user_agent("").get_user_agent(), None);
        assert_eq!(
            LoadOptions::new().user_agent("bot/1.0").get_user_agent(),
            Some("bot/1.0")
        );
    }

    #[test]
    fn parser_options_are_kept() {
        assert!(!LoadOptions::new().get_parser_options().is_tracking_ids());

        let parser = ParserOptions::default().track_ids();
        let options = LoadOptions::new().parser_options(parser);

        assert!(options.get_parser_options().is_tracking_ids());
    }

    #[test]
    fn with_headers_overwrites() {
        let mut request = request();
        request
            .headers_mut()
            .insert(USER_AGENT, HeaderValue::from_static("old"));

        let config = WithHeaders::new([("User-Agent", "new"), ("x-token", "abc")]);
        assert_eq!(config.len(), 2);
        assert!(!config.is_empty());
        config.apply(&mut request).unwrap();

        let headers = request.headers();
        assert_eq!(headers.get_all(USER_AGENT).iter().count(), 1);
        assert_eq!(headers[USER_AGENT], "new");
        assert_eq!(headers["x-token"], "abc");
    }

    #[test]
    fn empty_headers_change_nothing() {
        let config = WithHeaders::default();
        assert!(config.is_empty());
        assert_eq!(config.len(), 0);

        let mut request = request();
        config.apply(&mut request).unwrap();
        assert!(request.headers().is_empty());
    }

    #[test]
    fn invalid_header_name_is_an_error() {
        let err = WithHeaders::new([("bad header", "x")])
            .apply(&mut request())
            .unwrap_err();

        assert!(matches!(err, Error::InvalidHeaderName { ref name, .. } if name == "bad header"));
        assert!(err.is_request());
    }

    #[test]
    fn invalid_header_value_is_an_error() {
        let err = WithHeaders::new([("x-token", "line\nbreak")])
            .apply(&mut request())
            .unwrap_err();

        assert!(matches!(err, Error::InvalidHeaderValue { .. }));
    }

    #[test]
    fn configs_run_in_order() {
        let options = LoadOptions::new()
            .headers([("x-order", "first")])
            .headers([("x-order", "second")]);

        let mut request = request();
        options.apply(&mut request).unwrap();

        assert_eq!(request.headers()["x-order"], "second");
    }
}
