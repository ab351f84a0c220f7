use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use reqwest::{
    blocking::Client,
    header::{HeaderValue, ACCEPT, USER_AGENT},
};
use tl::ParserOptions;
use url::Url;

use crate::{
    document::Document,
    errors::{Error, Origin, Result},
    options::LoadOptions,
};

/// Parses an in-memory buffer
///
/// # Example
/// ```
/// let doc = restify::load_buffer(b"<p class=\"x y\">t</p>").unwrap();
/// assert_eq!(doc.find_all_by_class("y").len(), 1);
/// ```
pub fn load_buffer(buffer: &[u8]) -> Result<Document> {
    read_buffer(buffer, ParserOptions::default())
}

/// Reads `reader` until EOF and parses what was read
///
/// Pass `&mut reader` to keep using the reader afterwards; it is never closed by this function.
pub fn load_reader<R: Read>(reader: R) -> Result<Document> {
    read_reader(reader, ParserOptions::default())
}

/// Opens and parses the local file at the path of a `file://` URL
pub fn load_file(url: &Url) -> Result<Document> {
    read_file(&file_path(url), ParserOptions::default())
}

/// Opens and parses the local file at `path`
pub fn load_path(path: impl AsRef<Path>) -> Result<Document> {
    read_file(path.as_ref(), ParserOptions::default())
}

/// Loads and parses the document at `url`
///
/// `file://` URLs are read from the local filesystem and the request related options are ignored.
/// Any other URL is fetched with an HTTP `GET` request. The request carries `accept: */*`,
/// a `user-agent` if one was configured, and whatever the configured [`RequestConfig`](crate::RequestConfig)s set.
///
/// Every call builds its own HTTP client. Use a [`Loader`] to share one between requests.
pub fn load_content(url: &Url, options: &LoadOptions) -> Result<Document> {
    if is_file(url) {
        return read_local(url, options);
    }

    let client = build_client(options)?;
    fetch(&client, url, options)
}

/// Loads documents with a fixed set of [`LoadOptions`]
///
/// A loader owns its HTTP client, so the configured timeout applies to its requests only.
#[derive(Debug)]
pub struct Loader {
    client: Client,
    options: LoadOptions,
}

impl Loader {
    /// Creates a new loader
    pub fn new(options: LoadOptions) -> Result<Self> {
        let client = build_client(&options)?;
        Ok(Self { client, options })
    }

    /// Returns the options of this loader
    #[inline]
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Parses an in-memory buffer
    pub fn buffer(&self, buffer: &[u8]) -> Result<Document> {
        read_buffer(buffer, self.options.get_parser_options())
    }

    /// Reads `reader` until EOF and parses what was read
    pub fn reader<R: Read>(&self, reader: R) -> Result<Document> {
        read_reader(reader, self.options.get_parser_options())
    }

    /// Opens and parses the local file at the path of a `file://` URL
    pub fn file(&self, url: &Url) -> Result<Document> {
        read_file(&file_path(url), self.options.get_parser_options())
    }

    /// Opens and parses the local file at `path`
    pub fn path(&self, path: impl AsRef<Path>) -> Result<Document> {
        read_file(path.as_ref(), self.options.get_parser_options())
    }

    /// Loads and parses the document at `url`, see [`load_content`]
    pub fn content(&self, url: &Url) -> Result<Document> {
        if is_file(url) {
            return read_local(url, &self.options);
        }

        fetch(&self.client, url, &self.options)
    }
}

fn build_client(options: &LoadOptions) -> Result<Client> {
    Client::builder()
        .timeout(options.get_timeout())
        .build()
        .map_err(Error::Client)
}

#[inline]
fn is_file(url: &Url) -> bool {
    url.scheme() == "file"
}

fn file_path(url: &Url) -> PathBuf {
    url.to_file_path()
        .unwrap_or_else(|()| PathBuf::from(url.path()))
}

fn read_buffer(buffer: &[u8], options: ParserOptions) -> Result<Document> {
    Document::parse_bytes(buffer.to_vec(), options, Origin::Buffer)
}

fn read_reader<R: Read>(mut reader: R, options: ParserOptions) -> Result<Document> {
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .map_err(|source| Error::parse(Origin::Reader, source))?;

    Document::parse_bytes(buffer, options, Origin::Reader)
}

fn read_file(path: &Path, options: ParserOptions) -> Result<Document> {
    let mut file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)
        .map_err(|source| Error::parse(Origin::File(path.to_path_buf()), source))?;

    Document::parse_bytes(buffer, options, Origin::File(path.to_path_buf()))
}

fn read_local(url: &Url, options: &LoadOptions) -> Result<Document> {
    if options.is_request_configured() {
        log::debug!("{} is a local file, ignoring request options", url);
    }

    read_file(&file_path(url), options.get_parser_options())
}

fn fetch(client: &Client, url: &Url, options: &LoadOptions) -> Result<Document> {
    let mut request = client
        .get(url.clone())
        .header(ACCEPT, "*/*")
        .build()
        .map_err(|source| Error::RequestBuild {
            url: url.clone(),
            source,
        })?;

    if let Some(user_agent) = options.get_user_agent() {
        let value =
            HeaderValue::from_str(user_agent).map_err(|source| Error::InvalidHeaderValue {
                name: USER_AGENT.as_str().to_owned(),
                source,
            })?;
        request.headers_mut().insert(USER_AGENT, value);
    }

    options.apply(&mut request)?;

    log::debug!("GET {}", url);
    let response = client.execute(request).map_err(|source| Error::Transport {
        url: url.clone(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        log::warn!("GET {} returned {}, parsing the body anyway", url, status);
    }

    // reading the body consumes the response, which closes it on both paths
    let origin = Origin::ResponseBody(url.clone());
    let body = match response.bytes() {
        Ok(body) => body,
        Err(source) => return Err(Error::parse(origin, source)),
    };

    Document::parse_bytes(body.to_vec(), options.get_parser_options(), origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn file_path_from_url() {
        let url = Url::parse("file:///tmp/page.html").unwrap();
        assert_eq!(file_path(&url), PathBuf::from("/tmp/page.html"));
    }

    #[test]
    #[cfg(unix)]
    fn file_path_decodes_escapes() {
        let url = Url::parse("file:///tmp/my%20page.html").unwrap();
        assert_eq!(file_path(&url), PathBuf::from("/tmp/my page.html"));
    }

    #[test]
    fn scheme_dispatch() {
        assert!(is_file(&Url::parse("file:///index.html").unwrap()));
        assert!(!is_file(&Url::parse("http://localhost/").unwrap()));
        assert!(!is_file(&Url::parse("https://localhost/").unwrap()));
    }

    #[test]
    fn reader_errors_are_parse_errors() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "broken pipe"))
            }
        }

        let err = load_reader(Broken).unwrap_err();
        assert!(err.is_parse());
        assert!(matches!(err, Error::Parse { origin: Origin::Reader, .. }));
    }

    #[test]
    fn reader_is_left_usable() {
        let mut input: &[u8] = b"<p>one</p>";
        let doc = load_reader(&mut input).unwrap();

        assert_eq!(doc.find_all_by_tag_name("p").len(), 1);
        assert!(input.is_empty());
    }
}
