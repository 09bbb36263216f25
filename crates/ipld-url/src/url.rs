use std::fmt::{self, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use ipld_url_core::{SegmentInput, Segments};
use url::Url;

use crate::{Error, Result};

/// The only scheme accepted by [`IpldUrl`].
pub const SCHEME: &str = "ipld";

/// An `ipld://` URL whose path is read and written as [`Segments`].
///
/// All other parts of the URL are left to [`Url`], which is reachable through `Deref`.
///
/// ```
/// use ipld_url::{IpldUrl, SegmentDescriptor};
///
/// let mut url = IpldUrl::parse("ipld://example/foo;bar=baz/fizz/?buzz=foobar").unwrap();
/// let mut segments = url.segments();
/// assert_eq!(segments[0].get("bar"), Some("baz"));
///
/// segments[1].set("example", "Hello;World!");
/// url.set_segments(segments);
/// assert_eq!(
///     url.as_str(),
///     "ipld://example/foo;bar=baz/fizz;example=Hello%3BWorld!?buzz=foobar"
/// );
///
/// url.set_segments([
///     SegmentDescriptor::new("escape;this").param("whatever", [1, 2, 3]),
///     SegmentDescriptor::new("😁"),
/// ]);
/// assert_eq!(
///     url.as_str(),
///     "ipld://example/escape%3Bthis;whatever=1;whatever=2;whatever=3/%F0%9F%98%81?buzz=foobar"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IpldUrl {
    inner: Url,
}

impl IpldUrl {
    /// Parse an absolute URL and check that it is an IPLD URL.
    pub fn parse(input: &str) -> Result<Self> {
        Url::parse(input)?.try_into()
    }

    /// Decode the path into segments.
    #[inline]
    pub fn segments(&self) -> Segments {
        Segments::decode(self.inner.path())
    }

    /// Replace the path with the encoded segments. Host, query and fragment are kept.
    pub fn set_segments<I, S>(&mut self, segments: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<SegmentInput>,
    {
        let path = Segments::encode(segments);
        self.set_encoded_path(&path);
    }

    /// Like [`IpldUrl::set_segments`], for inputs whose conversion can fail.
    ///
    /// On error the URL is not changed.
    pub fn try_set_segments<I, S>(&mut self, segments: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: TryInto<SegmentInput>,
        ipld_url_core::Error: From<S::Error>,
    {
        let path = Segments::try_encode(segments)?;
        self.set_encoded_path(&path);
        Ok(())
    }

    fn set_encoded_path(&mut self, path: &str) {
        self.inner.set_path(path);
        tracing::debug!(href = %self.inner, "segments updated");
    }

    /// Borrow the underlying [`Url`].
    #[inline]
    pub fn as_url(&self) -> &Url {
        &self.inner
    }
    /// Consume into the underlying [`Url`].
    #[inline]
    pub fn into_url(self) -> Url {
        self.inner
    }
    /// The serialized URL.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }
}

impl Deref for IpldUrl {
    type Target = Url;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl AsRef<str> for IpldUrl {
    fn as_ref(&self) -> &str {
        self.inner.as_str()
    }
}

impl TryFrom<Url> for IpldUrl {
    type Error = Error;

    fn try_from(url: Url) -> Result<Self> {
        if url.scheme() != SCHEME {
            return Err(Error::InvalidScheme(url.scheme().to_owned()));
        }
        if url.cannot_be_a_base() {
            return Err(Error::CannotBeABase);
        }
        Ok(Self { inner: url })
    }
}
impl TryFrom<&str> for IpldUrl {
    type Error = Error;

    #[inline]
    fn try_from(input: &str) -> Result<Self> {
        Self::parse(input)
    }
}
impl FromStr for IpldUrl {
    type Err = Error;

    #[inline]
    fn from_str(input: &str) -> Result<Self> {
        Self::parse(input)
    }
}
impl From<IpldUrl> for Url {
    #[inline]
    fn from(url: IpldUrl) -> Self {
        url.inner
    }
}

impl fmt::Display for IpldUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

cfg_feature! {
    #![feature = "serde"]
    impl serde::Serialize for IpldUrl {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(self.as_str())
        }
    }
    impl<'de> serde::Deserialize<'de> for IpldUrl {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let url = <Url as serde::Deserialize>::deserialize(deserializer)?;
            Self::try_from(url).map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use ipld_url_core::{Segment, SegmentDescriptor};
    use tracing_test::traced_test;

    use super::*;

    const EXAMPLE: &str = "ipld://example/foo;bar=baz/fizz/?buzz=foobar";

    #[test]
    fn test_parse() {
        let url = IpldUrl::parse(EXAMPLE).unwrap();
        assert_eq!(url.scheme(), "ipld");
        assert_eq!(url.host_str(), Some("example"));
        assert_eq!(url.path(), "/foo;bar=baz/fizz/");
        assert_eq!(url.query(), Some("buzz=foobar"));
        assert_eq!(url.to_string(), EXAMPLE);
        assert_eq!(EXAMPLE.parse::<IpldUrl>().unwrap(), url);
    }

    #[test]
    fn test_parse_rejects_other_schemes() {
        assert_eq!(
            IpldUrl::parse("https://example/foo").unwrap_err(),
            Error::InvalidScheme("https".into())
        );
        assert!(matches!(IpldUrl::parse("not a url"), Err(Error::Parse(_))));
        assert_eq!(IpldUrl::parse("ipld:opaque").unwrap_err(), Error::CannotBeABase);
    }

    #[test]
    fn test_segments() {
        let url = IpldUrl::parse(EXAMPLE).unwrap();
        let segments = url.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].name(), "foo");
        assert_eq!(segments[0].get("bar"), Some("baz"));
        assert_eq!(segments[1].name(), "fizz");
        assert!(segments[1].is_empty());
    }

    #[test]
    fn test_set_segments_keeps_other_parts() {
        let mut url = IpldUrl::parse("ipld://host/a?q=1#frag").unwrap();
        url.set_segments([Segment::with_parameters("b", [("k", "v")])]);
        assert_eq!(url.as_str(), "ipld://host/b;k=v?q=1#frag");
        assert_eq!(url.host_str(), Some("host"));
        assert_eq!(url.query(), Some("q=1"));
        assert_eq!(url.fragment(), Some("frag"));
    }

    #[test]
    fn test_set_segments_round_trip() {
        let mut url = IpldUrl::parse("ipld://host/").unwrap();
        url.set_segments([
            SegmentDescriptor::new("escape;this").param("whatever", [1, 2, 3]),
            SegmentDescriptor::new("😁"),
        ]);
        let segments = url.segments();
        assert_eq!(segments[0].name(), "escape;this");
        assert_eq!(segments[0].get_all("whatever"), vec!["1", "2", "3"]);
        assert_eq!(segments[1].name(), "😁");
    }

    #[test]
    fn test_set_empty_segments() {
        let mut url = IpldUrl::parse(EXAMPLE).unwrap();
        url.set_segments(Vec::<Segment>::new());
        assert!(url.segments().is_empty());
        assert_eq!(url.query(), Some("buzz=foobar"));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_try_set_segments_error_keeps_url() {
        let mut url = IpldUrl::parse(EXAMPLE).unwrap();
        let result = url.try_set_segments([serde_json::json!("ok"), serde_json::json!(false)]);
        assert!(matches!(
            result,
            Err(Error::Core(ipld_url_core::Error::InvalidSegmentInput(_)))
        ));
        assert_eq!(url.as_str(), EXAMPLE);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        let url = IpldUrl::parse(EXAMPLE).unwrap();
        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, format!("\"{EXAMPLE}\""));
        assert_eq!(serde_json::from_str::<IpldUrl>(&json).unwrap(), url);
        assert!(serde_json::from_str::<IpldUrl>("\"https://example/\"").is_err());
    }

    #[test]
    #[traced_test]
    fn test_logs_href() {
        let mut url = IpldUrl::parse("ipld://host/").unwrap();
        url.set_segments(["a"]);
        assert!(logs_contain("segments updated"));
        assert!(logs_contain("ipld://host/a"));
    }
}
