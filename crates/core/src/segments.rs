use std::convert::Infallible;
use std::fmt::{self, Formatter};
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use crate::{Error, SEGMENT_SEPARATOR, Segment, SegmentInput};

/// Ordered list of [`Segment`]s making up an IPLD URL path.
///
/// ```
/// use ipld_url_core::{Segment, SegmentDescriptor, Segments};
///
/// let segments = Segments::decode("/example;bar=baz/fizz/");
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].get("bar"), Some("baz"));
/// assert_eq!(segments[1].name(), "fizz");
///
/// let path = Segments::encode([
///     SegmentDescriptor::new("escape;this").param("whatever", [1, 2, 3]),
///     SegmentDescriptor::new("😁"),
/// ]);
/// assert_eq!(path, "escape%3Bthis;whatever=1;whatever=2;whatever=3/%F0%9F%98%81");
/// ```
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Segments {
    inner: Vec<Segment>,
}
impl Deref for Segments {
    type Target = Vec<Segment>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl DerefMut for Segments {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl Segments {
    /// Create new empty `Segments`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a path on `/` and parse every non-empty piece as a [`Segment`].
    ///
    /// Leading, trailing and repeated slashes are dropped.
    pub fn decode(pathname: &str) -> Self {
        let inner = pathname
            .split(SEGMENT_SEPARATOR)
            .filter_map(|piece| {
                if !piece.is_empty() {
                    Some(Segment::parse(piece))
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();
        tracing::trace!(pathname, count = inner.len(), "decoded segments");
        Self { inner }
    }

    /// Encode every input and join the fragments with `/`.
    pub fn encode<I, S>(segments: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: Into<SegmentInput>,
    {
        let fragments = segments
            .into_iter()
            .map(|segment| Into::<SegmentInput>::into(segment).to_fragment())
            .collect::<Vec<_>>();
        join(fragments)
    }

    /// Like [`Segments::encode`], for inputs whose conversion can fail.
    ///
    /// Stops at the first input that is not a valid segment and returns its error. No
    /// partial path is produced.
    pub fn try_encode<I, S>(segments: I) -> Result<String, Error>
    where
        I: IntoIterator<Item = S>,
        S: TryInto<SegmentInput>,
        Error: From<S::Error>,
    {
        let fragments = segments
            .into_iter()
            .map(|segment| -> Result<String, Error> {
                let input: SegmentInput = segment.try_into()?;
                Ok(input.to_fragment())
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(join(fragments))
    }

    /// Consume into the underlying list.
    #[inline]
    pub fn into_vec(self) -> Vec<Segment> {
        self.inner
    }
}

fn join(fragments: Vec<String>) -> String {
    let mut buf = [0; 4];
    let path = fragments.join(&*SEGMENT_SEPARATOR.encode_utf8(&mut buf));
    tracing::trace!(count = fragments.len(), path = %path, "encoded segments");
    path
}

impl fmt::Display for Segments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.inner.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEGMENT_SEPARATOR}")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for Segments {
    type Err = Infallible;

    #[inline]
    fn from_str(pathname: &str) -> Result<Self, Self::Err> {
        Ok(Self::decode(pathname))
    }
}

impl From<Vec<Segment>> for Segments {
    #[inline]
    fn from(inner: Vec<Segment>) -> Self {
        Self { inner }
    }
}
impl From<Segments> for Vec<Segment> {
    #[inline]
    fn from(segments: Segments) -> Self {
        segments.inner
    }
}
impl FromIterator<Segment> for Segments {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}
impl IntoIterator for Segments {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}
impl<'a> IntoIterator for &'a Segments {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
