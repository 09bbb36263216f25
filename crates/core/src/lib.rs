//! The core of ipld-url: segment and parameter codec for `ipld://` URL paths.
//!
//! A path is a `/`-separated list of segments. Every segment has a name and an ordered
//! list of `key=value` parameters, each introduced by `;`:
//!
//! ```text
//! path    := segment ("/" segment)*
//! segment := name (";" key "=" value)*
//! ```
//!
//! Names, keys and values are percent-encoded, so `/` and `;` inside them never clash
//! with the separators.
//!
//! ```
//! use ipld_url_core::{SegmentDescriptor, Segments};
//!
//! let mut segments = Segments::decode("/example/foo;bar=baz/fizz/");
//! segments[1].set("example", "Hello;World!");
//! assert_eq!(segments.to_string(), "example/foo;bar=baz;example=Hello%3BWorld!/fizz");
//!
//! let path = Segments::encode([
//!     SegmentDescriptor::new("escape;this").param("whatever", [1, 2, 3]),
//!     SegmentDescriptor::new("😁"),
//! ]);
//! let segments = Segments::decode(&path);
//! assert_eq!(segments[0].name(), "escape;this");
//! assert_eq!(segments[0].get_all("whatever"), vec!["1", "2", "3"]);
//! assert_eq!(segments[1].name(), "😁");
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod cfg;

pub mod encoding;
mod error;
mod input;
pub mod parameters;
mod segment;
mod segments;
cfg_feature! {
    #![feature = "serde"]
    mod serde;
}

pub use self::error::Error;
pub use self::input::{SegmentDescriptor, SegmentInput};
pub use self::parameters::{ParamValue, Parameters};
pub use self::segment::Segment;
pub use self::segments::Segments;

/// Result type which has [`Error`] as its error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Separator between segments.
pub const SEGMENT_SEPARATOR: char = '/';
/// Separator between a segment name and its parameters, and between parameters.
pub const PARAMETER_SEPARATOR: char = ';';
/// Separator between a parameter key and its value.
pub const PARAMETER_EQUALS: char = '=';
/// Percent-encoded form of [`PARAMETER_SEPARATOR`].
pub const ENCODED_SEPARATOR: &str = "%3B";

/// Decode a path into its segments, see [`Segments::decode`].
#[inline]
pub fn decode(pathname: &str) -> Segments {
    Segments::decode(pathname)
}

/// Encode segments into a path, see [`Segments::encode`].
#[inline]
pub fn encode<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<SegmentInput>,
{
    Segments::encode(segments)
}

/// Encode segments whose conversion can fail into a path, see [`Segments::try_encode`].
#[inline]
pub fn try_encode<I, S>(segments: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: TryInto<SegmentInput>,
    Error: From<S::Error>,
{
    Segments::try_encode(segments)
}
