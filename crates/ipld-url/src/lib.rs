//! ipld-url reads and writes the segments of `ipld://` URL paths.
//!
//! Every path segment carries a name and an ordered list of parameters, written as
//! `name;key=value;key=value2`. The codec itself lives in [`ipld_url_core`] and is
//! re-exported here; [`IpldUrl`] puts it to work on a full URL.
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod cfg;
mod error;
mod url;

pub use ipld_url_core as core;
#[doc(no_inline)]
pub use ipld_url_core::*;

pub use self::error::Error;
pub use self::url::{IpldUrl, SCHEME};

/// Result type which has [`Error`] as its error type.
pub type Result<T> = std::result::Result<T, Error>;

/// A list of things that automatically imports into application use ipld-url.
pub mod prelude {
    pub use crate::url::IpldUrl;
    pub use ipld_url_core::{ParamValue, Segment, SegmentDescriptor, SegmentInput, Segments};
}
