use thiserror::Error;

/// Errors that can happen while working with an [`IpldUrl`](crate::IpldUrl).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Error from the segment codec.
    #[error(transparent)]
    Core(#[from] ipld_url_core::Error),

    /// The text is not a valid URL.
    #[error("invalid url: {0}")]
    Parse(#[from] url::ParseError),

    /// The URL does not use the `ipld` scheme.
    #[error("IPLD URLs must start with `ipld://`, found scheme `{0}`")]
    InvalidScheme(String),

    /// The URL has no hierarchical path to hold segments.
    #[error("IPLD URLs must have a hierarchical path")]
    CannotBeABase,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::InvalidScheme("https".into()).to_string(),
            "IPLD URLs must start with `ipld://`, found scheme `https`"
        );
        assert_eq!(
            Error::from(ipld_url_core::Error::invalid_input("bad")).to_string(),
            "invalid segment input: bad"
        );
    }
}
