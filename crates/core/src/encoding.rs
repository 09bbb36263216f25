//! Percent-encoding used for segment names, parameter keys and parameter values.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::{ENCODED_SEPARATOR, PARAMETER_SEPARATOR};

/// Characters escaped by [`encode_component`].
///
/// Everything except ASCII alphanumerics and `- _ . ! ~ * ' ( )` is escaped, which is the
/// set left alone by the URI-component encoding of browsers. `;`, `=` and `/` are always
/// escaped so encoded text never collides with the path grammar.
pub const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a name, key or value.
///
/// Any `;` still present after component encoding is replaced by `%3B`, so the
/// result never contains the parameter separator.
#[inline]
#[must_use]
pub fn encode_component(text: &str) -> String {
    let encoded = utf8_percent_encode(text, COMPONENT).to_string();
    if encoded.contains(PARAMETER_SEPARATOR) {
        encoded.replace(PARAMETER_SEPARATOR, ENCODED_SEPARATOR)
    } else {
        encoded
    }
}

/// Percent-decode a name, key or value.
///
/// Malformed escapes are kept literally and invalid UTF-8 is replaced with `U+FFFD`.
#[inline]
#[must_use]
pub fn decode_component(text: &str) -> String {
    percent_decode_str(text).decode_utf8_lossy().into_owned()
}
