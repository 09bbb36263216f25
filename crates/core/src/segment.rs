use std::convert::Infallible;
use std::fmt::{self, Formatter};
use std::str::FromStr;

use crate::encoding::{decode_component, encode_component};
use crate::{PARAMETER_EQUALS, PARAMETER_SEPARATOR, ParamValue, Parameters};

/// One `/`-delimited unit of an IPLD URL path: a name plus an ordered list of parameters.
///
/// The name and all parameter keys and values are held decoded. Encoding only happens
/// when the segment is formatted with [`Display`](fmt::Display).
///
/// A key may appear any number of times. The order of entries is kept and is used both
/// for iteration and for the encoded form.
///
/// ```
/// use ipld_url_core::Segment;
///
/// let mut segment = Segment::parse("escape%3Bthis;whatever=1;whatever=2");
/// assert_eq!(segment.name(), "escape;this");
/// assert_eq!(segment.get_all("whatever"), vec!["1", "2"]);
///
/// segment.append("whatever", "3");
/// assert_eq!(segment.to_string(), "escape%3Bthis;whatever=1;whatever=2;whatever=3");
/// ```
#[derive(Clone, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(from = "crate::SegmentDescriptor")
)]
pub struct Segment {
    name: String,
    entries: Vec<(String, String)>,
}

impl Segment {
    /// Create a segment with only a name. The name is taken as plain text.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Create a segment from a plain text name and a parameters source.
    ///
    /// The source is anything yielding `(key, value)` pairs: a list of pairs, a map, or
    /// a [`Parameters`] view. Values that hold several items, such as a `Vec` or a
    /// [`ParamValue::Multi`], expand into one entry per item.
    ///
    /// ```
    /// use ipld_url_core::Segment;
    ///
    /// let segment = Segment::with_parameters("fizz", [("whatever", vec![1, 2, 3])]);
    /// assert_eq!(segment.to_string(), "fizz;whatever=1;whatever=2;whatever=3");
    /// ```
    pub fn with_parameters<I, K, V>(name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        let mut segment = Self::new(name);
        segment.set_parameters(parameters);
        segment
    }

    /// Parse one encoded path fragment such as `name;key=value;key=value2`.
    ///
    /// Everything before the first `;` is the name, each following piece is a
    /// `key=value` pair split on its first `=`. A piece without `=` gets an empty value.
    /// Name, keys and values are percent-decoded independently.
    pub fn parse(fragment: &str) -> Self {
        let mut pieces = fragment.split(PARAMETER_SEPARATOR);
        let name = pieces.next().map(decode_component).unwrap_or_default();
        let entries = pieces
            .map(|pair| match pair.split_once(PARAMETER_EQUALS) {
                Some((key, value)) => (decode_component(key), decode_component(value)),
                None => (decode_component(pair), String::new()),
            })
            .collect();
        Self { name, entries }
    }

    /// Decoded name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Replace the name. The name is taken as plain text.
    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Grouped view of the parameters, see [`Parameters`].
    pub fn parameters(&self) -> Parameters {
        self.entries().collect()
    }
    /// Replace all parameters with the given source, see [`Segment::with_parameters`].
    pub fn set_parameters<I, K, V>(&mut self, parameters: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        self.entries = flatten(parameters);
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| &**v)
    }
    /// All values for `key` in insertion order, empty if there is none.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| &**v)
            .collect()
    }
    /// Returns `true` if at least one entry has `key`.
    pub fn has(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Replace the value of the first entry with `key`, or append a new entry if there is
    /// none. Later entries with the same key keep their values.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key: String = key.into();
        let value: String = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }
    /// Add a new entry, even if `key` is already present.
    #[inline]
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }
    /// Remove every entry with `key`.
    pub fn delete(&mut self, key: &str) {
        self.entries.retain(|(k, _)| k != key);
    }

    /// Iterate over `(key, value)` entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (&**k, &**v))
    }
    /// Iterate over the keys of all entries, repeated keys included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| &**k)
    }
    /// Iterate over the values of all entries.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, v)| &**v)
    }

    /// Number of parameter entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    /// Returns `true` if there is no parameter entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub(crate) fn flatten<I, K, V>(parameters: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<ParamValue>,
{
    let mut entries: Vec<(String, String)> = Vec::new();
    for (key, value) in parameters {
        let key: String = key.into();
        let value: ParamValue = value.into();
        match value {
            ParamValue::Single(value) => entries.push((key, value)),
            ParamValue::Multi(values) => {
                entries.extend(values.into_iter().map(|value| (key.clone(), value)));
            }
        }
    }
    entries
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_component(&self.name))?;
        for (key, value) in &self.entries {
            write!(
                f,
                "{PARAMETER_SEPARATOR}{}{PARAMETER_EQUALS}{}",
                encode_component(key),
                encode_component(value)
            )?;
        }
        Ok(())
    }
}

impl FromStr for Segment {
    type Err = Infallible;

    #[inline]
    fn from_str(fragment: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(fragment))
    }
}

cfg_feature! {
    #![feature = "serde"]
    impl serde::Serialize for Segment {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            use serde::ser::SerializeStruct;

            let mut state = serializer.serialize_struct("Segment", 2)?;
            state.serialize_field("name", &self.name)?;
            state.serialize_field("parameters", &self.parameters())?;
            state.end()
        }
    }
}
