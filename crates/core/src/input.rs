//! Inputs accepted when encoding a list of segments.
use crate::encoding::encode_component;
use crate::{ParamValue, Segment};

/// A segment given as a plain text name and a parameters source.
///
/// ```
/// use ipld_url_core::{Segment, SegmentDescriptor};
///
/// let descriptor = SegmentDescriptor::new("fizz").param("whatever", [1, 2, 3]);
/// let segment = Segment::from(descriptor);
/// assert_eq!(segment.get_all("whatever"), vec!["1", "2", "3"]);
/// ```
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[non_exhaustive]
pub struct SegmentDescriptor {
    /// Plain text name, encoded when the segment is formatted.
    pub name: String,
    /// Parameters in order. A `Multi` value expands into one entry per item.
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "crate::serde::deserialize_parameter_source"
        )
    )]
    pub parameters: Vec<(String, ParamValue)>,
}

impl SegmentDescriptor {
    /// Create a descriptor with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }
    /// Add one parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.push((key.into(), value.into()));
        self
    }
    /// Add every parameter of a source, see [`Segment::with_parameters`].
    #[must_use]
    pub fn params<I, K, V>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        for (key, value) in parameters {
            self.parameters.push((key.into(), value.into()));
        }
        self
    }
}

impl From<SegmentDescriptor> for Segment {
    fn from(descriptor: SegmentDescriptor) -> Self {
        Self::with_parameters(descriptor.name, descriptor.parameters)
    }
}

/// One element of a segment list to encode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SegmentInput {
    /// A bare name without parameters.
    Text(String),
    /// A name with parameters.
    Structured(SegmentDescriptor),
    /// An existing segment, used as is.
    Prebuilt(Segment),
}

impl SegmentInput {
    /// Encoded fragment for this input.
    pub fn to_fragment(&self) -> String {
        match self {
            Self::Text(name) => encode_component(name),
            Self::Structured(descriptor) => Segment::from(descriptor.clone()).to_string(),
            Self::Prebuilt(segment) => segment.to_string(),
        }
    }
    /// Turn this input into a [`Segment`].
    pub fn into_segment(self) -> Segment {
        match self {
            Self::Text(name) => Segment::new(name),
            Self::Structured(descriptor) => descriptor.into(),
            Self::Prebuilt(segment) => segment,
        }
    }
}

impl From<&str> for SegmentInput {
    #[inline]
    fn from(name: &str) -> Self {
        Self::Text(name.to_owned())
    }
}
impl From<String> for SegmentInput {
    #[inline]
    fn from(name: String) -> Self {
        Self::Text(name)
    }
}
impl From<&String> for SegmentInput {
    #[inline]
    fn from(name: &String) -> Self {
        Self::Text(name.clone())
    }
}
impl From<SegmentDescriptor> for SegmentInput {
    #[inline]
    fn from(descriptor: SegmentDescriptor) -> Self {
        Self::Structured(descriptor)
    }
}
impl From<Segment> for SegmentInput {
    #[inline]
    fn from(segment: Segment) -> Self {
        Self::Prebuilt(segment)
    }
}
impl From<&Segment> for SegmentInput {
    #[inline]
    fn from(segment: &Segment) -> Self {
        Self::Prebuilt(segment.clone())
    }
}

cfg_feature! {
    #![feature = "json"]
    impl TryFrom<serde_json::Value> for SegmentInput {
        type Error = crate::Error;

        /// A string becomes [`SegmentInput::Text`], an object with a `name` becomes
        /// [`SegmentInput::Structured`]. Anything else is an
        /// [`Error::InvalidSegmentInput`](crate::Error::InvalidSegmentInput).
        fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
            use serde_json::Value;

            match value {
                Value::String(name) => Ok(Self::Text(name)),
                Value::Object(map) if map.contains_key("name") => {
                    serde_json::from_value::<SegmentDescriptor>(Value::Object(map))
                        .map(Self::Structured)
                        .map_err(|e| crate::Error::invalid_input(e.to_string()))
                }
                other => Err(crate::Error::invalid_input(format!(
                    "expected a string name or an object with a `name`, found `{other}`"
                ))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_fragment() {
        assert_eq!(SegmentInput::from("escape;this").to_fragment(), "escape%3Bthis");
        assert_eq!(SegmentInput::from("😁").to_fragment(), "%F0%9F%98%81");
    }

    #[test]
    fn test_structured_fragment() {
        let input = SegmentInput::from(
            SegmentDescriptor::new("escape;this").params([("whatever", vec![1, 2, 3])]),
        );
        assert_eq!(
            input.to_fragment(),
            "escape%3Bthis;whatever=1;whatever=2;whatever=3"
        );
    }

    #[test]
    fn test_prebuilt_fragment() {
        let segment = Segment::parse("example;bar=baz");
        assert_eq!(SegmentInput::from(&segment).to_fragment(), "example;bar=baz");
        assert_eq!(SegmentInput::from(segment.clone()).into_segment(), segment);
    }

    #[test]
    fn test_into_segment() {
        assert_eq!(SegmentInput::from("a").into_segment(), Segment::new("a"));
        let segment = SegmentInput::from(SegmentDescriptor::new("b").param("k", "v")).into_segment();
        assert_eq!(segment.name(), "b");
        assert_eq!(segment.get("k"), Some("v"));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_from_json() {
        use serde_json::json;

        assert_eq!(
            SegmentInput::try_from(json!("foo")).unwrap(),
            SegmentInput::Text("foo".into())
        );
        let input = SegmentInput::try_from(json!({"name": "fizz", "parameters": {"whatever": [1, 2, 3]}}))
            .unwrap();
        assert_eq!(
            input,
            SegmentInput::Structured(SegmentDescriptor::new("fizz").param("whatever", [1, 2, 3]))
        );
        let input = SegmentInput::try_from(json!({"name": "bare"})).unwrap();
        assert_eq!(input, SegmentInput::Structured(SegmentDescriptor::new("bare")));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_from_json_invalid() {
        use serde_json::json;

        for value in [json!(42), json!(null), json!(["a"]), json!({"parameters": {}})] {
            assert!(matches!(
                SegmentInput::try_from(value),
                Err(crate::Error::InvalidSegmentInput(_))
            ));
        }
        assert!(matches!(
            SegmentInput::try_from(json!({"name": 1})),
            Err(crate::Error::InvalidSegmentInput(_))
        ));
        assert!(matches!(
            SegmentInput::try_from(json!({"name": "a", "parameters": "nope"})),
            Err(crate::Error::InvalidSegmentInput(_))
        ));
    }
}
