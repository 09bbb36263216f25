//! Grouped view over the parameters of a [`Segment`](crate::Segment).
use std::borrow::Cow;
use std::ops::Deref;

use indexmap::IndexMap;
use indexmap::map::Entry;

/// Value of one parameter key in the grouped view.
///
/// A key that appears once maps to [`ParamValue::Single`], a key that appears more than
/// once maps to [`ParamValue::Multi`] holding the values in insertion order.
///
/// `ParamValue` is also accepted as a parameters source, where a `Multi` expands into
/// one entry per value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamValue {
    /// Only one value.
    Single(String),
    /// Several values, in insertion order.
    Multi(Vec<String>),
}

impl ParamValue {
    /// First value, `None` only for an empty `Multi`.
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multi(values) => values.first().map(|v| &**v),
        }
    }
    /// Returns the value if this is a `Single`.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multi(_) => None,
        }
    }
    /// Number of values.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi(values) => values.len(),
        }
    }
    /// Returns `true` if this is an empty `Multi`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Iterate over all values.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multi(values) => values,
        };
        values.iter().map(|v| &**v)
    }
    /// Consume into all values.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::Single(value) => vec![value],
            Self::Multi(values) => values,
        }
    }

    fn push(&mut self, value: String) {
        match self {
            Self::Single(first) => {
                let first = std::mem::take(first);
                *self = Self::Multi(vec![first, value]);
            }
            Self::Multi(values) => values.push(value),
        }
    }
}

impl From<String> for ParamValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}
impl From<&str> for ParamValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}
impl From<&String> for ParamValue {
    #[inline]
    fn from(value: &String) -> Self {
        Self::Single(value.clone())
    }
}
impl From<Cow<'_, str>> for ParamValue {
    #[inline]
    fn from(value: Cow<'_, str>) -> Self {
        Self::Single(value.into_owned())
    }
}
impl From<&ParamValue> for ParamValue {
    #[inline]
    fn from(value: &ParamValue) -> Self {
        value.clone()
    }
}
impl<T> From<Vec<T>> for ParamValue
where
    T: Into<ParamValue>,
{
    fn from(values: Vec<T>) -> Self {
        Self::Multi(
            values
                .into_iter()
                .flat_map(|v| Into::<ParamValue>::into(v).into_vec())
                .collect(),
        )
    }
}
impl<T, const N: usize> From<[T; N]> for ParamValue
where
    T: Into<ParamValue>,
{
    fn from(values: [T; N]) -> Self {
        Vec::from(values).into()
    }
}
impl<T> From<&[T]> for ParamValue
where
    T: Into<ParamValue> + Clone,
{
    fn from(values: &[T]) -> Self {
        values.to_vec().into()
    }
}

macro_rules! param_value_from_display {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for ParamValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Single(value.to_string())
                }
            }
        )+
    };
}
param_value_from_display!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

/// Mapping from parameter key to its [`ParamValue`], in first-insertion order of the keys.
///
/// This is a snapshot: changing it does not change the segment it was read from.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Parameters {
    inner: IndexMap<String, ParamValue>,
}
impl Deref for Parameters {
    type Target = IndexMap<String, ParamValue>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl Parameters {
    /// Create new empty `Parameters`.
    pub fn new() -> Self {
        Self::default()
    }
    /// Insert a value, turning the key into a `Multi` if it is already present.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value: String = value.into();
        match self.inner.entry(key.into()) {
            Entry::Occupied(mut entry) => entry.get_mut().push(value),
            Entry::Vacant(entry) => {
                entry.insert(ParamValue::Single(value));
            }
        }
    }
    /// Consume into the underlying map.
    pub fn into_inner(self) -> IndexMap<String, ParamValue> {
        self.inner
    }
}
impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut parameters = Self::new();
        for (key, value) in iter {
            parameters.push(key, value);
        }
        parameters
    }
}
impl IntoIterator for Parameters {
    type Item = (String, ParamValue);
    type IntoIter = indexmap::map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}
impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = indexmap::map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

cfg_feature! {
    #![feature = "serde"]
    impl serde::Serialize for ParamValue {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            match self {
                Self::Single(value) => serializer.serialize_str(value),
                Self::Multi(values) => serializer.collect_seq(values),
            }
        }
    }
    impl<'de> serde::Deserialize<'de> for ParamValue {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            deserializer.deserialize_any(crate::serde::ParamValueVisitor)
        }
    }
    impl serde::Serialize for Parameters {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.collect_map(&self.inner)
        }
    }
    impl<'de> serde::Deserialize<'de> for Parameters {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let source = crate::serde::deserialize_parameter_source(deserializer)?;
            Ok(crate::segment::flatten(source).into_iter().collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_groups_values() {
        let mut parameters = Parameters::new();
        parameters.push("a", "1");
        parameters.push("b", "2");
        parameters.push("a", "3");
        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters["a"], ParamValue::Multi(vec!["1".into(), "3".into()]));
        assert_eq!(parameters["b"], ParamValue::Single("2".into()));
        assert_eq!(parameters.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_param_value_accessors() {
        let single = ParamValue::from("x");
        assert_eq!(single.first(), Some("x"));
        assert_eq!(single.as_single(), Some("x"));
        assert_eq!(single.len(), 1);

        let multi = ParamValue::from(vec![1, 2, 3]);
        assert_eq!(multi.first(), Some("1"));
        assert_eq!(multi.as_single(), None);
        assert_eq!(multi.iter().collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert_eq!(multi.into_vec(), vec!["1", "2", "3"]);

        let empty = ParamValue::from(Vec::<String>::new());
        assert!(empty.is_empty());
        assert_eq!(empty.first(), None);
    }

    #[test]
    fn test_param_value_from_scalars() {
        assert_eq!(ParamValue::from(true), ParamValue::Single("true".into()));
        assert_eq!(ParamValue::from(-7i64), ParamValue::Single("-7".into()));
        assert_eq!(ParamValue::from(1.5f64), ParamValue::Single("1.5".into()));
        assert_eq!(
            ParamValue::from(["a", "b"]),
            ParamValue::Multi(vec!["a".into(), "b".into()])
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_view() {
        let parameters: Parameters = [("bar", "baz"), ("n", "1"), ("n", "2")].into_iter().collect();
        let json = serde_json::to_string(&parameters).unwrap();
        assert_eq!(json, r#"{"bar":"baz","n":["1","2"]}"#);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_view() {
        let parameters: Parameters =
            serde_json::from_str(r#"{"whatever":[1,2,3],"flag":true}"#).unwrap();
        assert_eq!(
            parameters["whatever"],
            ParamValue::Multi(vec!["1".into(), "2".into(), "3".into()])
        );
        assert_eq!(parameters["flag"], ParamValue::Single("true".into()));
    }
}
