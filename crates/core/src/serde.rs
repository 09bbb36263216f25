use std::fmt::{self, Formatter};

use serde::Deserializer;
use serde::de::{Deserialize, Error as DeError, MapAccess, SeqAccess, Visitor};

use crate::ParamValue;

/// Reads a string, number, boolean or char as its text form.
struct ScalarVisitor;
impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = String;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or boolean")
    }
    fn visit_str<E: DeError>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.to_owned())
    }
    fn visit_string<E: DeError>(self, v: String) -> Result<Self::Value, E> {
        Ok(v)
    }
    fn visit_char<E: DeError>(self, v: char) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }
    fn visit_bool<E: DeError>(self, v: bool) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }
    fn visit_i64<E: DeError>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }
    fn visit_u64<E: DeError>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }
    fn visit_f64<E: DeError>(self, v: f64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }
}

struct Scalar(String);
impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ScalarVisitor).map(Scalar)
    }
}

pub(crate) struct ParamValueVisitor;
impl<'de> Visitor<'de> for ParamValueVisitor {
    type Value = ParamValue;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean or a sequence of them")
    }
    fn visit_str<E: DeError>(self, v: &str) -> Result<Self::Value, E> {
        ScalarVisitor.visit_str(v).map(ParamValue::Single)
    }
    fn visit_string<E: DeError>(self, v: String) -> Result<Self::Value, E> {
        ScalarVisitor.visit_string(v).map(ParamValue::Single)
    }
    fn visit_char<E: DeError>(self, v: char) -> Result<Self::Value, E> {
        ScalarVisitor.visit_char(v).map(ParamValue::Single)
    }
    fn visit_bool<E: DeError>(self, v: bool) -> Result<Self::Value, E> {
        ScalarVisitor.visit_bool(v).map(ParamValue::Single)
    }
    fn visit_i64<E: DeError>(self, v: i64) -> Result<Self::Value, E> {
        ScalarVisitor.visit_i64(v).map(ParamValue::Single)
    }
    fn visit_u64<E: DeError>(self, v: u64) -> Result<Self::Value, E> {
        ScalarVisitor.visit_u64(v).map(ParamValue::Single)
    }
    fn visit_f64<E: DeError>(self, v: f64) -> Result<Self::Value, E> {
        ScalarVisitor.visit_f64(v).map(ParamValue::Single)
    }
    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(Scalar(value)) = seq.next_element()? {
            values.push(value);
        }
        Ok(ParamValue::Multi(values))
    }
}

/// Deserialize a parameters source: a map of key to value(s), a sequence of
/// `[key, value]` pairs, or nothing at all.
pub(crate) fn deserialize_parameter_source<'de, D>(
    deserializer: D,
) -> Result<Vec<(String, ParamValue)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SourceVisitor;
    impl<'de> Visitor<'de> for SourceVisitor {
        type Value = Vec<(String, ParamValue)>;

        fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
            f.write_str("a map or a sequence of key/value pairs")
        }
        fn visit_unit<E: DeError>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
        fn visit_none<E: DeError>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut source = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, ParamValue>()? {
                source.push((key, value));
            }
            Ok(source)
        }
        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut source = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some((key, value)) = seq.next_element::<(String, ParamValue)>()? {
                source.push((key, value));
            }
            Ok(source)
        }
    }
    deserializer.deserialize_any(SourceVisitor)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize, Debug)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_parameter_source")]
        parameters: Vec<(String, ParamValue)>,
    }

    #[test]
    fn test_source_from_map() {
        let holder: Holder =
            serde_json::from_str(r#"{"parameters":{"b":"1","a":[2,3]}}"#).unwrap();
        assert_eq!(
            holder.parameters,
            vec![
                ("b".to_owned(), ParamValue::Single("1".into())),
                ("a".to_owned(), ParamValue::Multi(vec!["2".into(), "3".into()])),
            ]
        );
    }

    #[test]
    fn test_source_from_pairs() {
        let holder: Holder =
            serde_json::from_str(r#"{"parameters":[["a","1"],["b",false],["a","2"]]}"#).unwrap();
        assert_eq!(
            holder.parameters,
            vec![
                ("a".to_owned(), ParamValue::Single("1".into())),
                ("b".to_owned(), ParamValue::Single("false".into())),
                ("a".to_owned(), ParamValue::Single("2".into())),
            ]
        );
    }

    #[test]
    fn test_source_missing_or_null() {
        let holder: Holder = serde_json::from_str("{}").unwrap();
        assert!(holder.parameters.is_empty());
        let holder: Holder = serde_json::from_str(r#"{"parameters":null}"#).unwrap();
        assert!(holder.parameters.is_empty());
    }

    #[test]
    fn test_nested_sequence_rejected() {
        let result = serde_json::from_str::<Holder>(r#"{"parameters":{"a":[[1]]}}"#);
        assert!(result.is_err());
    }
}
