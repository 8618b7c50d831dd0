//! Attribute types shared by nodes and edges.

use super::fields::{
    expect_object, DumpOptions, Dumper, EntityError, FieldError, FieldReader, FromValue, JsonMap,
    OpenFields, ToField,
};
use serde_json::Value;
use std::collections::BTreeMap;

/// A free-text comment, or a structured one keyed by topic or language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comment {
    Text(String),
    Structured(BTreeMap<String, String>),
}

impl FromValue for Comment {
    fn from_value(value: Value) -> Result<Self, Vec<FieldError>> {
        match value {
            Value::String(s) => Ok(Comment::Text(s)),
            Value::Object(map) => {
                let mut out = BTreeMap::new();
                let mut errors = Vec::new();
                for (k, v) in map {
                    match v {
                        Value::String(s) => {
                            out.insert(k, s);
                        }
                        _ => errors.push(FieldError::wrong_type("string").within(k.as_str())),
                    }
                }
                if errors.is_empty() {
                    Ok(Comment::Structured(out))
                } else {
                    Err(errors)
                }
            }
            _ => Err(vec![FieldError::wrong_type("string or dictionary of strings")]),
        }
    }
}

impl ToField for Comment {
    fn to_field(&self, _: &DumpOptions) -> Value {
        match self {
            Comment::Text(s) => Value::String(s.clone()),
            Comment::Structured(map) => Value::Object(
                map.iter().map(|(k, v)| (k.clone(), Value::String(v.clone()))).collect(),
            ),
        }
    }
}

/// A data source, such as a publication or a field measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSource {
    pub authors: Vec<String>,
    pub year: i64,
    pub title: String,
    pub doi: Option<String>,
    pub open: OpenFields,
}

impl DataSource {
    pub fn from_fields(fields: JsonMap) -> Result<Self, EntityError> {
        let mut r = FieldReader::new("DataSource", fields);
        let authors = r.required("authors");
        let year = r.required("year");
        let title = r.required("title");
        let doi = r.optional("doi");
        r.finish(|open| {
            Some(DataSource { authors: authors?, year: year?, title: title?, doi: doi?, open })
        })
    }

    pub fn dump(&self, opts: &DumpOptions) -> JsonMap {
        let mut d = Dumper::new(&self.open, opts);
        d.field("authors", &self.authors)
            .field("year", &self.year)
            .field("title", &self.title)
            .field("doi", &self.doi);
        d.finish()
    }
}

impl FromValue for DataSource {
    fn from_value(value: Value) -> Result<Self, Vec<FieldError>> {
        let fields = expect_object("DataSource", value).map_err(|e| e.errors)?;
        DataSource::from_fields(fields).map_err(|e| e.errors)
    }
}

impl ToField for DataSource {
    fn to_field(&self, opts: &DumpOptions) -> Value {
        Value::Object(self.dump(opts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_comment_requires_string_values() {
        let err = Comment::from_value(json!({"en": "ok", "de": 5})).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].path(), "de");
    }

    #[test]
    fn test_data_source_nested_errors() {
        let err = Vec::<DataSource>::from_value(json!([
            {"authors": ["A. Author"], "year": 2020, "title": "ok"},
            {"authors": ["B. Author"], "year": "later", "title": "bad"}
        ]))
        .unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].path(), "1.year");
        assert_eq!(err[0].msg, "Input should be a valid integer");
    }

    #[test]
    fn test_data_source_dump_keeps_extras() {
        let raw = json!({"authors": ["C. Author"], "year": 2019, "title": "t", "pages": "1-9"});
        let source = DataSource::from_value(raw.clone()).unwrap();
        assert_eq!(Value::Object(source.dump(&DumpOptions::default())), raw);
    }
}
