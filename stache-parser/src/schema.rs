//! The [`Schema`] type.
use std::collections::BTreeMap;

use serde_json::Value;

/// Compile time description of the model shape.
///
/// Anything described by a schema is resolved at compile time, anything [`Schema::Any`] is
/// resolved at render time.
///
/// ```
/// use stache_parser::Schema;
///
/// let schema = Schema::object([
///     ("title", Schema::Scalar),
///     ("items", Schema::list(Schema::object([("name", Schema::Scalar)]))),
/// ]);
/// assert!(schema.field("title").is_found());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Schema {
    /// Unknown shape.
    #[default]
    Any,
    Bool,
    /// String or number.
    Scalar,
    List(Box<Schema>),
    Object(BTreeMap<Box<str>, Schema>),
}

/// Result of [`Schema::field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    Found(&'a Schema),
    /// Can only be known at render time.
    Unknown,
    Absent,
}

impl Field<'_> {
    pub fn is_found(&self) -> bool {
        matches!(self, Field::Found(_))
    }
}

impl Schema {
    pub fn list(element: Schema) -> Schema {
        Schema::List(Box::new(element))
    }

    pub fn object<K, I>(fields: I) -> Schema
    where
        K: Into<Box<str>>,
        I: IntoIterator<Item = (K, Schema)>,
    {
        Schema::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Infer schema from a sample model.
    ///
    /// `null` and an empty array element are inferred as [`Schema::Any`]. List elements are
    /// merged, see [`Schema::merge`].
    pub fn infer(value: &Value) -> Schema {
        match value {
            Value::Null => Schema::Any,
            Value::Bool(_) => Schema::Bool,
            Value::Number(_) | Value::String(_) => Schema::Scalar,
            Value::Array(values) => Schema::list(
                values.iter().map(Schema::infer).reduce(Schema::merge).unwrap_or_default(),
            ),
            Value::Object(map) => Schema::Object(
                map.iter().map(|(k, v)| (k.as_str().into(), Schema::infer(v))).collect(),
            ),
        }
    }

    /// Combine two schemas describing the same value.
    ///
    /// Objects merge field by field only when they have the same fields, anything that differs
    /// becomes [`Schema::Any`] so it is searched at render time.
    pub fn merge(self, other: Schema) -> Schema {
        match (self, other) {
            (Schema::List(a), Schema::List(b)) => Schema::list(a.merge(*b)),
            (Schema::Object(a), Schema::Object(b)) if a.keys().eq(b.keys()) => Schema::Object(
                a.into_iter().zip(b).map(|((name, a), (_, b))| (name, a.merge(b))).collect(),
            ),
            (a, b) if a == b => a,
            _ => Schema::Any,
        }
    }

    /// Lookup a direct child.
    ///
    /// A numeric name on a list returns the element schema.
    pub fn field(&self, name: &str) -> Field<'_> {
        match self {
            Schema::Any => Field::Unknown,
            Schema::Object(fields) => match fields.get(name) {
                Some(field) => Field::Found(field),
                None => Field::Absent,
            },
            Schema::List(element) if name.parse::<usize>().is_ok() => Field::Found(element),
            Schema::List(_) | Schema::Bool | Schema::Scalar => Field::Absent,
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn infer() {
        let value = json!({
            "name": "Chris",
            "admin": false,
            "age": 4,
            "none": null,
            "tags": ["a"],
            "empty": [],
        });
        assert_eq!(
            Schema::infer(&value),
            Schema::object([
                ("name", Schema::Scalar),
                ("admin", Schema::Bool),
                ("age", Schema::Scalar),
                ("none", Schema::Any),
                ("tags", Schema::list(Schema::Scalar)),
                ("empty", Schema::list(Schema::Any)),
            ])
        );
    }

    #[test]
    fn infer_list() {
        let same = json!([{ "a": 1, "b": null }, { "a": 2, "b": "x" }]);
        assert_eq!(
            Schema::infer(&same),
            Schema::list(Schema::object([("a", Schema::Scalar), ("b", Schema::Any)])),
        );

        let different = json!([{ "a": 1 }, { "b": "elem" }]);
        assert_eq!(Schema::infer(&different), Schema::list(Schema::Any));

        let mixed = json!([[1], [true], []]);
        assert_eq!(Schema::infer(&mixed), Schema::list(Schema::list(Schema::Any)));
    }

    #[test]
    fn field() {
        let schema = Schema::object([("items", Schema::list(Schema::Bool))]);
        assert_eq!(schema.field("items"), Field::Found(&Schema::list(Schema::Bool)));
        assert_eq!(schema.field("nope"), Field::Absent);
        assert_eq!(Schema::Any.field("x"), Field::Unknown);
        assert_eq!(Schema::list(Schema::Bool).field("0"), Field::Found(&Schema::Bool));
        assert_eq!(Schema::list(Schema::Bool).field("len"), Field::Absent);
        assert_eq!(Schema::Scalar.field("x"), Field::Absent);
    }
}
