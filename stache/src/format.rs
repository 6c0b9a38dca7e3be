//! The [`Formatter`] trait.
use std::borrow::Cow;

use serde_json::Value;

/// Turns a model value into text, before escaping.
///
/// Any `Fn(&Value) -> String` is a [`Formatter`].
pub trait Formatter {
    fn format<'v>(&self, value: &'v Value) -> Cow<'v, str>;
}

impl<F> Formatter for F
where
    F: Fn(&Value) -> String,
{
    fn format<'v>(&self, value: &'v Value) -> Cow<'v, str> {
        Cow::Owned(self(value))
    }
}

/// The default [`Formatter`].
///
/// - string as is
/// - integer using [`itoa`]
/// - float using [`Display`][std::fmt::Display]
/// - `true` or `false`
/// - `null` as empty
/// - array and object as json
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {
    fn format<'v>(&self, value: &'v Value) -> Cow<'v, str> {
        match value {
            Value::Null => Cow::Borrowed(""),
            Value::Bool(true) => Cow::Borrowed("true"),
            Value::Bool(false) => Cow::Borrowed("false"),
            Value::String(value) => Cow::Borrowed(value),
            Value::Number(number) => match (number.as_u64(), number.as_i64(), number.as_f64()) {
                (Some(int), _, _) => Cow::Owned(itoa::Buffer::new().format(int).to_owned()),
                (None, Some(int), _) => Cow::Owned(itoa::Buffer::new().format(int).to_owned()),
                (None, None, Some(float)) => Cow::Owned(float.to_string()),
                (None, None, None) => Cow::Owned(number.to_string()),
            },
            Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
        }
    }
}
