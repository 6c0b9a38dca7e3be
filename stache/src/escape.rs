//! The [`Escaper`] trait.
use crate::{Result, Writer};

/// Content escaping applied to `{{name}}` variables.
///
/// Any `Fn(&str) -> String` is an [`Escaper`].
pub trait Escaper {
    fn escape(&self, value: &str, f: &mut impl Writer) -> Result<()>;
}

impl<F> Escaper for F
where
    F: Fn(&str) -> String,
{
    fn escape(&self, value: &str, f: &mut impl Writer) -> Result<()> {
        f.write_str(&self(value))
    }
}

/// Html escaping, the default.
///
/// escape based on [OWASP recommendation][1]
///
/// [1]: <https://cheatsheetseries.owasp.org/cheatsheets/Cross_Site_Scripting_Prevention_Cheat_Sheet.html>
#[derive(Debug, Clone, Copy, Default)]
pub struct Html;

impl Escaper for Html {
    fn escape(&self, value: &str, f: &mut impl Writer) -> Result<()> {
        Escape(f).write_str(value)
    }
}

/// No escaping.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEscape;

impl Escaper for NoEscape {
    fn escape(&self, value: &str, f: &mut impl Writer) -> Result<()> {
        f.write_str(value)
    }
}

/// Wrap [`Writer`] to html escape input.
pub struct Escape<W>(pub W);

impl<W> Writer for Escape<W> where W: Writer {
    fn write_str(&mut self, value: &str) -> Result<()> {
        let mut latest = 0;

        for (i, ch) in value.char_indices() {
            let escaped = match ch {
                '&' => "&amp;",
                '<' => "&lt;",
                '>' => "&gt;",
                '"' => "&quot;",
                '\'' => "&#x27;",
                _ => continue,
            };

            self.0.write_str(&value[latest..i])?;
            self.0.write_str(escaped)?;

            latest = i + 1;
        }

        if let Some(value) = value.get(latest..) {
            if !value.is_empty() {
                self.0.write_str(value)?;
            }
        }

        Ok(())
    }
}
