//! Typed placeholder templates.

use std::marker::PhantomData;

/// A set of values substituted into one kind of template.
pub trait TemplateVars {
    /// Marker of the template these values fill.
    type Kind;

    fn apply(&self, content: &str) -> String;
}

/// Static template text bound to the variable set it accepts.
#[derive(Debug, Clone, Copy)]
pub struct Template<K> {
    content: &'static str,
    _marker: PhantomData<K>,
}

impl<K> Template<K> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }

    pub fn render<V: TemplateVars<Kind = K>>(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}

/// Prefix shared by every placeholder.
const PLACEHOLDER_PREFIX: &str = "__FOLIO_";

/// Replace placeholders in one pass over `content`.
///
/// Substituted values are never rescanned, so user text that happens to
/// contain a placeholder name is left alone.
pub fn substitute(content: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(pos) = rest.find(PLACEHOLDER_PREFIX) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match vars.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push_str(PLACEHOLDER_PREFIX);
                rest = &tail[PLACEHOLDER_PREFIX.len()..];
            }
        }
    }

    out.push_str(rest);
    out
}
