//! Template renderer
//!
//! Walks a parsed [`Ast`] and produces the output string. Text nodes are
//! copied verbatim; each tag is resolved against the value store, passed
//! through its modifiers, formatted, and optionally post-processed.

use super::error::RenderError;
use super::formatting::{ParamFormatter, SimpleParamFormatter};
use super::modifiers::{Modifier, ModifierRegistry};
use crate::parsing::{Ast, Node, TagNode};
use crate::values::{Value, ValueBag, ValueStore, Values};
use std::fmt;
use std::sync::Arc;

/// Applied to every formatted tag value of one render call, e.g. to
/// URL-encode or HTML-escape it.
pub type ParamProcessor<'a> = &'a dyn Fn(&str) -> String;

pub type RenderResult<T> = Result<T, RenderError>;

/// Renders syntax trees against registered values and modifiers.
///
/// Registration mutates the renderer and affects later render calls. Once
/// configured, a renderer can be shared across threads; each call works on its
/// own copy of the values.
#[derive(Clone)]
pub struct Renderer {
    value_bag: Box<dyn ValueStore>,
    modifiers: ModifierRegistry,
    formatter: Arc<dyn ParamFormatter>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            value_bag: Box::new(ValueBag::new()),
            modifiers: ModifierRegistry::new(),
            formatter: Arc::new(SimpleParamFormatter),
        }
    }

    /// A renderer with the standard modifiers registered.
    pub fn with_standard_modifiers() -> Self {
        let mut renderer = Self::new();
        renderer.modifiers = ModifierRegistry::standard();
        renderer
    }

    pub fn add_modifier(&mut self, name: impl Into<String>, modifier: impl Modifier + 'static) {
        self.modifiers.add(name, modifier);
    }

    pub fn add_modifiers<I, K, M>(&mut self, modifiers: I)
    where
        I: IntoIterator<Item = (K, M)>,
        K: Into<String>,
        M: Modifier + 'static,
    {
        for (name, modifier) in modifiers {
            self.add_modifier(name, modifier);
        }
    }

    pub fn modifiers(&self) -> &ModifierRegistry {
        &self.modifiers
    }

    pub fn set_param_formatter(&mut self, formatter: impl ParamFormatter + 'static) {
        self.formatter = Arc::new(formatter);
    }

    pub fn set_value_bag(&mut self, value_bag: Box<dyn ValueStore>) {
        self.value_bag = value_bag;
    }

    pub fn value_bag(&self) -> &dyn ValueStore {
        self.value_bag.as_ref()
    }

    pub fn add_value(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.value_bag.add(Values::from([(key.into(), value.into())]));
    }

    pub fn add_values<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let values: Values = values
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self.value_bag.add(values);
    }

    /// Renders `ast`. `extra` values apply to this call only and override
    /// registered values with the same key.
    pub fn render(
        &self,
        ast: &Ast,
        extra: Values,
        processor: Option<ParamProcessor<'_>>,
    ) -> RenderResult<String> {
        let scoped: Box<dyn ValueStore>;
        let values: &dyn ValueStore = if extra.is_empty() {
            self.value_bag.as_ref()
        } else {
            let mut copy = self.value_bag.clone_box();
            copy.add(extra);
            scoped = copy;
            scoped.as_ref()
        };

        let mut rendered = String::new();
        for node in ast {
            match node {
                Node::Text(text) => rendered.push_str(&text.content),
                Node::Tag(tag) => {
                    let value = self.render_tag(values, tag)?;
                    match processor {
                        Some(process) => rendered.push_str(&process(&value)),
                        None => rendered.push_str(&value),
                    }
                }
            }
        }

        tracing::debug!(nodes = ast.len(), bytes = rendered.len(), "rendered template");
        Ok(rendered)
    }

    fn render_tag(&self, values: &dyn ValueStore, tag: &TagNode) -> RenderResult<String> {
        let value = values.get(&tag.path)?;
        tracing::trace!(path = %tag.dotted_path(), ?value, "resolved tag");

        let value = self.modifiers.apply(value, &tag.modifiers)?;
        Ok(self.formatter.format(&value)?)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("value_bag", &self.value_bag)
            .field("modifiers", &self.modifiers)
            .finish_non_exhaustive()
    }
}
