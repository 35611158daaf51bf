use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::host::{EffectCatalog, EffectConstructor, ShaderEffect};

/// Explicit effect catalog keyed by effect type name.
///
/// Names are matched exactly. Registering a name twice replaces the earlier constructor.
#[derive(Clone, Default)]
pub struct EffectRegistry {
    ctors: BTreeMap<String, EffectConstructor>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `ctor` under `name`, returning the constructor it replaced.
    pub fn register<F>(&mut self, name: impl Into<String>, ctor: F) -> Option<EffectConstructor>
    where
        F: Fn() -> Box<dyn ShaderEffect> + 'static,
    {
        self.ctors.insert(name.into(), Rc::new(ctor))
    }

    /// Builder form of [`EffectRegistry::register`].
    pub fn with<F>(mut self, name: impl Into<String>, ctor: F) -> Self
    where
        F: Fn() -> Box<dyn ShaderEffect> + 'static,
    {
        self.register(name, ctor);
        self
    }

    pub fn len(&self) -> usize {
        self.ctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ctors.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ctors.keys().map(String::as_str)
    }
}

impl EffectCatalog for EffectRegistry {
    fn has_effect(&self, name: &str) -> bool {
        self.ctors.contains_key(name)
    }

    fn effect_constructor(&self, name: &str) -> Option<EffectConstructor> {
        self.ctors.get(name).cloned()
    }
}

impl fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/catalog.rs"]
mod tests;
