use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::effects::value::parse_param_spec;
use crate::foundation::error::{PanoError, PanoResult};
use crate::host::{EffectCatalog, ShaderEffect};
use crate::scene::model::{EffectDescriptor, FxConfig};

/// One compiled, parameter-bound unit of the post-processing pipeline.
pub struct PipelineStage {
    uid: String,
    type_name: String,
    effect: Box<dyn ShaderEffect>,
}

impl PipelineStage {
    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn effect(&self) -> &dyn ShaderEffect {
        self.effect.as_ref()
    }

    pub fn effect_mut(&mut self) -> &mut dyn ShaderEffect {
        self.effect.as_mut()
    }

    /// Hand the engine object over to the renderer.
    pub fn into_effect(self) -> Box<dyn ShaderEffect> {
        self.effect
    }

    pub fn downcast_ref<T: ShaderEffect>(&self) -> Option<&T> {
        let any: &dyn Any = self.effect.as_ref();
        any.downcast_ref::<T>()
    }
}

impl fmt::Debug for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineStage")
            .field("uid", &self.uid)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Compiles effect descriptors into pipeline stages and keeps named descriptor sets.
pub struct EffectPipelineCompiler {
    catalog: Rc<dyn EffectCatalog>,
    config_uid: Option<String>,
    sets: BTreeMap<String, Vec<EffectDescriptor>>,
}

impl EffectPipelineCompiler {
    pub fn new(catalog: Rc<dyn EffectCatalog>) -> Self {
        Self {
            catalog,
            config_uid: None,
            sets: BTreeMap::new(),
        }
    }

    /// Register every set of `config`. A set uid seen before is replaced, not merged.
    pub fn add_config(&mut self, config: FxConfig) {
        for set in config.fx_sets {
            if self.sets.insert(set.uid.clone(), set.set).is_some() {
                tracing::debug!(set = %set.uid, "effect set replaced");
            }
        }
        self.config_uid = Some(config.uid);
    }

    /// Uid of the most recently added configuration.
    pub fn config_uid(&self) -> Option<&str> {
        self.config_uid.as_deref()
    }

    /// Stored descriptors for `uid`. `None` means no such set, which is not the same as an empty
    /// one.
    pub fn get_set_by_uid(&self, uid: &str) -> Option<&[EffectDescriptor]> {
        self.sets.get(uid).map(Vec::as_slice)
    }

    pub fn set_uids(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    /// Compile the stored set `uid`; `Ok(None)` if it was never registered.
    pub fn compile_set(&self, uid: &str) -> PanoResult<Option<Vec<PipelineStage>>> {
        self.get_set_by_uid(uid)
            .map(|set| self.compile(Some(set)))
            .transpose()
    }

    /// Turn descriptors into stages, in order.
    ///
    /// Descriptors whose type the catalog does not know are logged and skipped. A malformed
    /// structured parameter aborts the whole compilation.
    #[tracing::instrument(skip_all, fields(count = descriptors.map_or(0, |d| d.len())))]
    pub fn compile(
        &self,
        descriptors: Option<&[EffectDescriptor]>,
    ) -> PanoResult<Vec<PipelineStage>> {
        let Some(descriptors) = descriptors else {
            return Ok(Vec::new());
        };

        let mut stages = Vec::with_capacity(descriptors.len());
        for d in descriptors {
            let ctor = if self.catalog.has_effect(&d.effect_type) {
                self.catalog.effect_constructor(&d.effect_type)
            } else {
                None
            };
            let Some(ctor) = ctor else {
                tracing::warn!(uid = %d.uid, effect = %d.effect_type, "unknown effect type, skipping");
                continue;
            };

            let mut stage = PipelineStage {
                uid: d.uid.clone(),
                type_name: d.effect_type.clone(),
                effect: ctor(),
            };
            if let Some(surface) = stage.effect.uniforms_mut() {
                for (name, raw) in &d.params {
                    let value = parse_param_spec(raw).map_err(|e| match e {
                        PanoError::InvalidParameterSpec(msg) => PanoError::invalid_param(format!(
                            "effect '{}' param '{name}': {msg}",
                            d.uid
                        )),
                        other => other,
                    })?;
                    surface.set_uniform(name, value);
                }
            }
            stages.push(stage);
        }
        Ok(stages)
    }
}

impl fmt::Debug for EffectPipelineCompiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectPipelineCompiler")
            .field("config_uid", &self.config_uid)
            .field("sets", &self.sets.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/compiler.rs"]
mod tests;
