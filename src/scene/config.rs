use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{PanoError, PanoResult};
use crate::scene::model::{FxConfig, MediaDescriptor, MediaType};

fn open_json(path: &Path, what: &str) -> PanoResult<BufReader<File>> {
    let f = File::open(path).map_err(|e| {
        PanoError::validation(format!("open {what} JSON '{}': {e}", path.display()))
    })?;
    Ok(BufReader::new(f))
}

impl MediaDescriptor {
    /// Parse a media descriptor from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PanoResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PanoError::serde(format!("parse media descriptor JSON: {e}")))
    }

    /// Parse a media descriptor from a JSON string.
    pub fn from_json_str(s: &str) -> PanoResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| PanoError::serde(format!("parse media descriptor JSON: {e}")))
    }

    /// Parse a media descriptor from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PanoResult<Self> {
        Self::from_reader(open_json(path.as_ref(), "media descriptor")?)
    }

    /// Structural checks an author would want before handing the descriptor to a resolver.
    ///
    /// The resolver itself does not call this: a missing source only leaves it unresolved.
    pub fn validate(&self) -> PanoResult<()> {
        if self.uid.trim().is_empty() {
            return Err(PanoError::validation("media uid must be non-empty"));
        }
        let needs_source = !matches!(self.media_type, MediaType::Grid | MediaType::Undefined);
        let Some(src) = &self.source else {
            if needs_source {
                return Err(PanoError::validation(format!(
                    "media '{}' of type {:?} requires a source",
                    self.uid, self.media_type
                )));
            }
            return Ok(());
        };
        if let Some(levels) = &src.levels {
            if let Some(i) = levels.iter().position(|l| l.url.is_empty()) {
                return Err(PanoError::validation(format!(
                    "media '{}' level {i} has an empty url",
                    self.uid
                )));
            }
        }
        if let Some(v) = self.options.volume {
            if !v.is_finite() || v < 0.0 {
                return Err(PanoError::validation(format!(
                    "media '{}' volume must be finite and >= 0",
                    self.uid
                )));
            }
        }
        if let Some(t) = self.options.start_time {
            if !t.is_finite() || t < 0.0 {
                return Err(PanoError::validation(format!(
                    "media '{}' startTime must be finite and >= 0",
                    self.uid
                )));
            }
        }
        Ok(())
    }
}

impl FxConfig {
    /// Parse an effect configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PanoResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PanoError::serde(format!("parse fx config JSON: {e}")))
    }

    /// Parse an effect configuration from a JSON string.
    pub fn from_json_str(s: &str) -> PanoResult<Self> {
        serde_json::from_str(s).map_err(|e| PanoError::serde(format!("parse fx config JSON: {e}")))
    }

    /// Parse an effect configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PanoResult<Self> {
        Self::from_reader(open_json(path.as_ref(), "fx config")?)
    }

    /// Check uids are present. Duplicate set uids are allowed; the later set wins on registration.
    pub fn validate(&self) -> PanoResult<()> {
        if self.uid.trim().is_empty() {
            return Err(PanoError::validation("fx config uid must be non-empty"));
        }
        for set in &self.fx_sets {
            if set.uid.trim().is_empty() {
                return Err(PanoError::validation(format!(
                    "fx config '{}' has a set with an empty uid",
                    self.uid
                )));
            }
            let mut seen = BTreeSet::new();
            for d in &set.set {
                if d.effect_type.trim().is_empty() {
                    return Err(PanoError::validation(format!(
                        "effect '{}' in set '{}' has an empty type",
                        d.uid, set.uid
                    )));
                }
                if !seen.insert(d.uid.as_str()) {
                    return Err(PanoError::validation(format!(
                        "set '{}' declares effect uid '{}' twice",
                        set.uid, d.uid
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
