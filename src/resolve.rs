//! Source/destination path selection with validation and remembering

use anyhow::Result;
use std::path::Path;

use crate::bridge::{exists_in_output, Bridge, BridgeCommand};
use crate::error::ValidationError;
use crate::listing::Side;
use crate::prompt::Prompter;
use crate::store::PathStore;

pub const MANUAL_ENTRY: &str = "+ Enter path manually";

pub struct PathResolver<'a> {
    prompter: &'a mut dyn Prompter,
    bridge: &'a dyn Bridge,
    store: &'a PathStore,
}

impl<'a> PathResolver<'a> {
    pub fn new(
        prompter: &'a mut dyn Prompter,
        bridge: &'a dyn Bridge,
        store: &'a PathStore,
    ) -> Self {
        Self {
            prompter,
            bridge,
            store,
        }
    }

    /// Pick a remembered path or enter one. `Ok(None)` means cancelled or invalid.
    pub fn resolve(&mut self, side: Side) -> Result<Option<String>> {
        let remembered = self.store.load()?;
        let paths = remembered.paths(side);
        if paths.is_empty() {
            return self.manual_entry(side);
        }

        let mut options: Vec<String> = paths.to_vec();
        options.push(MANUAL_ENTRY.to_string());
        let message = format!("Select {} path:", side.label());
        match self.prompter.select(&message, &options)? {
            None => Ok(None),
            Some(i) if i == paths.len() => self.manual_entry(side),
            Some(i) => Ok(Some(options[i].clone())),
        }
    }

    fn manual_entry(&mut self, side: Side) -> Result<Option<String>> {
        let message = format!("Enter {} path:", side.label());
        let path = match self.prompter.text(&message, side.placeholder())? {
            Some(p) => p,
            None => return Ok(None),
        };

        if let Err(e) = self.validate(side, &path) {
            self.prompter.warn(&e.to_string());
            return Ok(None);
        }

        if let Some(true) = self.prompter.confirm("Save this path for future use?", true)? {
            self.store.remember(side, &path)?;
        }
        Ok(Some(path))
    }

    /// Check that `path` exists on `side`. The device test runs exactly once.
    pub fn validate(&self, side: Side, path: &str) -> Result<(), ValidationError> {
        let exists = match side {
            Side::Pc => Path::new(path).exists(),
            Side::Device => match self.bridge.run(&BridgeCommand::Exists(path.to_string())) {
                Ok(stdout) => exists_in_output(&stdout),
                Err(e) => {
                    log::debug!("existence check for {} failed: {}", path, e);
                    false
                }
            },
        };
        if exists {
            Ok(())
        } else {
            Err(ValidationError::NotFound(path.to_string()))
        }
    }
}
