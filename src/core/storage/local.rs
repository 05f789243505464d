//! Local backend.
//!
//! Environments live in the `[local.environments]` table of the config file
//! and are persisted when the config is saved.

use std::collections::BTreeMap;

use super::Storage;
use crate::core::types::{EnvName, Variables};
use crate::core::validation::validate_vars;
use crate::error::{Result, StoreError};

/// Environments stored in the config file.
pub struct Local<'a> {
    environments: &'a mut BTreeMap<EnvName, Variables>,
}

impl<'a> Local<'a> {
    pub fn new(environments: &'a mut BTreeMap<EnvName, Variables>) -> Self {
        Self { environments }
    }

    fn env(&self, name: &str) -> Result<&Variables> {
        self.environments
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()).into())
    }
}

impl Storage for Local<'_> {
    fn list(&self, name: &str) -> Result<Vec<String>> {
        if name.is_empty() {
            return Ok(self.environments.keys().cloned().collect());
        }
        Ok(self.env(name)?.keys().cloned().collect())
    }

    fn get(&self, name: &str) -> Result<Variables> {
        self.env(name).cloned()
    }

    fn update(&mut self, name: &str, vars: &Variables) -> Result<()> {
        validate_vars(vars)?;
        let env = self.environments.entry(name.to_string()).or_default();
        env.extend(vars.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    fn delete(&mut self, name: &str, vars: &[String]) -> Result<()> {
        if vars.is_empty() {
            return self
                .environments
                .remove(name)
                .map(|_| ())
                .ok_or_else(|| StoreError::NotFound(name.to_string()).into());
        }

        let env = self
            .environments
            .get_mut(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        for var in vars {
            env.remove(var);
        }
        Ok(())
    }

    fn clean_up(&mut self) -> Result<()> {
        self.environments.clear();
        Ok(())
    }
}
