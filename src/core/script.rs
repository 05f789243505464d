//! Shell scripts that load an environment into the current shell.
//!
//! `envman load dev` writes `loadenv_dev.sh` on Unix, and `loadenv_dev.bat`
//! plus `loadenv_dev.ps1` on Windows, into the working directory. The user
//! then sources the script. Values are quoted for the target shell so that
//! spaces and quotes survive. Names are written unquoted and must pass
//! [`validate_key`], otherwise nothing is written.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::types::Variables;
use crate::core::validation::validate_key;
use crate::error::Result;

/// Script dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    /// POSIX `sh`
    Sh,
    /// Windows `cmd.exe`
    Batch,
    PowerShell,
}

impl ScriptKind {
    /// Scripts written on the current platform.
    pub fn native() -> &'static [ScriptKind] {
        if cfg!(windows) {
            &[ScriptKind::Batch, ScriptKind::PowerShell]
        } else {
            &[ScriptKind::Sh]
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ScriptKind::Sh => "sh",
            ScriptKind::Batch => "bat",
            ScriptKind::PowerShell => "ps1",
        }
    }

    /// `loadenv_<env>.<ext>`
    pub fn file_name(self, env: &str) -> String {
        format!("{}{}.{}", constants::SCRIPT_PREFIX, env, self.extension())
    }

    /// Script body setting every variable, keys in sorted order.
    ///
    /// # Errors
    ///
    /// `Error::Validation` when a name isn't a plain identifier.
    pub fn render(self, vars: &Variables) -> Result<String> {
        let mut out = String::new();
        if self == ScriptKind::Batch {
            out.push_str("@echo off\r\n");
        }

        for (key, value) in vars {
            validate_key(key)?;
            let line = match self {
                ScriptKind::Sh => format!("export {}={}\n", key, sh_quote(value)),
                ScriptKind::Batch => format!("SET \"{}={}\"\r\n", key, value.replace('%', "%%")),
                ScriptKind::PowerShell => {
                    format!("$env:{}='{}'\n", key, value.replace('\'', "''"))
                }
            };
            out.push_str(&line);
        }
        Ok(out)
    }
}

/// Single-quote for `sh`, closing and reopening around embedded quotes.
fn sh_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Write the scripts for `env` into `dir`, overwriting existing ones.
///
/// Returns the paths written.
pub fn write_scripts(dir: &Path, env: &str, vars: &Variables) -> Result<Vec<PathBuf>> {
    write_kinds(dir, env, vars, ScriptKind::native())
}

/// Write scripts of the given kinds. Nothing is written unless every kind
/// renders.
pub fn write_kinds(
    dir: &Path,
    env: &str,
    vars: &Variables,
    kinds: &[ScriptKind],
) -> Result<Vec<PathBuf>> {
    let rendered = kinds
        .iter()
        .map(|&kind| -> Result<(ScriptKind, String)> { Ok((kind, kind.render(vars)?)) })
        .collect::<Result<Vec<_>>>()?;

    rendered
        .into_iter()
        .map(|(kind, body)| -> Result<PathBuf> {
            let path = dir.join(kind.file_name(env));
            fs::write(&path, body)?;
            debug!(path = %path.display(), vars = vars.len(), "wrote load script");
            Ok(path)
        })
        .collect()
}
