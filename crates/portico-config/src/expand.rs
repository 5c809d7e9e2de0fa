//! `${VAR}` references in configuration strings.
//!
//! A reference without a fallback must resolve. `${VAR:-fallback}` uses the
//! fallback when `VAR` is unset. Values without `${` are kept as written, so
//! a lone `$` in a logo path or head attribute survives untouched.

use std::env::VarError;

use crate::ConfigError;

/// Where variable values come from during expansion.
pub(crate) trait VarSource {
    fn var(&self, name: &str) -> Result<String, VarError>;
}

/// The process environment.
pub(crate) struct ProcessEnv;

impl VarSource for ProcessEnv {
    fn var(&self, name: &str) -> Result<String, VarError> {
        std::env::var(name)
    }
}

/// Expand references in `value` in place.
///
/// `field` names the config location (e.g. `sidebar[1].dir`) and is only
/// built when expansion fails.
pub(crate) fn expand_field(
    value: &mut String,
    field: impl FnOnce() -> String,
    vars: &impl VarSource,
) -> Result<(), ConfigError> {
    if !value.contains("${") {
        return Ok(());
    }

    let expanded = shellexpand::env_with_context(value.as_str(), |name| vars.var(name).map(Some))
        .map_err(|err| ConfigError::EnvVar {
            field: field(),
            message: match err.cause {
                VarError::NotPresent => format!("${{{}}} not set", err.var_name),
                VarError::NotUnicode(_) => format!("${{{}}} is not valid UTF-8", err.var_name),
            },
        })?
        .into_owned();
    *value = expanded;
    Ok(())
}
