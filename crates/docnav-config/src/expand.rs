//! `${VAR}` expansion in string fields of `docnav.toml`.
//!
//! `${VAR}` requires the variable to be set; `${VAR:-default}` falls back to
//! `default`. Values without `${` pass through untouched, so literal `$` in
//! paths needs no escaping.

use crate::ConfigError;

/// Expands variable references using a pluggable lookup.
pub(crate) struct EnvExpander<F> {
    lookup: F,
}

/// Expander reading the process environment.
pub(crate) fn process_env() -> EnvExpander<impl Fn(&str) -> Option<String>> {
    EnvExpander::new(|name: &str| std::env::var(name).ok())
}

impl<F: Fn(&str) -> Option<String>> EnvExpander<F> {
    pub(crate) fn new(lookup: F) -> Self {
        Self { lookup }
    }

    /// Expand one value. `field` names the config key in error messages.
    pub(crate) fn expand(&self, value: &str, field: &str) -> Result<String, ConfigError> {
        if !value.contains("${") {
            return Ok(value.to_owned());
        }

        shellexpand::env_with_context(value, |name: &str| {
            (self.lookup)(name).map(Some).ok_or_else(|| name.to_owned())
        })
        .map(std::borrow::Cow::into_owned)
        .map_err(|err| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.cause),
        })
    }

    /// Expand every present field in place; fields keep their value on error.
    pub(crate) fn expand_fields<'f>(
        &self,
        fields: impl IntoIterator<Item = (&'static str, &'f mut Option<String>)>,
    ) -> Result<(), ConfigError> {
        for (field, value) in fields {
            if let Some(raw) = value.as_deref() {
                let expanded = self.expand(raw, field)?;
                *value = Some(expanded);
            }
        }
        Ok(())
    }
}
