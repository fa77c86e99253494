// ABOUTME: Recursive expansion of !include tags inside a parsed YAML tree
// Included files are parsed and expanded in turn; a config_path key records the include path

use super::ConfigError;
use crate::shell::expand_path;
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Tag marking a scalar as a path to another document.
pub const INCLUDE_TAG: &str = "include";

/// Key added to every included mapping, holding the literal include path.
pub const CONFIG_PATH_KEY: &str = "config_path";

/// Deepest include chain accepted before giving up.
pub const MAX_INCLUDE_DEPTH: usize = 32;

/// Expands `!include` tags, tracking the chain of files being expanded so
/// that a file including itself (directly or not) is reported instead of
/// recursing forever.
#[derive(Debug, Default)]
pub struct IncludeResolver {
    chain: Vec<PathBuf>,
}

impl IncludeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver for a document read from `root`; including `root` again is a cycle.
    pub fn for_root(root: &Path) -> Self {
        Self {
            chain: vec![canonical(root)],
        }
    }

    pub fn resolve(&mut self, value: Value) -> Result<Value, ConfigError> {
        match value {
            Value::Tagged(tagged) if tagged.tag == INCLUDE_TAG => self.include(tagged.value),
            Value::Tagged(tagged) => {
                let TaggedValue { tag, value } = *tagged;
                let value = self.resolve(value)?;
                Ok(Value::Tagged(Box::new(TaggedValue { tag, value })))
            }
            Value::Sequence(items) => items
                .into_iter()
                .map(|item| self.resolve(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence),
            Value::Mapping(entries) => {
                let mut resolved = Mapping::with_capacity(entries.len());
                for (key, value) in entries {
                    resolved.insert(key, self.resolve(value)?);
                }
                Ok(Value::Mapping(resolved))
            }
            scalar => Ok(scalar),
        }
    }

    fn include(&mut self, target: Value) -> Result<Value, ConfigError> {
        let literal = match target {
            Value::String(path) => path,
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            _ => return Err(ConfigError::InvalidIncludeTarget),
        };
        let path = expand_path(&literal);
        debug!(include = %literal, path = %path.display(), "expanding include");

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::ConfigNotFound {
            path: path.clone(),
            source,
        })?;

        let key = canonical(&path);
        if self.chain.contains(&key) || self.chain.len() >= MAX_INCLUDE_DEPTH {
            return Err(ConfigError::IncludeCycle { path });
        }

        let parsed: Value =
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::InvalidInclude {
                path: path.clone(),
                source,
            })?;

        self.chain.push(key);
        let resolved = self.resolve(parsed);
        self.chain.pop();

        let mut fragment = resolved?;
        if let Value::Mapping(entries) = &mut fragment {
            entries.insert(
                Value::String(CONFIG_PATH_KEY.to_string()),
                Value::String(literal),
            );
        }
        Ok(fragment)
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Expand every `!include` in `value`.
pub fn resolve_includes(value: Value) -> Result<Value, ConfigError> {
    IncludeResolver::new().resolve(value)
}
