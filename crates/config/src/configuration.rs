//! Immutable configuration tree

use figment::{
    providers::Serialized,
    value::{Dict, Value},
    Figment,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use types::ConfigError;

/// Keyed configuration values, populated once at startup and shared read-only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    values: Arc<Dict>,
}

impl Configuration {
    /// Wrap a value map
    pub fn from_dict(values: Dict) -> Self {
        Self {
            values: Arc::new(values),
        }
    }

    /// Build from `(key, value)` pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_dict(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Look up a value by dotted path (`features.beta`)
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.values.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Dict(_, dict) => dict.get(segment)?,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn get_u64(&self, path: &str) -> Option<u64> {
        self.get(path)
            .and_then(Value::to_u128)
            .and_then(|n| u64::try_from(n).ok())
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::to_bool)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Top-level keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_dict(&self) -> &Dict {
        &self.values
    }

    /// Take the underlying map, cloning only if it is shared
    pub fn into_dict(self) -> Dict {
        Arc::try_unwrap(self.values).unwrap_or_else(|shared| (*shared).clone())
    }

    /// Deserialize a typed view of the configuration
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        Figment::from(Serialized::defaults(self.values.as_ref()))
            .extract()
            .map_err(|e| ConfigError::Extract {
                section: short_type_name::<T>().to_string(),
                message: e.to_string(),
            })
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
