//! Configuration schema definitions

use figment::value::{Dict, Value};
use types::StellarNetwork;

/// Expected type of a configuration value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// UTF-8 string with a minimum length in characters
    String { min_len: usize },
    /// Signed integer within inclusive bounds
    Integer { min: i128, max: i128 },
    /// TCP port, 1..=65535
    Port,
    Boolean,
    /// Absolute URL with one of the listed schemes
    Url { schemes: Vec<&'static str> },
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String { .. } => "string",
            FieldKind::Integer { .. } => "integer",
            FieldKind::Port => "port",
            FieldKind::Boolean => "boolean",
            FieldKind::Url { .. } => "url",
        }
    }
}

/// A single declared configuration key
#[derive(Debug, Clone)]
pub struct Field {
    /// Lowercase key, also the environment variable name when uppercased
    pub key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Value inserted when the key is absent
    pub default: Option<Value>,
    /// Allowed values, compared after coercion
    pub allowed: Option<Vec<&'static str>>,
    /// Placeholder written to example configuration files
    pub example: Option<Value>,
}

impl Field {
    fn new(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            kind,
            required: false,
            default: None,
            allowed: None,
            example: None,
        }
    }

    pub fn string(key: &'static str) -> Self {
        Self::new(key, FieldKind::String { min_len: 0 })
    }

    pub fn integer(key: &'static str, min: i128, max: i128) -> Self {
        Self::new(key, FieldKind::Integer { min, max })
    }

    pub fn port(key: &'static str) -> Self {
        Self::new(key, FieldKind::Port)
    }

    pub fn boolean(key: &'static str) -> Self {
        Self::new(key, FieldKind::Boolean)
    }

    pub fn url(key: &'static str, schemes: &[&'static str]) -> Self {
        Self::new(
            key,
            FieldKind::Url {
                schemes: schemes.to_vec(),
            },
        )
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn one_of(mut self, allowed: &[&'static str]) -> Self {
        self.allowed = Some(allowed.to_vec());
        self
    }

    pub fn min_len(mut self, min_len: usize) -> Self {
        if let FieldKind::String { min_len: ref mut current } = self.kind {
            *current = min_len;
        }
        self
    }

    pub fn example(mut self, value: impl Into<Value>) -> Self {
        self.example = Some(value.into());
        self
    }

    /// Environment variable the key is read from
    pub fn env_var(&self) -> String {
        self.key.to_ascii_uppercase()
    }
}

/// Ordered set of declared fields. Declaration order is validation order.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. A later declaration of the same key replaces the earlier one.
    pub fn field(mut self, field: Field) -> Self {
        match self.fields.iter_mut().find(|f| f.key == field.key) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Defaults and examples of every field, for example files
    pub fn example_values(&self) -> Dict {
        self.fields
            .iter()
            .filter_map(|f| {
                f.default
                    .clone()
                    .or_else(|| f.example.clone())
                    .map(|v| (f.key.to_string(), v))
            })
            .collect()
    }
}

/// Schema of the Nestera API process environment
pub fn application() -> Schema {
    Schema::new()
        .field(
            Field::string("app_env")
                .one_of(&["development", "production", "test"])
                .default("development"),
        )
        .field(Field::string("host").min_len(1).default("0.0.0.0"))
        .field(Field::port("port").default(3000u64))
        .field(Field::integer("request_timeout_seconds", 1, 300).default(30u64))
        .field(Field::boolean("cors_enabled").default(true))
        .field(
            Field::string("stellar_network")
                .one_of(&StellarNetwork::NAMES)
                .default("testnet"),
        )
        .field(
            Field::url("soroban_rpc_url", &["http", "https"])
                .required()
                .example("https://soroban-testnet.stellar.org"),
        )
        .field(
            Field::string("contract_id")
                .min_len(1)
                .required()
                .example("CDLZFC3SYJYDZT7K67VZ75HPJVIEUVNIXF47ZG2FB2RMQQVU2HHGCYSC"),
        )
        .field(Field::string("network_passphrase").min_len(1))
        .field(Field::integer("blockchain_timeout_seconds", 1, 120).default(10u64))
        .field(Field::boolean("blockchain_verify_on_startup").default(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_schema_order() {
        let schema = application();
        let keys: Vec<_> = schema.keys().collect();
        assert_eq!(keys.first(), Some(&"app_env"));
        assert!(keys.contains(&"soroban_rpc_url"));
        assert!(keys.contains(&"contract_id"));

        let required: Vec<_> = schema
            .fields()
            .iter()
            .filter(|f| f.required)
            .map(|f| f.key)
            .collect();
        assert_eq!(required, vec!["soroban_rpc_url", "contract_id"]);
    }

    #[test]
    fn test_field_redeclaration_replaces() {
        let schema = Schema::new()
            .field(Field::port("port").default(3000u64))
            .field(Field::port("port").required());
        assert_eq!(schema.len(), 1);
        assert!(schema.get("port").unwrap().required);
        assert!(schema.get("port").unwrap().default.is_none());
    }

    #[test]
    fn test_env_var_names() {
        assert_eq!(Field::url("soroban_rpc_url", &["https"]).env_var(), "SOROBAN_RPC_URL");
    }

    #[test]
    fn test_example_values_cover_required_fields() {
        let schema = application();
        let example = schema.example_values();
        for field in schema.fields().iter().filter(|f| f.required) {
            assert!(example.contains_key(field.key), "missing example for {}", field.key);
        }
        assert!(!example.contains_key("network_passphrase"));
    }
}
