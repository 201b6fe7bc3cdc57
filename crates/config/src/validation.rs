//! Schema validation
//!
//! Fields are checked in declaration order and validation stops at the first
//! violation. Keys the schema does not declare are passed through untouched.

use crate::{
    configuration::Configuration,
    schema::{Field, FieldKind, Schema},
};
use figment::value::{Num, Value};
use types::ConfigError;

/// Configuration validator
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validate `config` against `schema`, returning it with defaults applied
    /// and values coerced to their declared types
    pub fn validate(config: Configuration, schema: &Schema) -> Result<Configuration, ConfigError> {
        let mut values = config.into_dict();

        for field in schema.fields() {
            let present = values.get(field.key).filter(|v| !is_blank(v));

            let resolved = match present {
                Some(value) => Some(Self::check_field(field, value)?),
                None if field.default.is_some() => field.default.clone(),
                None if field.required => {
                    return Err(ConfigError::MissingField {
                        field: field.key.to_string(),
                    })
                }
                None => None,
            };

            match resolved {
                Some(value) => {
                    values.insert(field.key.to_string(), value);
                }
                None => {
                    values.remove(field.key);
                }
            }
        }

        Ok(Configuration::from_dict(values))
    }

    fn check_field(field: &Field, value: &Value) -> Result<Value, ConfigError> {
        let coerced = Self::coerce(field, value)?;

        if let Some(allowed) = &field.allowed {
            match as_text(&coerced) {
                Some(text) if allowed.contains(&text.as_str()) => {}
                _ => {
                    return Err(ConfigError::NotAllowed {
                        field: field.key.to_string(),
                        value: as_text(&coerced).unwrap_or_else(|| describe(&coerced).to_string()),
                        allowed: allowed.join(", "),
                    })
                }
            }
        }

        Ok(coerced)
    }

    fn coerce(field: &Field, value: &Value) -> Result<Value, ConfigError> {
        let invalid_type = || ConfigError::InvalidType {
            field: field.key.to_string(),
            expected: field.kind.name().to_string(),
            found: describe(value).to_string(),
        };

        match &field.kind {
            FieldKind::String { min_len } => {
                let text = as_text(value).ok_or_else(invalid_type)?;
                if text.chars().count() < *min_len {
                    return Err(ConfigError::InvalidValue {
                        field: field.key.to_string(),
                        value: format!("'{}' is shorter than {} characters", text, min_len),
                    });
                }
                Ok(Value::from(text))
            }
            FieldKind::Integer { min, max } => {
                let number = as_integer(value).ok_or_else(invalid_type)?;
                check_range(field, number, *min, *max)?;
                Ok(integer_value(number))
            }
            FieldKind::Port => {
                let number = as_integer(value).ok_or_else(invalid_type)?;
                check_range(field, number, 1, i128::from(u16::MAX))?;
                Ok(integer_value(number))
            }
            FieldKind::Boolean => as_bool(value).map(Value::from).ok_or_else(invalid_type),
            FieldKind::Url { schemes } => {
                let text = as_text(value).ok_or_else(invalid_type)?;
                let valid = match text.split_once("://") {
                    Some((scheme, rest)) => {
                        schemes.contains(&scheme.to_ascii_lowercase().as_str())
                            && !rest.is_empty()
                            && !rest.starts_with('/')
                    }
                    None => false,
                };
                if !valid {
                    return Err(ConfigError::InvalidValue {
                        field: field.key.to_string(),
                        value: format!("'{}' is not a {} URL", text, schemes.join("/")),
                    });
                }
                Ok(Value::from(text))
            }
        }
    }
}

fn check_range(field: &Field, value: i128, min: i128, max: i128) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field: field.key.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn integer_value(number: i128) -> Value {
    match u64::try_from(number) {
        Ok(unsigned) => Value::from(unsigned),
        Err(_) => Value::from(number as i64),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::String(_, s) => s.trim().is_empty(),
        Value::Empty(..) => true,
        _ => false,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::String(..) => "string",
        Value::Char(..) => "char",
        Value::Bool(..) => "boolean",
        Value::Num(..) => "number",
        Value::Empty(..) => "empty",
        Value::Dict(..) => "map",
        Value::Array(..) => "array",
    }
}

fn num_to_text(num: &Num) -> Option<String> {
    num.to_u128()
        .map(|n| n.to_string())
        .or_else(|| num.to_i128().map(|n| n.to_string()))
        .or_else(|| num.to_f64().map(|n| n.to_string()))
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(_, s) => Some(s.clone()),
        Value::Char(_, c) => Some(c.to_string()),
        Value::Bool(_, b) => Some(b.to_string()),
        Value::Num(_, n) => num_to_text(n),
        _ => None,
    }
}

fn as_integer(value: &Value) -> Option<i128> {
    match value {
        Value::Num(_, n) => n.to_i128().or_else(|| n.to_u128().and_then(|u| i128::try_from(u).ok())),
        Value::String(_, s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(_, b) => Some(*b),
        Value::String(_, s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
        Value::Num(_, n) => match n.to_u128() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{application, Field};

    const CONTRACT: &str = "CDLZFC3SYJYDZT7K67VZ75HPJVIEUVNIXF47ZG2FB2RMQQVU2HHGCYSC";

    fn valid_pairs() -> Vec<(&'static str, Value)> {
        vec![
            ("soroban_rpc_url", Value::from("https://soroban-testnet.stellar.org")),
            ("contract_id", Value::from(CONTRACT)),
        ]
    }

    #[test]
    fn test_defaults_applied() {
        let config = SchemaValidator::validate(Configuration::from_pairs(valid_pairs()), &application()).unwrap();
        assert_eq!(config.get_str("app_env"), Some("development"));
        assert_eq!(config.get_u64("port"), Some(3000));
        assert_eq!(config.get_bool("cors_enabled"), Some(true));
        assert_eq!(config.get_str("stellar_network"), Some("testnet"));
        assert!(!config.contains("network_passphrase"));
    }

    #[test]
    fn test_missing_required_key() {
        let config = Configuration::from_pairs([("contract_id", Value::from(CONTRACT))]);
        let err = SchemaValidator::validate(config, &application()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingField {
                field: "soroban_rpc_url".to_string()
            }
        );
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut pairs = valid_pairs();
        pairs.push(("contract_id", Value::from("   ")));
        let err = SchemaValidator::validate(Configuration::from_pairs(pairs), &application()).unwrap_err();
        assert_eq!(err.field(), Some("contract_id"));
        assert!(matches!(err, ConfigError::MissingField { .. }));

        let mut pairs = valid_pairs();
        pairs.push(("port", Value::from("")));
        let config = SchemaValidator::validate(Configuration::from_pairs(pairs), &application()).unwrap();
        assert_eq!(config.get_u64("port"), Some(3000));
    }

    #[test]
    fn test_abort_early_reports_first_violation_only() {
        // port, request timeout and the required RPC URL are all wrong; only port is reported
        let config = Configuration::from_pairs([
            ("port", Value::from("not-a-port")),
            ("request_timeout_seconds", Value::from(0u64)),
            ("contract_id", Value::from(CONTRACT)),
        ]);
        let err = SchemaValidator::validate(config, &application()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidType {
                field: "port".to_string(),
                expected: "port".to_string(),
                found: "string".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let mut pairs = valid_pairs();
        pairs.push(("app_env", Value::from("production")));
        pairs.push(("port", Value::from(8080u64)));
        pairs.push(("host", Value::from("127.0.0.1")));
        pairs.push(("request_timeout_seconds", Value::from(30u64)));
        pairs.push(("cors_enabled", Value::from(false)));
        pairs.push(("stellar_network", Value::from("mainnet")));
        pairs.push(("blockchain_timeout_seconds", Value::from(10u64)));
        pairs.push(("blockchain_verify_on_startup", Value::from(false)));
        pairs.push(("some_unrelated_flag", Value::from("keep me")));
        pairs.push(("another_unknown", Value::from(42u64)));

        let input = Configuration::from_pairs(pairs);
        let output = SchemaValidator::validate(input.clone(), &application()).unwrap();
        assert_eq!(output, input);
        assert_eq!(output.get_str("some_unrelated_flag"), Some("keep me"));
    }

    #[test]
    fn test_string_coercion_to_declared_types() {
        let mut pairs = valid_pairs();
        pairs.push(("port", Value::from("8080")));
        pairs.push(("cors_enabled", Value::from("false")));
        pairs.push(("blockchain_verify_on_startup", Value::from("yes")));
        let config = SchemaValidator::validate(Configuration::from_pairs(pairs), &application()).unwrap();
        assert_eq!(config.get_u64("port"), Some(8080));
        assert_eq!(config.get_bool("cors_enabled"), Some(false));
        assert_eq!(config.get_bool("blockchain_verify_on_startup"), Some(true));
    }

    #[test]
    fn test_allowed_values() {
        let mut pairs = valid_pairs();
        pairs.push(("app_env", Value::from("staging")));
        let err = SchemaValidator::validate(Configuration::from_pairs(pairs), &application()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotAllowed {
                field: "app_env".to_string(),
                value: "staging".to_string(),
                allowed: "development, production, test".to_string(),
            }
        );
    }

    #[test]
    fn test_range_checks() {
        let mut pairs = valid_pairs();
        pairs.push(("port", Value::from(70000u64)));
        let err = SchemaValidator::validate(Configuration::from_pairs(pairs), &application()).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { ref field, value: 70000, .. } if field == "port"));

        let mut pairs = valid_pairs();
        pairs.push(("blockchain_timeout_seconds", Value::from("121")));
        let err = SchemaValidator::validate(Configuration::from_pairs(pairs), &application()).unwrap_err();
        assert_eq!(err.field(), Some("blockchain_timeout_seconds"));
    }

    #[test]
    fn test_url_scheme() {
        let config = Configuration::from_pairs([
            ("soroban_rpc_url", Value::from("ftp://soroban.example")),
            ("contract_id", Value::from(CONTRACT)),
        ]);
        let err = SchemaValidator::validate(config, &application()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "soroban_rpc_url"));

        let config = Configuration::from_pairs([
            ("soroban_rpc_url", Value::from("https://")),
            ("contract_id", Value::from(CONTRACT)),
        ]);
        assert!(SchemaValidator::validate(config, &application()).is_err());
    }

    #[test]
    fn test_numbers_coerced_to_strings() {
        let schema = Schema::new().field(Field::string("service_tag").min_len(2));
        let config = SchemaValidator::validate(
            Configuration::from_pairs([("service_tag", Value::from(42u64))]),
            &schema,
        )
        .unwrap();
        assert_eq!(config.get_str("service_tag"), Some("42"));

        let err = SchemaValidator::validate(
            Configuration::from_pairs([("service_tag", Value::from(7u64))]),
            &schema,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_nested_maps_rejected_for_scalar_fields() {
        let mut nested = figment::value::Dict::new();
        nested.insert("inner".to_string(), Value::from(1u64));
        let config = Configuration::from_pairs([
            ("port", Value::from(nested)),
            ("soroban_rpc_url", Value::from("https://rpc.example")),
            ("contract_id", Value::from(CONTRACT)),
        ]);
        let err = SchemaValidator::validate(config, &application()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidType { ref found, .. } if found == "map"));
    }
}
