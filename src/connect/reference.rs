/// Operation references
///
/// A reference is a bound, not-yet-executed description of one named query or
/// mutation. Building one validates the variables against the operation's
/// declared shape; nothing here performs I/O.

use crate::connect::connector::DataConnect;
use crate::error::{MarqueeError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Query => write!(f, "query"),
            OperationKind::Mutation => write!(f, "mutation"),
        }
    }
}

/// Declared variable contract of one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableShape {
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

impl VariableShape {
    pub const NONE: VariableShape = VariableShape {
        required: &[],
        optional: &[],
    };

    /// Check a variable object; null members count as absent
    pub fn validate(&self, operation: &str, variables: Option<&Map<String, Value>>) -> Result<()> {
        let Some(variables) = variables else {
            if let Some(missing) = self.required.first() {
                return Err(MarqueeError::invalid(format!(
                    "{} requires variables (missing '{}')",
                    operation, missing
                )));
            }
            return Ok(());
        };

        for key in self.required {
            match variables.get(*key) {
                None | Some(Value::Null) => {
                    return Err(MarqueeError::invalid(format!(
                        "{} is missing required variable '{}'",
                        operation, key
                    )));
                }
                Some(_) => {}
            }
        }

        for key in variables.keys() {
            if !self.required.contains(&key.as_str()) && !self.optional.contains(&key.as_str()) {
                return Err(MarqueeError::invalid(format!(
                    "{} does not accept variable '{}'",
                    operation, key
                )));
            }
        }

        Ok(())
    }
}

/// A validated, bound operation. `D` is the payload type the executor decodes.
pub struct OperationRef<D> {
    name: &'static str,
    kind: OperationKind,
    variables: Option<Value>,
    client: Arc<DataConnect>,
    _data: PhantomData<fn() -> D>,
}

impl<D> OperationRef<D> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn variables(&self) -> Option<&Value> {
        self.variables.as_ref()
    }

    pub fn client(&self) -> &Arc<DataConnect> {
        &self.client
    }
}

impl<D> fmt::Debug for OperationRef<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("variables", &self.variables)
            .field("target", &self.client.resource_name())
            .finish()
    }
}

impl<D> PartialEq for OperationRef<D> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.variables == other.variables
            && self.client.resource_name() == other.client.resource_name()
    }
}

/// Validate `variables` against `shape` and bind them to `client`
pub fn build_ref<D, V>(
    client: &Arc<DataConnect>,
    name: &'static str,
    kind: OperationKind,
    shape: VariableShape,
    variables: Option<&V>,
) -> Result<OperationRef<D>>
where
    V: Serialize + ?Sized,
{
    client.validate()?;

    let variables = match variables {
        Some(vars) => Some(to_object(name, vars)?),
        None => None,
    };

    shape.validate(name, variables.as_ref())?;

    let variables = variables.filter(|vars| !vars.is_empty() || !shape.required.is_empty());

    client.use_generated_sdk();
    tracing::debug!("Bound {} {} to {}", kind, name, client.resource_name());

    Ok(OperationRef {
        name,
        kind,
        variables: variables.map(Value::Object),
        client: Arc::clone(client),
        _data: PhantomData,
    })
}

fn to_object<V: Serialize + ?Sized>(operation: &str, vars: &V) -> Result<Map<String, Value>> {
    match serde_json::to_value(vars)? {
        Value::Object(map) => Ok(map
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .collect()),
        Value::Null => Ok(Map::new()),
        other => Err(MarqueeError::invalid(format!(
            "{} variables must be an object, got {}",
            operation, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect::connector::DataConnectOptions;
    use serde_json::json;

    const SHAPE: VariableShape = VariableShape {
        required: &["movieId"],
        optional: &["watchedAt"],
    };

    fn client() -> Arc<DataConnect> {
        Arc::new(DataConnect::new(DataConnectOptions::new("movies-demo", "key")))
    }

    #[test]
    fn test_build_ref_binds_name_and_variables() {
        let dc = client();
        let vars = json!({ "movieId": "m1" });

        let reference: OperationRef<Value> =
            build_ref(&dc, "AddWatch", OperationKind::Mutation, SHAPE, Some(&vars)).unwrap();

        assert_eq!(reference.name(), "AddWatch");
        assert_eq!(reference.kind(), OperationKind::Mutation);
        assert_eq!(reference.variables(), Some(&vars));
        assert!(dc.is_generated_sdk());
    }

    #[test]
    fn test_missing_required_variable_is_rejected() {
        let dc = client();
        let vars = json!({ "watchedAt": "2024-01-01" });

        let result: Result<OperationRef<Value>> =
            build_ref(&dc, "AddWatch", OperationKind::Mutation, SHAPE, Some(&vars));

        assert!(matches!(result, Err(MarqueeError::InvalidArgument(_))));
        assert!(!dc.is_generated_sdk());
    }

    #[test]
    fn test_null_counts_as_missing() {
        let vars = json!({ "movieId": null });
        let result: Result<OperationRef<Value>> =
            build_ref(&client(), "AddWatch", OperationKind::Mutation, SHAPE, Some(&vars));

        assert!(result.is_err());
    }

    #[test]
    fn test_absent_variables_rejected_when_required() {
        let result: Result<OperationRef<Value>> =
            build_ref::<_, Value>(&client(), "AddWatch", OperationKind::Mutation, SHAPE, None);

        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_variable_is_rejected() {
        let vars = json!({ "movieId": "m1", "rating": 3 });
        let result: Result<OperationRef<Value>> =
            build_ref(&client(), "AddWatch", OperationKind::Mutation, SHAPE, Some(&vars));

        assert!(result.is_err());
    }

    #[test]
    fn test_non_object_variables_rejected() {
        let vars = json!(["m1"]);
        let result: Result<OperationRef<Value>> =
            build_ref(&client(), "AddWatch", OperationKind::Mutation, SHAPE, Some(&vars));

        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_client_is_rejected() {
        let dc = Arc::new(DataConnect::new(DataConnectOptions::new(" ", "key")));
        let vars = json!({ "movieId": "m1" });

        let result: Result<OperationRef<Value>> =
            build_ref(&dc, "AddWatch", OperationKind::Mutation, SHAPE, Some(&vars));

        assert!(matches!(result, Err(MarqueeError::InvalidArgument(_))));
    }

    #[test]
    fn test_references_compare_structurally() {
        let vars = json!({ "movieId": "m1" });
        let a: OperationRef<Value> =
            build_ref(&client(), "AddWatch", OperationKind::Mutation, SHAPE, Some(&vars)).unwrap();
        let b: OperationRef<Value> =
            build_ref(&client(), "AddWatch", OperationKind::Mutation, SHAPE, Some(&vars)).unwrap();

        assert_eq!(a, b);
    }
}
