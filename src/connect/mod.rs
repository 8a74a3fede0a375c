/// Firebase Data Connect client for the movie connector
///
/// Builders validate and bind operation variables; executors perform the
/// network round trip and decode typed payloads.

mod connector;
mod executor;
pub mod operations;
mod reference;
pub mod types;

pub use connector::{ConnectorConfig, DataConnect, DataConnectOptions, CONNECTOR_CONFIG, PRODUCTION_ORIGIN};
pub use executor::{execute_mutation, execute_query, execute_ref, DataSource, OperationResult};
pub use operations::{operation_spec, OperationSpec, OPERATIONS};
pub use reference::{build_ref, OperationKind, OperationRef, VariableShape};
