pub mod call_map;
pub mod cli;
pub mod config;
pub mod error;
pub mod fallback;
pub mod function;
pub mod ledger;
pub mod logging;
pub mod metadata;
pub mod original;
pub mod program;
pub mod proxy;
pub mod scenario;
pub mod ui;
pub mod value;
use miette::Diagnostic;

pub use call_map::{CallMap, CallMapSpec, Mapping, ProgramSlot};
pub use error::{Action, ConfigError};
pub use function::FunctionProxy;
pub use ledger::{InvocationLedger, MissingInvocation};
pub use metadata::{MemberInfo, MemberMetadata, ReturnKind, TargetSignature};
pub use original::{OriginalImpl, OriginalInvoker};
pub use program::{on_consecutive_calls, throws, Behavior};
pub use proxy::{Proxy, ReceivedArguments};
pub use value::{Failure, Returned, Value, ABSENT};

/// Result type alias for callmap
pub type Result<T, E = CallMapError> = std::result::Result<T, E>;

/// Error types for callmap
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum CallMapError {
    #[error(transparent)]
    #[diagnostic(
        code(callmap::invalid_configuration),
        help("Check the member name against the target's declared members. Final members and constructors cannot be mapped.")
    )]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(
        code(callmap::missing_invocation),
        help("Invocations are counted from 1 per member. Query `calls_received_for` to see how often the member was called.")
    )]
    MissingInvocation(#[from] MissingInvocation),

    #[error("Scenario error: {0}")]
    #[diagnostic(
        code(callmap::scenario_error),
        help("Scenario files are TOML with a [target] table, optional [original] and [calls] tables, and [[steps]].")
    )]
    Scenario(String),

    #[error("File operation failed: {0}")]
    #[diagnostic(
        code(callmap::file_error),
        help("Check if you have necessary permissions and that the path exists.")
    )]
    FileError(String),
}
