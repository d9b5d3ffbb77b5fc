//! Dispatch of a submitted line to a registered command.
//!
//! The dispatcher never lets an error escape unclassified: every line maps to
//! exactly one [`DispatchOutcome`], including executor failures and panics.

use std::any::{self, Any};
use std::error::Error as StdError;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::completion::DEFAULT_MARKER;
use crate::config::ConfigError;
use crate::context::ExecutionContext;
use crate::output::CommandOutput;
use crate::paths::PathError;
use crate::processor::ProcessError;
use crate::registry::CommandRegistry;
use crate::tokenize::{TokenizeError, split_args};

/// Command names that end the interactive session instead of executing.
pub const TERMINATION_COMMANDS: [&str; 2] = ["quit", "exit"];

/// Failure raised by an [`Executor`].
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The command's own argument parser rejected the arguments.
    #[error("{0}")]
    Usage(String),

    /// The command ran and failed.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// Business-logic port: runs one resolved command with its argument tokens.
#[cfg_attr(test, mockall::automock)]
pub trait Executor {
    fn execute(
        &self,
        name: &str,
        args: &[String],
        ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, ExecutorError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The line could not be split into tokens (unbalanced quotes).
    MalformedInput,
    /// Argument parsing failed.
    InvalidArguments,
    /// The command returned an error.
    Failed,
    /// The command panicked.
    Panicked,
}

/// Classified cause of a failed command, kept whole for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionFailure {
    pub kind: FailureKind,
    /// Outermost message, suitable for the user.
    pub message: String,
    /// Underlying causes, outermost first.
    pub causes: Vec<String>,
    /// Type name of the first recognised error in the chain, `"usage"` for
    /// argument errors or `"panic"` for a caught panic.
    pub cause_type: &'static str,
}

impl ExecutionFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        let cause_type = match kind {
            FailureKind::MalformedInput => any::type_name::<TokenizeError>(),
            FailureKind::InvalidArguments => "usage",
            FailureKind::Failed => any::type_name::<anyhow::Error>(),
            FailureKind::Panicked => "panic",
        };
        Self {
            kind,
            message: message.into(),
            causes: Vec::new(),
            cause_type,
        }
    }

    fn from_executor_error(err: &ExecutorError) -> Self {
        match err {
            ExecutorError::Usage(msg) => Self::new(FailureKind::InvalidArguments, msg.trim_end()),
            ExecutorError::Failed(inner) => Self {
                kind: FailureKind::Failed,
                message: inner.to_string(),
                causes: inner.chain().skip(1).map(ToString::to_string).collect(),
                cause_type: cause_type_name(inner),
            },
        }
    }

    fn from_panic(payload: &(dyn Any + Send)) -> Self {
        Self::new(
            FailureKind::Panicked,
            format!("internal error: {}", panic_message(payload)),
        )
    }

    /// Message followed by the full cause chain.
    pub fn detail(&self) -> String {
        let mut detail = self.message.clone();
        for cause in &self.causes {
            detail.push_str(": ");
            detail.push_str(cause);
        }
        detail
    }
}

impl fmt::Display for ExecutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Name the outermost error in the chain whose type the core knows about.
///
/// Context layers added with `anyhow::Context` are skipped over.
fn cause_type_name(err: &anyhow::Error) -> &'static str {
    fn named<T: StdError + 'static>(err: &(dyn StdError + 'static)) -> Option<&'static str> {
        err.is::<T>().then(any::type_name::<T>)
    }

    err.chain()
        .find_map(|cause| {
            named::<ConfigError>(cause)
                .or_else(|| named::<ProcessError>(cause))
                .or_else(|| named::<PathError>(cause))
                .or_else(|| named::<std::io::Error>(cause))
        })
        .unwrap_or_else(any::type_name::<anyhow::Error>)
}

/// Classified result of dispatching one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Success(CommandOutput),
    /// The line lacks the marker; carries the original text verbatim.
    NotACommand(String),
    /// Marker only (or marker plus whitespace). A silent no-op.
    EmptyCommand,
    UnknownCommand(String),
    CommandExecutionFailed {
        name: String,
        failure: ExecutionFailure,
    },
    SessionTerminationRequested,
}

pub struct Dispatcher<E> {
    registry: Arc<CommandRegistry>,
    executor: E,
    marker: char,
}

impl<E: Executor> Dispatcher<E> {
    pub fn new(registry: Arc<CommandRegistry>, executor: E) -> Self {
        Self {
            registry,
            executor,
            marker: DEFAULT_MARKER,
        }
    }

    #[must_use]
    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    pub fn dispatch(&self, line: &str, ctx: &mut ExecutionContext) -> DispatchOutcome {
        let Some(body) = line.strip_prefix(self.marker) else {
            return DispatchOutcome::NotACommand(line.to_string());
        };

        let body = body.trim();
        if body.is_empty() {
            return DispatchOutcome::EmptyCommand;
        }

        let mut tokens = match split_args(body) {
            Ok(tokens) => tokens,
            Err(err) => {
                let name = body.split_whitespace().next().unwrap_or(body).to_string();
                let failure = ExecutionFailure::new(FailureKind::MalformedInput, err.to_string());
                error!(command = %name, cause = %failure.detail(), "Could not parse command line");
                return DispatchOutcome::CommandExecutionFailed { name, failure };
            }
        };
        if tokens.is_empty() {
            return DispatchOutcome::EmptyCommand;
        }
        let name = tokens.remove(0);

        if TERMINATION_COMMANDS.contains(&name.as_str()) {
            info!(command = %name, "Session termination requested");
            return DispatchOutcome::SessionTerminationRequested;
        }

        if self.registry.resolve(&name).is_err() {
            warn!(command = %name, "Unknown command");
            return DispatchOutcome::UnknownCommand(name);
        }

        debug!(command = %name, args = ?tokens, "Dispatching command");
        let result = run_contained(|| self.executor.execute(&name, &tokens, ctx));

        let failure = match result {
            Ok(Ok(output)) => return DispatchOutcome::Success(output),
            Ok(Err(err)) => ExecutionFailure::from_executor_error(&err),
            Err(payload) => ExecutionFailure::from_panic(payload.as_ref()),
        };
        error!(
            command = %name,
            kind = ?failure.kind,
            cause_type = failure.cause_type,
            cause = %failure.detail(),
            "Command execution failed"
        );
        DispatchOutcome::CommandExecutionFailed { name, failure }
    }
}

/// Serializes panic hook swaps; the hook is process-global.
static PANIC_HOOK_LOCK: Mutex<()> = Mutex::new(());

/// Run `f`, catching a panic instead of unwinding past the caller.
///
/// While `f` runs the process panic hook is swapped for one that logs through
/// `tracing`, so a caught panic never writes its report over the terminal.
fn run_contained<T>(f: impl FnOnce() -> T) -> std::thread::Result<T> {
    let _guard = PANIC_HOOK_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    with_tracing_panic_hook(f)
}

fn with_tracing_panic_hook<T>(f: impl FnOnce() -> T) -> std::thread::Result<T> {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        error!(%location, "Command panicked: {}", panic_message(info.payload()));
    }));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    panic::set_hook(previous);
    result
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::config::AppConfig;
    use crate::context::ConfigSource;
    use crate::registry::CommandDescriptor;
    use anyhow::Context as _;

    fn registry() -> Arc<CommandRegistry> {
        Arc::new(
            CommandRegistry::builder()
                .register(CommandDescriptor::new("help", "Show available commands"))
                .unwrap()
                .register(CommandDescriptor::new("config", "Configuration"))
                .unwrap()
                .build(),
        )
    }

    fn ctx() -> ExecutionContext {
        ExecutionContext::new(
            AppConfig::default(),
            PathBuf::from("config.yaml"),
            ConfigSource::Defaults,
            PathBuf::from("replkit.log"),
        )
    }

    fn never_called() -> MockExecutor {
        let mut executor = MockExecutor::new();
        executor.expect_execute().never();
        executor
    }

    #[test]
    fn missing_marker_is_not_a_command() {
        let dispatcher = Dispatcher::new(registry(), never_called());
        assert_eq!(
            dispatcher.dispatch("help", &mut ctx()),
            DispatchOutcome::NotACommand("help".to_string())
        );
        assert_eq!(
            dispatcher.dispatch("  tell me a story ", &mut ctx()),
            DispatchOutcome::NotACommand("  tell me a story ".to_string())
        );
    }

    #[test]
    fn marker_alone_is_empty() {
        let dispatcher = Dispatcher::new(registry(), never_called());
        assert_eq!(dispatcher.dispatch("/", &mut ctx()), DispatchOutcome::EmptyCommand);
        assert_eq!(dispatcher.dispatch("/   ", &mut ctx()), DispatchOutcome::EmptyCommand);
    }

    #[test]
    fn unknown_command() {
        let dispatcher = Dispatcher::new(registry(), never_called());
        assert_eq!(
            dispatcher.dispatch("/bogus", &mut ctx()),
            DispatchOutcome::UnknownCommand("bogus".to_string())
        );
    }

    #[test]
    fn quit_and_exit_request_termination() {
        let dispatcher = Dispatcher::new(registry(), never_called());
        for line in ["/quit", "/exit", "/quit now"] {
            let outcome = dispatcher.dispatch(line, &mut ctx());
            assert_eq!(outcome, DispatchOutcome::SessionTerminationRequested);
        }
    }

    #[test]
    fn delegates_remaining_tokens() {
        let mut executor = MockExecutor::new();
        executor
            .expect_execute()
            .withf(|name, args, _| {
                name == "config" && *args == ["load", "--file", "my file.yaml"]
            })
            .times(1)
            .returning(|_, _, _| {
                let mut out = CommandOutput::new();
                out.success("loaded");
                Ok(out)
            });

        let dispatcher = Dispatcher::new(registry(), executor);
        let outcome = dispatcher.dispatch(r#"/config load --file "my file.yaml""#, &mut ctx());
        match outcome {
            DispatchOutcome::Success(out) => assert_eq!(out.text(), "loaded"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn executor_errors_are_wrapped_with_their_cause() {
        let mut executor = MockExecutor::new();
        executor.expect_execute().returning(|_, _, _| {
            let err = std::fs::read_to_string("/definitely/not/here")
                .context("Failed to load config")
                .unwrap_err();
            Err(ExecutorError::Failed(err))
        });

        let dispatcher = Dispatcher::new(registry(), executor);
        let DispatchOutcome::CommandExecutionFailed { name, failure } =
            dispatcher.dispatch("/config load", &mut ctx())
        else {
            panic!("expected a failure");
        };
        assert_eq!(name, "config");
        assert_eq!(failure.kind, FailureKind::Failed);
        assert_eq!(failure.message, "Failed to load config");
        assert_eq!(failure.causes.len(), 1);
        assert!(failure.detail().starts_with("Failed to load config: "));
        assert_eq!(failure.cause_type, any::type_name::<std::io::Error>());
    }

    #[test]
    fn cause_type_prefers_the_outermost_known_error() {
        let mut executor = MockExecutor::new();
        executor.expect_execute().returning(|_, _, _| {
            let err = anyhow::Error::new(ConfigError::NotFound(PathBuf::from("gone.yaml")))
                .context("Failed to load config");
            Err(ExecutorError::Failed(err))
        });

        let dispatcher = Dispatcher::new(registry(), executor);
        let DispatchOutcome::CommandExecutionFailed { failure, .. } =
            dispatcher.dispatch("/config load", &mut ctx())
        else {
            panic!("expected a failure");
        };
        assert_eq!(failure.cause_type, any::type_name::<ConfigError>());

        let mut executor = MockExecutor::new();
        executor
            .expect_execute()
            .returning(|_, _, _| Err(ExecutorError::Failed(anyhow::anyhow!("plain message"))));
        let dispatcher = Dispatcher::new(registry(), executor);
        let DispatchOutcome::CommandExecutionFailed { failure, .. } =
            dispatcher.dispatch("/config load", &mut ctx())
        else {
            panic!("expected a failure");
        };
        assert_eq!(failure.cause_type, any::type_name::<anyhow::Error>());
    }

    #[test]
    fn usage_errors_are_classified() {
        let mut executor = MockExecutor::new();
        executor
            .expect_execute()
            .returning(|_, _, _| Err(ExecutorError::Usage("error: missing --file\n".to_string())));

        let dispatcher = Dispatcher::new(registry(), executor);
        let outcome = dispatcher.dispatch("/config load", &mut ctx());
        assert_eq!(
            outcome,
            DispatchOutcome::CommandExecutionFailed {
                name: "config".to_string(),
                failure: ExecutionFailure::new(FailureKind::InvalidArguments, "error: missing --file"),
            }
        );
    }

    struct Exploding;

    impl Executor for Exploding {
        fn execute(
            &self,
            _name: &str,
            _args: &[String],
            _ctx: &mut ExecutionContext,
        ) -> Result<CommandOutput, ExecutorError> {
            panic!("handler exploded")
        }
    }

    #[test]
    fn panics_do_not_cross_the_boundary() {
        let dispatcher = Dispatcher::new(registry(), Exploding);
        let DispatchOutcome::CommandExecutionFailed { failure, .. } =
            dispatcher.dispatch("/help", &mut ctx())
        else {
            panic!("expected a failure");
        };
        assert_eq!(failure.kind, FailureKind::Panicked);
        assert_eq!(failure.cause_type, "panic");
        assert!(failure.message.contains("handler exploded"));
    }

    #[test]
    fn contained_panics_bypass_and_restore_the_installed_hook() {
        static HOOK_CALLS: AtomicUsize = AtomicUsize::new(0);

        let _guard = PANIC_HOOK_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let original = panic::take_hook();
        panic::set_hook(Box::new(|_| {
            HOOK_CALLS.fetch_add(1, Ordering::SeqCst);
        }));

        let result = with_tracing_panic_hook(|| -> u8 { panic!("contained") });
        assert_eq!(panic_message(result.unwrap_err().as_ref()), "contained");
        assert_eq!(HOOK_CALLS.load(Ordering::SeqCst), 0);

        let outside = panic::catch_unwind(|| -> u8 { panic!("outside") });
        assert!(outside.is_err());
        assert_eq!(HOOK_CALLS.load(Ordering::SeqCst), 1);

        panic::set_hook(original);
        assert_eq!(with_tracing_panic_hook(|| 7).unwrap(), 7);
    }

    #[test]
    fn unbalanced_quotes_fail_without_executing() {
        let dispatcher = Dispatcher::new(registry(), never_called());
        let DispatchOutcome::CommandExecutionFailed { name, failure } =
            dispatcher.dispatch(r#"/config load --file "oops"#, &mut ctx())
        else {
            panic!("expected a failure");
        };
        assert_eq!(name, "config");
        assert_eq!(failure.kind, FailureKind::MalformedInput);
        assert_eq!(failure.cause_type, any::type_name::<TokenizeError>());
    }

    #[test]
    fn custom_marker() {
        let dispatcher = Dispatcher::new(registry(), never_called()).with_marker(':');
        assert_eq!(
            dispatcher.dispatch("/quit", &mut ctx()),
            DispatchOutcome::NotACommand("/quit".to_string())
        );
        assert_eq!(
            dispatcher.dispatch(":quit", &mut ctx()),
            DispatchOutcome::SessionTerminationRequested
        );
    }
}
