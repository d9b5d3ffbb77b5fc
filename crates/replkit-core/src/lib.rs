//! Core of replkit: the slash-command registry, completion engine, dispatcher
//! and interactive session state machine, plus the configuration model.
//!
//! This crate performs no terminal I/O. Adapters (the `replkit` binary) supply
//! a [`LineSource`] for input, an [`Executor`] for command bodies, and render
//! the resulting [`DispatchOutcome`].

#![deny(unused_crate_dependencies)]

pub mod completion;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod output;
pub mod paths;
pub mod processor;
pub mod registry;
pub mod session;
pub mod tokenize;

// Re-export commonly used types for convenience
pub use completion::{CompletionCandidate, CompletionEngine, DEFAULT_MARKER, InputState};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LOG_LEVELS, validate_config};
pub use context::{ConfigSource, ExecutionContext};
pub use dispatch::{
    DispatchOutcome, Dispatcher, ExecutionFailure, Executor, ExecutorError, FailureKind,
    TERMINATION_COMMANDS,
};
pub use output::{CommandOutput, LineKind, OutputLine};
pub use paths::PathError;
pub use processor::{ProcessError, ProcessReport, process_data};
pub use registry::{
    CommandDescriptor, CommandRegistry, OptionDescriptor, RegistryError, SubcommandDescriptor,
};
pub use session::{
    InterruptAction, LineEvent, LineSource, LoopEvent, LoopState, Session, TerminationReason,
};
pub use tokenize::{TokenizeError, split_args};
