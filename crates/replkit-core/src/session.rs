//! Interactive loop state machine.
//!
//! ```text
//! Prompting --keystroke--> Completing --candidates--> Prompting
//! Prompting --submit-----> Dispatching --handled----> Prompting
//!                                      --quit/exit--> Terminated
//! Prompting --2nd interrupt / end of input----------> Terminated
//! ```
//!
//! The loop is synchronous: one line is completed, dispatched and rendered
//! before the next is read. Terminal I/O sits behind [`LineSource`], so any
//! line editor can drive the session.
//!
//! A line editor that completes on its own thread of control (rustyline asks
//! for candidates from inside `read_line`) gets a clone of the engine through
//! [`LineSource::on_partial_input`] and never enters `Completing`; the loop
//! stays in `Prompting` for the whole read. [`Session::on_partial_input`] is the
//! path for sources that hand each keystroke back to the session.

use std::io;

use tracing::{debug, error, info, warn};

use crate::completion::{CompletionCandidate, CompletionEngine, InputState};
use crate::context::ExecutionContext;
use crate::dispatch::{DispatchOutcome, Dispatcher, Executor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Prompting,
    Completing,
    Dispatching,
    Terminated,
}

/// What a [`LineSource`] produced for one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Line(String),
    /// Ctrl-C while editing.
    Interrupted,
    /// Ctrl-D or closed input.
    EndOfInput,
}

/// Reaction to an interrupt while prompting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    /// Drop the current line and prompt again.
    CancelLine,
    /// Second interrupt in a row: end the session.
    Terminate,
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// `quit` or `exit` was dispatched.
    Requested,
    DoubleInterrupt,
    EndOfInput,
}

/// Events reported to the presentation layer while the loop runs.
#[derive(Debug)]
pub enum LoopEvent<'a> {
    Outcome(&'a DispatchOutcome),
    LineCancelled,
}

/// Interactive input capability.
pub trait LineSource {
    /// Install the per-keystroke completion callback.
    fn on_partial_input(&mut self, engine: CompletionEngine);

    /// Block until a line, an interrupt, or end of input arrives.
    fn read_line(&mut self, prompt: &str) -> io::Result<LineEvent>;

    /// Called once after the loop terminates (flush history and the like).
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct Session<E> {
    engine: CompletionEngine,
    dispatcher: Dispatcher<E>,
    state: LoopState,
    interrupt_pending: bool,
}

impl<E: Executor> Session<E> {
    pub const fn new(engine: CompletionEngine, dispatcher: Dispatcher<E>) -> Self {
        Self {
            engine,
            dispatcher,
            state: LoopState::Prompting,
            interrupt_pending: false,
        }
    }

    pub const fn state(&self) -> LoopState {
        self.state
    }

    pub const fn is_terminated(&self) -> bool {
        matches!(self.state, LoopState::Terminated)
    }

    /// Refresh suggestions for the line being edited, passing through
    /// `Completing`.
    pub fn on_partial_input(&mut self, input: &InputState) -> Vec<CompletionCandidate> {
        if self.is_terminated() {
            return Vec::new();
        }
        self.state = LoopState::Completing;
        let candidates = self.engine.complete(input);
        self.state = LoopState::Prompting;
        candidates
    }

    /// Dispatch a submitted line.
    ///
    /// A single remaining completion candidate replaces the typed text first.
    /// Once terminated, nothing is dispatched and termination is reported again.
    pub fn submit(&mut self, line: &str, ctx: &mut ExecutionContext) -> DispatchOutcome {
        if self.is_terminated() {
            return DispatchOutcome::SessionTerminationRequested;
        }
        self.interrupt_pending = false;

        let accepted = self.engine.auto_accept(line);
        if let Some(ref replacement) = accepted {
            debug!(typed = %line, accepted = %replacement, "Auto-accepted single completion");
        }
        let line = accepted.as_deref().unwrap_or(line);

        self.state = LoopState::Dispatching;
        let outcome = self.dispatcher.dispatch(line, ctx);
        self.state = match outcome {
            DispatchOutcome::SessionTerminationRequested => LoopState::Terminated,
            _ => LoopState::Prompting,
        };
        outcome
    }

    pub fn interrupt(&mut self) -> InterruptAction {
        if self.interrupt_pending || self.is_terminated() {
            self.state = LoopState::Terminated;
            InterruptAction::Terminate
        } else {
            self.interrupt_pending = true;
            InterruptAction::CancelLine
        }
    }

    pub fn end_of_input(&mut self) {
        self.state = LoopState::Terminated;
    }

    /// Drive the loop until it terminates.
    ///
    /// A read error also terminates the session; the source is still closed
    /// before the error is returned.
    pub fn run<S, F>(
        &mut self,
        source: &mut S,
        ctx: &mut ExecutionContext,
        prompt: &str,
        mut on_event: F,
    ) -> io::Result<TerminationReason>
    where
        S: LineSource,
        F: FnMut(&LoopEvent<'_>, &ExecutionContext),
    {
        source.on_partial_input(self.engine.clone());

        let reason = loop {
            let event = match source.read_line(prompt) {
                Ok(event) => event,
                Err(err) => {
                    self.state = LoopState::Terminated;
                    error!(error = %err, "Reading input failed; ending session");
                    if let Err(close_err) = source.close() {
                        warn!(error = %close_err, "Failed to close line source");
                    }
                    return Err(err);
                }
            };
            match event {
                LineEvent::Line(line) => {
                    let outcome = self.submit(&line, ctx);
                    on_event(&LoopEvent::Outcome(&outcome), ctx);
                    if self.is_terminated() {
                        break TerminationReason::Requested;
                    }
                }
                LineEvent::Interrupted => match self.interrupt() {
                    InterruptAction::CancelLine => on_event(&LoopEvent::LineCancelled, ctx),
                    InterruptAction::Terminate => break TerminationReason::DoubleInterrupt,
                },
                LineEvent::EndOfInput => {
                    self.end_of_input();
                    break TerminationReason::EndOfInput;
                }
            }
        };

        info!(?reason, "Interactive session ended");
        source.close()?;
        Ok(reason)
    }
}
