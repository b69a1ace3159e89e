//! Terminal engine for the termdo task shell.
//!
//! Invariant: single output gate — only `core::output::OutputGate::flush(..)` writes to the
//! terminal.
//!
//! # Public API Overview
//! - Parse raw terminal bytes into [`InputEvent`]s with [`parse_input_events`].
//! - Drive the line editor state machine via [`InputEditor`].
//! - Repaint the prompt across wrapped rows with [`PromptRenderer`]; cursor repositioning is
//!   computed from an explicit [`RenderState`], never from global bookkeeping.
//! - Emit the constrained escape-sequence vocabulary through [`TerminalCmd`] and [`OutputGate`].

pub mod config;

pub mod core;
pub mod editor;
pub mod platform;
pub mod render;

/// Keyboard input parsing helpers.
pub use crate::core::input::{parse_key, parse_text, Key};
pub use crate::core::input_event::{parse_input_events, InputEvent};

/// Terminal output commands and the single write gate.
pub use crate::core::output::{OutputGate, TerminalCmd};

/// Terminal interface and process-backed implementation.
pub use crate::core::terminal::{Terminal, TerminalGuard};
pub use crate::platform::process_terminal::ProcessTerminal;

/// Line editor state machine.
pub use crate::editor::{EditorEffect, InputEditor};

/// Prompt rendering.
pub use crate::render::colorize::colorize_command_line;
pub use crate::render::prompt::{PromptContext, PromptRenderer, RenderState};
