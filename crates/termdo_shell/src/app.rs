//! The interactive shell loop.
//!
//! Single-threaded and cooperative: one key event or one submitted command is
//! processed to completion before the next is accepted. A submitted line is
//! dispatched and awaited inline, so a second submission cannot begin parsing
//! while a remote call is in flight; raw input produced meanwhile stays
//! buffered in the event channel.

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

use termdo_tui::core::input::Key;
use termdo_tui::render::style;
use termdo_tui::{
    parse_input_events, EditorEffect, InputEditor, InputEvent, OutputGate, PromptContext,
    PromptRenderer, Terminal, TerminalCmd, TerminalGuard,
};

use crate::commands::Dispatcher;
use crate::session::Session;

const CWD: &str = "~";

/// Events delivered from the terminal's input and resize handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    Input(String),
    Resize,
}

pub struct Shell<T: Terminal> {
    terminal: TerminalGuard<T>,
    gate: OutputGate,
    editor: InputEditor,
    renderer: PromptRenderer,
    session: Session,
    dispatcher: Dispatcher,
    hostname: String,
    working: bool,
    done: bool,
}

impl<T: Terminal> Shell<T> {
    pub fn new(terminal: TerminalGuard<T>, dispatcher: Dispatcher, hostname: String) -> Self {
        Self {
            terminal,
            gate: OutputGate::new(),
            editor: InputEditor::new(),
            renderer: PromptRenderer::new(),
            session: Session::new(),
            dispatcher,
            hostname,
            working: false,
            done: false,
        }
    }

    pub async fn run(&mut self, events: &mut UnboundedReceiver<ShellEvent>) {
        self.gate.push(TerminalCmd::BracketedPasteEnable);
        self.renderer.print_line(
            &mut self.gate,
            &style::paint(
                "Welcome to termdo. Type `help` for commands.",
                style::WELCOME,
            ),
        );
        self.repaint();
        self.flush();

        while !self.done {
            let Some(event) = events.recv().await else {
                break;
            };
            match event {
                ShellEvent::Input(data) => {
                    for input in parse_input_events(&data) {
                        self.handle_input(input).await;
                        if self.done {
                            break;
                        }
                    }
                }
                ShellEvent::Resize => self.repaint(),
            }
            self.flush();
        }

        self.gate.push(TerminalCmd::BracketedPasteDisable);
        self.flush();
    }

    async fn handle_input(&mut self, event: InputEvent) {
        match &event {
            InputEvent::Key { key: Key::CtrlC, .. } => {
                self.gate.push(TerminalCmd::BytesStatic("^C"));
                self.renderer.enter(&mut self.gate);
                self.editor.abandon_line();
                self.repaint();
            }
            InputEvent::Key { key: Key::CtrlD, .. } if self.editor.buffer().is_empty() => {
                self.renderer.enter(&mut self.gate);
                self.renderer.print_line(&mut self.gate, "logout");
                self.done = true;
            }
            InputEvent::Key { key: Key::CtrlL, .. } => {
                self.renderer.clear_screen(&mut self.gate);
                self.repaint();
            }
            _ => match self.editor.apply(&event) {
                EditorEffect::Redraw => self.repaint(),
                EditorEffect::CursorMoved => self.reposition(),
                EditorEffect::Submit(line) => self.submit(line).await,
                EditorEffect::None => {}
            },
        }
    }

    async fn submit(&mut self, line: String) {
        self.renderer.enter(&mut self.gate);
        self.flush();

        if !line.is_empty() {
            info!(command = %line, "dispatching");
            self.working = true;
            let cols = self.cols();
            let output = self
                .dispatcher
                .dispatch(&self.session, self.editor.history(), &line, cols)
                .await;
            self.working = false;

            if output.clear_screen {
                self.renderer.clear_screen(&mut self.gate);
            }
            for out_line in &output.lines {
                if out_line.starts_with("Error:") {
                    self.renderer
                        .print_line(&mut self.gate, &style::paint(out_line, style::ERROR));
                } else {
                    self.renderer.print_line(&mut self.gate, out_line);
                }
            }
            if let Some(identity) = output.transition {
                self.session.apply(identity);
            }
        }

        self.repaint();
    }

    fn cols(&mut self) -> usize {
        self.terminal.terminal_mut().columns().max(1) as usize
    }

    fn repaint(&mut self) {
        let cols = self.cols();
        let ctx = PromptContext {
            username: self.session.username(),
            hostname: &self.hostname,
            cwd: CWD,
            mark: self.session.mark(),
            working: self.working,
        };
        self.renderer.repaint(
            &mut self.gate,
            &ctx,
            self.editor.buffer(),
            self.editor.cursor(),
            cols,
        );
    }

    fn reposition(&mut self) {
        let cols = self.cols();
        let ctx = PromptContext {
            username: self.session.username(),
            hostname: &self.hostname,
            cwd: CWD,
            mark: self.session.mark(),
            working: self.working,
        };
        self.renderer.reposition(
            &mut self.gate,
            &ctx,
            self.editor.buffer(),
            self.editor.cursor(),
            cols,
        );
    }

    fn flush(&mut self) {
        self.gate.flush(self.terminal.terminal_mut());
    }
}
