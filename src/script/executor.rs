//! Runs parsed scripts against a scene

use ariadne::{Color, Label, Report, ReportKind, Source};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::align::{AlignConfig, AlignError, Aligner, Completion, PositionChange, Spacing};
use crate::parser::{Command, HandlerRef, Script, Span, Spanned};
use crate::scene::{ElementId, Scene};

use super::registry::{Handler, HandlerRegistry};

/// Outcome of one successful command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandReport {
    /// The command, normalised back to script syntax
    pub command: String,
    pub records: Vec<PositionChange<String>>,
}

/// A command that failed; commands before it keep their effect
#[derive(Debug, Error, Clone, PartialEq)]
#[error("command `{command}` failed: {source}")]
pub struct CommandError {
    pub command: String,
    pub span: Span,
    #[source]
    pub source: AlignError,
}

impl CommandError {
    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = Report::build(ReportKind::Error, filename, self.span.start)
            .with_message(format!("command `{}` failed", self.command))
            .with_label(
                Label::new((filename, self.span.clone()))
                    .with_message(self.source.to_string())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Executes commands in order, resolving `then` clauses through a registry
pub struct Executor<'r> {
    registry: &'r mut HandlerRegistry,
    config: Option<AlignConfig>,
}

impl<'r> Executor<'r> {
    /// Use the scene's own `[options]` for every command
    pub fn new(registry: &'r mut HandlerRegistry) -> Self {
        Self {
            registry,
            config: None,
        }
    }

    /// Override the scene's options
    pub fn with_config(mut self, config: AlignConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Run every command; stops at the first failure
    pub fn run(
        &mut self,
        scene: &mut Scene,
        script: &Script,
    ) -> Result<Vec<CommandReport>, CommandError> {
        let mut reports = Vec::with_capacity(script.commands.len());
        for command in &script.commands {
            reports.push(self.execute(scene, command)?);
        }
        Ok(reports)
    }

    /// Run a single command
    pub fn execute(
        &mut self,
        scene: &mut Scene,
        command: &Spanned<Command>,
    ) -> Result<CommandReport, CommandError> {
        let text = command.node.to_string();
        info!(command = %text, "executing");

        // Ids never change while aligning, so a snapshot names every handle
        let names: Vec<String> = scene.elements.iter().map(|e| e.id.clone()).collect();
        let config = self.config.unwrap_or(scene.options);

        let records = self
            .dispatch(scene, &command.node, config, &names)
            .map_err(|source| CommandError {
                command: text.clone(),
                span: command.span.clone(),
                source,
            })?;
        debug!(command = %text, moved = records.len(), "command finished");

        Ok(CommandReport {
            command: text,
            records: records
                .into_iter()
                .map(|r| r.map_node(|handle| name_of(&names, handle)))
                .collect(),
        })
    }

    fn dispatch(
        &mut self,
        scene: &mut Scene,
        command: &Command,
        config: AlignConfig,
        names: &[String],
    ) -> Result<Vec<PositionChange<ElementId>>, AlignError> {
        let slot = match command.handler().map(|h| &h.node) {
            None => Slot::Absent,
            Some(HandlerRef::Named(name)) => match self.registry.get_mut(name.as_str()) {
                Some(handler) => Slot::Found(handler),
                None => Slot::Invalid(format!("unknown handler '{}'", name)),
            },
            Some(literal) => Slot::Invalid(literal.describe()),
        };

        let mut adapter;
        let completion = match slot {
            Slot::Absent => Completion::Absent,
            Slot::Invalid(found) => Completion::Invalid(found),
            Slot::Found(handler) => {
                adapter = move |records: &[PositionChange<ElementId>]| {
                    let named: Vec<PositionChange<String>> = records
                        .iter()
                        .cloned()
                        .map(|r| r.map_node(|handle| name_of(names, handle)))
                        .collect();
                    handler(&named);
                };
                Completion::Handler(&mut adapter)
            }
        };

        let mut aligner = Aligner::with_config(scene, config);
        match command {
            Command::Align { kind, targets, .. } => {
                aligner.align(kind.node, &targets.node.to_selector(), completion)
            }
            Command::Canvas {
                kind,
                targets,
                canvas,
                border,
                ..
            } => aligner.align_to_canvas(
                kind.node,
                &targets.node.to_selector(),
                &canvas.node.to_selector(),
                *border,
                completion,
            ),
            Command::Distribute {
                axis, targets, gap, ..
            } => aligner.distribute(
                axis.node,
                &targets.node.to_selector(),
                Spacing::Text(&gap.node),
                completion,
            ),
        }
    }
}

enum Slot<'h> {
    Absent,
    Found(&'h mut Handler),
    Invalid(String),
}

fn name_of(names: &[String], handle: ElementId) -> String {
    names
        .get(handle.0)
        .cloned()
        .unwrap_or_else(|| handle.to_string())
}
