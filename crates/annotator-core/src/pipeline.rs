//! Per-cycle driver: snapshot in, operation batch out.
//!
//! One call to [`Annotator::annotate`] runs the whole cycle for one snapshot:
//!
//! 1. extract the code instance and its directives,
//! 2. expand shortcuts (if enabled),
//! 3. act on the `#format` / `#run` triggers,
//! 4. rebuild the position map,
//! 5. style the document, the code region and the configuration segments,
//! 6. color and remove literal ranges,
//! 7. color keywords in the sanitized code.
//!
//! Nothing is kept between cycles.

use std::fmt;

use annotator_core_lang::{Registry, RunResult};

use crate::config::{AnnotatorConfig, Defaults};
use crate::directives::{DirectiveGrammar, Trigger};
use crate::document::Document;
use crate::error::{AnnotateError, TriggerKind};
use crate::highlight::RegexHighlighter;
use crate::instance::CodeInstance;
use crate::operations::{DocRange, Operation, TextAttribute};
use crate::position::utf16_len;

/// Font size used to hide an empty configuration segment.
pub const SUPPRESSED_FONT_SIZE: f64 = 1.0;

/// Stage of an annotation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the snapshot into a code instance.
    Extracting,
    /// Expanding shortcuts.
    Substituting,
    /// Calling format/run handlers.
    Transforming,
    /// Rebuilding the position map.
    Mapping,
    /// Styling the document, code region and configuration segments.
    Styling,
    /// Scanning and removing literal ranges.
    ScanningLiterals,
    /// Coloring keywords.
    Highlighting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Extracting => "extracting",
            Self::Substituting => "substituting",
            Self::Transforming => "transforming",
            Self::Mapping => "mapping",
            Self::Styling => "styling",
            Self::ScanningLiterals => "scanning literals",
            Self::Highlighting => "highlighting",
        };
        f.write_str(name)
    }
}

/// Result of one successful cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Operations to submit as one batch.
    pub operations: Vec<Operation>,
    /// Output of the `#run` trigger, if it ran.
    pub run_result: Option<RunResult>,
}

/// Annotates document snapshots.
#[derive(Debug)]
pub struct Annotator<'r> {
    registry: &'r Registry,
    defaults: Defaults<'r>,
    grammar: DirectiveGrammar,
    max_substitutions: usize,
}

impl<'r> Annotator<'r> {
    /// Resolve `config` against `registry` and compile the directive grammar.
    pub fn new(registry: &'r Registry, config: &AnnotatorConfig) -> Result<Self, AnnotateError> {
        Ok(Self {
            registry,
            defaults: config.resolve(registry)?,
            grammar: DirectiveGrammar::new()?,
            max_substitutions: config.max_substitutions,
        })
    }

    /// The resolved defaults.
    pub fn defaults(&self) -> &Defaults<'r> {
        &self.defaults
    }

    /// Run one cycle over `document`.
    ///
    /// On error no operations are returned at all. Errors for which
    /// [`AnnotateError::is_configuration_error`] holds will repeat on every cycle.
    pub fn annotate(&self, document: &Document) -> Result<Annotation, AnnotateError> {
        log::trace!("Annotation stage: {}", Stage::Extracting);
        let mut instance =
            CodeInstance::extract(document, &self.grammar, self.registry, &self.defaults)?;
        let mut operations = Vec::new();

        if instance.shortcuts {
            log::trace!("Annotation stage: {}", Stage::Substituting);
            operations.extend(instance.apply_shortcuts(self.max_substitutions)?);
        }

        log::trace!("Annotation stage: {}", Stage::Transforming);
        if let Some(trigger) = active(&instance.format) {
            operations.push(reset_trigger(trigger));
            format_code(&mut instance, &mut operations)?;
        }
        let run_result = match active(&instance.run) {
            Some(trigger) => {
                operations.push(reset_trigger(trigger));
                run_code(&instance)?
            }
            None => None,
        };

        log::trace!("Annotation stage: {}", Stage::Mapping);
        instance.remap()?;

        log::trace!("Annotation stage: {}", Stage::Styling);
        style_instance(&instance, &mut operations);

        log::trace!("Annotation stage: {}", Stage::ScanningLiterals);
        operations.extend(instance.remove_literals()?);

        log::trace!("Annotation stage: {}", Stage::Highlighting);
        let highlighter = RegexHighlighter::new(instance.language.keywords());
        operations.extend(highlighter.highlight(
            &instance.code,
            instance.positions(),
            instance.theme,
        ));

        log::debug!(
            "Annotated {} code ({} units) with {} operations",
            instance.language.name(),
            instance.end.saturating_sub(instance.start),
            operations.len()
        );
        Ok(Annotation {
            operations,
            run_result,
        })
    }
}

fn active(trigger: &Option<Trigger>) -> Option<&Trigger> {
    trigger.as_ref().filter(|t| t.active)
}

fn reset_trigger(trigger: &Trigger) -> Operation {
    Operation::SetAttribute {
        range: trigger.range.clone(),
        attribute: TextAttribute::Underline,
        enabled: false,
    }
}

fn format_code(
    instance: &mut CodeInstance<'_>,
    operations: &mut Vec<Operation>,
) -> Result<(), AnnotateError> {
    let language = instance.language;
    let formatter = language
        .formatter()
        .ok_or_else(|| AnnotateError::MissingHandler {
            language: language.name().to_string(),
            trigger: TriggerKind::Format,
        })?;

    match formatter.format(&instance.code) {
        Ok(formatted) if formatted == instance.code => {
            log::debug!("Code is already formatted");
        }
        Ok(formatted) => {
            operations.push(Operation::DeleteText {
                range: instance.range(),
            });
            operations.push(Operation::InsertText {
                index: instance.start,
                segment_id: String::new(),
                text: formatted.clone(),
            });
            instance.end = instance.start + utf16_len(&formatted);
            instance.code = formatted;
        }
        Err(e) => log::warn!("Failed to format {} code: {e}", language.name()),
    }
    Ok(())
}

fn run_code(instance: &CodeInstance<'_>) -> Result<Option<RunResult>, AnnotateError> {
    let language = instance.language;
    let runner = language.runner().ok_or_else(|| AnnotateError::MissingHandler {
        language: language.name().to_string(),
        trigger: TriggerKind::Run,
    })?;

    match runner.run(&instance.code) {
        Ok(result) => {
            log::info!(
                "Ran {} code: status {}, {} bytes of output",
                language.name(),
                result.status_code,
                result.output.len()
            );
            Ok(Some(result))
        }
        Err(e) => {
            log::warn!("Failed to run {} code: {e}", language.name());
            Ok(None)
        }
    }
}

fn style_instance(instance: &CodeInstance<'_>, operations: &mut Vec<Operation>) {
    let theme = instance.theme;
    operations.push(Operation::SetDocumentBackground {
        color: theme.doc_background,
    });

    let code = instance.range();
    operations.extend([
        Operation::ClearTextFormatting {
            range: code.clone(),
        },
        Operation::SetForegroundColor {
            range: code.clone(),
            color: theme.code_foreground,
        },
        Operation::SetBackgroundColor {
            range: code.clone(),
            color: theme.code_background,
        },
        Operation::SetHighlightColor {
            range: code.clone(),
            color: theme.code_highlight,
        },
        Operation::SetFont {
            range: code,
            family: instance.font.clone(),
            size: instance.font_size,
        },
    ]);

    for span in instance.segments.values() {
        let range = span.range.clone();
        if span.effectively_empty {
            operations.extend([
                Operation::SetForegroundColor {
                    range: range.clone(),
                    color: theme.doc_background,
                },
                Operation::SetFont {
                    range,
                    family: theme.config_font.clone(),
                    size: SUPPRESSED_FONT_SIZE,
                },
            ]);
            continue;
        }

        operations.extend([
            Operation::SetForegroundColor {
                range: range.clone(),
                color: theme.config_foreground,
            },
            Operation::SetBackgroundColor {
                range: range.clone(),
                color: theme.config_background,
            },
            Operation::SetHighlightColor {
                range: range.clone(),
                color: theme.config_highlight,
            },
            Operation::SetFont {
                range: range.clone(),
                family: theme.config_font.clone(),
                size: theme.config_font_size,
            },
            Operation::SetAttribute {
                range,
                attribute: TextAttribute::Italic,
                enabled: theme.config_italics,
            },
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Run, Segment, TextStyle};
    use annotator_core_lang::Theme;
    use pretty_assertions::assert_eq;

    fn annotate(registry: &Registry, document: &Document) -> Result<Annotation, AnnotateError> {
        Annotator::new(registry, &AnnotatorConfig::default())?.annotate(document)
    }

    #[test]
    fn test_styles_code_region_and_config_segments() {
        let registry = Registry::builtin().unwrap();
        let document = Document::new(vec![
            Segment::header("h", vec![Run::new("#lang=go\n", 0, TextStyle::italic())]),
            Segment::footer("f", vec![Run::new("\n", 0, TextStyle::plain())]),
            Segment::body(vec![Run::new("x\n", 1, TextStyle::plain())]),
        ]);
        let ops = annotate(&registry, &document).unwrap().operations;
        let dark = Theme::dark();
        let code = DocRange::body(1, 3);

        assert_eq!(
            ops[..6],
            [
                Operation::SetDocumentBackground {
                    color: dark.doc_background
                },
                Operation::ClearTextFormatting {
                    range: code.clone()
                },
                Operation::SetForegroundColor {
                    range: code.clone(),
                    color: dark.code_foreground
                },
                Operation::SetBackgroundColor {
                    range: code.clone(),
                    color: dark.code_background
                },
                Operation::SetHighlightColor {
                    range: code.clone(),
                    color: dark.code_highlight
                },
                Operation::SetFont {
                    range: code,
                    family: "Courier New".to_string(),
                    size: 11.0
                },
            ]
        );

        // Segments come in id order: the empty footer "f" first, then the header "h".
        assert_eq!(
            ops[6..8],
            [
                Operation::SetForegroundColor {
                    range: DocRange::new(0, 1, "f"),
                    color: dark.doc_background
                },
                Operation::SetFont {
                    range: DocRange::new(0, 1, "f"),
                    family: dark.config_font.clone(),
                    size: SUPPRESSED_FONT_SIZE
                },
            ]
        );
        assert_eq!(
            ops[12],
            Operation::SetAttribute {
                range: DocRange::new(0, 9, "h"),
                attribute: TextAttribute::Italic,
                enabled: dark.config_italics
            }
        );
        assert_eq!(ops.len(), 13);
    }

    #[test]
    fn test_shortcuts_only_run_when_enabled() {
        let registry = Registry::builtin().unwrap();
        let body = Segment::body(vec![Run::new("gomain\n", 1, TextStyle::plain())]);

        let ops = annotate(&registry, &Document::new(vec![body.clone()]))
            .unwrap()
            .operations;
        assert!(!ops.iter().any(|op| matches!(op, Operation::DeleteText { .. })));

        let document = Document::new(vec![
            Segment::header(
                "h",
                vec![Run::new("#shortcuts=enabled\n", 0, TextStyle::italic())],
            ),
            body,
        ]);
        let ops = annotate(&registry, &document).unwrap().operations;
        assert_eq!(
            ops[0],
            Operation::DeleteText {
                range: DocRange::body(1, 7)
            }
        );
        // The code range grows to cover the snippet.
        let end = 1 + utf16_len(annotator_core_lang::GO_MAIN_SNIPPET) + 1;
        assert!(ops.contains(&Operation::ClearTextFormatting {
            range: DocRange::body(1, end)
        }));
    }

    #[test]
    fn test_inactive_trigger_emits_nothing() {
        let registry = Registry::builtin().unwrap();
        let document = Document::new(vec![
            Segment::header("h", vec![Run::new("#format\n", 0, TextStyle::italic())]),
            Segment::body(vec![Run::new("x\n", 1, TextStyle::plain())]),
        ]);
        let ops = annotate(&registry, &document).unwrap().operations;
        assert!(!ops.iter().any(|op| matches!(
            op,
            Operation::SetAttribute {
                attribute: TextAttribute::Underline,
                ..
            }
        )));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::ScanningLiterals.to_string(), "scanning literals");
    }
}
