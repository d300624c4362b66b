use annotator_core::{
    AnnotateError, Annotator, AnnotatorConfig, DocRange, Document, Operation, Run, Segment,
    TextAttribute, TextStyle, TriggerKind,
};
use annotator_core_lang::{GO, HandlerError, Registry, RunResult};
use pretty_assertions::assert_eq;

/// A header holding `#lang=go #<trigger>` with the trigger underlined, and a body with `code`.
fn triggered(trigger: &str, code: &str) -> Document {
    Document::new(vec![
        Segment::header(
            "kix.h",
            vec![
                Run::new("#lang=go ", 0, TextStyle::italic()),
                Run::new(trigger, 9, TextStyle::italic_underlined()),
                Run::new("\n", 9 + trigger.len(), TextStyle::plain()),
            ],
        ),
        Segment::body(vec![Run::new(code, 1, TextStyle::plain())]),
    ])
}

fn underline_resets(ops: &[Operation]) -> Vec<&Operation> {
    ops.iter()
        .filter(|op| {
            matches!(
                op,
                Operation::SetAttribute {
                    attribute: TextAttribute::Underline,
                    ..
                }
            )
        })
        .collect()
}

fn with_formatter(result: Result<String, HandlerError>) -> Registry {
    Registry::builtin().unwrap().map_language(GO, move |go| {
        go.with_formatter(move |_: &str| -> Result<String, HandlerError> {
            match &result {
                Ok(code) => Ok(code.clone()),
                Err(e) => Err(HandlerError::Failed(e.to_string())),
            }
        })
    })
}

#[test]
fn test_format_success_replaces_code_and_resets_trigger() {
    let registry = with_formatter(Ok("x := 1\n".to_string()));
    let annotation = Annotator::new(&registry, &AnnotatorConfig::default())
        .unwrap()
        .annotate(&triggered("#format", "x:=1\n"))
        .unwrap();
    let ops = &annotation.operations;

    assert_eq!(
        underline_resets(ops),
        vec![&Operation::SetAttribute {
            range: DocRange::new(9, 16, "kix.h"),
            attribute: TextAttribute::Underline,
            enabled: false,
        }]
    );
    assert_eq!(
        ops[1..3],
        [
            Operation::DeleteText {
                range: DocRange::body(1, 6)
            },
            Operation::InsertText {
                index: 1,
                segment_id: String::new(),
                text: "x := 1\n".to_string(),
            },
        ]
    );
    assert!(ops.contains(&Operation::ClearTextFormatting {
        range: DocRange::body(1, 8)
    }));
}

#[test]
fn test_format_failure_still_resets_trigger() {
    let registry = with_formatter(Err(HandlerError::Failed("expected expression".into())));
    let annotation = Annotator::new(&registry, &AnnotatorConfig::default())
        .unwrap()
        .annotate(&triggered("#format", "x:=\n"))
        .unwrap();
    let ops = &annotation.operations;

    assert_eq!(
        underline_resets(ops),
        vec![&Operation::SetAttribute {
            range: DocRange::new(9, 16, "kix.h"),
            attribute: TextAttribute::Underline,
            enabled: false,
        }]
    );
    assert!(!ops.iter().any(|op| matches!(op, Operation::DeleteText { .. })));
    assert!(ops.contains(&Operation::ClearTextFormatting {
        range: DocRange::body(1, 5)
    }));
}

#[test]
fn test_trigger_token_matches_case_insensitively() {
    let registry = with_formatter(Ok("x\n".to_string()));
    let annotation = Annotator::new(&registry, &AnnotatorConfig::default())
        .unwrap()
        .annotate(&triggered("#FORMAT", "x\n"))
        .unwrap();
    assert_eq!(underline_resets(&annotation.operations).len(), 1);
}

#[test]
fn test_missing_formatter_is_a_configuration_error() {
    let registry = Registry::builtin().unwrap();
    let err = Annotator::new(&registry, &AnnotatorConfig::default())
        .unwrap()
        .annotate(&triggered("#format", "x\n"))
        .unwrap_err();

    assert!(matches!(
        &err,
        AnnotateError::MissingHandler {
            trigger: TriggerKind::Format,
            ..
        }
    ));
    assert!(err.is_configuration_error());
    assert_eq!(
        err.to_string(),
        "no format handler registered for language `Go`"
    );
}

#[test]
fn test_run_returns_result_and_resets_trigger() {
    let registry = Registry::builtin().unwrap().map_language(GO, |go| {
        go.with_runner(|code: &str| -> Result<RunResult, HandlerError> {
            Ok(RunResult {
                output: format!("{} bytes\n", code.len()),
                errors: String::new(),
                status_code: 0,
            })
        })
    });
    let annotation = Annotator::new(&registry, &AnnotatorConfig::default())
        .unwrap()
        .annotate(&triggered("#run", "main()\n"))
        .unwrap();

    assert_eq!(
        annotation.run_result,
        Some(RunResult {
            output: "7 bytes\n".to_string(),
            errors: String::new(),
            status_code: 0,
        })
    );
    assert_eq!(
        underline_resets(&annotation.operations),
        vec![&Operation::SetAttribute {
            range: DocRange::new(9, 13, "kix.h"),
            attribute: TextAttribute::Underline,
            enabled: false,
        }]
    );
}

#[test]
fn test_missing_runner_is_a_configuration_error() {
    let registry = Registry::builtin().unwrap();
    let err = Annotator::new(&registry, &AnnotatorConfig::default())
        .unwrap()
        .annotate(&triggered("#run", "x\n"))
        .unwrap_err();
    assert!(matches!(
        err,
        AnnotateError::MissingHandler {
            trigger: TriggerKind::Run,
            ..
        }
    ));
}
