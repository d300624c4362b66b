use annotator_core::{
    AnnotatorConfig, CodeInstance, DirectiveGrammar, Document, Run, Segment, TextStyle,
};
use annotator_core_lang::Registry;
use pretty_assertions::assert_eq;

fn extract<'r>(registry: &'r Registry, header: Vec<Run>) -> CodeInstance<'r> {
    let defaults = AnnotatorConfig::default().resolve(registry).unwrap();
    let grammar = DirectiveGrammar::new().unwrap();
    let document = Document::new(vec![
        Segment::header("kix.h", header),
        Segment::body(vec![Run::new("x := 1\n", 1, TextStyle::plain())]),
    ]);
    CodeInstance::extract(&document, &grammar, registry, &defaults).unwrap()
}

#[test]
fn test_unrecognized_tokens_leave_every_default() {
    let registry = Registry::builtin().unwrap();
    let instance = extract(
        &registry,
        vec![Run::new("my notes #lang= #size=big\n", 0, TextStyle::italic())],
    );

    assert_eq!(instance.language.name(), "Go");
    assert_eq!(instance.font, "Courier New");
    assert_eq!(instance.font_size, 11.0);
    assert_eq!(instance.theme.name, "dark");
    assert!(!instance.shortcuts);
    assert_eq!(instance.format, None);
    assert_eq!(instance.run, None);
}

#[test]
fn test_directives_override_defaults() {
    let registry = Registry::builtin().unwrap();
    let instance = extract(
        &registry,
        vec![
            Run::new("#theme=light #font=consolas ", 0, TextStyle::italic()),
            Run::new("#size=9.5 #shortcuts=enabled\n", 28, TextStyle::italic()),
        ],
    );

    assert_eq!(instance.theme.name, "light");
    assert_eq!(instance.font, "Consolas");
    assert_eq!(instance.font_size, 9.5);
    assert!(instance.shortcuts);
}

#[test]
fn test_configured_defaults_apply_when_unset() {
    let registry = Registry::builtin().unwrap();
    let config = AnnotatorConfig::from_toml_str(
        r#"
default_theme = "light"
default_font = "consolas"
default_font_size = 14.0
default_shortcuts = true
"#,
    )
    .unwrap();
    let defaults = config.resolve(&registry).unwrap();
    let grammar = DirectiveGrammar::new().unwrap();
    let document = Document::new(vec![Segment::body(vec![Run::new(
        "x\n",
        1,
        TextStyle::plain(),
    )])]);
    let instance = CodeInstance::extract(&document, &grammar, &registry, &defaults).unwrap();

    assert_eq!(instance.theme.name, "light");
    assert_eq!(instance.font, "Consolas");
    assert_eq!(instance.font_size, 14.0);
    assert!(instance.shortcuts);
}
