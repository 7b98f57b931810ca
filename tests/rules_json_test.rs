//! Loading rule sets from JSON (requires the `cli` feature).

#![cfg(feature = "cli")]

use std::io::Write;

use viewstyle::view::{ViewKind, default_appliers, demo_rules, demo_tree};
use viewstyle::{Color, Declaration, Error, RuleSet, Selector, Size, apply_styles};

const SHEET: &str = r##"[
    {
        "selectors": [{ "kind": "Label" }],
        "declarations": [
            { "Color": "#00ff00" },
            { "CornerRadius": 10.0 }
        ]
    },
    {
        "selectors": [
            { "kind": "Label", "class": "Foo" },
            { "class": "Loud", "ancestor": { "kind": "Button" } }
        ],
        "declarations": [
            { "Color": "#ff00ff" },
            { "ShadowOffset": { "width": 4.0, "height": 10.0 } }
        ]
    }
]"##;

#[test]
fn test_parse_rule_set() {
    let rules = RuleSet::<ViewKind>::from_json_reader(SHEET.as_bytes()).unwrap();
    assert_eq!(rules.len(), 2);

    let second = &rules.rules()[1];
    assert_eq!(
        second.selectors()[0],
        Selector::kind(ViewKind::Label).with_class("Foo")
    );
    assert_eq!(
        second.selectors()[1],
        Selector::class("Loud").within(Selector::kind(ViewKind::Button))
    );
    assert_eq!(
        second.declarations(),
        &[
            Declaration::Color(Color::MAGENTA),
            Declaration::ShadowOffset(Size::new(4.0, 10.0)),
        ]
    );
}

#[test]
fn test_load_from_file_and_apply() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SHEET.as_bytes()).unwrap();

    let rules = RuleSet::<ViewKind>::from_json_file(file.path()).unwrap();
    let (mut tree, classes) = demo_tree().unwrap();
    let appliers = default_appliers().unwrap();
    let root = tree.root();
    apply_styles(&mut tree, &rules, &appliers, &classes, root);

    let special = tree.find_by_name("special").unwrap();
    assert_eq!(tree.props(special).text_color, Some(Color::MAGENTA));
    assert!(!tree.props(special).clips_to_bounds);

    let title = tree.find_by_name("title").unwrap();
    assert_eq!(tree.props(title).text_color, Some(Color::GREEN));
    assert!(tree.props(title).clips_to_bounds);
}

#[test]
fn test_demo_rules_survive_serialization() {
    let json = serde_json::to_string(&demo_rules()).unwrap();
    let parsed = RuleSet::<ViewKind>::from_json_reader(json.as_bytes()).unwrap();
    assert_eq!(parsed, demo_rules());
}

#[test]
fn test_omitted_selector_fields_are_unconstrained() {
    let sheet = r##"[
        { "selectors": [{}], "declarations": [{ "BorderWidth": 2.0 }] },
        { "selectors": [{ "class": "Foo" }], "declarations": [] },
        { "selectors": [{ "ancestor": { "kind": "Button" } }], "declarations": [] }
    ]"##;
    let rules = RuleSet::<ViewKind>::from_json_reader(sheet.as_bytes()).unwrap();

    assert_eq!(rules.rules()[0].selectors()[0], Selector::any());
    assert_eq!(rules.rules()[1].selectors()[0], Selector::class("Foo"));
    assert_eq!(
        rules.rules()[2].selectors()[0],
        Selector::any().within(Selector::kind(ViewKind::Button))
    );

    // Missing fields are not written back out.
    let json = serde_json::to_string(&rules.rules()[0].selectors()[0]).unwrap();
    assert_eq!(json, "{}");
}

#[test]
fn test_invalid_color_is_rejected() {
    let sheet = r#"[{ "selectors": [], "declarations": [{ "Color": "green" }] }]"#;
    let err = RuleSet::<ViewKind>::from_json_reader(sheet.as_bytes()).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
    assert!(err.to_string().contains("invalid color"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = RuleSet::<ViewKind>::from_json_file(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
