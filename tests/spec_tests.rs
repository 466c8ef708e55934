use test_builder::{
    BuilderError,
    capture::controller::ElementPicked,
    spec::{
        editor::{ActionEdit, AssertionEdit, SpecModel},
        serializer::{properties, serialize},
        spec_model::{
            Action, ActionKind, ActionStep, Assertion, AssertionKind, Condition, SpecMeta, TestSpec,
        },
    },
};

// =========================================================================
// Helpers
// =========================================================================

fn guest_login_spec() -> TestSpec {
    TestSpec {
        test_id: "guest_login".into(),
        actions: vec![Action::navigate("login"), Action::click("login", "loginBtn")],
        assertions: vec![Assertion::new(AssertionKind::Url, "/home", Condition::Equals)],
        ..TestSpec::default()
    }
}

fn meta(test_id: &str) -> SpecMeta {
    SpecMeta {
        test_id: test_id.into(),
        ..SpecMeta::default()
    }
}

fn picked(element: &str, page: &str) -> ElementPicked {
    ElementPicked {
        element_id: element.into(),
        page_id: page.into(),
    }
}

// =========================================================================
// Serializer
// =========================================================================

#[test]
fn guest_login_scenario_matches_expected_snippet() {
    let expected = "\
test.guest_login.description=Default description
test.guest_login.actions[0].action=navigate
test.guest_login.actions[0].targetPage=login
test.guest_login.actions[1].action=click
test.guest_login.actions[1].page=login
test.guest_login.actions[1].element=loginBtn
test.guest_login.assertions[0].type=url
test.guest_login.assertions[0].value=/home
test.guest_login.assertions[0].condition=equals
";

    assert_eq!(serialize(&guest_login_spec()), expected);
}

#[test]
fn empty_spec_emits_only_description() {
    let spec = TestSpec {
        test_id: "smoke".into(),
        ..TestSpec::default()
    };

    assert_eq!(serialize(&spec), "test.smoke.description=Default description\n");
}

#[test]
fn blank_test_id_uses_placeholder() {
    let spec = TestSpec {
        description: "Guest login test".into(),
        ..TestSpec::default()
    };

    assert_eq!(serialize(&spec), "test.default_test.description=Guest login test\n");
}

#[test]
fn metadata_lines_come_in_fixed_order() {
    let spec = TestSpec {
        test_id: "cart".into(),
        description: "Add to cart".into(),
        data_file: "testdata/users.csv".into(),
        start_page: "products".into(),
        ..TestSpec::default()
    };

    let keys: Vec<String> = properties(&spec).into_iter().map(|p| p.key).collect();
    assert_eq!(
        keys,
        vec![
            "test.cart.description",
            "test.cart.dataFile",
            "test.cart.startPage",
        ]
    );
}

#[test]
fn navigate_and_interaction_keys_are_exclusive() {
    let mut spec = guest_login_spec();
    spec.actions.push(Action::enter("login", "username", "testuser"));
    // navigate keeps element/value in storage, but never emits them
    spec.actions[0].element = "stale".into();
    spec.actions[0].value = "stale".into();

    let keys: Vec<String> = properties(&spec).into_iter().map(|p| p.key).collect();

    let nav: Vec<&String> = keys.iter().filter(|k| k.contains("actions[0].")).collect();
    assert_eq!(nav.len(), 2);
    assert!(nav.iter().all(|k| !k.ends_with(".page") && !k.ends_with(".element") && !k.ends_with(".value")));

    for i in 1..=2 {
        let prefix = format!("actions[{}].", i);
        assert!(
            keys.iter()
                .filter(|k| k.contains(&prefix))
                .all(|k| !k.ends_with(".targetPage")),
            "action {} must not emit targetPage",
            i
        );
    }
}

#[test]
fn action_value_omitted_when_empty_but_assertion_value_kept() {
    let spec = TestSpec {
        test_id: "t".into(),
        actions: vec![
            Action::enter("login", "username", ""),
            Action::enter("login", "password", "secret"),
        ],
        assertions: vec![Assertion::new(AssertionKind::Visible, "", Condition::Contains)],
        ..TestSpec::default()
    };

    let out = serialize(&spec);

    assert!(!out.contains("actions[0].value="));
    assert!(out.contains("test.t.actions[1].value=secret\n"));
    assert!(out.contains("test.t.assertions[0].type=visible\n"));
    assert!(out.contains("test.t.assertions[0].value=\n"));
    assert!(out.contains("test.t.assertions[0].condition=contains\n"));
}

#[test]
fn click_with_value_still_emits_it() {
    let mut click = Action::click("menu", "more");
    click.value = "x".into();
    let spec = TestSpec {
        test_id: "t".into(),
        actions: vec![click],
        ..TestSpec::default()
    };

    assert!(serialize(&spec).contains("test.t.actions[0].value=x\n"));
}

#[test]
fn values_are_written_verbatim() {
    let spec = TestSpec {
        test_id: "t".into(),
        description: "a=b c".into(),
        actions: vec![Action::enter("p", "e", "x=y")],
        ..TestSpec::default()
    };

    let out = serialize(&spec);

    assert!(out.contains("test.t.description=a=b c\n"));
    assert!(out.contains("test.t.actions[0].value=x=y\n"));
}

#[test]
fn navigate_with_empty_target_is_legal() {
    let spec = TestSpec {
        test_id: "t".into(),
        actions: vec![Action::navigate("")],
        ..TestSpec::default()
    };

    assert!(serialize(&spec).ends_with("test.t.actions[0].targetPage=\n"));
}

#[test]
fn action_step_view_follows_kind() {
    let mut action = Action::click("login", "loginBtn");
    assert_eq!(
        action.step(),
        ActionStep::Click {
            page: "login",
            element: "loginBtn",
            value: ""
        }
    );

    action.kind = ActionKind::Navigate;
    assert_eq!(action.step(), ActionStep::Navigate { target_page: "login" });
}

// =========================================================================
// Spec model
// =========================================================================

#[test]
fn seeded_action_defaults_to_navigate_with_picked_fields() {
    let mut model = SpecModel::new();

    let h = model.add_action(Some(&picked("loginBtn", "login")));

    let action = model.action(h).unwrap();
    assert_eq!(action.kind, ActionKind::Navigate);
    assert_eq!(action.page, "login");
    assert_eq!(action.element, "loginBtn");
    assert_eq!(action.value, "");
}

#[test]
fn changing_kind_keeps_fields() {
    let mut model = SpecModel::new();
    let h = model.add_action(Some(&picked("username", "login")));

    model.edit_action(h, ActionEdit::Kind(ActionKind::Enter)).unwrap();
    model.edit_action(h, ActionEdit::Value("testuser".into())).unwrap();
    model.edit_action(h, ActionEdit::Kind(ActionKind::Navigate)).unwrap();
    model.edit_action(h, ActionEdit::Kind(ActionKind::Enter)).unwrap();

    let action = model.action(h).unwrap();
    assert_eq!(action, &Action::enter("login", "username", "testuser"));
}

#[test]
fn target_page_edit_writes_page_field() {
    let mut model = SpecModel::new();
    let h = model.add_action(None);

    model.edit_action(h, ActionEdit::TargetPage("checkout".into())).unwrap();

    assert_eq!(model.action(h).unwrap().page, "checkout");
}

#[test]
fn default_assertion_is_url_equals_empty() {
    let mut model = SpecModel::new();
    let h = model.add_assertion();

    assert_eq!(model.assertion(h).unwrap(), &Assertion::default());
    assert_eq!(
        model.assertion(h).unwrap(),
        &Assertion::new(AssertionKind::Url, "", Condition::Equals)
    );
}

#[test]
fn order_is_append_order_across_interleaved_edits() {
    let mut model = SpecModel::new();
    model.set_meta(meta("order"));

    let a0 = model.add_action(Some(&picked("first", "p")));
    let s0 = model.add_assertion();
    let a1 = model.add_action(None);
    model.edit_assertion(s0, AssertionEdit::Value("/home".into())).unwrap();
    let a2 = model.add_action(Some(&picked("third", "p")));
    model.edit_action(a1, ActionEdit::Element("second".into())).unwrap();
    let s1 = model.add_assertion();
    model.edit_assertion(s1, AssertionEdit::Kind(AssertionKind::Visible)).unwrap();
    model.edit_action(a0, ActionEdit::Kind(ActionKind::Click)).unwrap();
    model.edit_action(a2, ActionEdit::Kind(ActionKind::Click)).unwrap();

    let spec = model.snapshot();
    let elements: Vec<&str> = spec.actions.iter().map(|a| a.element.as_str()).collect();
    assert_eq!(elements, vec!["first", "second", "third"]);
    assert_eq!(spec.assertions[0].value, "/home");
    assert_eq!(spec.assertions[1].kind, AssertionKind::Visible);

    let out = serialize(&spec);
    assert!(out.contains("test.order.actions[0].element=first\n"));
    assert!(out.contains("test.order.actions[2].element=third\n"));
    assert!(out.contains("test.order.assertions[1].type=visible\n"));
}

#[test]
fn remove_reindexes_remaining_rows() {
    let mut model = SpecModel::new();
    let a = model.add_action(Some(&picked("a", "p")));
    let b = model.add_action(Some(&picked("b", "p")));
    let c = model.add_action(Some(&picked("c", "p")));

    let removed = model.remove_action(b).unwrap();
    assert_eq!(removed.element, "b");

    assert_eq!(model.action_count(), 2);
    assert_eq!(model.action_at(0), Some(a));
    assert_eq!(model.action_at(1), Some(c));

    // handles stay valid after the shift
    model.edit_action(c, ActionEdit::Element("c2".into())).unwrap();
    let spec = model.snapshot();
    assert_eq!(spec.actions[1].element, "c2");
    assert!(serialize(&spec).contains("actions[1].element=c2"));
}

#[test]
fn removed_handles_are_rejected() {
    let mut model = SpecModel::new();
    let a = model.add_action(None);
    let s = model.add_assertion();
    model.remove_action(a).unwrap();
    model.remove_assertion(s).unwrap();

    assert!(matches!(
        model.edit_action(a, ActionEdit::Page("x".into())),
        Err(BuilderError::UnknownHandle { kind: "action", .. })
    ));
    assert!(matches!(
        model.remove_assertion(s),
        Err(BuilderError::UnknownHandle { kind: "assertion", .. })
    ));
    assert_eq!(model.action_count(), 0);
    assert_eq!(model.assertion_count(), 0);
}

#[test]
fn meta_is_stored_verbatim() {
    let mut model = SpecModel::new();
    let raw = SpecMeta {
        test_id: "".into(),
        description: "  spaced  ".into(),
        data_driven: false,
        data_file: "users.csv".into(),
        start_page: "".into(),
    };

    model.set_meta(raw.clone());

    assert_eq!(model.meta(), &raw);
}

#[test]
fn data_file_reaches_snapshot_only_when_data_driven() {
    let mut model = SpecModel::new();
    model.set_meta(SpecMeta {
        test_id: "dd".into(),
        data_file: "users.csv".into(),
        ..SpecMeta::default()
    });
    assert_eq!(model.snapshot().data_file, "");
    assert!(!serialize(&model.snapshot()).contains("dataFile"));

    model.set_meta(SpecMeta {
        test_id: "dd".into(),
        data_driven: true,
        data_file: "users.csv".into(),
        ..SpecMeta::default()
    });
    assert!(serialize(&model.snapshot()).contains("test.dd.dataFile=users.csv\n"));

    model.set_meta(SpecMeta {
        test_id: "dd".into(),
        data_driven: true,
        ..SpecMeta::default()
    });
    assert!(!serialize(&model.snapshot()).contains("dataFile"), "flag alone emits nothing");
}

#[test]
fn snapshot_is_detached_from_live_model() {
    let mut model = SpecModel::new();
    model.set_meta(meta("detached"));
    let h = model.add_action(Some(&picked("btn", "home")));

    let snapshot = model.snapshot();
    let rendered = serialize(&snapshot);

    model.edit_action(h, ActionEdit::Element("changed".into())).unwrap();
    model.add_assertion();

    assert_eq!(snapshot.actions[0].element, "btn");
    assert!(snapshot.assertions.is_empty());
    assert_eq!(serialize(&snapshot), rendered);
}

#[test]
fn serialize_twice_is_byte_identical() {
    let mut model = SpecModel::new();
    model.set_meta(meta("stable"));
    model.add_action(Some(&picked("btn", "home")));
    model.add_assertion();

    assert_eq!(serialize(&model.snapshot()), serialize(&model.snapshot()));
}

// =========================================================================
// Serde
// =========================================================================

#[test]
fn spec_deserialize_from_yaml_string() {
    let yaml = r#"
test_id: guest_login
actions:
  - kind: navigate
    page: login
  - kind: click
    page: login
    element: loginBtn
assertions:
  - type: url
    value: /home
    condition: equals
"#;

    let spec: TestSpec = serde_yaml::from_str(yaml).expect("Failed to parse YAML");

    assert_eq!(spec, guest_login_spec());
}

#[test]
fn edits_deserialize_as_field_value_pairs() {
    let edit: ActionEdit = serde_yaml::from_str("{field: kind, value: enter}").unwrap();
    assert_eq!(edit, ActionEdit::Kind(ActionKind::Enter));

    let edit: AssertionEdit = serde_yaml::from_str("{field: condition, value: contains}").unwrap();
    assert_eq!(edit, AssertionEdit::Condition(Condition::Contains));
}
