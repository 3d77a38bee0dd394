//! Integration tests for the step list and script generation.

use seleflow_core::{
    ActionKind, DefinitionFormat, EPILOGUE, EditorCommand, EditorEvent, EditorState, Flow,
    FlowDefinition, PREAMBLE, StepList, StepParams, assemble, list_actions, reduce, render,
};
use std::collections::BTreeSet;

fn params(pairs: &[(&str, &str)]) -> StepParams {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn id_set(list: &StepList) -> BTreeSet<String> {
    list.list().iter().map(|step| step.id.clone()).collect()
}

#[test]
fn test_every_registered_kind_renders_its_own_template() {
    for action in list_actions() {
        let code = render(action.kind.as_str(), &StepParams::new());
        assert!(
            !code.starts_with("# Unknown action type"),
            "{} fell back to the unknown template",
            action.kind
        );
    }
}

#[test]
fn test_documented_fragments() {
    assert_eq!(
        render("Connect to Site", &params(&[("url", "https://example.com")])),
        "driver.get(\"https://example.com\")"
    );
    assert!(render("Wait", &params(&[("seconds", "5")])).contains("time.sleep(5)"));
    assert!(
        render(
            "Assert Element Presence",
            &params(&[("selector", "#x"), ("selectorType", "css")])
        )
        .contains("WebDriverWait(driver, 10)")
    );

    let unknown = render("Drag And Drop", &StepParams::new());
    assert!(unknown.contains("Drag And Drop"));
    assert_eq!(unknown.lines().count(), 1);
}

#[test]
fn test_append_then_remove_restores_length() {
    let mut flow = Flow::start("https://example.com").unwrap();
    let before = flow.steps().len();

    let id = flow
        .steps_mut()
        .append("Click Element", params(&[("selector", "#go")]))
        .id
        .clone();
    assert_eq!(flow.steps().len(), before + 1);

    flow.steps_mut().remove_by_id(&id);
    assert_eq!(flow.steps().len(), before);
}

#[test]
fn test_reorder_is_a_permutation() {
    let mut list = StepList::new();
    for kind in ActionKind::ALL {
        list.append(kind.as_str(), StepParams::new());
    }
    let before = id_set(&list);
    let codes_before: BTreeSet<String> = list.list().iter().map(|s| s.code.clone()).collect();

    for (from, to) in [(0, 7), (7, 0), (3, 5), (5, 3), (2, 2), (9, 1)] {
        list.reorder(from, to);
        assert_eq!(id_set(&list), before);
    }

    let codes_after: BTreeSet<String> = list.list().iter().map(|s| s.code.clone()).collect();
    assert_eq!(codes_before, codes_after);
}

#[test]
fn test_ids_stay_unique_through_mixed_edits() {
    let mut list = StepList::new();
    for round in 0..5 {
        list.append("Wait", params(&[("seconds", "1")]));
        list.append("Wait", params(&[("seconds", "2")]));
        let first = list.list()[0].id.clone();
        list.remove_by_id(&first);
        list.reorder(0, list.len() - 1);
        assert_eq!(id_set(&list).len(), list.len(), "round {round}");
    }
}

#[test]
fn test_assemble_is_preamble_fragments_epilogue() {
    let mut list = StepList::new();
    list.append("Navigate to URL", params(&[("url", "https://example.com/a")]));
    list.append("Not Registered", StepParams::new());
    list.append("Take Screenshot", params(&[("filename", "a.png")]));

    let body = list
        .list()
        .iter()
        .map(|step| step.code.clone())
        .collect::<Vec<_>>()
        .join("\n\n");
    assert_eq!(assemble(list.list()), format!("{PREAMBLE}{body}{EPILOGUE}"));
}

#[test]
fn test_assemble_empty_and_idempotent() {
    let empty = assemble(&[]);
    assert!(empty.contains(PREAMBLE));
    assert!(empty.contains(EPILOGUE));

    let flow = Flow::start("https://example.com").unwrap();
    assert_eq!(flow.script(), flow.script());
}

#[test]
fn test_editor_session_produces_script() {
    let mut state = EditorState::new();
    reduce(
        &mut state,
        EditorCommand::StartFlow {
            url: "https://shop.example.com".to_string(),
        },
    );

    let login = params(&[
        ("usernameSelector", "#user"),
        ("passwordSelector", "#pass"),
        ("username", "demo"),
        ("password", "hunter2"),
        ("submitSelector", "#login"),
    ]);
    let event = reduce(
        &mut state,
        EditorCommand::AppendStep {
            kind: "Login with Credentials".to_string(),
            params: login,
        },
    );
    assert_eq!(event, EditorEvent::StepAdded { id: "2".to_string() });

    let script = state.flow.as_ref().unwrap().script();
    let connect = script.find("driver.get(\"https://shop.example.com\")").unwrap();
    let login = script.find("# Login with credentials").unwrap();
    assert!(connect < login);
}

#[test]
fn test_definition_and_editor_agree() {
    let definition = FlowDefinition::parse(
        r#"{"url": "https://example.com", "steps": [{"kind": "Wait", "params": {"seconds": 2}}]}"#,
        DefinitionFormat::Json,
    )
    .unwrap();
    let from_definition = definition.into_flow().unwrap();

    let mut state = EditorState::new();
    reduce(
        &mut state,
        EditorCommand::StartFlow {
            url: "https://example.com".to_string(),
        },
    );
    reduce(
        &mut state,
        EditorCommand::AppendStep {
            kind: "Wait".to_string(),
            params: params(&[("seconds", "2")]),
        },
    );

    assert_eq!(from_definition.script(), state.flow.unwrap().script());
}
