//! Editor reducer.
//!
//! The flow model is kept apart from ephemeral view state (selected action,
//! draft form values, expanded steps). [`reduce`] maps each user intent onto
//! the step list operations and reports what happened.

use std::collections::HashSet;

use crate::flow::{Flow, StepParams};
use crate::registry::get_action;

/// Per-session view state. Nothing here is part of the generated script.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub selected_action: Option<String>,
    pub draft_params: StepParams,
    /// Step currently loaded into the draft form for editing.
    pub editing: Option<String>,
    pub expanded: HashSet<String>,
    pub url_error: Option<String>,
}

impl ViewState {
    fn reset_draft(&mut self) {
        self.selected_action = None;
        self.draft_params.clear();
        self.editing = None;
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub flow: Option<Flow>,
    pub view: ViewState,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// User intents accepted by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    StartFlow { url: String },
    SelectAction { kind: String },
    SetParam { name: String, value: String },
    BeginEdit { id: String },
    CancelDraft,
    /// Confirm the draft form: append, or update the step being edited.
    SubmitDraft,
    AppendStep { kind: String, params: StepParams },
    UpdateStep { id: String, kind: String, params: StepParams },
    DeleteStep { id: String },
    MoveStep { from: usize, to: usize },
    ToggleExpand { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    FlowStarted { flow_id: String },
    UrlRejected { message: String },
    DraftChanged,
    StepAdded { id: String },
    StepUpdated { id: String },
    StepDeleted { id: String },
    StepMoved { from: usize, to: usize },
    ExpandToggled { id: String, expanded: bool },
    Ignored,
}

pub fn reduce(state: &mut EditorState, command: EditorCommand) -> EditorEvent {
    if let EditorCommand::StartFlow { url } = &command {
        return start_flow(state, url);
    }

    let Some(flow) = state.flow.as_mut() else {
        return EditorEvent::Ignored;
    };
    let view = &mut state.view;

    match command {
        EditorCommand::StartFlow { .. } => EditorEvent::Ignored,
        EditorCommand::SelectAction { kind } => {
            if get_action(&kind).is_none() {
                return EditorEvent::Ignored;
            }
            view.selected_action = Some(kind);
            view.draft_params.clear();
            EditorEvent::DraftChanged
        }
        EditorCommand::SetParam { name, value } => {
            if view.selected_action.is_none() {
                return EditorEvent::Ignored;
            }
            view.draft_params.insert(name, value);
            EditorEvent::DraftChanged
        }
        EditorCommand::BeginEdit { id } => {
            let Some(step) = flow.steps().get(&id) else {
                return EditorEvent::Ignored;
            };
            view.selected_action = Some(step.kind.clone());
            view.draft_params = step.params.clone();
            view.editing = Some(id);
            EditorEvent::DraftChanged
        }
        EditorCommand::CancelDraft => {
            view.reset_draft();
            EditorEvent::DraftChanged
        }
        EditorCommand::SubmitDraft => {
            let Some(kind) = view.selected_action.take() else {
                return EditorEvent::Ignored;
            };
            let params = std::mem::take(&mut view.draft_params);
            let event = match view.editing.take() {
                Some(id) => match flow.steps_mut().update_by_id(&id, kind, params) {
                    Some(step) => EditorEvent::StepUpdated {
                        id: step.id.clone(),
                    },
                    None => EditorEvent::Ignored,
                },
                None => EditorEvent::StepAdded {
                    id: flow.steps_mut().append(kind, params).id.clone(),
                },
            };
            view.reset_draft();
            event
        }
        EditorCommand::AppendStep { kind, params } => EditorEvent::StepAdded {
            id: flow.steps_mut().append(kind, params).id.clone(),
        },
        EditorCommand::UpdateStep { id, kind, params } => {
            match flow.steps_mut().update_by_id(&id, kind, params) {
                Some(_) => EditorEvent::StepUpdated { id },
                None => EditorEvent::Ignored,
            }
        }
        EditorCommand::DeleteStep { id } => match flow.steps_mut().remove_by_id(&id) {
            Some(_) => {
                view.expanded.remove(&id);
                if view.editing.as_deref() == Some(id.as_str()) {
                    view.reset_draft();
                }
                EditorEvent::StepDeleted { id }
            }
            None => EditorEvent::Ignored,
        },
        EditorCommand::MoveStep { from, to } => {
            if flow.steps_mut().reorder(from, to) {
                EditorEvent::StepMoved { from, to }
            } else {
                EditorEvent::Ignored
            }
        }
        EditorCommand::ToggleExpand { id } => {
            if flow.steps().get(&id).is_none() {
                return EditorEvent::Ignored;
            }
            let expanded = if view.expanded.remove(&id) {
                false
            } else {
                view.expanded.insert(id.clone());
                true
            };
            EditorEvent::ExpandToggled { id, expanded }
        }
    }
}

fn start_flow(state: &mut EditorState, url: &str) -> EditorEvent {
    match Flow::start(url) {
        Ok(flow) => {
            let flow_id = flow.id().to_string();
            state.flow = Some(flow);
            state.view = ViewState::default();
            EditorEvent::FlowStarted { flow_id }
        }
        Err(err) => {
            let message = err.to_string();
            state.view.url_error = Some(message.clone());
            EditorEvent::UrlRejected { message }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> EditorState {
        let mut state = EditorState::new();
        let event = reduce(
            &mut state,
            EditorCommand::StartFlow {
                url: "https://example.com".to_string(),
            },
        );
        assert!(matches!(event, EditorEvent::FlowStarted { .. }));
        state
    }

    fn step_ids(state: &EditorState) -> Vec<String> {
        state
            .flow
            .as_ref()
            .unwrap()
            .steps()
            .list()
            .iter()
            .map(|step| step.id.clone())
            .collect()
    }

    #[test]
    fn invalid_url_keeps_editor_idle() {
        let mut state = EditorState::new();
        let event = reduce(
            &mut state,
            EditorCommand::StartFlow {
                url: "not a url".to_string(),
            },
        );
        assert!(matches!(event, EditorEvent::UrlRejected { .. }));
        assert!(state.flow.is_none());
        assert!(state.view.url_error.is_some());

        let event = reduce(&mut state, EditorCommand::MoveStep { from: 0, to: 0 });
        assert_eq!(event, EditorEvent::Ignored);
    }

    #[test]
    fn draft_submit_appends_and_resets_form() {
        let mut state = started();
        reduce(
            &mut state,
            EditorCommand::SelectAction {
                kind: "Wait".to_string(),
            },
        );
        reduce(
            &mut state,
            EditorCommand::SetParam {
                name: "seconds".to_string(),
                value: "3".to_string(),
            },
        );

        let event = reduce(&mut state, EditorCommand::SubmitDraft);
        assert_eq!(event, EditorEvent::StepAdded { id: "2".to_string() });
        assert!(state.view.selected_action.is_none());
        assert!(state.view.draft_params.is_empty());

        let flow = state.flow.as_ref().unwrap();
        assert!(flow.script().contains("time.sleep(3)"));
    }

    #[test]
    fn submit_without_selection_is_ignored() {
        let mut state = started();
        assert_eq!(reduce(&mut state, EditorCommand::SubmitDraft), EditorEvent::Ignored);
        assert_eq!(step_ids(&state), vec!["1"]);
    }

    #[test]
    fn selecting_action_clears_draft() {
        let mut state = started();
        reduce(
            &mut state,
            EditorCommand::SelectAction {
                kind: "Wait".to_string(),
            },
        );
        reduce(
            &mut state,
            EditorCommand::SetParam {
                name: "seconds".to_string(),
                value: "3".to_string(),
            },
        );
        reduce(
            &mut state,
            EditorCommand::SelectAction {
                kind: "Take Screenshot".to_string(),
            },
        );
        assert!(state.view.draft_params.is_empty());
        assert_eq!(state.view.selected_action.as_deref(), Some("Take Screenshot"));
    }

    #[test]
    fn edit_round_trip_updates_in_place() {
        let mut state = started();
        reduce(
            &mut state,
            EditorCommand::BeginEdit {
                id: "1".to_string(),
            },
        );
        assert_eq!(state.view.selected_action.as_deref(), Some("Connect to Site"));
        reduce(
            &mut state,
            EditorCommand::SetParam {
                name: "url".to_string(),
                value: "https://other.test".to_string(),
            },
        );

        let event = reduce(&mut state, EditorCommand::SubmitDraft);
        assert_eq!(event, EditorEvent::StepUpdated { id: "1".to_string() });

        let flow = state.flow.as_ref().unwrap();
        assert_eq!(flow.steps().len(), 1);
        assert_eq!(flow.steps().list()[0].code, "driver.get(\"https://other.test\")");
        assert!(state.view.editing.is_none());
    }

    #[test]
    fn delete_drops_expanded_flag() {
        let mut state = started();
        reduce(
            &mut state,
            EditorCommand::ToggleExpand {
                id: "1".to_string(),
            },
        );
        assert!(state.view.expanded.contains("1"));

        let event = reduce(
            &mut state,
            EditorCommand::DeleteStep {
                id: "1".to_string(),
            },
        );
        assert_eq!(event, EditorEvent::StepDeleted { id: "1".to_string() });
        assert!(state.view.expanded.is_empty());
        assert!(step_ids(&state).is_empty());

        let again = reduce(
            &mut state,
            EditorCommand::DeleteStep {
                id: "1".to_string(),
            },
        );
        assert_eq!(again, EditorEvent::Ignored);
    }

    #[test]
    fn move_step_reorders() {
        let mut state = started();
        for seconds in ["1", "2"] {
            let mut params = StepParams::new();
            params.insert("seconds".to_string(), seconds.to_string());
            reduce(
                &mut state,
                EditorCommand::AppendStep {
                    kind: "Wait".to_string(),
                    params,
                },
            );
        }

        let event = reduce(&mut state, EditorCommand::MoveStep { from: 2, to: 0 });
        assert_eq!(event, EditorEvent::StepMoved { from: 2, to: 0 });
        assert_eq!(step_ids(&state), vec!["3", "1", "2"]);

        let event = reduce(&mut state, EditorCommand::MoveStep { from: 5, to: 0 });
        assert_eq!(event, EditorEvent::Ignored);
    }

    #[test]
    fn toggle_expand_flips() {
        let mut state = started();
        let toggle = EditorCommand::ToggleExpand {
            id: "1".to_string(),
        };
        assert_eq!(
            reduce(&mut state, toggle.clone()),
            EditorEvent::ExpandToggled {
                id: "1".to_string(),
                expanded: true
            }
        );
        assert_eq!(
            reduce(&mut state, toggle),
            EditorEvent::ExpandToggled {
                id: "1".to_string(),
                expanded: false
            }
        );
    }
}
