//! Step list model and the flow that owns it.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

use crate::error::{FlowError, Result};
use crate::registry::{ActionKind, get_action};
use crate::script::assemble;
use crate::template::render;

/// Parameter name to raw string value.
pub type StepParams = BTreeMap<String, String>;

/// One parameterized action in a flow, carrying its rendered fragment.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Step {
    pub id: String,
    pub kind: String,
    pub params: StepParams,
    pub code: String,
}

impl Step {
    fn new(id: String, kind: String, params: StepParams) -> Self {
        let code = render(&kind, &params);
        Self {
            id,
            kind,
            params,
            code,
        }
    }

    /// `name: value` pairs, schema order first, for the list view.
    pub fn summary(&self) -> String {
        let mut ordered: Vec<(&str, &str)> = Vec::with_capacity(self.params.len());

        if let Some(action) = get_action(&self.kind) {
            for name in action.param_names() {
                if let Some(value) = self.params.get(name) {
                    ordered.push((name, value.as_str()));
                }
            }
        }

        for (name, value) in &self.params {
            if !ordered.iter().any(|(seen, _)| *seen == name.as_str()) {
                ordered.push((name.as_str(), value.as_str()));
            }
        }

        ordered
            .into_iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Ordered steps with list-unique ids.
///
/// Ids come from a counter that only moves forward, so an id is never
/// handed out twice by the same list even after deletions.
#[derive(Debug, Clone)]
pub struct StepList {
    steps: Vec<Step>,
    next_id: u64,
}

impl Default for StepList {
    fn default() -> Self {
        Self::new()
    }
}

impl StepList {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a step; `kind` is not validated against the registry.
    pub fn append(&mut self, kind: impl Into<String>, params: StepParams) -> &Step {
        let id = self.next_id.to_string();
        self.next_id += 1;

        let step = Step::new(id, kind.into(), params);
        debug!(step_id = %step.id, kind = %step.kind, "Appending step");
        self.steps.push(step);
        &self.steps[self.steps.len() - 1]
    }

    /// Remove the step with `id`; absent ids are a no-op.
    pub fn remove_by_id(&mut self, id: &str) -> Option<Step> {
        let index = self.position(id)?;
        debug!(step_id = id, index, "Removing step");
        Some(self.steps.remove(index))
    }

    /// Replace kind and params in place, re-rendering the fragment.
    pub fn update_by_id(
        &mut self,
        id: &str,
        kind: impl Into<String>,
        params: StepParams,
    ) -> Option<&Step> {
        let index = self.position(id)?;
        let step = &mut self.steps[index];
        *step = Step::new(step.id.clone(), kind.into(), params);
        debug!(step_id = id, kind = %step.kind, "Updated step");
        Some(&*step)
    }

    /// Move the element at `from` to `to`. Out-of-range indices are a no-op
    /// and return false.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.steps.len();
        if from >= len || to >= len {
            return false;
        }
        if from != to {
            let step = self.steps.remove(from);
            self.steps.insert(to, step);
            debug!(from, to, "Reordered steps");
        }
        true
    }

    pub fn list(&self) -> &[Step] {
        &self.steps
    }

    pub fn get(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.id == id)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// The editor's flow: a target URL and the steps built against it.
#[derive(Debug, Clone)]
pub struct Flow {
    id: String,
    target_url: String,
    steps: StepList,
}

impl Flow {
    /// Validate `target_url` and seed the flow with a connect step.
    pub fn start(target_url: &str) -> Result<Self> {
        if target_url.is_empty() {
            return Err(FlowError::EmptyUrl);
        }
        url::Url::parse(target_url)?;

        let mut steps = StepList::new();
        let mut params = StepParams::new();
        params.insert("url".to_string(), target_url.to_string());
        steps.append(ActionKind::ConnectToSite.as_str(), params);

        let id = Uuid::new_v4().to_string();
        debug!(flow_id = %id, target_url, "Started flow");

        Ok(Self {
            id,
            target_url: target_url.to_string(),
            steps,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn steps(&self) -> &StepList {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut StepList {
        &mut self.steps
    }

    /// Assemble the full script; recomputed on every call.
    pub fn script(&self) -> String {
        assemble(self.steps.list())
    }
}
