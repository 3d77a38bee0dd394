//! SeleFlow core - step-list model and Selenium script generation.
//!
//! This crate holds everything with a contract in the flow editor:
//! - Action registry: the fixed catalog of action kinds and their parameters
//! - Template engine: `(kind, params) -> fragment` rendering
//! - Step list and flow: ordered steps with unique ids and pre-rendered code
//! - Script assembler: preamble + fragments + epilogue
//! - Editor reducer: user intents mapped onto step list operations

pub mod definition;
pub mod editor;
pub mod error;
pub mod flow;
pub mod registry;
pub mod script;
pub mod template;

pub use definition::{DefinitionFormat, FlowDefinition, StepDefinition};
pub use editor::{EditorCommand, EditorEvent, EditorState, ViewState, reduce};
pub use error::{FlowError, Result};
pub use flow::{Flow, Step, StepList, StepParams};
pub use registry::{ActionKind, ActionParamSpec, ActionSpec, get_action, list_actions};
pub use script::{EPILOGUE, PREAMBLE, SCRIPT_FILE_NAME, assemble, export_script};
pub use template::{Locator, render};
