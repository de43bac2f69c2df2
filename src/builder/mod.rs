//! Compiling exposure choices plus a live graph into a compound definition.

use itertools::Itertools;

use crate::definition::{
    COMPOUND_TYPE, CompoundControl, CompoundDefinition, CompoundInput, CompoundMappings,
    CompoundOutput, ParamMapping,
};
use crate::error::BuildError;
use crate::graph::{DataKind, Workflow};
use crate::ident::{definition_id, now_millis, slugify};
use crate::registry;

mod selection;

pub use selection::{ControlSelection, InputSelection};

/// Caps carried over from the workflow persistence layer; a definition is
/// a saved workflow plus a surface, so the same limits apply.
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_NODES: usize = 100;
pub const MAX_EDGES: usize = 500;

/// Builds an immutable [`CompoundDefinition`] from a workflow snapshot and
/// the caller's exposure selections.
///
/// The workflow is taken by value: the definition owns its internal graph
/// outright and later edits to the editor's live graph cannot reach it.
/// Outputs are not selected — every generation node contributes one
/// output automatically, named from its label.
pub struct DefinitionBuilder {
    name: String,
    icon: String,
    description: String,
    workflow: Workflow,
    exposed_inputs: Vec<InputSelection>,
    exposed_controls: Vec<ControlSelection>,
}

impl DefinitionBuilder {
    pub fn new(name: impl Into<String>, workflow: Workflow) -> Self {
        Self {
            name: name.into(),
            icon: String::new(),
            description: String::new(),
            workflow,
            exposed_inputs: Vec::new(),
            exposed_controls: Vec::new(),
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn expose_input(mut self, selection: InputSelection) -> Self {
        self.exposed_inputs.push(selection);
        self
    }

    pub fn expose_control(mut self, selection: ControlSelection) -> Self {
        self.exposed_controls.push(selection);
        self
    }

    /// Validates, then assembles the definition. Nothing is mutated or
    /// allocated into the result before validation passes, so a failed
    /// build leaves no trace.
    pub fn build(self) -> Result<CompoundDefinition, BuildError> {
        self.validate()?;

        let mut mappings = CompoundMappings::default();

        let inputs = self
            .exposed_inputs
            .iter()
            .map(|sel| {
                let id = slugify(&sel.exposed_name);
                mappings
                    .inputs
                    .insert(id.clone(), ParamMapping::new(&sel.node_id, &sel.param));
                CompoundInput {
                    id,
                    name: sel.exposed_name.clone(),
                    kind: sel.kind,
                }
            })
            .collect();

        let controls = self.collect_controls(&mut mappings);
        let outputs = self.collect_outputs(&mut mappings);

        let now = now_millis();
        Ok(CompoundDefinition {
            id: definition_id(&self.name),
            kind: COMPOUND_TYPE.to_string(),
            name: self.name,
            icon: self.icon,
            description: self.description,
            inputs,
            outputs,
            controls,
            internal_workflow: self.workflow,
            mappings,
            created_at: now,
            updated_at: now,
        })
    }

    fn validate(&self) -> Result<(), BuildError> {
        if self.name.trim().is_empty() {
            return Err(BuildError::EmptyName);
        }
        if self.name.len() > MAX_NAME_LEN {
            return Err(BuildError::NameTooLong { max: MAX_NAME_LEN });
        }
        if self.workflow.nodes.is_empty() {
            return Err(BuildError::EmptyWorkflow);
        }
        if self.workflow.nodes.len() > MAX_NODES {
            return Err(BuildError::TooManyNodes {
                count: self.workflow.nodes.len(),
                max: MAX_NODES,
            });
        }
        if self.workflow.edges.len() > MAX_EDGES {
            return Err(BuildError::TooManyEdges {
                count: self.workflow.edges.len(),
                max: MAX_EDGES,
            });
        }
        Ok(())
    }

    /// One declared control per distinct slug (first selection wins the
    /// display name and default); every selection sharing that slug
    /// appends a fan-out target to the mapping list, in selection order.
    fn collect_controls(&self, mappings: &mut CompoundMappings) -> Vec<CompoundControl> {
        mappings.controls = self
            .exposed_controls
            .iter()
            .map(|sel| {
                (
                    slugify(&sel.exposed_name),
                    ParamMapping::new(&sel.node_id, &sel.param),
                )
            })
            .into_group_map()
            .into_iter()
            .collect();

        self.exposed_controls
            .iter()
            .unique_by(|sel| slugify(&sel.exposed_name))
            .map(|sel| {
                let default = self
                    .workflow
                    .node(&sel.node_id)
                    .and_then(|n| n.value_at(&sel.param))
                    .cloned()
                    .unwrap_or_else(|| sel.control.synthetic_default());
                CompoundControl {
                    id: slugify(&sel.exposed_name),
                    name: sel.exposed_name.clone(),
                    control: sel.control.clone(),
                    default,
                }
            })
            .collect()
    }

    /// Auto-derives the output surface: every generation node contributes
    /// its generation connector, named from the node label. Label slugs
    /// that collide get a numeric suffix.
    fn collect_outputs(&self, mappings: &mut CompoundMappings) -> Vec<CompoundOutput> {
        let mut outputs: Vec<CompoundOutput> = Vec::new();

        for node in &self.workflow.nodes {
            let Some(decl) = registry::node_declarations(node) else {
                continue;
            };
            let Some(connector) = decl.generation_output else {
                continue;
            };
            let kind = decl
                .outputs
                .iter()
                .find(|o| o.id == connector)
                .map(|o| o.kind)
                .unwrap_or(DataKind::Any);
            let name = if node.label().is_empty() {
                decl.label.clone()
            } else {
                node.label().to_string()
            };

            let base = slugify(&name);
            let mut id = base.clone();
            let mut suffix = 2;
            while outputs.iter().any(|o| o.id == id) {
                id = format!("{base}_{suffix}");
                suffix += 1;
            }

            mappings.outputs.insert(
                id.clone(),
                ParamMapping::new(&node.id, format!("data.outputs.{connector}")),
            );
            outputs.push(CompoundOutput { id, name, kind });
        }

        outputs
    }
}
