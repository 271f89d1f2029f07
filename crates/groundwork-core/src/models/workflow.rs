//! Workflow aggregate model and its derived sub-structures.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::{Phase, PhaseDescriptor, PhaseProgress, Priority, WorkflowStep};

/// Overall completion counters for a workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Progress {
    /// Total number of steps
    pub total: u32,

    /// Number of completed steps
    pub completed: u32,

    /// `floor(100 * completed / total)`, 0 when there are no steps
    pub percent: u8,

    /// `order` of the first non-completed step, 1 when everything is done
    pub current_step: u32,

    /// `id` of the first non-completed step, 0 when everything is done
    pub next_step: u32,
}

/// Partition of the workflow's steps into the three priority buckets.
///
/// Buckets may be empty; together they always cover every step exactly once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GroupedSteps {
    #[serde(rename = "A")]
    pub a: Vec<WorkflowStep>,
    #[serde(rename = "B")]
    pub b: Vec<WorkflowStep>,
    #[serde(rename = "C")]
    pub c: Vec<WorkflowStep>,
}

impl GroupedSteps {
    /// Partition steps by priority, preserving workflow order inside each
    /// bucket.
    pub fn from_steps(steps: &[WorkflowStep]) -> Self {
        let bucket = |p: Priority| {
            steps
                .iter()
                .filter(|s| s.priority == p)
                .cloned()
                .collect::<Vec<_>>()
        };
        Self {
            a: bucket(Priority::A),
            b: bucket(Priority::B),
            c: bucket(Priority::C),
        }
    }
}

/// The workflow aggregate root.
///
/// Created once from a blueprint and thereafter only mutated through
/// [`crate::engine::update_step_status`], which recomputes every derived
/// field so none is ever stale relative to `steps`.
///
/// Two pairs of historical synonym field names survive at the serialization
/// boundary: the summary is emitted as both `summary` and `app_summary`,
/// and the step list as both `steps` and `build_steps`. Internally each pair
/// is one canonical field; deserialization accepts either name.
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    /// Free-text description of the thing being built
    pub idea: String,

    /// Human summary (canonical for `summary`/`app_summary`)
    pub summary: String,

    /// Opaque stack description from the blueprint
    pub tech_stack: Value,

    /// Opaque directory layout hints from the blueprint
    pub directory_structure: Vec<Value>,

    /// Opaque user-flow hints from the blueprint
    pub user_flow: Vec<Value>,

    /// Step groupings
    pub phases: Vec<Phase>,

    /// Per-phase counters, same order as `phases`
    pub phase_progress: Vec<PhaseProgress>,

    /// All steps in workflow order (canonical for `steps`/`build_steps`)
    pub steps: Vec<WorkflowStep>,

    /// Priority partition of `steps`
    pub grouped_steps: GroupedSteps,

    /// Overall counters
    pub progress: Progress,

    /// Current-phase card
    pub phase: PhaseDescriptor,

    /// Free-text usage hint
    pub progress_hint: String,

    /// True once overall percent reaches 70
    pub testing_unlocked: bool,
}

impl Workflow {
    /// Find a step by its unique id.
    pub fn find_step(&self, step_id: u32) -> Option<&WorkflowStep> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    /// The first step that is not yet completed, if any.
    pub fn next_open_step(&self) -> Option<&WorkflowStep> {
        self.steps.iter().find(|s| s.is_open())
    }
}

impl Serialize for Workflow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Workflow", 15)?;
        s.serialize_field("idea", &self.idea)?;
        s.serialize_field("app_summary", &self.summary)?;
        s.serialize_field("summary", &self.summary)?;
        s.serialize_field("tech_stack", &self.tech_stack)?;
        s.serialize_field("directory_structure", &self.directory_structure)?;
        s.serialize_field("user_flow", &self.user_flow)?;
        s.serialize_field("phases", &self.phases)?;
        s.serialize_field("phase_progress", &self.phase_progress)?;
        s.serialize_field("build_steps", &self.steps)?;
        s.serialize_field("steps", &self.steps)?;
        s.serialize_field("grouped_steps", &self.grouped_steps)?;
        s.serialize_field("progress", &self.progress)?;
        s.serialize_field("phase", &self.phase)?;
        s.serialize_field("progress_hint", &self.progress_hint)?;
        s.serialize_field("testing_unlocked", &self.testing_unlocked)?;
        s.end()
    }
}

/// Wire-side mirror of [`Workflow`] that tolerates either synonym of each
/// duplicated field (and both at once, as produced by our own serializer).
#[derive(Deserialize)]
struct WorkflowWire {
    #[serde(default)]
    idea: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    app_summary: Option<String>,
    #[serde(default)]
    tech_stack: Value,
    #[serde(default)]
    directory_structure: Vec<Value>,
    #[serde(default)]
    user_flow: Vec<Value>,
    #[serde(default)]
    phases: Vec<Phase>,
    #[serde(default)]
    phase_progress: Vec<PhaseProgress>,
    #[serde(default)]
    steps: Option<Vec<WorkflowStep>>,
    #[serde(default)]
    build_steps: Option<Vec<WorkflowStep>>,
    #[serde(default)]
    grouped_steps: GroupedSteps,
    #[serde(default)]
    progress: Progress,
    phase: PhaseDescriptor,
    #[serde(default)]
    progress_hint: String,
    #[serde(default)]
    testing_unlocked: bool,
}

impl<'de> Deserialize<'de> for Workflow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WorkflowWire::deserialize(deserializer)?;
        Ok(Workflow {
            idea: wire.idea,
            summary: wire.summary.or(wire.app_summary).unwrap_or_default(),
            tech_stack: wire.tech_stack,
            directory_structure: wire.directory_structure,
            user_flow: wire.user_flow,
            phases: wire.phases,
            phase_progress: wire.phase_progress,
            steps: wire.build_steps.or(wire.steps).unwrap_or_default(),
            grouped_steps: wire.grouped_steps,
            progress: wire.progress,
            phase: wire.phase,
            progress_hint: wire.progress_hint,
            testing_unlocked: wire.testing_unlocked,
        })
    }
}
