use crate::analyzer::{AvailableControl, AvailableInput};
use crate::definition::ControlKind;
use crate::graph::DataKind;

/// A caller's choice to expose one input slot, usually picked from an
/// analysis catalog. `exposed_name` is what the compound surface shows;
/// its slug becomes the exposed id.
#[derive(Debug, Clone)]
pub struct InputSelection {
    pub node_id: String,
    pub param: String,
    pub exposed_name: String,
    pub kind: DataKind,
}

impl InputSelection {
    pub fn from_available(available: &AvailableInput, exposed_name: impl Into<String>) -> Self {
        Self {
            node_id: available.node_id.clone(),
            param: available.param.clone(),
            exposed_name: exposed_name.into(),
            kind: available.kind,
        }
    }
}

/// A caller's choice to expose one parameter as a control.
///
/// Several selections may share an `exposed_name`: their slugs collide on
/// purpose and the resulting control fans out to every selected target.
#[derive(Debug, Clone)]
pub struct ControlSelection {
    pub node_id: String,
    pub param: String,
    pub exposed_name: String,
    pub control: ControlKind,
}

impl ControlSelection {
    pub fn from_available(available: &AvailableControl, exposed_name: impl Into<String>) -> Self {
        Self {
            node_id: available.node_id.clone(),
            param: available.param.clone(),
            exposed_name: exposed_name.into(),
            control: available.control.clone(),
        }
    }
}
