use serde::{Deserialize, Serialize};

/// Whether a variable survives scene changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableScope {
    /// Declared on the project; carried across scene switches.
    #[default]
    Global,
    /// Declared on a scene; reset every time that scene loads.
    Scene,
}

/// A declared numeric variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    /// Unique identifier referenced by rules.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Value assigned when the variable is (re)initialized.
    #[serde(default)]
    pub initial_value: f64,
    /// Reset behavior on scene load.
    #[serde(default)]
    pub scope: VariableScope,
    /// Hint for the HUD.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_in_hud: bool,
}

impl Variable {
    /// Declare a global variable.
    pub fn global(id: impl Into<String>, name: impl Into<String>, initial_value: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            initial_value,
            scope: VariableScope::Global,
            show_in_hud: false,
        }
    }

    /// Declare a scene-scoped variable.
    pub fn scene(id: impl Into<String>, name: impl Into<String>, initial_value: f64) -> Self {
        Self {
            scope: VariableScope::Scene,
            ..Self::global(id, name, initial_value)
        }
    }
}
