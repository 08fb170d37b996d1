use crate::config::KeyBindings;
use crate::universe::Universe;

use super::panel::Panel;

/// Everything input handling may change.
pub struct Session {
    pub universe: Universe,
    pub bindings: KeyBindings,
    pub panel: Panel,
}

impl Session {
    pub fn new(universe: Universe, bindings: KeyBindings) -> Self {
        Session {
            universe,
            bindings,
            panel: Panel::default(),
        }
    }

    /// The camera is in, or on its way into, a box.
    pub fn inside(&self) -> bool {
        self.universe.selected().is_some()
    }
}
