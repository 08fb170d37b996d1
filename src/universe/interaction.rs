use std::fmt;

use crate::film_box::Direction;

/// Where the viewer is relative to the boxes.
///
/// ```text
/// Overview --select--> ZoomingIn --camera arrives--> Inside
///     ^                    |                           |
///     +--camera arrives-- ZoomingOut <------exit-------+
/// ```
///
/// Exit is also accepted while still zooming in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Overview,
    ZoomingIn {
        selected: usize,
        turn: Option<Direction>,
    },
    Inside {
        selected: usize,
        turn: Option<Direction>,
    },
    ZoomingOut,
}

impl Interaction {
    pub fn selected(&self) -> Option<usize> {
        match *self {
            Interaction::ZoomingIn { selected, .. } | Interaction::Inside { selected, .. } => {
                Some(selected)
            }
            _ => None,
        }
    }

    pub fn pending_turn(&self) -> Option<Direction> {
        match *self {
            Interaction::ZoomingIn { turn, .. } | Interaction::Inside { turn, .. } => turn,
            _ => None,
        }
    }

    /// Set or clear the pending turn. No effect without a selection.
    pub(crate) fn set_turn(&mut self, direction: Option<Direction>) {
        if let Interaction::ZoomingIn { turn, .. } | Interaction::Inside { turn, .. } = self {
            *turn = direction;
        }
    }

    /// Called when the camera tween reaches its target.
    pub(crate) fn camera_arrived(&mut self) {
        *self = match *self {
            Interaction::ZoomingIn { selected, turn } => Interaction::Inside { selected, turn },
            Interaction::ZoomingOut => Interaction::Overview,
            other => other,
        };
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interaction::Overview => write!(f, "overview"),
            Interaction::ZoomingIn { selected, .. } => write!(f, "zooming into box {selected}"),
            Interaction::Inside { selected, .. } => write!(f, "inside box {selected}"),
            Interaction::ZoomingOut => write!(f, "zooming out"),
        }
    }
}

/// Keyboard commands understood by the universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RotateRight,
    RotateLeft,
    ExitBox,
}
