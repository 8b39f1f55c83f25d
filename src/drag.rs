//! Drag-and-drop session for moving cards between columns.
//!
//! The session is a two-state machine: `Idle` and `Dragging`. Every drop or
//! cancel returns it to `Idle`; only a drop onto a different column mutates
//! the store.

use crate::jobs::store::JobStore;
use crate::jobs::{JobId, JobStatus};

/// Something a dragged card can be released onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Column(JobStatus),
    /// Another card; resolves to the column that card lives in.
    Card(JobId),
}

impl DropTarget {
    /// The column this target stands for, if it still exists.
    pub fn resolve(&self, store: &JobStore) -> Option<JobStatus> {
        match self {
            Self::Column(status) => Some(*status),
            Self::Card(id) => store.get(id).map(|job| job.status),
        }
    }
}

/// Hit-testing capability: which drop target, if any, lies under a point.
pub trait DropTargets {
    fn drop_target(&self, x: u16, y: u16) -> Option<DropTarget>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging {
        id: JobId,
        /// Column currently under the pointer or keyboard cursor.
        hover: Option<JobStatus>,
        /// Last pointer position; `None` for keyboard drags.
        pointer: Option<(u16, u16)>,
    },
}

/// Result of ending a drag session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Moved {
        id: JobId,
        from: JobStatus,
        to: JobStatus,
    },
    /// Dropped on its own column, on nothing, or the card vanished mid-drag.
    Unchanged,
    Cancelled,
    /// `drop` or `cancel` called while idle.
    NotDragging,
}

impl DragSession {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn active_id(&self) -> Option<&JobId> {
        match self {
            Self::Dragging { id, .. } => Some(id),
            Self::Idle => None,
        }
    }

    pub fn hover(&self) -> Option<JobStatus> {
        match self {
            Self::Dragging { hover, .. } => *hover,
            Self::Idle => None,
        }
    }

    pub fn pointer(&self) -> Option<(u16, u16)> {
        match self {
            Self::Dragging { pointer, .. } => *pointer,
            Self::Idle => None,
        }
    }

    /// Start dragging `id`. Replaces any session already in progress.
    pub fn begin(&mut self, id: JobId, hover: Option<JobStatus>, pointer: Option<(u16, u16)>) {
        tracing::debug!(id = %id, "drag started");
        *self = Self::Dragging { id, hover, pointer };
    }

    pub fn set_hover(&mut self, target: Option<JobStatus>) {
        if let Self::Dragging { hover, .. } = self {
            *hover = target;
        }
    }

    pub fn set_pointer(&mut self, x: u16, y: u16) {
        if let Self::Dragging { pointer, .. } = self {
            *pointer = Some((x, y));
        }
    }

    /// Release the card onto `target`. Moves it through the store when the
    /// target resolves to a column other than the card's current one. The
    /// session is idle afterwards whatever the outcome.
    pub fn drop_on(&mut self, target: Option<DropTarget>, store: &mut JobStore) -> DropOutcome {
        let Self::Dragging { id, .. } = std::mem::take(self) else {
            return DropOutcome::NotDragging;
        };
        let Some(from) = store.get(&id).map(|job| job.status) else {
            return DropOutcome::Unchanged;
        };
        let to = match target.and_then(|t| t.resolve(store)) {
            Some(to) if to != from => to,
            _ => {
                tracing::debug!(id = %id, "drag ended without a move");
                return DropOutcome::Unchanged;
            }
        };
        store.move_job(&id, to);
        DropOutcome::Moved { id, from, to }
    }

    /// Drop onto whatever column is currently hovered.
    pub fn drop_on_hover(&mut self, store: &mut JobStore) -> DropOutcome {
        let target = self.hover().map(DropTarget::Column);
        self.drop_on(target, store)
    }

    /// Abandon the drag without touching the store.
    pub fn cancel(&mut self) -> DropOutcome {
        match std::mem::take(self) {
            Self::Dragging { id, .. } => {
                tracing::debug!(id = %id, "drag cancelled");
                DropOutcome::Cancelled
            }
            Self::Idle => DropOutcome::NotDragging,
        }
    }
}
