use std::sync::Arc;

use model::Predictor;

use crate::error::LoadErr;

/// Lifecycle of the process-wide model artifact.
///
/// Exactly one of these exists per process, owned by the `ModelLoader`.
/// Transitions are monotonic except `Failed`, which the next poll may
/// re-enter into `Loading`. `Ready` is terminal.
#[derive(Debug)]
pub enum LoadState {
    NotStarted,
    Loading,
    Ready(Arc<Predictor>),
    Failed(Arc<LoadErr>),
}

impl LoadState {
    pub fn kind(&self) -> StateKind {
        match self {
            LoadState::NotStarted => StateKind::Idle,
            LoadState::Loading => StateKind::Loading,
            LoadState::Ready(_) => StateKind::Ready,
            LoadState::Failed(_) => StateKind::Failed,
        }
    }
}

/// Cheap snapshot of the load state for health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Idle,
    Loading,
    Ready,
    Failed,
}

impl StateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateKind::Idle => "idle",
            StateKind::Loading => "loading",
            StateKind::Ready => "ready",
            StateKind::Failed => "failed",
        }
    }
}
