//! Modals and toasts.
//!
//! Presentation is the host's business. The page decides *what* to show and
//! *when*; a [`Presenter`] renders it.
//!
//! Toast lifecycle:
//!
//! ```text
//! show_toast ──duration──▶ dismiss_toast ──exit──▶ remove_toast
//! ```

use std::fmt;

/// Identifies a toast across its lifecycle calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub(crate) u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Where a toast is pinned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastPosition {
    #[default]
    BottomRight,
}

/// A transient notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    /// Time on screen before the exit animation starts.
    pub duration_ms: u64,
    pub position: ToastPosition,
}

/// Plan confirmation dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Modal {
    /// Name of the chosen plan.
    pub plan: String,
}

/// Renders overlays.
pub trait Presenter {
    fn show_modal(&mut self, modal: &Modal);
    fn close_modal(&mut self);
    fn show_toast(&mut self, toast: &Toast);
    /// Start the exit animation.
    fn dismiss_toast(&mut self, id: ToastId);
    /// Exit finished; drop the toast.
    fn remove_toast(&mut self, id: ToastId);
}

/// Presenter for headless hosts: logs what would be shown.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPresenter;

impl Presenter for TracingPresenter {
    fn show_modal(&mut self, modal: &Modal) {
        tracing::info!(plan = %modal.plan, "modal shown");
    }

    fn close_modal(&mut self) {
        tracing::info!("modal closed");
    }

    fn show_toast(&mut self, toast: &Toast) {
        tracing::info!(id = %toast.id, message = %toast.message, "toast shown");
    }

    fn dismiss_toast(&mut self, id: ToastId) {
        tracing::debug!(%id, "toast dismissing");
    }

    fn remove_toast(&mut self, id: ToastId) {
        tracing::debug!(%id, "toast removed");
    }
}
