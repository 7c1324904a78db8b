use super::types::ContainerId;

/// Everything that can go wrong while talking to a [`super::DragCoordinator`].
///
/// None of these are fatal: a failed call leaves every container exactly as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferError {
    /// A drag gesture is already in flight; the first gesture wins.
    AlreadyDragging { active_source: ContainerId },

    /// The referenced container does not exist (anymore).
    StaleReference { container: ContainerId },

    /// There is no drag session to act on.
    NoActiveSession,

    /// A drag was started on a slot past the end of the container.
    IndexOutOfRange {
        container: ContainerId,
        index: usize,
        len: usize,
    },
}

impl TransferError {
    /// Errors a caller can silently ignore (duplicate or late pointer events).
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::NoActiveSession | Self::StaleReference { .. })
    }
}

impl std::fmt::Display for TransferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyDragging { active_source } => {
                write!(f, "a drag from {active_source} is already in progress")
            }
            Self::StaleReference { container } => {
                write!(f, "container {container} no longer exists")
            }
            Self::NoActiveSession => write!(f, "no drag session is active"),
            Self::IndexOutOfRange {
                container,
                index,
                len,
            } => write!(
                f,
                "index {index} is out of range for container {container} (len {len})"
            ),
        }
    }
}

impl std::error::Error for TransferError {}
