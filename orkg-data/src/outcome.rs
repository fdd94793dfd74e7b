use camino::Utf8PathBuf;

/// Result of a stage that is skipped when its artefact already exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome<T> {
    /// The artefact was already on disk; nothing was done.
    Reused(Utf8PathBuf),
    /// The stage ran and produced the artefact.
    Produced(T),
}

impl<T> StageOutcome<T> {
    /// Report whether the stage was skipped.
    #[must_use]
    pub const fn is_reused(&self) -> bool {
        matches!(self, Self::Reused(_))
    }

    /// Borrow the stage report when the stage ran.
    #[must_use]
    pub const fn produced(&self) -> Option<&T> {
        match self {
            Self::Reused(_) => None,
            Self::Produced(report) => Some(report),
        }
    }
}
