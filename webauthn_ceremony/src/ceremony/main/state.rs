use std::fmt;

use tokio::sync::watch;

/// Where a ceremony stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CeremonyState {
    Idle,
    AwaitingSubmit,
    FetchingOptions,
    InvokingPlatform,
    PostingResult,
    Succeeded,
    Failed,
    /// The platform has no public-key credential support
    Unsupported,
}

impl CeremonyState {
    /// Whether an attempt is running.
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            Self::FetchingOptions | Self::InvokingPlatform | Self::PostingResult
        )
    }

    /// Whether a form submission may start an attempt from this state.
    ///
    /// `Succeeded` and `Failed` accept a resubmission, which starts over.
    pub fn accepts_submit(self) -> bool {
        matches!(self, Self::AwaitingSubmit | Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for CeremonyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::AwaitingSubmit => "awaiting-submit",
            Self::FetchingOptions => "fetching-options",
            Self::InvokingPlatform => "invoking-platform",
            Self::PostingResult => "posting-result",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// Holds the current state and publishes every change to subscribers.
#[derive(Debug)]
pub(crate) struct StateCell {
    tx: watch::Sender<CeremonyState>,
}

impl StateCell {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(CeremonyState::Idle);
        Self { tx }
    }

    pub(crate) fn current(&self) -> CeremonyState {
        *self.tx.borrow()
    }

    pub(crate) fn set(&self, next: CeremonyState) {
        let previous = self.tx.send_replace(next);
        tracing::debug!("Ceremony state {} -> {}", previous, next);
    }

    /// Atomically moves to `FetchingOptions` if a submission is accepted now.
    ///
    /// Returns the state that was current when the claim was refused. The
    /// returned [`Claim`] moves an attempt that never finished to `Failed`
    /// when it is dropped.
    pub(crate) fn try_claim(&self) -> Result<Claim<'_>, CeremonyState> {
        let mut refused = None;
        self.tx.send_if_modified(|state| {
            if state.accepts_submit() {
                *state = CeremonyState::FetchingOptions;
                true
            } else {
                refused = Some(*state);
                false
            }
        });
        match refused {
            Some(state) => Err(state),
            None => {
                tracing::debug!("Ceremony state claimed -> {}", CeremonyState::FetchingOptions);
                Ok(Claim {
                    cell: self,
                    finished: false,
                })
            }
        }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<CeremonyState> {
        self.tx.subscribe()
    }
}

/// An attempt holding the ceremony.
#[derive(Debug)]
pub(crate) struct Claim<'a> {
    cell: &'a StateCell,
    finished: bool,
}

impl Claim<'_> {
    /// Ends the attempt in `outcome`.
    pub(crate) fn finish(mut self, outcome: CeremonyState) {
        self.finished = true;
        self.cell.set(outcome);
    }
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let abandoned = self.cell.tx.send_if_modified(|state| {
            if state.is_in_flight() {
                *state = CeremonyState::Failed;
                true
            } else {
                false
            }
        });
        if abandoned {
            tracing::warn!(
                "Ceremony attempt dropped before finishing, state -> {}",
                CeremonyState::Failed
            );
        }
    }
}
