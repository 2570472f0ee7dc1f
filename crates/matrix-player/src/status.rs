/// Where the playback loop currently is.
///
/// `Idle -> Loading(1) -> Playing(1) -> Loading(2) -> ...`; `Stopped` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Loading { cycle: u64 },
    Playing { cycle: u64 },
    Stopped,
}

impl RunState {
    /// Cycle number for `Loading`/`Playing`.
    pub fn cycle(&self) -> Option<u64> {
        match self {
            RunState::Loading { cycle } | RunState::Playing { cycle } => Some(*cycle),
            RunState::Idle | RunState::Stopped => None,
        }
    }

    /// Follow one cycle edge: `Idle`/`Playing(n)` load the next cycle and `Loading(n)` plays it.
    /// `Stopped` never leaves.
    pub fn advance(self) -> RunState {
        match self {
            RunState::Idle => RunState::Loading { cycle: 1 },
            RunState::Loading { cycle } => RunState::Playing { cycle },
            RunState::Playing { cycle } => RunState::Loading { cycle: cycle + 1 },
            RunState::Stopped => RunState::Stopped,
        }
    }

    /// The only way into `Stopped`; allowed from any state.
    pub fn stop(self) -> RunState {
        RunState::Stopped
    }
}

/// What a finished run did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackSummary {
    /// Cycles that reached `Loading`.
    pub cycles: u64,
    /// Frames pushed to the display.
    pub frames_shown: u64,
    pub final_state: RunState,
    /// `true` when the run ended because of the cancel flag.
    pub interrupted: bool,
}
