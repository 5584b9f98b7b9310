//! External video input slots `s0`..`s3`.
//!
//! Only `s0` is ever requested (by the webcam preset) and nothing samples a
//! slot yet; the webcam preset draws through the oscillator program.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotId {
    S0,
    S1,
    S2,
    S3,
}

impl SlotId {
    pub const ALL: [SlotId; 4] = [SlotId::S0, SlotId::S1, SlotId::S2, SlotId::S3];

    pub fn name(self) -> &'static str {
        match self {
            SlotId::S0 => "s0",
            SlotId::S1 => "s1",
            SlotId::S2 => "s2",
            SlotId::S3 => "s3",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotState {
    #[default]
    Empty,
    Requested,
    Live,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct SourceSlots {
    slots: [SlotState; 4],
}

impl SourceSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, id: SlotId) -> SlotState {
        self.slots[id.index()]
    }

    /// Mark an empty slot as requested. Returns `false` if the slot was
    /// already requested, live, or failed; capture is attempted only once.
    pub fn request(&mut self, id: SlotId) -> bool {
        let slot = &mut self.slots[id.index()];
        if *slot != SlotState::Empty {
            return false;
        }
        *slot = SlotState::Requested;
        true
    }

    /// Record the outcome of a capture attempt on a requested slot.
    pub fn resolve<E: std::fmt::Display>(&mut self, id: SlotId, outcome: Result<(), E>) {
        let slot = &mut self.slots[id.index()];
        if *slot != SlotState::Requested {
            return;
        }
        *slot = match outcome {
            Ok(()) => SlotState::Live,
            Err(err) => {
                log::warn!("{} capture failed: {err}", id.name());
                SlotState::Failed
            }
        };
    }

    pub fn pending(&self) -> impl Iterator<Item = SlotId> + '_ {
        SlotId::ALL
            .into_iter()
            .filter(|&id| self.state(id) == SlotState::Requested)
    }
}
