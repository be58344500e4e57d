//! Itinerary builder state machine.
//!
//! DESIGN
//! ======
//! Two ordered collections, the pool (search results) and the itinerary
//! (the user's plan), with every entry a member of exactly one. Transitions
//! update both sequences synchronously and return a batch of render
//! instructions; animation delays live only in those instructions.
//!
//! Deferred instructions aimed at the pool carry the pool generation they
//! were issued under. A new search bumps the generation, so a timer that
//! fires afterwards finds `is_live` false and its instruction is dropped.

#[cfg(test)]
#[path = "itinerary_test.rs"]
mod itinerary_test;

use std::time::Duration;

use crate::place::Place;
use crate::search::SearchError;

/// Exit animation length before a row is removed.
pub const EXIT_DELAY: Duration = Duration::from_millis(300);
/// Delay before a freshly inserted row is revealed.
pub const ENTER_DELAY: Duration = Duration::from_millis(50);

pub const NO_PLACES_MESSAGE: &str = "No tourist places found in this area.";
pub const SEARCH_FAILED_MESSAGE: &str = "Error finding places. Please try another city.";

// =============================================================================
// ENTRIES
// =============================================================================

/// Page-local identity of one place instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn from_u64(raw: u64) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub place: Place,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Pool,
    Itinerary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    InPool,
    InItinerary,
}

/// What the pool slot currently shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PoolStatus {
    #[default]
    Idle,
    Loading,
    Listed,
    NoResults,
    Failed,
}

// =============================================================================
// RENDER INSTRUCTIONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Muted,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    /// Replace the pool contents with a spinner.
    ShowPoolLoading,
    /// Replace the pool contents with a non-interactive message.
    ShowPoolMessage { tone: Tone, text: &'static str },
    /// Empty the pool slot.
    ClearPool,
    /// Insert a row at the end of a slot, hidden when an enter animation follows.
    Append { slot: Slot, entry: Entry, hidden: bool },
    /// Start the enter animation of a hidden row.
    Reveal { slot: Slot, id: EntryId },
    /// Start the exit animation of a row.
    BeginExit { slot: Slot, id: EntryId },
    /// Drop a row from a slot.
    Remove { slot: Slot, id: EntryId },
}

impl RenderOp {
    #[must_use]
    pub fn slot(&self) -> Slot {
        match self {
            Self::ShowPoolLoading | Self::ShowPoolMessage { .. } | Self::ClearPool => Slot::Pool,
            Self::Append { slot, .. }
            | Self::Reveal { slot, .. }
            | Self::BeginExit { slot, .. }
            | Self::Remove { slot, .. } => *slot,
        }
    }
}

/// One render step, to be applied `delay` after the transition that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub delay: Duration,
    pub pool_generation: u64,
    pub op: RenderOp,
}

// =============================================================================
// ERRORS & EVENTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlannerError {
    #[error("entry {0:?} is not in the pool")]
    NotInPool(EntryId),

    #[error("entry {0:?} is not in the itinerary")]
    NotInItinerary(EntryId),
}

/// Typed UI events carrying entry identity instead of interpolated strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerEvent {
    Add(EntryId),
    Remove(EntryId),
}

// =============================================================================
// PLANNER
// =============================================================================

#[derive(Debug, Default)]
pub struct Planner {
    pool: Vec<Entry>,
    pool_status: PoolStatus,
    itinerary: Vec<Entry>,
    pool_generation: u64,
    next_id: u64,
}

impl Planner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pool(&self) -> &[Entry] {
        &self.pool
    }

    #[must_use]
    pub fn itinerary(&self) -> &[Entry] {
        &self.itinerary
    }

    #[must_use]
    pub fn pool_status(&self) -> PoolStatus {
        self.pool_status
    }

    #[must_use]
    pub fn pool_generation(&self) -> u64 {
        self.pool_generation
    }

    #[must_use]
    pub fn membership(&self, id: EntryId) -> Option<Membership> {
        if self.pool.iter().any(|e| e.id == id) {
            Some(Membership::InPool)
        } else if self.itinerary.iter().any(|e| e.id == id) {
            Some(Membership::InItinerary)
        } else {
            None
        }
    }

    /// Whether a deferred instruction still targets the current pool.
    /// Itinerary instructions are always live.
    #[must_use]
    pub fn is_live(&self, instruction: &Instruction) -> bool {
        instruction.op.slot() == Slot::Itinerary || instruction.pool_generation == self.pool_generation
    }

    /// Discard the pool and show the spinner. The itinerary is untouched.
    pub fn begin_search(&mut self) -> Vec<Instruction> {
        self.pool.clear();
        self.pool_status = PoolStatus::Loading;
        self.pool_generation += 1;
        vec![self.now(RenderOp::ShowPoolLoading)]
    }

    /// Replace the pool with a search outcome. Outcomes are applied in
    /// arrival order; a slow earlier search can overwrite a later one.
    pub fn finish_search(&mut self, result: Result<Vec<Place>, SearchError>) -> Vec<Instruction> {
        self.pool.clear();
        self.pool_generation += 1;

        match result {
            Ok(places) if places.is_empty() => {
                self.pool_status = PoolStatus::NoResults;
                vec![self.now(RenderOp::ShowPoolMessage { tone: Tone::Muted, text: NO_PLACES_MESSAGE })]
            }
            Ok(places) => {
                self.pool_status = PoolStatus::Listed;
                let mut batch = vec![self.now(RenderOp::ClearPool)];
                for place in places {
                    let entry = self.mint(place);
                    self.pool.push(entry.clone());
                    batch.push(self.now(RenderOp::Append { slot: Slot::Pool, entry, hidden: false }));
                }
                batch
            }
            Err(e) => {
                log::error!("places search failed: {e}");
                self.pool_status = PoolStatus::Failed;
                vec![self.now(RenderOp::ShowPoolMessage { tone: Tone::Error, text: SEARCH_FAILED_MESSAGE })]
            }
        }
    }

    /// Move a pool entry to the end of the itinerary.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::NotInPool` if the entry is not in the pool.
    pub fn add_to_itinerary(&mut self, id: EntryId) -> Result<Vec<Instruction>, PlannerError> {
        let index = self
            .pool
            .iter()
            .position(|e| e.id == id)
            .ok_or(PlannerError::NotInPool(id))?;
        let entry = self.pool.remove(index);
        self.itinerary.push(entry.clone());

        Ok(vec![
            self.now(RenderOp::BeginExit { slot: Slot::Pool, id }),
            self.after(EXIT_DELAY, RenderOp::Remove { slot: Slot::Pool, id }),
            self.now(RenderOp::Append { slot: Slot::Itinerary, entry, hidden: true }),
            self.after(ENTER_DELAY, RenderOp::Reveal { slot: Slot::Itinerary, id }),
        ])
    }

    /// Move an itinerary entry back to the end of the pool. Its original
    /// relevance position is not restored.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::NotInItinerary` if the entry is not in the itinerary.
    pub fn remove_from_itinerary(&mut self, id: EntryId) -> Result<Vec<Instruction>, PlannerError> {
        let index = self
            .itinerary
            .iter()
            .position(|e| e.id == id)
            .ok_or(PlannerError::NotInItinerary(id))?;
        let entry = self.itinerary.remove(index);
        self.pool.push(entry.clone());

        let mut batch = vec![
            self.now(RenderOp::BeginExit { slot: Slot::Itinerary, id }),
            self.after(EXIT_DELAY, RenderOp::Remove { slot: Slot::Itinerary, id }),
        ];
        // A placeholder message gives way to the returning entry. A spinner
        // stays; the pending search replaces the whole slot when it lands.
        match self.pool_status {
            PoolStatus::Idle | PoolStatus::NoResults | PoolStatus::Failed => {
                self.pool_status = PoolStatus::Listed;
                batch.push(self.after(EXIT_DELAY, RenderOp::ClearPool));
            }
            PoolStatus::Loading | PoolStatus::Listed => {}
        }
        batch.push(self.after(EXIT_DELAY, RenderOp::Append { slot: Slot::Pool, entry, hidden: true }));
        batch.push(self.after(EXIT_DELAY + ENTER_DELAY, RenderOp::Reveal { slot: Slot::Pool, id }));
        Ok(batch)
    }

    /// Dispatch a typed UI event.
    ///
    /// # Errors
    ///
    /// Propagates the precondition failure of the matching transition.
    pub fn apply(&mut self, event: PlannerEvent) -> Result<Vec<Instruction>, PlannerError> {
        match event {
            PlannerEvent::Add(id) => self.add_to_itinerary(id),
            PlannerEvent::Remove(id) => self.remove_from_itinerary(id),
        }
    }

    fn mint(&mut self, place: Place) -> Entry {
        self.next_id += 1;
        Entry { id: EntryId(self.next_id), place }
    }

    fn now(&self, op: RenderOp) -> Instruction {
        self.after(Duration::ZERO, op)
    }

    fn after(&self, delay: Duration, op: RenderOp) -> Instruction {
        Instruction { delay, pool_generation: self.pool_generation, op }
    }
}
