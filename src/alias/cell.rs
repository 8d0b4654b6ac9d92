//! Single-evaluation cache cell
//!
//! Holds either nothing or a fully built `Type`. Readers never see anything
//! in between. Two threads forcing an empty cell at the same time may both
//! run their producers; the first stored value wins and both callers get
//! it back, so the result is referentially stable.

use std::sync::OnceLock;

use crate::errors::AliasResult;
use crate::validator::Type;

#[derive(Debug, Default)]
pub struct CacheCell {
    slot: OnceLock<Type>,
}

impl CacheCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached validator, if any.
    pub fn get(&self) -> Option<&Type> {
        self.slot.get()
    }

    pub fn is_resolved(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Returns the cached validator, running `producer` only when empty.
    ///
    /// A failing producer leaves the cell empty; the next call retries.
    pub fn force<F>(&self, producer: F) -> AliasResult<Type>
    where
        F: FnOnce() -> AliasResult<Type>,
    {
        if let Some(ty) = self.slot.get() {
            return Ok(ty.clone());
        }

        let produced = producer()?;
        Ok(self.slot.get_or_init(|| produced).clone())
    }
}
