//! Common types for enginesim
//!
//! Fundamental sample and identifier types shared by the DSP path and the
//! engine assembly model.

use std::sync::atomic::{AtomicU64, Ordering};

/// Default audio sample rate for the synthesis path (48kHz)
pub const SAMPLE_RATE: u32 = 48000;

/// Audio sample type (32-bit float, matching the convolution kernels)
pub type Sample = f32;

static NEXT_ENGINE_ID: AtomicU64 = AtomicU64::new(1);

/// Engine identifier
///
/// Handed to each combustion chamber as a non-owning back-reference to the
/// engine that owns it. Holding an `EngineId` never keeps an engine alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineId(u64);

impl EngineId {
    /// Allocate a process-unique engine ID
    pub fn next() -> Self {
        Self(NEXT_ENGINE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value (for logging)
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EngineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "engine#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_ids_are_unique() {
        let a = EngineId::next();
        let b = EngineId::next();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn test_engine_id_display() {
        let id = EngineId::next();
        assert_eq!(id.to_string(), format!("engine#{}", id.raw()));
    }
}
