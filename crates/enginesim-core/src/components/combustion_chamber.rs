//! Combustion chamber (one per cylinder)
//!
//! Holds a non-owning handle to its engine, set once when the engine wires
//! its components. The handle identifies the engine; it never keeps it alive.

use crate::lifecycle::Lifecycle;
use crate::types::EngineId;

#[derive(Debug, Default)]
pub struct CombustionChamber {
    lifecycle: Lifecycle,
    engine: Option<EngineId>,
    piston: usize,
    head: usize,
}

impl CombustionChamber {
    /// Attach to the owning engine
    pub fn set_engine(&mut self, engine: EngineId) {
        self.engine = Some(engine);
    }

    /// The owning engine, if wired
    pub fn engine(&self) -> Option<EngineId> {
        self.engine
    }

    /// Bind to the piston and head forming this chamber
    #[track_caller]
    pub fn initialize(&mut self, piston: usize, head: usize) {
        self.lifecycle.begin("CombustionChamber");
        self.piston = piston;
        self.head = head;
    }

    #[track_caller]
    pub fn destroy(&mut self) {
        self.lifecycle.release("CombustionChamber");
        self.engine = None;
    }

    pub fn piston(&self) -> usize {
        self.piston
    }

    pub fn head(&self) -> usize {
        self.head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_reference_cleared_on_destroy() {
        let id = EngineId::next();
        let mut chamber = CombustionChamber::default();
        assert_eq!(chamber.engine(), None);

        chamber.set_engine(id);
        chamber.initialize(2, 1);
        assert_eq!(chamber.engine(), Some(id));
        assert_eq!(chamber.piston(), 2);
        assert_eq!(chamber.head(), 1);

        chamber.destroy();
        assert_eq!(chamber.engine(), None);
    }
}
