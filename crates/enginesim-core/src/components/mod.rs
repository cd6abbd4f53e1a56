//! Engine sub-components
//!
//! The parts an [`Engine`](crate::engine::Engine) owns. Each one stores its
//! own geometry or state and answers the narrow queries the engine's
//! aggregate calculations need. Cross-references between parts (piston to
//! bank and rod, rod to crankshaft) are indices into the engine's arrays.

mod combustion_chamber;
mod connecting_rod;
mod crankshaft;
mod cylinder_bank;
mod cylinder_head;
mod exhaust_system;
mod fuel;
mod gas_system;
mod ignition_module;
mod intake;
mod piston;

pub use combustion_chamber::CombustionChamber;
pub use connecting_rod::{ConnectingRod, ConnectingRodParameters};
pub use crankshaft::{Crankshaft, CrankshaftParameters, RigidBody};
pub use cylinder_bank::{CylinderBank, CylinderBankParameters};
pub use cylinder_head::{CylinderHead, CylinderHeadParameters};
pub use exhaust_system::{ExhaustSystem, ExhaustSystemParameters};
pub use fuel::Fuel;
pub use gas_system::{
    GasSystem, Mix, AIR_OXYGEN_FRACTION, AMBIENT_TEMPERATURE, ATMOSPHERIC_PRESSURE, GAS_CONSTANT,
};
pub use ignition_module::IgnitionModule;
pub use intake::{Intake, IntakeParameters};
pub use piston::{Piston, PistonParameters};
