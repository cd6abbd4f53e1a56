//! Engine assembly
//!
//! - [`Engine`] owns every component and answers aggregate queries
//! - [`EngineConfig`] is the declarative description an engine is built from
//! - [`Linkage`] holds the bank and rod geometry used for displacement

mod config;
mod displacement;
#[allow(clippy::module_inception)]
mod engine;
mod error;

pub use config::{EngineConfig, EngineParameters};
pub use displacement::{Linkage, DEFAULT_DISPLACEMENT_RESOLUTION};
pub use engine::{Engine, NITROGEN_MOLAR_MASS, OCTANE_MOLAR_MASS, OXYGEN_MOLAR_MASS};
pub use error::{EngineError, EngineResult};
