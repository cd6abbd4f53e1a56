//! Engine assembly - owns every mechanical and gas-exchange component
//!
//! The engine is constructed empty. `initialize` allocates each collection
//! once at its configured size and wires the components together; `destroy`
//! tears them down. Aggregate queries (displacement, AFR, manifold pressure,
//! RPM) are reductions over component state computed on demand.

use std::f64::consts::FRAC_PI_2;

use super::config::{EngineConfig, EngineParameters};
use super::displacement::{Linkage, DEFAULT_DISPLACEMENT_RESOLUTION};
use super::error::EngineResult;
use crate::components::{
    CombustionChamber, ConnectingRod, Crankshaft, CylinderBank, CylinderHead,
    CylinderHeadParameters, ExhaustSystem, Fuel, IgnitionModule, Intake, Piston,
    AIR_OXYGEN_FRACTION,
};
use crate::lifecycle::Lifecycle;
use crate::types::EngineId;
use crate::units;

/// Molar mass of the octane fuel surrogate, kg/mol
pub const OCTANE_MOLAR_MASS: f64 = units::grams(114.23);
/// Molar mass of O2, kg/mol
pub const OXYGEN_MOLAR_MASS: f64 = units::grams(31.9988);
/// Molar mass of N2 (inert surrogate), kg/mol
pub const NITROGEN_MOLAR_MASS: f64 = units::grams(28.014);

/// Allocate `count` default-constructed components in one block
fn allocate<T: Default>(count: usize) -> Box<[T]> {
    (0..count).map(|_| T::default()).collect()
}

/// The engine assembly
///
/// Collections are sized once by [`Engine::initialize`] and never resized.
/// Parts refer to each other by index into these collections.
#[derive(Debug)]
pub struct Engine {
    id: EngineId,
    lifecycle: Lifecycle,
    name: String,
    starter_torque: f64,
    starter_speed: f64,
    redline: f64,
    throttle: f64,
    displacement: f64,
    fuel: Fuel,

    crankshafts: Box<[Crankshaft]>,
    cylinder_banks: Box<[CylinderBank]>,
    heads: Box<[CylinderHead]>,
    pistons: Box<[Piston]>,
    connecting_rods: Box<[ConnectingRod]>,
    combustion_chambers: Box<[CombustionChamber]>,
    intakes: Box<[Intake]>,
    exhaust_systems: Box<[ExhaustSystem]>,
    ignition_module: IgnitionModule,
}

impl Engine {
    /// Create an empty engine (no components allocated)
    pub fn new() -> Self {
        Self {
            id: EngineId::next(),
            lifecycle: Lifecycle::Created,
            name: String::new(),
            starter_torque: 0.0,
            starter_speed: 0.0,
            redline: 0.0,
            throttle: 0.0,
            displacement: 0.0,
            fuel: Fuel::default(),
            crankshafts: Box::default(),
            cylinder_banks: Box::default(),
            heads: Box::default(),
            pistons: Box::default(),
            connecting_rods: Box::default(),
            combustion_chambers: Box::default(),
            intakes: Box::default(),
            exhaust_systems: Box::default(),
            ignition_module: IgnitionModule::default(),
        }
    }

    /// Allocate and wire every component collection
    ///
    /// Components are default-constructed; configure them through the
    /// `*_mut` accessors or use [`Engine::from_config`]. Panics if the
    /// engine is already initialized.
    #[track_caller]
    pub fn initialize(&mut self, params: &EngineParameters) {
        self.lifecycle.begin("Engine");

        self.name = params.name.clone();
        self.starter_torque = params.starter_torque;
        self.starter_speed = params.starter_speed;
        self.redline = params.redline;
        self.fuel = params.fuel.clone();
        self.throttle = 0.0;
        self.displacement = 0.0;

        self.crankshafts = allocate(params.crankshaft_count);
        self.cylinder_banks = allocate(params.cylinder_bank_count);
        self.heads = allocate(params.cylinder_bank_count);
        self.pistons = allocate(params.cylinder_count);
        self.connecting_rods = allocate(params.cylinder_count);
        self.exhaust_systems = allocate(params.exhaust_system_count);
        self.intakes = allocate(params.intake_count);
        self.combustion_chambers = allocate(params.cylinder_count);

        for (i, exhaust) in self.exhaust_systems.iter_mut().enumerate() {
            exhaust.set_index(i);
        }

        for chamber in self.combustion_chambers.iter_mut() {
            chamber.set_engine(self.id);
        }

        self.ignition_module.initialize(params.cylinder_count);

        log::info!(
            "Engine '{}' ({}) initialized: {} crankshafts, {} cylinders in {} banks, {} intakes, {} exhausts",
            self.name,
            self.id,
            params.crankshaft_count,
            params.cylinder_count,
            params.cylinder_bank_count,
            params.intake_count,
            params.exhaust_system_count
        );
    }

    /// Build a fully wired engine from a declarative description
    ///
    /// The description is validated first; nothing is allocated if it
    /// references missing components.
    pub fn from_config(config: &EngineConfig) -> EngineResult<Self> {
        config.validate()?;

        let mut engine = Self::new();
        engine.initialize(&config.parameters());

        for (shaft, params) in engine.crankshafts.iter_mut().zip(&config.crankshafts) {
            shaft.initialize(params);
        }

        for (i, (bank, params)) in engine
            .cylinder_banks
            .iter_mut()
            .zip(&config.cylinder_banks)
            .enumerate()
        {
            bank.initialize(i, params);
        }

        let default_head = CylinderHeadParameters::default();
        for (i, head) in engine.heads.iter_mut().enumerate() {
            head.initialize(i, config.cylinder_heads.get(i).unwrap_or(&default_head));
        }

        for (rod, params) in engine.connecting_rods.iter_mut().zip(&config.connecting_rods) {
            rod.initialize(params);
        }

        for (piston, params) in engine.pistons.iter_mut().zip(&config.pistons) {
            piston.initialize(params);
        }

        for (i, chamber) in engine.combustion_chambers.iter_mut().enumerate() {
            chamber.initialize(i, config.pistons[i].bank);
        }

        for (intake, params) in engine.intakes.iter_mut().zip(&config.intakes) {
            intake.initialize(params);
        }

        for (exhaust, params) in engine.exhaust_systems.iter_mut().zip(&config.exhaust_systems) {
            exhaust.initialize(params);
        }

        for (cylinder, &angle) in config.firing_angles.iter().enumerate() {
            engine.ignition_module.set_firing_angle(cylinder, angle);
        }

        Ok(engine)
    }

    /// Destroy every component, then release the collections
    ///
    /// Panics if the engine is not initialized.
    #[track_caller]
    pub fn destroy(&mut self) {
        self.lifecycle.end("Engine");

        for shaft in self.crankshafts.iter_mut() {
            shaft.destroy();
        }

        for ((piston, rod), chamber) in self
            .pistons
            .iter_mut()
            .zip(self.connecting_rods.iter_mut())
            .zip(self.combustion_chambers.iter_mut())
        {
            piston.destroy();
            rod.destroy();
            chamber.destroy();
        }

        for exhaust in self.exhaust_systems.iter_mut() {
            exhaust.destroy();
        }

        for intake in self.intakes.iter_mut() {
            intake.destroy();
        }

        self.ignition_module.destroy();

        self.crankshafts = Box::default();
        self.cylinder_banks = Box::default();
        self.heads = Box::default();
        self.pistons = Box::default();
        self.connecting_rods = Box::default();
        self.combustion_chambers = Box::default();
        self.intakes = Box::default();
        self.exhaust_systems = Box::default();

        log::info!("Engine '{}' ({}) destroyed", self.name, self.id);
    }

    pub fn is_initialized(&self) -> bool {
        self.lifecycle.is_initialized()
    }

    /// Handle that combustion chambers use to refer back to this engine
    pub fn id(&self) -> EngineId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// N·m
    pub fn starter_torque(&self) -> f64 {
        self.starter_torque
    }

    /// rad/s
    pub fn starter_speed(&self) -> f64 {
        self.starter_speed
    }

    /// rad/s
    pub fn redline(&self) -> f64 {
        self.redline
    }

    // ---------------------------------------------------------------------
    // Component access
    // ---------------------------------------------------------------------

    pub fn crankshaft_count(&self) -> usize {
        self.crankshafts.len()
    }

    pub fn cylinder_count(&self) -> usize {
        self.pistons.len()
    }

    pub fn cylinder_bank_count(&self) -> usize {
        self.cylinder_banks.len()
    }

    pub fn intake_count(&self) -> usize {
        self.intakes.len()
    }

    pub fn exhaust_system_count(&self) -> usize {
        self.exhaust_systems.len()
    }

    /// The power-output shaft (crankshaft 0)
    ///
    /// Panics if the engine has no crankshafts.
    #[track_caller]
    pub fn output_crankshaft(&self) -> &Crankshaft {
        self.lifecycle.assert_live("Engine");
        assert!(
            !self.crankshafts.is_empty(),
            "Engine '{}': output crankshaft requested but engine has no crankshafts",
            self.name
        );
        &self.crankshafts[0]
    }

    pub fn crankshaft(&self, index: usize) -> &Crankshaft {
        &self.crankshafts[index]
    }

    pub fn crankshaft_mut(&mut self, index: usize) -> &mut Crankshaft {
        &mut self.crankshafts[index]
    }

    pub fn crankshafts(&self) -> &[Crankshaft] {
        &self.crankshafts
    }

    pub fn cylinder_bank(&self, index: usize) -> &CylinderBank {
        &self.cylinder_banks[index]
    }

    pub fn cylinder_bank_mut(&mut self, index: usize) -> &mut CylinderBank {
        &mut self.cylinder_banks[index]
    }

    pub fn cylinder_banks(&self) -> &[CylinderBank] {
        &self.cylinder_banks
    }

    pub fn head(&self, index: usize) -> &CylinderHead {
        &self.heads[index]
    }

    pub fn head_mut(&mut self, index: usize) -> &mut CylinderHead {
        &mut self.heads[index]
    }

    pub fn piston(&self, index: usize) -> &Piston {
        &self.pistons[index]
    }

    pub fn piston_mut(&mut self, index: usize) -> &mut Piston {
        &mut self.pistons[index]
    }

    pub fn pistons(&self) -> &[Piston] {
        &self.pistons
    }

    pub fn connecting_rod(&self, index: usize) -> &ConnectingRod {
        &self.connecting_rods[index]
    }

    pub fn connecting_rod_mut(&mut self, index: usize) -> &mut ConnectingRod {
        &mut self.connecting_rods[index]
    }

    pub fn combustion_chamber(&self, index: usize) -> &CombustionChamber {
        &self.combustion_chambers[index]
    }

    pub fn combustion_chamber_mut(&mut self, index: usize) -> &mut CombustionChamber {
        &mut self.combustion_chambers[index]
    }

    pub fn intake(&self, index: usize) -> &Intake {
        &self.intakes[index]
    }

    pub fn intake_mut(&mut self, index: usize) -> &mut Intake {
        &mut self.intakes[index]
    }

    pub fn intakes(&self) -> &[Intake] {
        &self.intakes
    }

    pub fn exhaust_system(&self, index: usize) -> &ExhaustSystem {
        &self.exhaust_systems[index]
    }

    pub fn exhaust_system_mut(&mut self, index: usize) -> &mut ExhaustSystem {
        &mut self.exhaust_systems[index]
    }

    pub fn exhaust_systems(&self) -> &[ExhaustSystem] {
        &self.exhaust_systems
    }

    pub fn ignition_module(&self) -> &IgnitionModule {
        &self.ignition_module
    }

    pub fn ignition_module_mut(&mut self) -> &mut IgnitionModule {
        &mut self.ignition_module
    }

    pub fn fuel(&self) -> &Fuel {
        &self.fuel
    }

    pub fn set_fuel(&mut self, fuel: Fuel) {
        self.fuel = fuel;
    }

    // ---------------------------------------------------------------------
    // Throttle
    // ---------------------------------------------------------------------

    /// Broadcast a throttle position to every intake
    ///
    /// No range check; callers keep the value in [0, 1].
    #[track_caller]
    pub fn set_throttle(&mut self, throttle: f64) {
        self.lifecycle.assert_live("Engine");
        for intake in self.intakes.iter_mut() {
            intake.set_throttle(throttle);
        }
        self.throttle = throttle;
    }

    #[track_caller]
    pub fn throttle(&self) -> f64 {
        self.lifecycle.assert_live("Engine");
        self.throttle
    }

    /// Throttle plate angle of intake 0, rad
    ///
    /// π/2 when the plate is closed, 0 when wide open. Panics if the engine
    /// has no intakes.
    #[track_caller]
    pub fn throttle_plate_angle(&self) -> f64 {
        self.lifecycle.assert_live("Engine");
        assert!(
            !self.intakes.is_empty(),
            "Engine '{}': throttle plate angle requested but engine has no intakes",
            self.name
        );
        (1.0 - self.intakes[0].throttle_plate_position()) * FRAC_PI_2
    }

    // ---------------------------------------------------------------------
    // Geometry
    // ---------------------------------------------------------------------

    /// Linkage geometry of cylinder `index`
    #[track_caller]
    pub fn linkage(&self, index: usize) -> Linkage {
        self.lifecycle.assert_live("Engine");
        let piston = &self.pistons[index];
        let bank = &self.cylinder_banks[piston.cylinder_bank()];
        let rod = &self.connecting_rods[piston.rod()];

        Linkage {
            bank_x: bank.x(),
            bank_y: bank.y(),
            bank_dx: bank.dx(),
            bank_dy: bank.dy(),
            bore_area: bank.bore_area(),
            rod_length: rod.length(),
        }
    }

    /// Crankshaft driving cylinder `index`
    fn cylinder_crankshaft(&self, index: usize) -> &Crankshaft {
        let rod = &self.connecting_rods[self.pistons[index].rod()];
        &self.crankshafts[rod.crankshaft()]
    }

    /// Recompute total displacement at the default resolution, m³
    #[track_caller]
    pub fn calculate_displacement(&mut self) -> f64 {
        self.lifecycle.assert_live("Engine");
        self.calculate_displacement_with_resolution(DEFAULT_DISPLACEMENT_RESOLUTION)
    }

    /// Recompute total displacement sampling `resolution` crank angles, m³
    ///
    /// Cylinders whose linkage is never feasible contribute nothing. The
    /// result is stored and returned by [`Engine::displacement`] until the
    /// next explicit recalculation.
    #[track_caller]
    pub fn calculate_displacement_with_resolution(&mut self, resolution: usize) -> f64 {
        self.lifecycle.assert_live("Engine");
        let mut displacement = 0.0;

        for i in 0..self.pistons.len() {
            let shaft = self.cylinder_crankshaft(i);
            let swept = self
                .linkage(i)
                .swept_volume(resolution, |theta| shaft.crank_pin_position(theta));
            if swept == 0.0 {
                log::warn!(
                    "Engine '{}': cylinder {} has no feasible piston travel; check bank and rod geometry",
                    self.name,
                    i
                );
            } else {
                log::debug!(
                    "Engine '{}': cylinder {} swept volume {:.6} L",
                    self.name,
                    i,
                    units::to_litres(swept)
                );
            }
            displacement += swept;
        }

        self.displacement = displacement;
        displacement
    }

    /// Displacement from the last `calculate_displacement` call, m³
    #[track_caller]
    pub fn displacement(&self) -> f64 {
        self.lifecycle.assert_live("Engine");
        self.displacement
    }

    /// Largest rod-journal count over all crankshafts
    #[track_caller]
    pub fn max_depth(&self) -> usize {
        self.lifecycle.assert_live("Engine");
        self.crankshafts
            .iter()
            .map(Crankshaft::rod_journal_count)
            .max()
            .unwrap_or(0)
    }

    // ---------------------------------------------------------------------
    // Gas exchange aggregates
    // ---------------------------------------------------------------------

    /// Total intake flow rate, mol/s
    #[track_caller]
    pub fn intake_flow_rate(&self) -> f64 {
        self.lifecycle.assert_live("Engine");
        self.intakes.iter().map(Intake::flow_rate).sum()
    }

    /// Mean intake plenum pressure, Pa
    ///
    /// Panics if the engine has no intakes.
    #[track_caller]
    pub fn manifold_pressure(&self) -> f64 {
        self.lifecycle.assert_live("Engine");
        assert!(
            !self.intakes.is_empty(),
            "Engine '{}': manifold pressure requested but engine has no intakes",
            self.name
        );
        let pressure_sum: f64 = self.intakes.iter().map(|i| i.system().pressure()).sum();
        pressure_sum / self.intakes.len() as f64
    }

    /// Air-fuel mass ratio of the intake charge
    ///
    /// Air mass is inferred from the oxygen present assuming atmospheric
    /// composition. Returns 0 when there is no fuel.
    #[track_caller]
    pub fn intake_afr(&self) -> f64 {
        self.lifecycle.assert_live("Engine");
        let (total_oxygen, total_fuel) = self
            .intakes
            .iter()
            .fold((0.0, 0.0), |(o2, fuel), intake| {
                (o2 + intake.system().n_o2(), fuel + intake.system().n_fuel())
            });

        if total_fuel == 0.0 {
            return 0.0;
        }

        (OXYGEN_MOLAR_MASS * total_oxygen / AIR_OXYGEN_FRACTION) / (total_fuel * OCTANE_MOLAR_MASS)
    }

    /// Oxygen mass fraction of the exhaust gas
    ///
    /// Returns 0 when there is no fuel in the exhaust.
    #[track_caller]
    pub fn exhaust_o2(&self) -> f64 {
        self.lifecycle.assert_live("Engine");
        let mut total_inert = 0.0;
        let mut total_oxygen = 0.0;
        let mut total_fuel = 0.0;
        for exhaust in self.exhaust_systems.iter() {
            total_inert += exhaust.system().n_inert();
            total_oxygen += exhaust.system().n_o2();
            total_fuel += exhaust.system().n_fuel();
        }

        if total_fuel == 0.0 {
            return 0.0;
        }

        (OXYGEN_MOLAR_MASS * total_oxygen)
            / (total_fuel * OCTANE_MOLAR_MASS
                + NITROGEN_MOLAR_MASS * total_inert
                + OXYGEN_MOLAR_MASS * total_oxygen)
    }

    /// Zero the injected-fuel counter of every intake
    #[track_caller]
    pub fn reset_fuel_consumption(&mut self) {
        self.lifecycle.assert_live("Engine");
        for intake in self.intakes.iter_mut() {
            intake.reset_fuel_consumption();
        }
    }

    /// Fuel injected since the last reset, kg
    #[track_caller]
    pub fn total_fuel_mass_consumed(&self) -> f64 {
        self.lifecycle.assert_live("Engine");
        let n_fuel_consumed: f64 = self.intakes.iter().map(Intake::total_fuel_injected).sum();
        n_fuel_consumed * self.fuel.molecular_mass()
    }

    /// Fuel injected since the last reset, m³
    #[track_caller]
    pub fn total_volume_fuel_consumed(&self) -> f64 {
        self.lifecycle.assert_live("Engine");
        self.total_fuel_mass_consumed() / self.fuel.density()
    }

    // ---------------------------------------------------------------------
    // Speed
    // ---------------------------------------------------------------------

    /// Engine speed from crankshaft 0; 0 for an initialized engine without
    /// crankshafts
    ///
    /// Forward rotation has negative angular velocity, so the sign is flipped.
    #[track_caller]
    pub fn rpm(&self) -> f64 {
        self.lifecycle.assert_live("Engine");
        match self.crankshafts.first() {
            Some(shaft) => -units::to_rpm(shaft.body.v_theta),
            None => 0.0,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            debug_assert!(
                !self.lifecycle.is_initialized(),
                "Engine '{}' dropped while initialized; call destroy() first",
                self.name
            );
        }
    }
}
