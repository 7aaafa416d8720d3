use wasm_bindgen::prelude::*;

/// Per-step timings and work counters. Zeroed at the start of every step.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) fragments_ms: f64,
    pub(super) liquid_ms: f64,
    pub(super) vapor_ms: f64,
    pub(super) render_ms: f64,

    pub(super) ticks: u32,
    pub(super) melts: u32,
    pub(super) nucleations: u32,
    pub(super) collision_pairs: u32,
    pub(super) emitted: u32,
    pub(super) exits: u32,
    pub(super) deposits: u32,
    pub(super) expired: u32,

    pub(super) fragment_count: u32,
    pub(super) vapor_count: u32,
    pub(super) residue_count: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn fragments_ms(&self) -> f64 { self.fragments_ms }
    #[wasm_bindgen(getter)]
    pub fn liquid_ms(&self) -> f64 { self.liquid_ms }
    #[wasm_bindgen(getter)]
    pub fn vapor_ms(&self) -> f64 { self.vapor_ms }
    #[wasm_bindgen(getter)]
    pub fn render_ms(&self) -> f64 { self.render_ms }

    /// Fixed ticks run by the last step (more than one with fixed stepping).
    #[wasm_bindgen(getter)]
    pub fn ticks(&self) -> u32 { self.ticks }
    #[wasm_bindgen(getter)]
    pub fn melts(&self) -> u32 { self.melts }
    #[wasm_bindgen(getter)]
    pub fn nucleations(&self) -> u32 { self.nucleations }
    #[wasm_bindgen(getter)]
    pub fn collision_pairs(&self) -> u32 { self.collision_pairs }
    #[wasm_bindgen(getter)]
    pub fn emitted(&self) -> u32 { self.emitted }
    #[wasm_bindgen(getter)]
    pub fn exits(&self) -> u32 { self.exits }
    #[wasm_bindgen(getter)]
    pub fn deposits(&self) -> u32 { self.deposits }
    #[wasm_bindgen(getter)]
    pub fn expired(&self) -> u32 { self.expired }

    #[wasm_bindgen(getter)]
    pub fn fragment_count(&self) -> u32 { self.fragment_count }
    #[wasm_bindgen(getter)]
    pub fn vapor_count(&self) -> u32 { self.vapor_count }
    #[wasm_bindgen(getter)]
    pub fn residue_count(&self) -> u32 { self.residue_count }
}
