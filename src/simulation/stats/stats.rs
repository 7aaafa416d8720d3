use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::EngineCore;

/// Read-only snapshot taken at the end of every tick.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Stats {
    pub(super) liquid_temperature: f32,
    pub(super) vapor_count: u32,
    pub(super) residue_count: u32,
    pub(super) pipe_rotation_degrees: f32,
    pub(super) is_heating: bool,
    pub(super) is_inhaling: bool,
}

#[wasm_bindgen]
impl Stats {
    #[wasm_bindgen(getter)]
    pub fn liquid_temperature(&self) -> f32 { self.liquid_temperature }
    #[wasm_bindgen(getter)]
    pub fn vapor_count(&self) -> u32 { self.vapor_count }
    #[wasm_bindgen(getter)]
    pub fn residue_count(&self) -> u32 { self.residue_count }
    #[wasm_bindgen(getter)]
    pub fn pipe_rotation_degrees(&self) -> f32 { self.pipe_rotation_degrees }
    #[wasm_bindgen(getter)]
    pub fn is_heating(&self) -> bool { self.is_heating }
    #[wasm_bindgen(getter)]
    pub fn is_inhaling(&self) -> bool { self.is_inhaling }

    /// The snapshot as a JSON object string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

pub(super) fn snapshot(engine: &EngineCore) -> Stats {
    Stats {
        liquid_temperature: engine.pool.temperature(),
        vapor_count: engine.vapor.len() as u32,
        residue_count: engine.residue.len() as u32,
        pipe_rotation_degrees: engine.session.tilt.degrees(),
        is_heating: engine.session.heating,
        is_inhaling: engine.session.inhaling,
    }
}
