use glam::Vec3;
use wasm_bindgen::prelude::*;

use crate::domain::{PhaseChangeEvent, PhaseChangeKind, SubtitleEvent};

use super::observer::EngineObserver;
use super::perf_stats::PerfStats;
use super::render_extract::{self, RenderBuffer};
use super::stats::Stats;
use super::EngineCore;

/// Pointers and element lengths of every render buffer, valid until the
/// next `step` or `reset`.
#[wasm_bindgen]
pub struct RenderLayout {
    vapor_ptr: u32,
    vapor_len: u32,
    residue_ptr: u32,
    residue_len: u32,
    fragments_ptr: u32,
    fragments_len: u32,
    hulls_ptr: u32,
    hulls_len: u32,
    liquid_profile_ptr: u32,
    liquid_profile_len: u32,
}

#[wasm_bindgen]
impl RenderLayout {
    #[wasm_bindgen(getter)]
    pub fn vapor_ptr(&self) -> u32 { self.vapor_ptr }
    #[wasm_bindgen(getter)]
    pub fn vapor_len(&self) -> u32 { self.vapor_len }

    #[wasm_bindgen(getter)]
    pub fn residue_ptr(&self) -> u32 { self.residue_ptr }
    #[wasm_bindgen(getter)]
    pub fn residue_len(&self) -> u32 { self.residue_len }

    #[wasm_bindgen(getter)]
    pub fn fragments_ptr(&self) -> u32 { self.fragments_ptr }
    #[wasm_bindgen(getter)]
    pub fn fragments_len(&self) -> u32 { self.fragments_len }

    #[wasm_bindgen(getter)]
    pub fn hulls_ptr(&self) -> u32 { self.hulls_ptr }
    #[wasm_bindgen(getter)]
    pub fn hulls_len(&self) -> u32 { self.hulls_len }

    #[wasm_bindgen(getter)]
    pub fn liquid_profile_ptr(&self) -> u32 { self.liquid_profile_ptr }
    #[wasm_bindgen(getter)]
    pub fn liquid_profile_len(&self) -> u32 { self.liquid_profile_len }
}

/// Forwards engine events to JS callbacks.
///
/// `on_knock()`, `on_subtitle(text, displaySeconds)` and
/// `on_phase_change(kind, volume, temperature)`.
struct JsObserver {
    on_knock: Option<js_sys::Function>,
    on_subtitle: Option<js_sys::Function>,
    on_phase_change: Option<js_sys::Function>,
}

fn report(result: Result<JsValue, JsValue>, what: &str) {
    if let Err(err) = result {
        log::warn!("{what} callback threw: {err:?}");
    }
}

impl EngineObserver for JsObserver {
    fn on_knock(&mut self) {
        if let Some(f) = &self.on_knock {
            report(f.call0(&JsValue::NULL), "knock");
        }
    }

    fn on_subtitle(&mut self, event: &SubtitleEvent) {
        if let Some(f) = &self.on_subtitle {
            let text = JsValue::from_str(&event.text);
            let seconds = JsValue::from_f64(event.display_seconds as f64);
            report(f.call2(&JsValue::NULL, &text, &seconds), "subtitle");
        }
    }

    fn on_phase_change(&mut self, event: &PhaseChangeEvent) {
        if let Some(f) = &self.on_phase_change {
            let kind = match event.kind {
                PhaseChangeKind::Melt => "melt",
                PhaseChangeKind::Nucleation => "nucleation",
            };
            report(
                f.call3(
                    &JsValue::NULL,
                    &JsValue::from_str(kind),
                    &JsValue::from_f64(event.volume as f64),
                    &JsValue::from_f64(event.temperature as f64),
                ),
                "phase change",
            );
        }
    }
}

#[wasm_bindgen]
pub struct Engine {
    core: EngineCore,
}

#[wasm_bindgen]
impl Engine {
    /// Create an engine with the default config. Omit the seed for a random one.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u32>) -> Self {
        Self {
            core: EngineCore::new(seed.map(u64::from)),
        }
    }

    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: String, seed: Option<u32>) -> Result<Engine, JsValue> {
        let core = EngineCore::from_config_json(&json, seed.map(u64::from))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { core })
    }

    pub fn get_config_json(&self) -> Result<String, JsValue> {
        self.core
            .config()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Vessel dimensions for building the glass mesh:
    /// `[chamber_radius, channel_radius, channel_length, aperture_radius]`.
    pub fn vessel_geometry(&self) -> Vec<f32> {
        let g = &self.core.config().geometry;
        vec![g.chamber_radius, g.channel_radius, g.channel_length, g.aperture_radius]
    }

    #[wasm_bindgen(getter)]
    pub fn tick_count(&self) -> u64 { self.core.tick_count() }

    #[wasm_bindgen(getter)]
    pub fn shard_size(&self) -> f32 { self.core.shard_size() }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    pub fn set_gravity(&mut self, x: f32, y: f32, z: f32) {
        self.core.set_gravity(Vec3::new(x, y, z));
    }

    pub fn set_room_temperature(&mut self, temp: f32) {
        self.core.set_room_temperature(temp);
    }

    pub fn get_room_temperature(&self) -> f32 {
        self.core.get_room_temperature()
    }

    /// Install JS callbacks for engine events. Pass `undefined` to skip one.
    pub fn set_callbacks(
        &mut self,
        on_knock: Option<js_sys::Function>,
        on_subtitle: Option<js_sys::Function>,
        on_phase_change: Option<js_sys::Function>,
    ) {
        self.core.set_observer(Box::new(JsObserver {
            on_knock,
            on_subtitle,
            on_phase_change,
        }));
    }

    pub fn clear_callbacks(&mut self) {
        self.core.clear_observer();
    }

    // === INPUTS ===

    /// World position of the flame.
    pub fn set_heat_source(&mut self, x: f32, y: f32, z: f32) {
        self.core.set_heat_source(Vec3::new(x, y, z));
    }

    pub fn set_lighter_held(&mut self, held: bool) {
        self.core.set_lighter_held(held);
    }

    pub fn set_inhaling(&mut self, inhaling: bool) {
        self.core.set_inhaling(inhaling);
    }

    pub fn toggle_tilt_forward(&mut self) {
        self.core.toggle_tilt_forward();
    }

    pub fn toggle_tilt_backward(&mut self) {
        self.core.toggle_tilt_backward();
    }

    /// Reset fragments and pool with a new shard size.
    pub fn reset(&mut self, size: f32) {
        self.core.reset(size);
    }

    /// Advance by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.core.step(dt);
    }

    // === OUTPUTS ===

    pub fn stats(&self) -> Stats {
        self.core.stats()
    }

    #[wasm_bindgen(getter)]
    pub fn stimulation(&self) -> f32 {
        self.core.stimulation()
    }

    /// Pending subtitle as JSON (`text`, `visible`, `display_seconds`), cleared by the call.
    pub fn take_subtitle(&mut self) -> Option<String> {
        self.core
            .take_subtitle()
            .and_then(|event| serde_json::to_string(&event).ok())
    }

    #[wasm_bindgen(getter)]
    pub fn liquid_visible(&self) -> bool {
        self.core.pool().surface().visible
    }

    #[wasm_bindgen(getter)]
    pub fn liquid_depth(&self) -> f32 {
        self.core.pool().surface().depth
    }

    /// Surface orientation as `[x, y, z, w]`.
    pub fn liquid_orientation(&self) -> Vec<f32> {
        self.core.pool().orientation().to_array().to_vec()
    }

    #[wasm_bindgen(getter)]
    pub fn liquid_volume(&self) -> f32 {
        self.core.pool().volume()
    }

    #[wasm_bindgen(getter)]
    pub fn fragment_count(&self) -> usize {
        self.core.fragments().len()
    }

    // === RENDER BUFFERS ===
    // Element (f32) lengths. Pointers move when a buffer grows; re-read after step.

    pub fn vapor_positions_ptr(&self) -> *const f32 {
        self.core.vapor().positions_ptr()
    }

    pub fn vapor_positions_len(&self) -> usize {
        self.core.vapor_positions().len()
    }

    pub fn residue_positions_ptr(&self) -> *const f32 {
        self.core.residue().positions_ptr()
    }

    pub fn residue_positions_len(&self) -> usize {
        self.core.residue_positions().len()
    }

    pub fn fragment_transforms_ptr(&self) -> *const f32 {
        self.core.fragment_transforms().as_ptr()
    }

    pub fn fragment_transforms_len(&self) -> usize {
        self.core.fragment_transforms().len()
    }

    pub fn fragment_hulls_ptr(&self) -> *const f32 {
        self.core.fragment_hulls().as_ptr()
    }

    pub fn fragment_hulls_len(&self) -> usize {
        self.core.fragment_hulls().len()
    }

    pub fn liquid_profile_ptr(&self) -> *const f32 {
        self.core.liquid_profile().as_ptr()
    }

    pub fn liquid_profile_len(&self) -> usize {
        self.core.liquid_profile().len()
    }

    /// Pointer to a buffer by name; errors on an unknown name.
    pub fn buffer_ptr(&self, name: &str) -> Result<u32, JsValue> {
        self.core
            .render_buffer(name)
            .map(|b| b.as_ptr() as u32)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn buffer_len(&self, name: &str) -> Result<usize, JsValue> {
        self.core
            .render_buffer(name)
            .map(|b| b.len())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn render_layout(&self) -> RenderLayout {
        let view = |which| {
            let b = render_extract::buffer(&self.core, which);
            (b.as_ptr() as u32, b.len() as u32)
        };
        let (vapor_ptr, vapor_len) = view(RenderBuffer::Vapor);
        let (residue_ptr, residue_len) = view(RenderBuffer::Residue);
        let (fragments_ptr, fragments_len) = view(RenderBuffer::Fragments);
        let (hulls_ptr, hulls_len) = view(RenderBuffer::Hulls);
        let (liquid_profile_ptr, liquid_profile_len) = view(RenderBuffer::LiquidProfile);
        RenderLayout {
            vapor_ptr,
            vapor_len,
            residue_ptr,
            residue_len,
            fragments_ptr,
            fragments_len,
            hulls_ptr,
            hulls_len,
            liquid_profile_ptr,
            liquid_profile_len,
        }
    }
}
