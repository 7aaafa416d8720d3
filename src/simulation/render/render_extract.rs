use std::str::FromStr;

use crate::core::error::{EngineError, Result};
use crate::domain::HULL_POINTS;

use super::EngineCore;

/// Floats per fragment in the transform buffer:
/// `x, y, z, qx, qy, qz, qw, size, visible`.
pub const FRAGMENT_TRANSFORM_STRIDE: usize = 9;
/// Floats per fragment in the hull buffer.
pub(super) const FRAGMENT_HULL_STRIDE: usize = HULL_POINTS * 3;

/// The flat `f32` buffers a renderer can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderBuffer {
    Vapor,
    Residue,
    Fragments,
    Hulls,
    LiquidProfile,
}

impl FromStr for RenderBuffer {
    type Err = EngineError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "vapor" => Ok(RenderBuffer::Vapor),
            "residue" => Ok(RenderBuffer::Residue),
            "fragments" => Ok(RenderBuffer::Fragments),
            "hulls" => Ok(RenderBuffer::Hulls),
            "liquid_profile" => Ok(RenderBuffer::LiquidProfile),
            other => Err(EngineError::InvalidParam(format!("unknown render buffer '{other}'"))),
        }
    }
}

pub(super) fn buffer(engine: &EngineCore, which: RenderBuffer) -> &[f32] {
    match which {
        RenderBuffer::Vapor => engine.vapor.positions(),
        RenderBuffer::Residue => engine.residue.positions(),
        RenderBuffer::Fragments => &engine.render.fragment_transforms,
        RenderBuffer::Hulls => &engine.render.fragment_hulls,
        RenderBuffer::LiquidProfile => &engine.render.liquid_profile,
    }
}

pub(super) fn buffer_by_name<'a>(engine: &'a EngineCore, name: &str) -> Result<&'a [f32]> {
    Ok(buffer(engine, name.parse()?))
}

/// Rebuild the engine-owned buffers from current state.
///
/// Vapor and residue keep their own packed buffers; this covers fragments
/// and the liquid profile.
pub(super) fn refresh(engine: &mut EngineCore) {
    let render = &mut engine.render;

    render.fragment_transforms.clear();
    render.fragment_hulls.clear();
    for f in engine.fragments.fragments() {
        let q = f.orientation;
        render.fragment_transforms.extend_from_slice(&[
            f.position.x,
            f.position.y,
            f.position.z,
            q.x,
            q.y,
            q.z,
            q.w,
            f.size,
            if f.is_solid() { 1.0 } else { 0.0 },
        ]);
        for p in &f.hull {
            render.fragment_hulls.extend_from_slice(&p.to_array());
        }
    }

    render.liquid_profile.clear();
    let surface = engine.pool.surface();
    if surface.visible {
        for [radius, y] in surface.profile() {
            render.liquid_profile.push(*radius);
            render.liquid_profile.push(*y);
        }
    }
}
