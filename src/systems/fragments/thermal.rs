use glam::Vec3;

use crate::domain::config::{FragmentTuning, ThermalConfig};
use crate::domain::Fragment;
use crate::systems::temperature::{ease_toward, heat_gain};

/// Heat and cool one solid fragment. Returns true when it has crossed the
/// melting point and must be handed to the pool.
///
/// `heat_source` is `Some` only while heating is active; distance is measured
/// from the fragment's world position.
pub(super) fn update_fragment_temperature(
    fragment: &mut Fragment,
    world_position: Vec3,
    heat_source: Option<Vec3>,
    tuning: &FragmentTuning,
    thermal: &ThermalConfig,
) -> bool {
    if let Some(source) = heat_source {
        let distance = world_position.distance(source);
        fragment.temperature += heat_gain(tuning.heat_gain, distance);
    }
    fragment.temperature = ease_toward(fragment.temperature, thermal.room_temp, tuning.cooling);
    fragment.temperature > thermal.melting_temp
}
