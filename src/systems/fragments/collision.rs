use crate::domain::Fragment;

/// Keep solid fragments inside the chamber sphere.
///
/// A fragment whose centre is farther than `chamber_radius - size/2` from the
/// centre bounces off the wall, keeping `restitution` of its reflected speed,
/// and is snapped back onto the boundary.
pub(super) fn resolve_boundary(fragments: &mut [Fragment], chamber_radius: f32, restitution: f32) {
    for f in fragments.iter_mut().filter(|f| f.is_solid()) {
        let boundary = chamber_radius - f.half_size();
        if f.position.length() > boundary {
            let normal = f.position.normalize_or_zero();
            f.velocity = f.velocity.reflect(normal) * restitution;
            f.position = normal * boundary;
        }
    }
}

/// One pairwise relaxation pass over solid fragments.
///
/// Overlapping pairs are pushed apart half the overlap each, then exchange
/// `p = (v1 - v2)·n` along the contact normal and both velocities are scaled
/// by `restitution`. Returns the number of contacts resolved.
pub(super) fn resolve_pairs(fragments: &mut [Fragment], restitution: f32) -> u32 {
    let mut contacts = 0u32;
    for i in 0..fragments.len() {
        let (head, tail) = fragments.split_at_mut(i + 1);
        let a = &mut head[i];
        if !a.is_solid() {
            continue;
        }
        for b in tail.iter_mut() {
            if !b.is_solid() {
                continue;
            }
            let offset = b.position - a.position;
            let dist = offset.length();
            let min_dist = a.half_size() + b.half_size();
            if dist >= min_dist {
                continue;
            }
            contacts += 1;

            let overlap = min_dist - dist;
            let normal = offset.normalize_or_zero();
            a.position -= normal * (overlap * 0.5);
            b.position += normal * (overlap * 0.5);

            let p = a.velocity.dot(normal) - b.velocity.dot(normal);
            a.velocity = (a.velocity - normal * p) * restitution;
            b.velocity = (b.velocity + normal * p) * restitution;
        }
    }
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::make_rng;
    use crate::domain::Phase;
    use glam::Vec3;

    fn fragment_at(pos: Vec3, size: f32) -> Fragment {
        let mut rng = make_rng(Some(1));
        Fragment::new(&mut rng, pos, size, 20.0)
    }

    #[test]
    fn wall_clamps_and_damps() {
        let mut fs = vec![fragment_at(Vec3::new(0.0, -2.5, 0.0), 0.5)];
        fs[0].velocity = Vec3::new(0.0, -1.0, 0.0);
        resolve_boundary(&mut fs, 2.0, 0.1);
        assert!((fs[0].position.length() - 1.75).abs() < 1e-6);
        assert!((fs[0].velocity.y - 0.1).abs() < 1e-6);
    }

    #[test]
    fn oblique_wall_hit_flips_only_the_normal_component() {
        let mut fs = vec![fragment_at(Vec3::new(0.0, -2.5, 0.0), 0.5)];
        fs[0].velocity = Vec3::new(1.0, -2.0, 0.5);
        resolve_boundary(&mut fs, 2.0, 0.5);
        let v = fs[0].velocity;
        assert!((v - Vec3::new(0.5, 1.0, 0.25)).length() < 1e-6, "{v:?}");
    }

    #[test]
    fn overlapping_pair_is_separated_symmetrically() {
        let mut fs = vec![
            fragment_at(Vec3::new(-0.1, 0.0, 0.0), 0.5),
            fragment_at(Vec3::new(0.1, 0.0, 0.0), 0.5),
        ];
        let contacts = resolve_pairs(&mut fs, 0.75);
        assert_eq!(contacts, 1);
        assert!((fs[0].position.x + 0.25).abs() < 1e-6);
        assert!((fs[1].position.x - 0.25).abs() < 1e-6);
    }

    #[test]
    fn head_on_velocities_swap_then_damp() {
        let mut fs = vec![
            fragment_at(Vec3::new(-0.2, 0.0, 0.0), 0.5),
            fragment_at(Vec3::new(0.2, 0.0, 0.0), 0.5),
        ];
        fs[0].velocity = Vec3::new(1.0, 0.0, 0.0);
        fs[1].velocity = Vec3::new(-1.0, 0.0, 0.0);
        resolve_pairs(&mut fs, 0.75);
        // p = 2: v1 = (1 - 2)·0.75, v2 = (-1 + 2)·0.75
        assert!((fs[0].velocity.x + 0.75).abs() < 1e-6);
        assert!((fs[1].velocity.x - 0.75).abs() < 1e-6);
    }

    #[test]
    fn liquid_fragments_are_ignored() {
        let mut fs = vec![
            fragment_at(Vec3::ZERO, 0.5),
            fragment_at(Vec3::new(0.1, 0.0, 0.0), 0.5),
        ];
        fs[1].phase = Phase::Liquid;
        assert_eq!(resolve_pairs(&mut fs, 0.75), 0);
        fs[1].position = Vec3::new(5.0, 0.0, 0.0);
        resolve_boundary(&mut fs, 2.0, 0.1);
        assert_eq!(fs[1].position, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn coincident_centres_do_not_produce_nan() {
        let mut fs = vec![fragment_at(Vec3::ZERO, 0.5), fragment_at(Vec3::ZERO, 0.5)];
        fs[0].velocity = Vec3::X;
        resolve_pairs(&mut fs, 0.75);
        assert!(fs[0].position.is_finite());
        assert!(fs[0].velocity.is_finite());
    }
}
