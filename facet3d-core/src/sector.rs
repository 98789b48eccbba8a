/// Pie and ring wedge meshes
use log::warn;
use std::f64::consts::PI;

use crate::error::SectorError;
use crate::geometry::{ColorTag, Face, Shadow};
use crate::point::{mm_to_units, FixedPoint3};
use crate::scene::Scene;

/// Largest accepted angle, in tenths of a degree.
pub const FULL_CIRCLE: i32 = 3600;

/// Shading of the flat end caps of an extruded wedge.
const END_CAP_SHADOW: i32 = 20;

/// Peak shading of the extruded inner and outer walls.
const WALL_SHADOW: f64 = 30.0;

/// How far each slice reaches back into the previous one, in tenths of a degree.
const SLICE_OVERLAP: i32 = 10;

/// A ring wedge in the XY plane. Lengths are millimeters, angles are
/// tenths of a degree measured from +Y toward +X.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub center: (f64, f64),
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: i32,
    pub end_angle: i32,
    pub step_angle: i32,
    /// Arc length trimmed at the start and end boundaries.
    pub gap: f64,
    /// Extrusion along +Z; zero or less builds a flat wedge.
    pub depth: f64,
}

impl Sector {
    pub fn new(inner_radius: f64, outer_radius: f64, start_angle: i32, end_angle: i32) -> Self {
        Self {
            center: (0.0, 0.0),
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
            step_angle: 50,
            gap: 0.0,
            depth: 0.0,
        }
    }

    fn validate(&self) -> Result<(), SectorError> {
        if !(0..=FULL_CIRCLE).contains(&self.start_angle) {
            return Err(SectorError::StartAngleOutOfRange(self.start_angle));
        }
        if !(0..=FULL_CIRCLE).contains(&self.end_angle) {
            return Err(SectorError::EndAngleOutOfRange(self.end_angle));
        }
        if self.inner_radius >= self.outer_radius {
            return Err(SectorError::DegenerateRadii {
                inner: self.inner_radius,
                outer: self.outer_radius,
            });
        }
        if self.step_angle <= 0 {
            return Err(SectorError::NonPositiveStep(self.step_angle));
        }
        Ok(())
    }

    fn arc_point(&self, radius: f64, angle: i32, gap: f64) -> FixedPoint3 {
        let mut a = f64::from(angle) * PI / 1800.0;
        // At radius zero every angle is the center.
        if gap != 0.0 && radius != 0.0 {
            a += gap / (2.0 * PI * radius);
        }
        FixedPoint3::from_mm(
            self.center.0 + radius * a.sin(),
            self.center.1 + radius * a.cos(),
            0.0,
        )
    }

    /// Inner and outer arc points at `angle`, on the base plane.
    fn spoke(&self, angle: i32, gap: f64) -> (FixedPoint3, FixedPoint3) {
        (
            self.arc_point(self.inner_radius, angle, gap),
            self.arc_point(self.outer_radius, angle, gap),
        )
    }
}

/// Same X/Y lifted to `depth` millimeters.
fn raised(p: FixedPoint3, depth: f64) -> FixedPoint3 {
    FixedPoint3 {
        z: mm_to_units(depth),
        ..p
    }
}

/// Wall shading for a slice ending at `angle`: `round(30 * sin(angle))`.
fn wall_shadow(angle: i32) -> Shadow {
    Shadow::Darken((WALL_SHADOW * (f64::from(angle) * PI / 1800.0).sin()).round() as i32)
}

impl Scene {
    /// Add a wedge as a fan of quads, plus walls and end caps when
    /// `sector.depth > 0`. Returns the number of faces added.
    pub fn build_sector(&mut self, tag: ColorTag, sector: &Sector) -> Result<usize, SectorError> {
        if let Err(e) = sector.validate() {
            warn!("sector rejected: {e}");
            return Err(e);
        }

        let extruded = sector.depth > 0.0;
        let mut faces = Vec::new();

        let mut angle = sector.start_angle;
        let (mut inner, mut outer) = sector.spoke(angle, sector.gap);

        if extruded {
            faces.push(end_cap(tag, inner, outer, sector.depth));
        }

        while angle < sector.end_angle {
            angle = angle.saturating_add(sector.step_angle).min(sector.end_angle);

            let gap = if angle >= sector.end_angle {
                -sector.gap
            } else {
                0.0
            };
            let (next_inner, next_outer) = sector.spoke(angle, gap);

            faces.push(Face::quad(tag, inner, outer, next_outer, next_inner));

            if extruded {
                let shadow = wall_shadow(angle);
                faces.push(
                    Face::quad(
                        tag,
                        inner,
                        next_inner,
                        raised(next_inner, sector.depth),
                        raised(inner, sector.depth),
                    )
                    .with_shadow(shadow),
                );
                faces.push(
                    Face::quad(
                        tag,
                        outer,
                        next_outer,
                        raised(next_outer, sector.depth),
                        raised(outer, sector.depth),
                    )
                    .with_shadow(shadow),
                );
            }

            if angle < sector.end_angle {
                // The next slice starts a little behind this one's end.
                (inner, outer) = sector.spoke(angle - SLICE_OVERLAP, 0.0);
            } else {
                (inner, outer) = (next_inner, next_outer);
            }
        }

        if extruded {
            faces.push(end_cap(tag, inner, outer, sector.depth));
        }

        let count = faces.len();
        for face in faces {
            self.add(face);
        }
        Ok(count)
    }
}

fn end_cap(tag: ColorTag, inner: FixedPoint3, outer: FixedPoint3, depth: f64) -> Face {
    Face::quad(tag, inner, outer, raised(outer, depth), raised(inner, depth))
        .with_shadow(Shadow::Darken(END_CAP_SHADOW))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Facet;

    fn tag() -> ColorTag {
        ColorTag::Palette(3)
    }

    #[test]
    fn test_rejects_degenerate_radii() {
        let mut scene = Scene::new();
        let sector = Sector::new(50.0, 50.0, 0, 900);
        assert!(matches!(
            scene.build_sector(tag(), &sector),
            Err(SectorError::DegenerateRadii { .. })
        ));
        let sector = Sector::new(60.0, 50.0, 0, 900);
        assert!(scene.build_sector(tag(), &sector).is_err());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_rejects_out_of_range_angles() {
        let mut scene = Scene::new();
        assert_eq!(
            scene.build_sector(tag(), &Sector::new(10.0, 20.0, -1, 900)),
            Err(SectorError::StartAngleOutOfRange(-1))
        );
        assert_eq!(
            scene.build_sector(tag(), &Sector::new(10.0, 20.0, 0, 3601)),
            Err(SectorError::EndAngleOutOfRange(3601))
        );
        let mut sector = Sector::new(10.0, 20.0, 0, 900);
        sector.step_angle = 0;
        assert_eq!(
            scene.build_sector(tag(), &sector),
            Err(SectorError::NonPositiveStep(0))
        );
        assert!(scene.is_empty());
    }

    #[test]
    fn test_flat_wedge_slices() {
        let mut scene = Scene::new();
        let mut sector = Sector::new(10.0, 20.0, 0, 900);
        sector.step_angle = 300;

        assert_eq!(scene.build_sector(tag(), &sector), Ok(3));
        assert_eq!(scene.len(), 3);
        assert!(scene.faces().iter().all(|f| f.len() == 4));
        assert!(scene.faces().iter().all(|f| f.depth() == 0));
    }

    #[test]
    fn test_last_step_is_clamped_to_end() {
        let mut scene = Scene::new();
        let mut sector = Sector::new(10.0, 20.0, 0, 900);
        sector.step_angle = 400;

        assert_eq!(scene.build_sector(tag(), &sector), Ok(3));
        // The final slice ends exactly on the +X axis.
        let last = &scene.faces()[2];
        assert_eq!(last.points()[2], FixedPoint3::from_mm(20.0, 0.0, 0.0));
        assert_eq!(last.points()[3], FixedPoint3::from_mm(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_start_point_geometry() {
        let mut scene = Scene::new();
        let mut sector = Sector::new(10.0, 20.0, 0, 900);
        sector.center = (5.0, -5.0);
        sector.step_angle = 900;

        scene.build_sector(tag(), &sector).unwrap();
        let face = &scene.faces()[0];
        assert_eq!(face.points()[0], FixedPoint3::from_mm(5.0, 5.0, 0.0));
        assert_eq!(face.points()[1], FixedPoint3::from_mm(5.0, 15.0, 0.0));
    }

    #[test]
    fn test_gap_trims_both_ends() {
        let mut scene = Scene::new();
        let mut sector = Sector::new(10.0, 20.0, 0, 900);
        sector.step_angle = 900;
        sector.gap = 2.0;
        scene.build_sector(tag(), &sector).unwrap();

        let face = &scene.faces()[0];
        // Start moves toward +X, end moves back toward +Y.
        assert!(face.points()[0].x > 0);
        assert!(face.points()[2].y > 0);
    }

    #[test]
    fn test_gap_on_full_pie_keeps_tip_at_center() {
        let mut scene = Scene::new();
        let mut sector = Sector::new(0.0, 20.0, 0, 900);
        sector.center = (50.0, 50.0);
        sector.gap = 1.0;
        sector.step_angle = 900;
        scene.build_sector(tag(), &sector).unwrap();

        let face = &scene.faces()[0];
        let center = FixedPoint3::from_mm(50.0, 50.0, 0.0);
        assert_eq!(face.points()[0], center);
        assert_eq!(face.points()[3], center);
        assert!(face.points()[1].x > center.x);
    }

    #[test]
    fn test_huge_step_is_one_slice() {
        let mut scene = Scene::new();
        let mut sector = Sector::new(10.0, 20.0, 10, 900);
        sector.step_angle = i32::MAX;
        assert_eq!(scene.build_sector(tag(), &sector), Ok(1));
        assert_eq!(
            scene.faces()[0].points()[2],
            FixedPoint3::from_mm(20.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_extruded_wedge_faces_and_shading() {
        let mut scene = Scene::new();
        let mut sector = Sector::new(10.0, 20.0, 0, 1800);
        sector.step_angle = 900;
        sector.depth = 5.0;

        // Two slices, each with two walls, plus two end caps.
        assert_eq!(scene.build_sector(tag(), &sector), Ok(8));

        let shadows: Vec<Shadow> = scene.faces().iter().map(|f| f.shadow).collect();
        assert_eq!(
            shadows,
            vec![
                Shadow::Darken(20),
                Shadow::None,
                Shadow::Darken(30),
                Shadow::Darken(30),
                Shadow::None,
                Shadow::Darken(0),
                Shadow::Darken(0),
                Shadow::Darken(20),
            ]
        );

        let cap = &scene.faces()[0];
        assert_eq!(cap.points()[2].z, 5_000);
        assert_eq!(cap.points()[0].z, 0);
    }

    #[test]
    fn test_walls_lighten_on_far_half() {
        assert_eq!(wall_shadow(2700), Shadow::Darken(-30));
        assert_eq!(wall_shadow(300), Shadow::Darken(15));
    }

    #[test]
    fn test_empty_span_adds_only_caps() {
        let mut scene = Scene::new();
        let mut sector = Sector::new(10.0, 20.0, 900, 900);
        assert_eq!(scene.build_sector(tag(), &sector), Ok(0));
        sector.depth = 1.0;
        assert_eq!(scene.build_sector(tag(), &sector), Ok(2));
    }
}
