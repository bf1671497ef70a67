use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::renderer::shader::{ShaderUniforms, MODEL};

/// Placement of one drawn object. Rotation is in degrees about X, Y and Z.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub scale: Vec3,
    pub rotation_degrees: Vec3,
    pub position: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            rotation_degrees: Vec3::ZERO,
            position: Vec3::ZERO,
        }
    }
}

impl Transform {
    pub fn new(scale: Vec3, rotation_degrees: Vec3, position: Vec3) -> Self {
        Self {
            scale,
            rotation_degrees,
            position,
        }
    }

    /// `T * Rz * Ry * Rx * S`: scale first, then X, Y, Z rotation, then
    /// translation.
    pub fn matrix(&self) -> Mat4 {
        let radians = Vec3::new(
            self.rotation_degrees.x.to_radians(),
            self.rotation_degrees.y.to_radians(),
            self.rotation_degrees.z.to_radians(),
        );

        Mat4::from_translation(self.position)
            * Mat4::from_rotation_z(radians.z)
            * Mat4::from_rotation_y(radians.y)
            * Mat4::from_rotation_x(radians.x)
            * Mat4::from_scale(self.scale)
    }

    pub fn push(&self, shader: &mut (impl ShaderUniforms + ?Sized)) {
        shader.set_mat4(MODEL, self.matrix());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::shader::UniformTable;

    #[test]
    fn default_is_identity() {
        let m = Transform::default().matrix();
        assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn translate_then_scale_ok() {
        let tr = Transform::new(Vec3::splat(2.0), Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
        let p = tr.matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        // (1,0,0) -> (2,0,0) -> (3,2,3)
        assert!(p.abs_diff_eq(Vec3::new(3.0, 2.0, 3.0), 1e-6));
    }

    #[test]
    fn x_rotates_before_y() {
        let tr = Transform::new(
            Vec3::splat(2.0),
            Vec3::new(90.0, 90.0, 0.0),
            Vec3::new(1.0, 2.0, 3.0),
        );
        // Worked by hand: S (0,1,0) -> (0,2,0), Rx 90 -> (0,0,2),
        // Ry 90 -> (2,0,0), T -> (3,2,3)
        let p = tr.matrix().transform_point3(Vec3::new(0.0, 1.0, 0.0));
        assert!(p.abs_diff_eq(Vec3::new(3.0, 2.0, 3.0), 1e-5));
    }

    #[test]
    fn z_rotation_is_outermost() {
        let tr = Transform::new(Vec3::ONE, Vec3::splat(90.0), Vec3::ZERO);
        // Rx: (0,1,0) -> (0,0,1), Ry: -> (1,0,0), Rz: -> (0,1,0).
        // Reversed order would land on (0,-1,0).
        let p = tr.matrix().transform_point3(Vec3::new(0.0, 1.0, 0.0));
        assert!(p.abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), 1e-5));
    }

    #[test]
    fn matches_hand_written_rotation_matrices() {
        let (s, c) = 30f32.to_radians().sin_cos();
        let rx = Mat4::from_cols_array(&[
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, s, 0.0, //
            0.0, -s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        let rz = Mat4::from_cols_array(&[
            c, s, 0.0, 0.0, //
            -s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        let scale = Mat4::from_diagonal(glam::Vec4::new(3.0, 1.0, 0.5, 1.0));
        let translate = Mat4::from_cols_array(&[
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            -4.0, 5.0, 6.0, 1.0,
        ]);
        let expected = translate * rz * rx * scale;

        let tr = Transform::new(
            Vec3::new(3.0, 1.0, 0.5),
            Vec3::new(30.0, 0.0, 30.0),
            Vec3::new(-4.0, 5.0, 6.0),
        );
        assert!(tr.matrix().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn identical_inputs_give_identical_bits() {
        let tr = Transform::new(
            Vec3::new(1.5, 0.25, 7.0),
            Vec3::new(12.0, -45.0, 270.0),
            Vec3::new(-5.85, 20.0, -12.95),
        );
        let a = tr.matrix().to_cols_array().map(f32::to_bits);
        let b = tr.matrix().to_cols_array().map(f32::to_bits);
        assert_eq!(a, b);
    }

    #[test]
    fn push_writes_model_uniform() {
        let mut table = UniformTable::new();
        let tr = Transform::new(Vec3::new(21.0, 1.0, 21.0), Vec3::ZERO, Vec3::ZERO);
        tr.push(&mut table);
        assert_eq!(table.mat4(MODEL), Some(tr.matrix()));
        assert_eq!(table.write_count(), 1);
    }
}
