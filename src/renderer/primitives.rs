// renderer/primitives.rs
//
// Primitive shapes the mesh library can draw, and the trait the scene
// drives it through.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Meshes that must be loaded before the primitives using them are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshKind {
    Plane,
    Box,
    Sphere,
    Pyramid3,
    Pyramid4,
    Cylinder,
    TaperedCylinder,
    Torus,
}

/// One face of the unit box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxSide {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

bitflags! {
    /// Which surfaces of a (tapered) cylinder to emit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct CylinderSurfaces: u8 {
        const TOP = 1 << 0;
        const BOTTOM = 1 << 1;
        const SIDE = 1 << 2;
    }
}

impl Default for CylinderSurfaces {
    fn default() -> Self {
        Self::all()
    }
}

/// A single draw call on the mesh library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Plane,
    Box,
    BoxSide {
        side: BoxSide,
    },
    Sphere,
    Pyramid3,
    Pyramid4,
    Cylinder {
        #[serde(default)]
        surfaces: CylinderSurfaces,
    },
    TaperedCylinder {
        #[serde(default)]
        surfaces: CylinderSurfaces,
    },
    Torus,
    HalfTorus,
}

impl Primitive {
    pub fn cylinder() -> Self {
        Primitive::Cylinder {
            surfaces: CylinderSurfaces::all(),
        }
    }

    pub fn tapered_cylinder() -> Self {
        Primitive::TaperedCylinder {
            surfaces: CylinderSurfaces::all(),
        }
    }

    pub fn mesh_kind(&self) -> MeshKind {
        match self {
            Primitive::Plane => MeshKind::Plane,
            Primitive::Box | Primitive::BoxSide { .. } => MeshKind::Box,
            Primitive::Sphere => MeshKind::Sphere,
            Primitive::Pyramid3 => MeshKind::Pyramid3,
            Primitive::Pyramid4 => MeshKind::Pyramid4,
            Primitive::Cylinder { .. } => MeshKind::Cylinder,
            Primitive::TaperedCylinder { .. } => MeshKind::TaperedCylinder,
            // The half torus is emitted from the torus mesh's buffers.
            Primitive::Torus | Primitive::HalfTorus => MeshKind::Torus,
        }
    }

    pub fn draw<M: MeshLibrary + ?Sized>(&self, meshes: &mut M) {
        match *self {
            Primitive::Plane => meshes.draw_plane(),
            Primitive::Box => meshes.draw_box(),
            Primitive::BoxSide { side } => meshes.draw_box_side(side),
            Primitive::Sphere => meshes.draw_sphere(),
            Primitive::Pyramid3 => meshes.draw_pyramid3(),
            Primitive::Pyramid4 => meshes.draw_pyramid4(),
            Primitive::Cylinder { surfaces } => meshes.draw_cylinder(surfaces),
            Primitive::TaperedCylinder { surfaces } => meshes.draw_tapered_cylinder(surfaces),
            Primitive::Torus => meshes.draw_torus(),
            Primitive::HalfTorus => meshes.draw_half_torus(),
        }
    }
}

/// GPU mesh buffers for the basic shapes. Implementations own the buffers;
/// each draw call uses whatever shader state is current.
pub trait MeshLibrary {
    fn load_mesh(&mut self, kind: MeshKind);

    fn draw_plane(&mut self);
    fn draw_box(&mut self);
    fn draw_box_side(&mut self, side: BoxSide);
    fn draw_sphere(&mut self);
    fn draw_pyramid3(&mut self);
    fn draw_pyramid4(&mut self);
    fn draw_cylinder(&mut self, surfaces: CylinderSurfaces);
    fn draw_tapered_cylinder(&mut self, surfaces: CylinderSurfaces);
    fn draw_torus(&mut self);
    fn draw_half_torus(&mut self);
}
