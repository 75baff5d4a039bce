use glam::Vec3;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum DecorationKind {
    Well,
    House,
    TreeA,
    TreeB,
    TreeC,
}

impl DecorationKind {
    pub const ALL: [DecorationKind; 5] = [
        DecorationKind::Well,
        DecorationKind::House,
        DecorationKind::TreeA,
        DecorationKind::TreeB,
        DecorationKind::TreeC,
    ];

    /// Stable id used by the asset side to pick a mesh.
    pub fn id(&self) -> u8 {
        match self {
            DecorationKind::Well => 0,
            DecorationKind::House => 1,
            DecorationKind::TreeA => 2,
            DecorationKind::TreeB => 3,
            DecorationKind::TreeC => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DecorationKind::Well => "well",
            DecorationKind::House => "house",
            DecorationKind::TreeA => "tree_a",
            DecorationKind::TreeB => "tree_b",
            DecorationKind::TreeC => "tree_c",
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(
            self,
            DecorationKind::TreeA | DecorationKind::TreeB | DecorationKind::TreeC
        )
    }
}

/// A decoration anchored in a chunk. Holds no renderer resources.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Placement {
    pub kind: DecorationKind,
    /// Offset from the chunk origin; `y` is the terrain height at the anchor.
    pub local: Vec3,
    /// Rotation about the vertical axis, radians in `[0, TAU]`.
    pub yaw: f32,
}
