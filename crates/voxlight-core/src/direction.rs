use glam::IVec3;

/// One of the 18 neighbor directions sampled for ambient occlusion
/// (6 faces + 12 edges). Corner neighbors are deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    // 6 face neighbors
    Down = 0,
    Up = 1,
    North = 2,
    South = 3,
    East = 4,
    West = 5,
    // 12 edge neighbors
    DownNorth = 6,
    DownSouth = 7,
    DownEast = 8,
    DownWest = 9,
    UpNorth = 10,
    UpSouth = 11,
    UpEast = 12,
    UpWest = 13,
    NorthEast = 14,
    NorthWest = 15,
    SouthEast = 16,
    SouthWest = 17,
}

/// Fixed AO sampling stencil. Order is irrelevant to the result.
pub const OCCLUSION_DIRECTIONS: [Direction; 18] = [
    Direction::Down,
    Direction::Up,
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
    Direction::DownNorth,
    Direction::DownSouth,
    Direction::DownEast,
    Direction::DownWest,
    Direction::UpNorth,
    Direction::UpSouth,
    Direction::UpEast,
    Direction::UpWest,
    Direction::NorthEast,
    Direction::NorthWest,
    Direction::SouthEast,
    Direction::SouthWest,
];

impl Direction {
    /// Offset vector for this direction. Y-up convention: Down = (0,-1,0).
    pub fn offset(self) -> IVec3 {
        match self {
            // Faces
            Direction::Down => IVec3::new(0, -1, 0),
            Direction::Up => IVec3::new(0, 1, 0),
            Direction::North => IVec3::new(0, 0, -1),
            Direction::South => IVec3::new(0, 0, 1),
            Direction::East => IVec3::new(1, 0, 0),
            Direction::West => IVec3::new(-1, 0, 0),
            // Edges (down)
            Direction::DownNorth => IVec3::new(0, -1, -1),
            Direction::DownSouth => IVec3::new(0, -1, 1),
            Direction::DownEast => IVec3::new(1, -1, 0),
            Direction::DownWest => IVec3::new(-1, -1, 0),
            // Edges (up)
            Direction::UpNorth => IVec3::new(0, 1, -1),
            Direction::UpSouth => IVec3::new(0, 1, 1),
            Direction::UpEast => IVec3::new(1, 1, 0),
            Direction::UpWest => IVec3::new(-1, 1, 0),
            // Edges (lateral)
            Direction::NorthEast => IVec3::new(1, 0, -1),
            Direction::NorthWest => IVec3::new(-1, 0, -1),
            Direction::SouthEast => IVec3::new(1, 0, 1),
            Direction::SouthWest => IVec3::new(-1, 0, 1),
        }
    }
}
