use std::fmt;

macro_rules! arena_ref {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            /// Empty slot.
            pub const NULL: Self = Self(u32::MAX);

            #[inline]
            pub(crate) fn new(index: usize) -> Self {
                debug_assert!(index < u32::MAX as usize);
                Self(index as u32)
            }

            #[inline]
            pub fn is_null(self) -> bool { self == Self::NULL }

            /// Arena index, or `None` for [`Self::NULL`].
            #[inline]
            pub fn index(self) -> Option<usize> {
                if self.is_null() { None } else { Some(self.0 as usize) }
            }
        }

        impl Default for $name {
            fn default() -> Self { Self::NULL }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.index() {
                    Some(i) => write!(f, concat!($prefix, "{}"), i),
                    None => f.write_str(concat!($prefix, "null")),
                }
            }
        }
    };
}

arena_ref!(
    /// Stable handle to a face of a [`crate::Tessellation`].
    FaceRef, "face-"
);
arena_ref!(
    /// Stable handle to a vertex of a [`crate::Tessellation`].
    VertexRef, "vertex-"
);

/// Two-colouring of the faces. Neighbours across any edge differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Positive,
    Negative,
}

impl Orientation {
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Orientation::Positive => Orientation::Negative,
            Orientation::Negative => Orientation::Positive,
        }
    }

    #[inline]
    pub fn sign(self) -> i32 {
        match self { Orientation::Positive => 1, Orientation::Negative => -1 }
    }
}

/// Rotational sense around a vertex: `Up` extends the fan at its high end,
/// `Down` at its low end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    #[inline]
    pub fn reversed(self) -> Self {
        match self { Direction::Up => Direction::Down, Direction::Down => Direction::Up }
    }
}

impl From<Orientation> for Direction {
    fn from(o: Orientation) -> Self {
        match o { Orientation::Positive => Direction::Up, Orientation::Negative => Direction::Down }
    }
}
