//! `VertexId` and `CellId`: dense, zero-based handles into the mesh tables
//!
//! Both ids are positions in an append-only table: the `n`-th vertex read
//! from the mesh file is `VertexId(n)`, and the `n`-th element (raw or
//! synthesized) is `CellId(n)`. Because the tables only ever grow, an id
//! handed out once stays valid for the lifetime of the table.
//!
//! Element ids and cell ids are the same thing: the Cell2D record built from
//! element `k` carries `CellId(k)`.

use std::fmt;

macro_rules! dense_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Wraps a raw zero-based index.
            #[inline]
            pub const fn new(raw: usize) -> Self {
                $name(raw)
            }

            /// Returns the zero-based position in the owning table.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        /// Prints only the raw index.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(raw: usize) -> Self {
                $name(raw)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(id: $name) -> usize {
                id.0
            }
        }
    };
}

dense_id!(
    /// Position of a vertex in the [`VertexTable`](crate::topology::arena::VertexTable).
    VertexId
);

dense_id!(
    /// Position of an element in the [`ElementTable`](crate::topology::arena::ElementTable),
    /// and the id of the Cell2D record built from it.
    CellId
);

#[cfg(test)]
mod layout_tests {
    use super::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(VertexId, usize);
    assert_eq_size!(CellId, usize);
}
