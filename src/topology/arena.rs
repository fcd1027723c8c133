//! Append-only tables with stable, dense ids.
//!
//! [`Arena`] is a growable ordered container whose ids are positions. Entries
//! are never removed or rewritten, so an id returned by [`Arena::push_with`]
//! keeps pointing at the same entry however much the arena grows afterwards.
//! The boundary-feature pass relies on this: it appends vertices and elements
//! while ids computed from the original mesh are still in use.

use std::marker::PhantomData;

use serde::{Serialize, Serializer};

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshDisvError;
use crate::topology::element::{Element, Vertex};
use crate::topology::point::{CellId, VertexId};

/// Append-only storage indexed by a dense id type `I`.
#[derive(Clone, Debug, PartialEq)]
pub struct Arena<I, T> {
    items: Vec<T>,
    _id: PhantomData<fn() -> I>,
}

impl<I, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            _id: PhantomData,
        }
    }
}

impl<I, T> Arena<I, T>
where
    I: Copy + From<usize> + Into<usize>,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            _id: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The id the next pushed entry will receive.
    #[inline]
    pub fn next_id(&self) -> I {
        I::from(self.items.len())
    }

    /// Appends the entry built by `make` from its id, and returns that id.
    pub fn push_with(&mut self, make: impl FnOnce(I) -> T) -> I {
        let id = self.next_id();
        self.items.push(make(id));
        id
    }

    #[inline]
    pub fn get(&self, id: I) -> Option<&T> {
        self.items.get(id.into())
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<I, T: Serialize> Serialize for Arena<I, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'a, I, T> IntoIterator for &'a Arena<I, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Vertex table: `VertexId(n)` is always the `n`-th entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VertexTable {
    arena: Arena<VertexId, Vertex>,
}

impl VertexTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(x, y)` pairs, assigning ids in iteration order.
    pub fn from_xy<P>(pairs: P) -> Self
    where
        P: IntoIterator<Item = [f64; 2]>,
    {
        let pairs = pairs.into_iter();
        let mut table = Self {
            arena: Arena::with_capacity(pairs.size_hint().0),
        };
        for [x, y] in pairs {
            table.push(x, y);
        }
        table
    }

    /// Appends a vertex at `(x, y)` and returns its id.
    pub fn push(&mut self, x: f64, y: f64) -> VertexId {
        self.arena.push_with(|id| Vertex { id, x, y })
    }

    #[inline]
    pub fn get(&self, id: VertexId) -> Option<&Vertex> {
        self.arena.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    #[inline]
    pub fn next_id(&self) -> VertexId {
        self.arena.next_id()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Vertex] {
        self.arena.as_slice()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Vertex> {
        self.arena.iter()
    }

    /// `(id, x, y)` triples in id order.
    pub fn triples(&self) -> Vec<(usize, f64, f64)> {
        self.iter().map(Vertex::as_triple).collect()
    }
}

/// Element table: `CellId(n)` is always the `n`-th entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ElementTable {
    arena: Arena<CellId, Element>,
}

impl ElementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from vertex loops, assigning ids in iteration order.
    pub fn from_loops<L>(loops: L) -> Self
    where
        L: IntoIterator<Item = Vec<VertexId>>,
    {
        let mut table = Self::new();
        for vertex_ids in loops {
            table.push(vertex_ids);
        }
        table
    }

    /// Appends an element with the given loop and returns its id.
    pub fn push(&mut self, vertex_ids: Vec<VertexId>) -> CellId {
        self.arena.push_with(|id| Element { id, vertex_ids })
    }

    #[inline]
    pub fn get(&self, id: CellId) -> Option<&Element> {
        self.arena.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    #[inline]
    pub fn next_id(&self) -> CellId {
        self.arena.next_id()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Element] {
        self.arena.as_slice()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.arena.iter()
    }
}

fn check_dense<I>(ids: I, what: &str) -> Result<(), MeshDisvError>
where
    I: IntoIterator<Item = usize>,
{
    for (pos, id) in ids.into_iter().enumerate() {
        if pos != id {
            return Err(MeshDisvError::InvariantViolation(format!(
                "{what} at position {pos} carries id {id}"
            )));
        }
    }
    Ok(())
}

impl DebugInvariants for VertexTable {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "VertexTable");
    }

    fn validate_invariants(&self) -> Result<(), MeshDisvError> {
        check_dense(self.iter().map(|v| v.id.get()), "vertex")
    }
}

impl DebugInvariants for ElementTable {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "ElementTable");
    }

    fn validate_invariants(&self) -> Result<(), MeshDisvError> {
        check_dense(self.iter().map(|e| e.id.get()), "element")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_handed_out_stay_valid_after_growth() {
        let mut table = VertexTable::new();
        let first = table.push(1.0, 2.0);
        for i in 0..1000 {
            table.push(i as f64, 0.0);
        }
        let v = table.get(first).unwrap();
        assert_eq!(v.id, first);
        assert_eq!(v.xy(), [1.0, 2.0]);
        assert_eq!(table.len(), 1001);
        assert!(table.validate_invariants().is_ok());
    }

    #[test]
    fn next_id_matches_push() {
        let mut elements = ElementTable::new();
        let expected = elements.next_id();
        let got = elements.push(vec![VertexId::new(0), VertexId::new(1)]);
        assert_eq!(expected, got);
        assert_eq!(elements.next_id(), CellId::new(1));
    }

    #[test]
    fn from_xy_assigns_read_order() {
        let table = VertexTable::from_xy([[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        assert_eq!(
            table.triples(),
            vec![(0, 0.0, 0.0), (1, 1.0, 0.0), (2, 0.0, 1.0)]
        );
    }

    #[test]
    fn out_of_range_lookup_is_none() {
        let table = VertexTable::from_xy([[0.0, 0.0]]);
        assert!(table.get(VertexId::new(1)).is_none());
    }

    #[test]
    fn serializes_as_plain_list() {
        let elements = ElementTable::from_loops([vec![VertexId::new(2), VertexId::new(0)]]);
        let json = serde_json::to_string(&elements).unwrap();
        assert_eq!(json, r#"[{"id":0,"vertex_ids":[2,0]}]"#);
    }
}
