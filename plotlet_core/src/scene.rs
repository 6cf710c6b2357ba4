// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-frame scene replacement.
//!
//! Each [`Scene::tick`] receives the complete mark list for a frame. The previous frame
//! is discarded wholesale; the returned diffs tell a retained-mode backend which marks
//! to add, repaint or remove so that nothing stale survives.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::{Mark, MarkId, MarkKind, MarkPayload};

/// A change between two consecutive frames.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark that was not in the previous frame.
    Enter {
        /// Mark identity.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Paint-order hint.
        z_index: i32,
        /// Geometric bounds (if any).
        bounds: Option<Rect>,
        /// The new payload.
        new: Box<MarkPayload>,
    },
    /// A mark present in both frames whose payload or z-index changed.
    Update {
        /// Mark identity.
        id: MarkId,
        /// Mark kind after the update.
        kind: MarkKind,
        /// Previous paint-order hint.
        old_z_index: i32,
        /// New paint-order hint.
        new_z_index: i32,
        /// Previous bounds (if any).
        old_bounds: Option<Rect>,
        /// New bounds (if any).
        new_bounds: Option<Rect>,
        /// The new payload.
        new: Box<MarkPayload>,
    },
    /// A mark that is not in the new frame.
    Exit {
        /// Mark identity.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Last known bounds (if any).
        bounds: Option<Rect>,
    },
}

impl MarkDiff {
    /// Returns the id of the affected mark.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }
}

/// The current frame of marks.
#[derive(Debug, Default)]
pub struct Scene {
    marks: HashMap<MarkId, (i32, MarkPayload)>,
    frame: u64,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current frame with `marks` and returns the diffs.
    ///
    /// Exits come first (ordered by id), followed by enters/updates in input order.
    /// If `marks` repeats an id, the last occurrence wins.
    pub fn tick(&mut self, marks: impl IntoIterator<Item = Mark>) -> Vec<MarkDiff> {
        let mut next: HashMap<MarkId, (i32, MarkPayload)> = HashMap::new();
        let mut order: Vec<MarkId> = Vec::new();
        for mark in marks {
            if next.insert(mark.id, (mark.z_index, mark.payload)).is_none() {
                order.push(mark.id);
            }
        }

        let mut exits: Vec<MarkDiff> = self
            .marks
            .iter()
            .filter(|(id, _)| !next.contains_key(*id))
            .map(|(id, (_, payload))| MarkDiff::Exit {
                id: *id,
                kind: payload.kind(),
                bounds: payload.bounds(),
            })
            .collect();
        exits.sort_by_key(MarkDiff::id);

        let mut out = exits;
        for id in order {
            let (z_index, payload) = &next[&id];
            match self.marks.get(&id) {
                None => out.push(MarkDiff::Enter {
                    id,
                    kind: payload.kind(),
                    z_index: *z_index,
                    bounds: payload.bounds(),
                    new: Box::new(payload.clone()),
                }),
                Some((old_z, old)) if old_z != z_index || old != payload => {
                    out.push(MarkDiff::Update {
                        id,
                        kind: payload.kind(),
                        old_z_index: *old_z,
                        new_z_index: *z_index,
                        old_bounds: old.bounds(),
                        new_bounds: payload.bounds(),
                        new: Box::new(payload.clone()),
                    });
                }
                Some(_) => {}
            }
        }

        self.marks = next;
        self.frame += 1;
        out
    }

    /// Removes every mark, returning the exits.
    pub fn clear(&mut self) -> Vec<MarkDiff> {
        self.tick(core::iter::empty())
    }

    /// Returns the number of ticks applied so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Returns the number of marks in the current frame.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if the current frame is empty.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Returns the payload of a mark in the current frame.
    pub fn get(&self, id: MarkId) -> Option<&MarkPayload> {
        self.marks.get(&id).map(|(_, payload)| payload)
    }

    /// Returns the current frame in paint order: `(z_index, id)` ascending.
    pub fn marks_sorted(&self) -> Vec<(MarkId, i32, &MarkPayload)> {
        let mut out: Vec<_> = self
            .marks
            .iter()
            .map(|(id, (z, payload))| (*id, *z, payload))
            .collect();
        out.sort_by_key(|(id, z, _)| (*z, *id));
        out
    }
}
