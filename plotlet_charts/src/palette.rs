// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Categorical colour assignment.
//!
//! A [`CategoryPalette`] is an explicit, caller-owned mapping from category key to colour.
//! Keys get colours in first-seen order, cycling through the scheme when it runs out.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use peniko::Color;
use plotlet_core::TableData;

/// The ten-colour categorical scheme.
pub const CATEGORY10: [Color; 10] = [
    Color::from_rgb8(0x1f, 0x77, 0xb4),
    Color::from_rgb8(0xff, 0x7f, 0x0e),
    Color::from_rgb8(0x2c, 0xa0, 0x2c),
    Color::from_rgb8(0xd6, 0x27, 0x28),
    Color::from_rgb8(0x94, 0x67, 0xbd),
    Color::from_rgb8(0x8c, 0x56, 0x4b),
    Color::from_rgb8(0xe3, 0x77, 0xc2),
    Color::from_rgb8(0x7f, 0x7f, 0x7f),
    Color::from_rgb8(0xbc, 0xbd, 0x22),
    Color::from_rgb8(0x17, 0xbe, 0xcf),
];

/// A first-seen mapping from category key to colour.
#[derive(Clone, Debug, Default)]
pub struct CategoryPalette {
    assigned: HashMap<String, Color>,
    order: Vec<String>,
}

impl CategoryPalette {
    /// Creates an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a palette with colours pre-assigned to `categories` in order.
    pub fn from_categories<S: Into<String>>(categories: impl IntoIterator<Item = S>) -> Self {
        let mut palette = Self::new();
        for category in categories {
            let category = category.into();
            palette.color(&category);
        }
        palette
    }

    /// Creates a palette over the distinct values of a category field.
    pub fn from_data(data: &dyn TableData, field: &str) -> Self {
        Self::from_categories(plotlet_core::distinct_categories(data, field))
    }

    /// Returns the colour for `key`, assigning the next scheme colour on first sight.
    pub fn color(&mut self, key: &str) -> Color {
        if let Some(color) = self.assigned.get(key) {
            return *color;
        }
        let color = CATEGORY10[self.order.len() % CATEGORY10.len()];
        self.assigned.insert(String::from(key), color);
        self.order.push(String::from(key));
        color
    }

    /// Returns the colour already assigned to `key`.
    pub fn get(&self, key: &str) -> Option<Color> {
        self.assigned.get(key).copied()
    }

    /// Returns the assigned keys in first-seen order.
    pub fn categories(&self) -> &[String] {
        &self.order
    }

    /// Returns the number of assigned keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no key has been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use plotlet_core::{Record, RecordSet};

    use super::*;

    #[test]
    fn first_seen_order_drives_assignment() {
        let mut palette = CategoryPalette::new();
        assert_eq!(palette.color("setosa"), CATEGORY10[0]);
        assert_eq!(palette.color("versicolor"), CATEGORY10[1]);
        assert_eq!(palette.color("setosa"), CATEGORY10[0]);
        assert_eq!(palette.categories(), ["setosa", "versicolor"]);
    }

    #[test]
    fn assignment_wraps_after_ten_keys() {
        let palette = CategoryPalette::from_categories((0..11).map(|i| alloc::format!("k{i}")));
        assert_eq!(palette.get("k10"), Some(CATEGORY10[0]));
        assert_eq!(palette.len(), 11);
    }

    #[test]
    fn from_data_is_stable_across_passes() {
        let data = RecordSet::new(vec![
            Record::new().with("species", "b"),
            Record::new().with("species", "a"),
            Record::new().with("species", "b"),
        ]);
        let first = CategoryPalette::from_data(&data, "species");
        let second = CategoryPalette::from_data(&data, "species");
        assert_eq!(first.get("b"), Some(CATEGORY10[0]));
        assert_eq!(first.get("a"), second.get("a"));
        assert_eq!(first.get("missing"), None);
    }
}
