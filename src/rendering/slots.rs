// src/rendering/slots.rs

use crate::model::EnergyLevel;
use crate::rendering::scene::Tick;
use std::collections::HashMap;

/// Horizontal column for every distinct spin-parity label, numbered
/// 0..k-1 in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotMap {
    by_label: HashMap<String, usize>,
    labels: Vec<String>,
}

impl SlotMap {
    pub fn assign<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut map = SlotMap::default();
        for label in labels {
            if !map.by_label.contains_key(label) {
                map.by_label.insert(label.to_string(), map.labels.len());
                map.labels.push(label.to_string());
            }
        }
        map
    }

    pub fn from_levels<'a, I>(levels: I) -> Self
    where
        I: IntoIterator<Item = &'a EnergyLevel>,
    {
        Self::assign(levels.into_iter().map(|l| l.spin_parity.as_str()))
    }

    pub fn slot(&self, label: &str) -> Option<usize> {
        self.by_label.get(label).copied()
    }

    pub fn label(&self, slot: usize) -> Option<&str> {
        self.labels.get(slot).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Axis ticks showing the quantum-number labels instead of raw slots.
    pub fn ticks(&self) -> Vec<Tick> {
        self.labels
            .iter()
            .enumerate()
            .map(|(slot, label)| Tick {
                value: slot as f64,
                label: label.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_seen_order() {
        let slots = SlotMap::assign(["0+", "2+", "0+", "4+", "2+"]);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots.slot("0+"), Some(0));
        assert_eq!(slots.slot("2+"), Some(1));
        assert_eq!(slots.slot("4+"), Some(2));
        assert_eq!(slots.label(2), Some("4+"));
        assert_eq!(slots.slot("6+"), None);
    }

    #[test]
    fn test_empty_input() {
        let slots = SlotMap::assign(std::iter::empty());
        assert!(slots.is_empty());
        assert!(slots.ticks().is_empty());
    }

    proptest! {
        #[test]
        fn prop_slots_are_a_bijection(labels in prop::collection::vec("[0-9]/?2?[+-]", 0..40)) {
            let slots = SlotMap::assign(labels.iter().map(String::as_str));

            let mut distinct = labels.clone();
            distinct.sort();
            distinct.dedup();
            prop_assert_eq!(slots.len(), distinct.len());

            let mut seen: Vec<usize> = labels.iter().map(|l| slots.slot(l).unwrap()).collect();
            seen.sort_unstable();
            seen.dedup();
            prop_assert_eq!(seen, (0..distinct.len()).collect::<Vec<_>>());

            for (slot, tick) in slots.ticks().iter().enumerate() {
                prop_assert_eq!(slots.slot(&tick.label), Some(slot));
            }
        }
    }
}
