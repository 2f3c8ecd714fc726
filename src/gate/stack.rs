use std::collections::BTreeMap;

use bevy::prelude::*;

/// Which gated mods are currently showing a notice, keyed by identity and
/// owning entity.
///
/// Each gate writes only its own entry. Ranks are derived from the sorted key
/// order so every reader agrees on the stacking; mods sharing a name fall back
/// to entity order instead of overwriting each other.
#[derive(Resource, Debug, Default, Clone)]
pub struct StackRegistry {
    presenting: BTreeMap<(String, Entity), bool>,
}

impl StackRegistry {
    pub fn set_presenting(&mut self, identity: &str, owner: Entity, presenting: bool) {
        self.presenting
            .insert((identity.to_string(), owner), presenting);
    }

    pub fn release(&mut self, identity: &str, owner: Entity) {
        self.presenting.remove(&(identity.to_string(), owner));
    }

    pub fn is_presenting(&self, identity: &str, owner: Entity) -> bool {
        self.presenting
            .get(&(identity.to_string(), owner))
            .copied()
            .unwrap_or(false)
    }

    /// Presenting entries in lexicographic order.
    pub fn presenting(&self) -> impl Iterator<Item = (&str, Entity)> {
        self.presenting
            .iter()
            .filter(|(_, presenting)| **presenting)
            .map(|((identity, owner), _)| (identity.as_str(), *owner))
    }

    /// 0-based stacking position, or `None` when the entry is not presenting.
    pub fn rank(&self, identity: &str, owner: Entity) -> Option<usize> {
        self.presenting()
            .position(|(it, entity)| it == identity && entity == owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owners<const N: usize>() -> [Entity; N] {
        let mut world = World::new();
        std::array::from_fn(|_| world.spawn_empty().id())
    }

    #[test]
    fn ranks_follow_lexicographic_order() {
        let [a, b] = owners();
        let mut registry = StackRegistry::default();
        registry.set_presenting("ModB", b, true);
        registry.set_presenting("ModA", a, true);

        assert_eq!(registry.rank("ModA", a), Some(0));
        assert_eq!(registry.rank("ModB", b), Some(1));
    }

    #[test]
    fn quiet_entries_do_not_take_a_slot() {
        let [a, b, c] = owners();
        let mut registry = StackRegistry::default();
        registry.set_presenting("ModA", a, false);
        registry.set_presenting("ModB", b, true);
        registry.set_presenting("ModC", c, true);

        assert_eq!(registry.rank("ModA", a), None);
        assert_eq!(registry.rank("ModC", c), Some(1));

        registry.release("ModB", b);
        assert_eq!(registry.rank("ModC", c), Some(0));
        assert_eq!(registry.presenting().collect::<Vec<_>>(), [("ModC", c)]);
    }

    #[test]
    fn shared_names_keep_separate_slots() {
        let [first, second] = owners();
        let mut registry = StackRegistry::default();
        registry.set_presenting("ModA", first, true);
        registry.set_presenting("ModA", second, false);

        assert_eq!(registry.rank("ModA", first), Some(0));
        assert!(!registry.is_presenting("ModA", second));

        registry.set_presenting("ModA", second, true);
        assert_eq!(registry.presenting().count(), 2);
        assert_ne!(
            registry.rank("ModA", first),
            registry.rank("ModA", second)
        );
    }
}
