use super::AvailabilityProbe;

/// Outstanding dependencies of one gated mod, kept in declared order.
///
/// Only ever shrinks: once an id is removed it is never checked again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    outstanding: Vec<String>,
}

impl DependencySet {
    pub fn from_declared<I, S>(declared: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut outstanding: Vec<String> = Vec::new();
        for id in declared {
            let id = id.into();
            if !outstanding.contains(&id) {
                outstanding.push(id);
            }
        }
        Self { outstanding }
    }

    pub fn is_empty(&self) -> bool {
        self.outstanding.is_empty()
    }

    pub fn len(&self) -> usize {
        self.outstanding.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.outstanding.iter().any(|it| it == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.outstanding.iter().map(String::as_str)
    }

    /// Removes `id` if still outstanding. Removing twice is a no-op.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.outstanding.len();
        self.outstanding.retain(|it| it != id);
        self.outstanding.len() != before
    }

    /// Drops every id the probe reports as loaded, returning what was removed.
    pub fn remove_if_available(&mut self, probe: &dyn AvailabilityProbe) -> Vec<String> {
        let (loaded, pending): (Vec<String>, Vec<String>) = std::mem::take(&mut self.outstanding)
            .into_iter()
            .partition(|id| probe.is_loaded(id));
        self.outstanding = pending;
        loaded
    }

    pub fn joined(&self) -> String {
        self.outstanding.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::probe::tests::FakeProbe;

    #[test]
    fn duplicates_collapse_keeping_declared_order() {
        let set = DependencySet::from_declared(["B", "A", "B"]);
        assert_eq!(set.iter().collect::<Vec<_>>(), ["B", "A"]);
        assert_eq!(set.joined(), "B, A");
    }

    #[test]
    fn remove_is_idempotent() {
        let mut set = DependencySet::from_declared(["Lib1"]);
        assert!(set.remove("Lib1"));
        assert!(!set.remove("Lib1"));
        assert!(set.is_empty());
    }

    #[test]
    fn batch_removal_takes_every_loaded_id() {
        let probe = FakeProbe::default().installed("A").loaded("A").loaded("C");
        let mut set = DependencySet::from_declared(["A", "B", "C"]);

        let removed = set.remove_if_available(&probe);

        assert_eq!(removed, ["A", "C"]);
        assert_eq!(set.iter().collect::<Vec<_>>(), ["B"]);
    }
}
