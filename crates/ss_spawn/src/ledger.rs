/// Ordered record of the entities a spawner created and still considers
/// live.
///
/// Handles are observed, never owned. Liveness is re-queried on every
/// [`purge`](Self::purge); nothing is cached between passes.
#[derive(Debug, Clone)]
pub struct SpawnLedger<H> {
    tracked: Vec<H>,
}

impl<H> Default for SpawnLedger<H> {
    fn default() -> Self {
        Self {
            tracked: Vec::new(),
        }
    }
}

impl<H: PartialEq> SpawnLedger<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, handle: H) {
        self.tracked.push(handle);
    }

    /// Drop a handle. Returns whether it was tracked.
    pub fn forget(&mut self, handle: &H) -> bool {
        let before = self.tracked.len();
        self.tracked.retain(|tracked| tracked != handle);
        self.tracked.len() != before
    }

    /// Drop every handle `is_live` rejects. Returns how many were removed.
    pub fn purge(&mut self, mut is_live: impl FnMut(&H) -> bool) -> usize {
        let before = self.tracked.len();
        self.tracked.retain(|handle| is_live(handle));
        before - self.tracked.len()
    }

    pub fn contains(&self, handle: &H) -> bool {
        self.tracked.contains(handle)
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &H> {
        self.tracked.iter()
    }
}
