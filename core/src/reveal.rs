pub const REVEAL_CLASS: &str = "reveal";
pub const INVIEW_CLASS: &str = "inview";

/// One-way revealed flags for every registered element, indexed in
/// registration order.
#[derive(Clone, Debug, Default)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(count: usize) -> Self {
        Self {
            revealed: vec![false; count],
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Records an observer report. Returns true only on the transition to
    /// revealed; later reports, intersecting or not, never undo it.
    pub fn report(&mut self, index: usize, is_intersecting: bool) -> bool {
        let Some(flag) = self.revealed.get_mut(index) else {
            return false;
        };
        if *flag || !is_intersecting {
            return false;
        }
        *flag = true;
        true
    }

    pub fn all_revealed(&self) -> bool {
        self.revealed.iter().all(|flag| *flag)
    }
}
