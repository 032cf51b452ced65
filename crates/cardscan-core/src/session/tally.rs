/// Per-window vote counts, kept in first-vote order so ties resolve to the
/// label that was voted for first.
#[derive(Debug, Clone, Default)]
pub struct VoteTally {
    counts: Vec<(String, u32)>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cast(&mut self, label: &str) {
        match self.counts.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((label.to_string(), 1)),
        }
    }

    /// Label with the most votes; earliest-voted label wins a tie.
    pub fn winner(&self) -> Option<(&str, u32)> {
        let mut best: Option<(&str, u32)> = None;
        for (label, count) in &self.counts {
            if best.is_none_or(|(_, c)| *count > c) {
                best = Some((label.as_str(), *count));
            }
        }
        best
    }

    pub fn total_votes(&self) -> u32 {
        self.counts.iter().map(|(_, c)| c).sum()
    }

}
