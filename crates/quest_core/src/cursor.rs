/// Per-surface index into the shared word sequence.
///
/// Only ever moves forward; the position is the number of words already
/// consumed by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SearchCursor(usize);

impl SearchCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(position: usize) -> Self {
        Self(position)
    }

    pub fn position(self) -> usize {
        self.0
    }

    pub fn advance(&mut self) {
        self.0 += 1;
    }
}
