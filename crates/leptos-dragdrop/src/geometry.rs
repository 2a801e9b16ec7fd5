//! Insertion-point geometry
//!
//! Pure midpoint arithmetic used while an element is dragged over a list.
//! Nothing here touches the DOM, so the rules can be tested natively.

/// What a measured element stands for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot<I, C = ()> {
    /// A sortable sibling (card, column, ...)
    Item(I),
    /// A container header; only accepts drops while the container is empty
    Header { container: C, is_empty: bool },
}

/// A measured drop candidate (viewport coordinates)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate<I, C = ()> {
    pub slot: Slot<I, C>,
    pub top: f64,
    pub height: f64,
}

impl<I, C> Candidate<I, C> {
    pub fn new(slot: Slot<I, C>, top: f64, height: f64) -> Self {
        Self { slot, top, height }
    }

    pub fn item(id: I, top: f64, height: f64) -> Self {
        Self::new(Slot::Item(id), top, height)
    }

    pub fn header(container: C, is_empty: bool, top: f64, height: f64) -> Self {
        Self::new(Slot::Header { container, is_empty }, top, height)
    }

    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Positive when the pointer is below this candidate's midpoint
    pub fn offset(&self, y: f64) -> f64 {
        y - self.midpoint()
    }
}

/// Where the dragged element should go
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement<I, C = ()> {
    Before(I),
    After(I),
    /// Into an empty container as its only child
    AppendTo(C),
}

/// Candidate whose midpoint sits just above the pointer, with its offset (> 0)
pub fn closest_above<I, C>(y: f64, candidates: &[Candidate<I, C>]) -> Option<(&Candidate<I, C>, f64)> {
    candidates
        .iter()
        .map(|c| (c, c.offset(y)))
        .filter(|(_, offset)| *offset > 0.0)
        .fold(None, |best: Option<(&Candidate<I, C>, f64)>, (c, offset)| match best {
            Some((_, best_offset)) if best_offset <= offset => best,
            _ => Some((c, offset)),
        })
}

/// Candidate whose midpoint sits just below the pointer, with its offset (< 0)
pub fn closest_below<I, C>(y: f64, candidates: &[Candidate<I, C>]) -> Option<(&Candidate<I, C>, f64)> {
    candidates
        .iter()
        .map(|c| (c, c.offset(y)))
        .filter(|(_, offset)| *offset < 0.0)
        .fold(None, |best: Option<(&Candidate<I, C>, f64)>, (c, offset)| match best {
            Some((_, best_offset)) if best_offset >= offset => best,
            _ => Some((c, offset)),
        })
}

/// Resolve the placement for pointer height `y`.
///
/// When the pointer sits between two candidates the one with the closer
/// midpoint wins (ties go to the one below), and it only counts if it is
/// within `threshold` pixels. A lone neighbour is used unconditionally.
/// Returns `None` when nothing should move.
pub fn resolve_placement<I: Clone, C: Clone>(
    y: f64,
    candidates: &[Candidate<I, C>],
    threshold: f64,
) -> Option<Placement<I, C>> {
    match (closest_above(y, candidates), closest_below(y, candidates)) {
        (Some((above, above_offset)), Some((below, below_offset))) => {
            let below_distance = below_offset.abs();
            if below_distance > above_offset {
                if above_offset < threshold { after(above) } else { None }
            } else if below_distance < threshold {
                before(below)
            } else {
                None
            }
        }
        (Some((above, _)), None) => after(above),
        (None, Some((below, _))) => before(below),
        (None, None) => None,
    }
}

fn after<I: Clone, C: Clone>(candidate: &Candidate<I, C>) -> Option<Placement<I, C>> {
    match &candidate.slot {
        Slot::Item(id) => Some(Placement::After(id.clone())),
        Slot::Header { container, is_empty: true } => Some(Placement::AppendTo(container.clone())),
        Slot::Header { .. } => None,
    }
}

fn before<I: Clone, C: Clone>(candidate: &Candidate<I, C>) -> Option<Placement<I, C>> {
    match &candidate.slot {
        Slot::Item(id) => Some(Placement::Before(id.clone())),
        Slot::Header { container, is_empty: true } => Some(Placement::AppendTo(container.clone())),
        Slot::Header { .. } => None,
    }
}
