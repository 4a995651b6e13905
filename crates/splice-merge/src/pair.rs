/// A patch declaration bound to the entity it produced.
///
/// The patch is borrowed from the caller's patch sequence for the duration
/// of one merge; the patched entity is owned and ends up in the output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchedPair<'p, T> {
    pub patch: &'p T,
    pub patched: T,
}

impl<'p, T> PatchedPair<'p, T> {
    pub fn new(patch: &'p T, patched: T) -> Self {
        Self { patch, patched }
    }
}
