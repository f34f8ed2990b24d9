/// Synthetic per-layer names for an ancestry.
///
/// The datastore has no notion of an ancestry yet, so every layer of an
/// ancestry `A` with `n` layers is persisted as `A-{i}`, except the last
/// one which takes the ancestry name itself. Looking up `A` therefore
/// lands on the terminal layer, whose parent chain is the ancestry.
#[derive(Debug, Clone, Copy)]
pub struct AncestryLayerNaming<'a> {
    ancestry_name: &'a str,
    layer_count: usize,
}

impl<'a> AncestryLayerNaming<'a> {
    pub fn new(ancestry_name: &'a str, layer_count: usize) -> Self {
        Self {
            ancestry_name,
            layer_count,
        }
    }

    /// Persisted name of the layer at `index`.
    pub fn layer_name(&self, index: usize) -> String {
        if index + 1 == self.layer_count {
            self.ancestry_name.to_string()
        } else {
            format!("{}-{}", self.ancestry_name, index)
        }
    }
}
