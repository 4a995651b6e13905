//! Message prefixes identifying the item under work.

/// A `"component: component: "` prefix prepended to every message.
///
/// The base part is fixed for the lifetime of an engine and names the
/// enclosing item when engines are nested (members within a class). The
/// current part is rebuilt for every item and may be extended to point at
/// a sub-part.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogPrefix {
    base: String,
    current: String,
}

impl LogPrefix {
    /// Create a prefix rooted at `base`, which is either empty or already
    /// ends with the `": "` separator.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            current: base.clone(),
            base,
        }
    }

    /// Point the prefix at a new item.
    pub fn set(&mut self, component: &str) {
        self.current.clear();
        self.current.push_str(&self.base);
        self.push(component);
    }

    /// Narrow the prefix to a sub-part of the current item.
    pub fn extend(&mut self, component: &str) {
        self.push(component);
    }

    /// Drop everything but the base.
    pub fn reset(&mut self) {
        self.current.clone_from(&self.base);
    }

    /// The base this prefix was created with.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The full current prefix.
    pub fn as_str(&self) -> &str {
        &self.current
    }

    /// `message` with the current prefix in front.
    pub fn qualify(&self, message: &str) -> String {
        let mut out = String::with_capacity(self.current.len() + message.len());
        out.push_str(&self.current);
        out.push_str(message);
        out
    }

    fn push(&mut self, component: &str) {
        self.current.push_str(component);
        self.current.push_str(": ");
    }
}
