use std::collections::HashSet;

/// Read-only view of the keyboard for one tick.
///
/// Hosts decide which codes to report. A browser host typically reports
/// the physical code, the key value, and its lowercase form, so rules can
/// use `ArrowRight`, `Space`, or `x` interchangeably.
pub trait InputSource {
    /// Whether the key code is currently held.
    fn is_key_held(&self, code: &str) -> bool;
}

impl InputSource for HashSet<String> {
    fn is_key_held(&self, code: &str) -> bool {
        self.contains(code)
    }
}

/// No keys held. Useful for unattended runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn is_key_held(&self, _code: &str) -> bool {
        false
    }
}

/// A set of held key codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    keys: HashSet<String>,
}

impl HeldKeys {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key as held.
    pub fn press(&mut self, code: impl Into<String>) {
        self.keys.insert(code.into());
    }

    /// Mark a key as released.
    pub fn release(&mut self, code: &str) {
        self.keys.remove(code);
    }

    /// Release every key.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Held codes, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Whether no key is held.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl InputSource for HeldKeys {
    fn is_key_held(&self, code: &str) -> bool {
        self.keys.contains(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_press_and_release() {
        let mut keys = HeldKeys::new();
        keys.press("Space");
        assert!(keys.is_key_held("Space"));
        assert!(!keys.is_key_held("space"));
        keys.release("Space");
        assert!(keys.is_empty());
    }

    #[test]
    fn collect_from_codes() {
        let keys: HeldKeys = ["a", "ArrowUp"].into_iter().collect();
        assert!(keys.is_key_held("ArrowUp"));
        assert!(!NoInput.is_key_held("ArrowUp"));
    }

    #[test]
    fn hash_set_is_an_input_source() {
        let set: HashSet<String> = HashSet::from(["x".to_string()]);
        assert!(set.is_key_held("x"));
    }
}
