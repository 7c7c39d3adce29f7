use std::collections::HashSet;

pub(super) fn canonical_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Display label of a link. Not a key: ids containing `-` can produce the same label for
/// different pairs.
pub fn canonical_link_id(a: &str, b: &str) -> String {
    let (low, high) = canonical_pair(a, b);
    format!("{low}-{high}")
}

#[derive(Clone, Debug, Default)]
pub struct ConnectivityIndex {
    linked: HashSet<(usize, usize)>,
}

fn index_pair(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

impl ConnectivityIndex {
    pub(super) fn mark(&mut self, a: usize, b: usize) {
        if a != b {
            self.linked.insert(index_pair(a, b));
        }
    }

    pub fn is_connected(&self, a: usize, b: usize) -> bool {
        a == b || self.linked.contains(&index_pair(a, b))
    }

    pub fn len(&self) -> usize {
        self.linked.len()
    }
}
