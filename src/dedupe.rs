use crate::compare::{self, Comparison};
use crate::scan::ImageRecord;
use std::path::{Path, PathBuf};

/// Enumerate all unique unordered pairs in combinations order:
/// `[a,b,c,d]` yields `(a,b), (a,c), (a,d), (b,c), (b,d), (c,d)`.
///
/// `DuplicateSets::record` relies on exactly this order, so the enumeration
/// lives here as a named, tested routine rather than inline loops.
pub fn pairs<T>(items: &[T]) -> impl Iterator<Item = (&T, &T)> {
    items
        .iter()
        .enumerate()
        .flat_map(move |(i, a)| items[i + 1..].iter().map(move |b| (a, b)))
}

/// Equivalence classes of duplicate files, keyed by a representative path.
///
/// Representatives keep insertion order so listings and review prompts are
/// stable across runs; members are unique within a set.
#[derive(Debug, Default)]
pub struct DuplicateSets {
    sets: Vec<(PathBuf, Vec<PathBuf>)>,
}

impl DuplicateSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one duplicate pair into the collection.
    ///
    /// Precondition: pairs arrive in the order produced by [`pairs`]. That
    /// order guarantees that whenever `p1` has shown up in an earlier
    /// duplicate pair, it is already stored here, so a single linear scan is
    /// enough:
    ///   - `p1` is a representative        -> add `p2` to its set
    ///   - `p1` is a member of some set    -> add `p2` to that set
    ///   - `p1` is unknown                 -> new set `p1: {p2}`
    ///
    /// No union-find: two sets that later turn out to be transitively equal
    /// through a cross pair are NOT merged.
    pub fn record(&mut self, p1: &Path, p2: &Path) {
        for (rep, members) in &mut self.sets {
            if rep == p1 || members.iter().any(|m| m == p1) {
                if !members.iter().any(|m| m == p2) {
                    members.push(p2.to_path_buf());
                }
                return;
            }
        }
        self.sets.push((p1.to_path_buf(), vec![p2.to_path_buf()]));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[PathBuf])> {
        self.sets
            .iter()
            .map(|(rep, members)| (rep.as_path(), members.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Number of member files across all sets, excluding representatives.
    pub fn duplicate_count(&self) -> usize {
        self.sets.iter().map(|(_, members)| members.len()).sum()
    }
}

/// Run the full O(n²) comparison pass over the scanned images, printing one
/// verdict line per pair, and collect exact duplicates into sets.
pub fn find_duplicate_sets(images: &[ImageRecord]) -> DuplicateSets {
    let mut sets = DuplicateSets::new();
    for (a, b) in pairs(images) {
        print!("Comparing {} and {} - ", a.path.display(), b.path.display());
        match compare::compare(&a.pixels, &b.pixels) {
            Comparison {
                is_duplicate: true, ..
            } => {
                println!("Images are the same.");
                sets.record(&a.path, &b.path);
            }
            Comparison {
                score: Some(score), ..
            } => println!("Images have a delta E of {score:.4}."),
            Comparison { score: None, .. } => println!("Images are different."),
        }
    }
    sets
}
