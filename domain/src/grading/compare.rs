//! Ground-truth comparison

/// Whether an extracted answer equals the ground truth
///
/// Order-insensitive and length-sensitive: both sides must have the same
/// size and be element-wise equal once sorted. There is no partial credit.
/// Both sides are assumed free of duplicates.
pub fn answers_match(ground_truth: &[char], extracted: &[char]) -> bool {
    if ground_truth.len() != extracted.len() {
        return false;
    }
    let mut expected = ground_truth.to_vec();
    let mut actual = extracted.to_vec();
    expected.sort_unstable();
    actual.sort_unstable();
    expected == actual
}
