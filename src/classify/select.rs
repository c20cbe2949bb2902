use crate::segments::LineSegment;

/// Longest segment of a group, length standing in for confidence.
///
/// Ties keep the first segment encountered, so the choice only depends on the
/// input order. `None` for an empty group.
pub fn select_longest(group: &[LineSegment]) -> Option<&LineSegment> {
    group
        .iter()
        .reduce(|best, seg| if seg.length() > best.length() { seg } else { best })
}
