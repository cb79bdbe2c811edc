//! Tolerance-based stitching of line fragments into continuous polylines.

use geo::{Coord, EuclideanDistance, LineString, MultiLineString, Point};

/// Default stitch tolerance, in the units of the input coordinate system
/// (degrees for EPSG:4326 data).
pub const DEFAULT_TOLERANCE: f64 = 0.0075;

/// Stitch the fragments of a [MultiLineString] into the minimal set of
/// continuous lines.
///
/// Fragments sharing an exact endpoint are consolidated first. The remaining
/// fragments are then walked in their given order: a fragment is appended to
/// the line under construction when the Euclidean distance from the last
/// point of that line to the fragment's first point is strictly less than
/// `tolerance`; otherwise the line is closed out and the fragment starts a
/// new one. Join points are kept from both sides, not deduplicated.
///
/// Fragments are never reordered or reversed during the tolerance pass: a
/// fragment spatially close to an earlier-but-not-adjacent fragment will not
/// be merged with it, and a fragment whose far endpoint is the close one will
/// not be flipped. Both are intentional limitations.
///
/// An empty input yields an empty [MultiLineString]; a single-fragment input
/// yields one line.
///
/// ```
/// use geo::line_string;
/// use geogml::merge::{merge_lines, DEFAULT_TOLERANCE};
///
/// let fragments = geo::MultiLineString::new(vec![
///     line_string![(x: -80.0, y: 25.0), (x: -79.5, y: 25.2)],
///     line_string![(x: -79.499, y: 25.2), (x: -79.0, y: 25.4)],
/// ]);
/// let merged = merge_lines(&fragments, DEFAULT_TOLERANCE);
/// assert_eq!(merged.0.len(), 1);
/// ```
pub fn merge_lines(multi_line: &MultiLineString<f64>, tolerance: f64) -> MultiLineString<f64> {
    let fragments = merge_contiguous(multi_line);

    let mut finished: Vec<LineString<f64>> = Vec::new();
    let mut working: Vec<Coord<f64>> = Vec::new();
    for fragment in fragments {
        match working.last().copied() {
            None => working.extend_from_slice(&fragment),
            Some(tail) => {
                let head = fragment[0];
                if Point::from(tail).euclidean_distance(&Point::from(head)) < tolerance {
                    working.extend_from_slice(&fragment);
                } else {
                    finished.push(LineString::new(std::mem::replace(&mut working, fragment)));
                }
            }
        }
    }
    if !working.is_empty() {
        finished.push(LineString::new(working));
    }

    MultiLineString::new(finished)
}

/// Consolidate fragments that share an exact endpoint into single fragments.
///
/// Candidates may be reversed to line up with the fragment under
/// construction, and the shared vertex is kept once. Output order follows the
/// input order of the seed fragments. Empty fragments are dropped.
fn merge_contiguous(multi_line: &MultiLineString<f64>) -> Vec<Vec<Coord<f64>>> {
    let mut pending: Vec<Vec<Coord<f64>>> = multi_line
        .0
        .iter()
        .filter(|line| !line.0.is_empty())
        .map(|line| line.0.clone())
        .collect();

    let mut merged = Vec::with_capacity(pending.len());
    while !pending.is_empty() {
        let mut current = pending.remove(0);
        // keep sweeping until no remaining fragment touches either end
        loop {
            let mut joined = false;
            let mut index = 0;
            while index < pending.len() {
                if join_fragments(&mut current, &pending[index]) {
                    pending.remove(index);
                    joined = true;
                } else {
                    index += 1;
                }
            }
            if !joined {
                break;
            }
        }
        merged.push(current);
    }
    merged
}

fn join_fragments(current: &mut Vec<Coord<f64>>, candidate: &[Coord<f64>]) -> bool {
    let head = current[0];
    let tail = current[current.len() - 1];
    let candidate_head = candidate[0];
    let candidate_tail = candidate[candidate.len() - 1];

    if tail == candidate_head {
        current.extend_from_slice(&candidate[1..]);
    } else if tail == candidate_tail {
        current.extend(candidate[..candidate.len() - 1].iter().rev().copied());
    } else if head == candidate_tail {
        let mut joined = candidate.to_vec();
        joined.extend_from_slice(&current[1..]);
        *current = joined;
    } else if head == candidate_head {
        let mut joined: Vec<Coord<f64>> = candidate.iter().rev().copied().collect();
        joined.extend_from_slice(&current[1..]);
        *current = joined;
    } else {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::line_string;

    fn fragments() -> MultiLineString<f64> {
        MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)],
            line_string![(x: 1.001, y: 1.001), (x: 2.0, y: 2.0)],
        ])
    }

    #[test]
    fn stitches_adjacent_fragments_within_tolerance() {
        let merged = merge_lines(&fragments(), 0.01);
        assert_eq!(merged.0.len(), 1);

        let expected = [(0.0, 0.0), (1.0, 1.0), (1.001, 1.001), (2.0, 2.0)];
        let coords = &merged.0[0].0;
        assert_eq!(coords.len(), expected.len());
        for (coord, (x, y)) in coords.iter().zip(expected) {
            assert_relative_eq!(coord.x, x);
            assert_relative_eq!(coord.y, y);
        }
    }

    #[test]
    fn keeps_fragments_apart_beyond_tolerance() {
        let merged = merge_lines(&fragments(), 0.0001);
        assert_eq!(merged.0.len(), 2);
        // input order preserved
        assert_eq!(merged.0[0].0[0], Coord { x: 0.0, y: 0.0 });
        assert_eq!(merged.0[1].0[0], Coord { x: 1.001, y: 1.001 });
    }

    #[test]
    fn conserves_coordinate_count() {
        let input = MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)],
            line_string![(x: 1.002, y: 1.0), (x: 2.0, y: 2.0), (x: 3.0, y: 3.0)],
            line_string![(x: 9.0, y: 9.0), (x: 10.0, y: 9.0)],
        ]);
        let input_count: usize = input.0.iter().map(|line| line.0.len()).sum();

        let merged = merge_lines(&input, 0.01);
        let merged_count: usize = merged.0.iter().map(|line| line.0.len()).sum();
        assert_eq!(merged_count, input_count);
        assert_eq!(merged.0.len(), 2);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let merged = merge_lines(&MultiLineString::new(vec![]), DEFAULT_TOLERANCE);
        assert!(merged.0.is_empty());
    }

    #[test]
    fn single_fragment_passes_through() {
        let input = MultiLineString::new(vec![line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]]);
        let merged = merge_lines(&input, DEFAULT_TOLERANCE);
        assert_eq!(merged.0.len(), 1);
        assert_eq!(merged.0[0].0.len(), 2);
    }

    #[test]
    fn contiguous_pass_joins_exact_endpoints() {
        // second fragment is reversed; shared vertex (1, 1) kept once
        let input = MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)],
            line_string![(x: 2.0, y: 2.0), (x: 1.0, y: 1.0)],
        ]);
        let merged = merge_lines(&input, 0.0);
        assert_eq!(merged.0.len(), 1);
        assert_eq!(
            merged.0[0].0,
            vec![
                Coord { x: 0.0, y: 0.0 },
                Coord { x: 1.0, y: 1.0 },
                Coord { x: 2.0, y: 2.0 },
            ]
        );
    }

    #[test]
    fn never_merges_non_adjacent_fragments() {
        // first and third are within tolerance of each other, but a far-away
        // second fragment sits between them in the sequence
        let input = MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)],
            line_string![(x: 50.0, y: 50.0), (x: 51.0, y: 51.0)],
            line_string![(x: 1.001, y: 1.0), (x: 2.0, y: 2.0)],
        ]);
        let merged = merge_lines(&input, 0.01);
        assert_eq!(merged.0.len(), 3);
    }
}
