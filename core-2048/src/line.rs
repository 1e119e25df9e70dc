/// Result of sliding one line towards its start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergedLine {
    /// New cell values, compacted towards index 0 and zero padded.
    pub values: Vec<u32>,
    /// For each pre-move position, how far its tile travelled.
    pub shifts: Vec<usize>,
    /// Sum of the tiles produced by merges.
    pub score: u64,
}

/// Slides and merges `line` towards index 0.
///
/// Equal tiles merge even when separated by empty cells, and a tile produced
/// by a merge does not merge again within the same call.
pub fn merge_line(line: &[u32]) -> MergedLine {
    let mut values: Vec<u32> = Vec::with_capacity(line.len());
    let mut shifts = vec![0; line.len()];
    let mut score = 0u64;
    let mut mergeable = None;

    for (i, &cell) in line.iter().enumerate() {
        if cell == 0 {
            continue;
        }

        match values.last_mut() {
            Some(last) if mergeable == Some(cell) => {
                *last = cell.saturating_mul(2);
                score += u64::from(*last);
                mergeable = None;
            }
            _ => {
                values.push(cell);
                mergeable = Some(cell);
            }
        }

        shifts[i] = i + 1 - values.len();
    }

    values.resize(line.len(), 0);

    MergedLine {
        values,
        shifts,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triple_merges_first_pair_only() {
        let merged = merge_line(&[2, 2, 2]);

        assert_eq!(merged.values, [4, 2, 0]);
        assert_eq!(merged.shifts, [0, 1, 1]);
        assert_eq!(merged.score, 4);
    }

    #[test]
    fn merged_tile_does_not_chain() {
        let merged = merge_line(&[2, 2, 4]);

        assert_eq!(merged.values, [4, 4, 0]);
        assert_eq!(merged.score, 4);
    }

    #[test]
    fn two_pairs_merge_independently() {
        let merged = merge_line(&[4, 4, 4, 4]);

        assert_eq!(merged.values, [8, 8, 0, 0]);
        assert_eq!(merged.shifts, [0, 1, 1, 2]);
        assert_eq!(merged.score, 16);
    }

    #[test]
    fn gaps_collapse_before_merging() {
        let merged = merge_line(&[0, 2, 0, 2]);

        assert_eq!(merged.values, [4, 0, 0, 0]);
        assert_eq!(merged.shifts, [0, 1, 0, 3]);
        assert_eq!(merged.score, 4);
    }

    #[test]
    fn packed_line_is_unchanged() {
        let merged = merge_line(&[2, 4, 8, 0]);

        assert_eq!(merged.values, [2, 4, 8, 0]);
        assert_eq!(merged.shifts, [0; 4]);
        assert_eq!(merged.score, 0);
    }

    #[test]
    fn different_values_slide_without_merging() {
        let merged = merge_line(&[0, 0, 2, 4]);

        assert_eq!(merged.values, [2, 4, 0, 0]);
        assert_eq!(merged.shifts, [0, 0, 2, 2]);
    }

    #[test]
    fn empty_line() {
        let merged = merge_line(&[0, 0, 0]);

        assert_eq!(merged.values, [0, 0, 0]);
        assert_eq!(merged.shifts, [0, 0, 0]);
        assert_eq!(merged.score, 0);
    }
}
