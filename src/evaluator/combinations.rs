/// Iterator over every 5-element index combination drawn from `n` elements
/// (n in 5..=7), in lexicographic order.
pub(crate) struct FiveOf {
    n: usize,
    indices: [usize; 5],
    done: bool,
}

impl FiveOf {
    pub(crate) fn new(n: usize) -> Self {
        Self { n, indices: [0, 1, 2, 3, 4], done: n < 5 }
    }
}

impl Iterator for FiveOf {
    type Item = [usize; 5];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.indices;

        // Advance the rightmost index that still has room, then reset the tail.
        let mut i = 4;
        loop {
            if self.indices[i] < self.n - (5 - i) {
                self.indices[i] += 1;
                for j in (i + 1)..5 {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn counts_match_binomials() {
        assert_eq!(FiveOf::new(5).count(), 1);
        assert_eq!(FiveOf::new(6).count(), 6);
        assert_eq!(FiveOf::new(7).count(), 21);
        assert_eq!(FiveOf::new(4).count(), 0);
    }

    #[test]
    fn combinations_are_distinct_and_sorted() {
        let combos: Vec<[usize; 5]> = FiveOf::new(7).collect();
        let unique: HashSet<[usize; 5]> = combos.iter().copied().collect();
        assert_eq!(unique.len(), combos.len());
        for c in &combos {
            assert!(c.windows(2).all(|w| w[0] < w[1]));
            assert!(c[4] < 7);
        }
        assert_eq!(combos[0], [0, 1, 2, 3, 4]);
        assert_eq!(combos[20], [2, 3, 4, 5, 6]);
    }
}
