use super::{Answer, Category};

/// Per-category answer counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    counts: [u32; Category::ALL.len()],
}

impl Tally {
    pub fn from_answers<'a>(answers: impl IntoIterator<Item = &'a Answer>) -> Self {
        let mut tally = Tally::default();
        for a in answers {
            tally.add(a.category());
        }
        tally
    }

    pub fn add(&mut self, category: Category) {
        self.counts[category.index()] += 1;
    }

    pub fn count(&self, category: Category) -> u32 {
        self.counts[category.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Highest count wins. Ties go to the category declared first
    /// (strict `>` while scanning in declaration order). Empty tally -> default.
    pub fn winner(&self) -> Category {
        let mut best: Option<(Category, u32)> = None;
        for c in Category::ALL {
            let n = self.count(c);
            if n == 0 {
                continue;
            }
            match best {
                Some((_, top)) if n <= top => {}
                _ => best = Some((c, n)),
            }
        }
        best.map(|(c, _)| c).unwrap_or(Category::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally_of(cats: &[Category]) -> Tally {
        let mut t = Tally::default();
        for &c in cats {
            t.add(c);
        }
        t
    }

    #[test]
    fn empty_tally_falls_back_to_default() {
        assert_eq!(Tally::default().winner(), Category::DEFAULT);
    }

    #[test]
    fn clear_majority_wins() {
        use Category::*;
        let t = tally_of(&[Iot, Sec, Iot, Team, Iot]);
        assert_eq!(t.winner(), Iot);
        assert_eq!(t.total(), 5);
    }

    #[test]
    fn tie_goes_to_earlier_declared_category() {
        use Category::*;
        // Insertion order must not matter, only declaration order.
        assert_eq!(tally_of(&[Sec, Sec, Web, Web]).winner(), Web);
        assert_eq!(tally_of(&[Web, Sec, Web, Sec]).winner(), Web);
        assert_eq!(tally_of(&[Iot, DevOps]).winner(), DevOps);
    }
}
