use super::types::{CostPolicy, EditKind, Token};

/// Preference among equal-cost candidates when a cell's keys differ.
///
/// Substitution wins over insertion, which wins over deletion. The choice is
/// stored at fill time, so it decides which words land in which error
/// category whenever several optimal paths exist.
pub const TIE_BREAK_ORDER: [EditKind; 3] =
    [EditKind::Substitute, EditKind::Insert, EditKind::Delete];

/// Edit-distance cost matrix with the operation chosen for every cell.
///
/// Rows index the reference (`0..=m`), columns the hypothesis (`0..=n`).
/// Both grids live in one flat row-major allocation owned by the matrix and
/// released with it.
#[derive(Debug, Clone)]
pub struct AlignmentMatrix {
    rows: usize,
    cols: usize,
    costs: Vec<usize>,
    ops: Vec<EditKind>,
    policy: CostPolicy,
}

impl AlignmentMatrix {
    pub fn build(reference: &[Token], hypothesis: &[Token], policy: CostPolicy) -> Self {
        let rows = reference.len() + 1;
        let cols = hypothesis.len() + 1;
        let mut matrix = Self {
            rows,
            cols,
            costs: vec![0; rows * cols],
            ops: vec![EditKind::Equal; rows * cols],
            policy,
        };

        let insertion = policy.insertion_cost();
        for i in 1..rows {
            let at = matrix.index(i, 0);
            matrix.costs[at] = i;
            matrix.ops[at] = EditKind::Delete;
        }
        for j in 1..cols {
            let at = matrix.index(0, j);
            matrix.costs[at] = j * insertion;
            matrix.ops[at] = EditKind::Insert;
        }

        for i in 1..rows {
            for j in 1..cols {
                let at = matrix.index(i, j);
                let (cost, op) = if reference[i - 1].key == hypothesis[j - 1].key {
                    (matrix.cost(i - 1, j - 1), EditKind::Equal)
                } else {
                    matrix.cheapest_edit(i, j)
                };
                matrix.costs[at] = cost;
                matrix.ops[at] = op;
            }
        }
        matrix
    }

    /// Lowest-cost non-matching step into `(i, j)`; ties resolve by
    /// [`TIE_BREAK_ORDER`].
    fn cheapest_edit(&self, i: usize, j: usize) -> (usize, EditKind) {
        let mut best = (usize::MAX, EditKind::Substitute);
        for kind in TIE_BREAK_ORDER {
            let cost = self.step_cost(kind, i, j);
            // Strict comparison keeps the earlier kind on ties.
            if cost < best.0 {
                best = (cost, kind);
            }
        }
        best
    }

    fn step_cost(&self, kind: EditKind, i: usize, j: usize) -> usize {
        match kind {
            EditKind::Equal => self.cost(i - 1, j - 1),
            EditKind::Substitute => self.cost(i - 1, j - 1) + 1,
            EditKind::Insert => self.cost(i, j - 1) + self.policy.insertion_cost(),
            EditKind::Delete => self.cost(i - 1, j) + 1,
        }
    }

    fn index(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    /// Number of reference tokens (`m`).
    pub fn reference_len(&self) -> usize {
        self.rows - 1
    }

    /// Number of hypothesis tokens (`n`).
    pub fn hypothesis_len(&self) -> usize {
        self.cols - 1
    }

    pub fn policy(&self) -> CostPolicy {
        self.policy
    }

    pub fn cost(&self, i: usize, j: usize) -> usize {
        self.costs[self.index(i, j)]
    }

    pub fn op(&self, i: usize, j: usize) -> EditKind {
        self.ops[self.index(i, j)]
    }

    /// Minimum alignment cost, `D[m][n]`.
    pub fn total_cost(&self) -> usize {
        self.cost(self.rows - 1, self.cols - 1)
    }
}
