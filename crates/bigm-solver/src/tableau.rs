use std::ops::{Index, IndexMut};

/// Dense row-major tableau. The last row is the objective row and the last
/// column is the right-hand side.
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Tableau {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Index of the objective row.
    pub fn objective_row(&self) -> usize {
        self.rows - 1
    }

    /// Index of the right-hand side column.
    pub fn rhs_col(&self) -> usize {
        self.cols - 1
    }

    /// Subtracts `factor * source` from row `i`.
    pub fn sub_scaled(&mut self, i: usize, source: &[f64], factor: f64) {
        for (x, s) in self.row_mut(i).iter_mut().zip(source) {
            *x -= factor * s;
        }
    }

    /// Gauss-Jordan pivot on `(row, col)`: scales the pivot row to make the
    /// pivot 1 and clears `col` from every other row.
    pub fn pivot(&mut self, row: usize, col: usize) {
        let pivot_val = self[(row, col)];
        let pivot_row: Vec<f64> = self.row(row).iter().map(|v| v / pivot_val).collect();

        for i in 0..self.rows {
            if i != row {
                let factor = self[(i, col)];
                if factor != 0.0 {
                    self.sub_scaled(i, &pivot_row, factor);
                }
            }
        }
        self.row_mut(row).copy_from_slice(&pivot_row);
    }
}

impl Index<(usize, usize)> for Tableau {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Tableau {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[i * self.cols + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pivot_makes_unit_column() {
        let mut t = Tableau::zeros(3, 3);
        t.row_mut(0).copy_from_slice(&[2.0, 1.0, 4.0]);
        t.row_mut(1).copy_from_slice(&[1.0, 3.0, 5.0]);
        t.row_mut(2).copy_from_slice(&[-3.0, -2.0, 0.0]);

        t.pivot(0, 0);

        assert_eq!(t.row(0), &[1.0, 0.5, 2.0]);
        assert_eq!(t.row(1), &[0.0, 2.5, 3.0]);
        assert_eq!(t.row(2), &[0.0, -0.5, 6.0]);
    }

    #[test]
    fn test_indexing() {
        let mut t = Tableau::zeros(2, 4);
        t[(1, 3)] = 7.0;

        assert_eq!(t.objective_row(), 1);
        assert_eq!(t.rhs_col(), 3);
        assert_eq!(t.row(1), &[0.0, 0.0, 0.0, 7.0]);
    }
}
