//! Renderer: the deterministic rasterizer.
//!
//! Takes the `DrawOp`s of one frame and produces a cell grid, then diffs it
//! against the previous grid so only changed cells reach the terminal.
//!
//! The renderer is pure and stateless. Given the same input, it always
//! produces the same output. It knows nothing about films, cameras or
//! interaction.

use crate::types::{Cell, CellChange, Color, DrawOp, Grid, Style, Viewport};

pub struct Renderer;

impl Renderer {
    /// Rasterize draw operations onto a fixed-size cell grid.
    ///
    /// Each cell keeps the nearest op (smallest depth); on equal depth the
    /// op pushed first wins. Cells nobody draws show the night sky.
    pub fn rasterize(ops: &[DrawOp], viewport: Viewport) -> Grid {
        let w = viewport.width as usize;
        let h = viewport.height as usize;
        let mut grid: Grid = (0..h)
            .map(|y| (0..w).map(|x| Self::sky(x, y)).collect())
            .collect();
        let mut depth = vec![vec![f32::INFINITY; w]; h];

        for op in ops {
            let x = op.x as usize;
            let y = op.y as usize;
            if x < w && y < h && op.depth < depth[y][x] {
                depth[y][x] = op.depth;
                grid[y][x] = Cell {
                    ch: op.ch,
                    style: op.style.clone(),
                };
            }
        }

        grid
    }

    /// Compute a cell-level diff between two grids.
    pub fn diff(prev: &[Vec<Cell>], next: &[Vec<Cell>]) -> Vec<CellChange> {
        let mut changes = Vec::new();
        for (y, (prev_row, next_row)) in prev.iter().zip(next.iter()).enumerate() {
            for (x, (prev_cell, next_cell)) in prev_row.iter().zip(next_row.iter()).enumerate() {
                if prev_cell != next_cell {
                    changes.push(CellChange {
                        x: x as u16,
                        y: y as u16,
                        cell: next_cell.clone(),
                    });
                }
            }
        }
        changes
    }

    /// Sparse fixed star pattern.
    fn sky(x: usize, y: usize) -> Cell {
        let hash = (x as u32)
            .wrapping_mul(73_856_093)
            ^ (y as u32).wrapping_mul(19_349_663);
        let ch = match hash % 97 {
            0 => '*',
            1 | 2 => '.',
            _ => ' ',
        };
        Cell {
            ch,
            style: Style {
                fg: Some(Color::Rgb {
                    r: 170,
                    g: 170,
                    b: 200,
                }),
                dim: true,
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(x: u16, y: u16, ch: char, depth: f32) -> DrawOp {
        DrawOp {
            x,
            y,
            ch,
            style: Style::default(),
            depth,
        }
    }

    const VIEW: Viewport = Viewport {
        width: 4,
        height: 2,
    };

    #[test]
    fn nearest_op_wins() {
        let grid = Renderer::rasterize(&[op(1, 1, 'a', 5.0), op(1, 1, 'b', 3.0), op(1, 1, 'c', 4.0)], VIEW);
        assert_eq!(grid[1][1].ch, 'b');
    }

    #[test]
    fn first_op_wins_on_equal_depth() {
        let grid = Renderer::rasterize(&[op(0, 0, 'a', 2.0), op(0, 0, 'b', 2.0)], VIEW);
        assert_eq!(grid[0][0].ch, 'a');
    }

    #[test]
    fn out_of_bounds_ops_are_ignored() {
        let grid = Renderer::rasterize(&[op(9, 9, 'a', 1.0)], VIEW);
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0].len(), 4);
    }

    #[test]
    fn diff_lists_changed_cells_only() {
        let prev = Renderer::rasterize(&[], VIEW);
        let next = Renderer::rasterize(&[op(2, 1, 'x', 1.0)], VIEW);
        let changes = Renderer::diff(&prev, &next);
        assert_eq!(changes.len(), 1);
        assert_eq!((changes[0].x, changes[0].y, changes[0].cell.ch), (2, 1, 'x'));
    }
}
