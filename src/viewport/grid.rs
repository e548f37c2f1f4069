use crate::{
    foundation::core::{Bounds, Point, Rect},
    foundation::error::{MosaicoError, MosaicoResult},
    shape::fragment::{Fragment, FragmentId},
};

/// Built-in grid presets, written columns first.
pub const PRESETS: [&str; 4] = ["2x2", "3x3", "4x4", "5x5"];

/// Row/column count of a grid template. Both are at least one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridSpec {
    rows: u32,
    cols: u32,
}

impl GridSpec {
    pub fn new(rows: u32, cols: u32) -> MosaicoResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(MosaicoError::validation(format!(
                "grid needs at least one row and column, got {rows}x{cols}"
            )));
        }
        Ok(Self { rows, cols })
    }

    /// Parse `"<cols>x<rows>"`, e.g. `"3x2"` is three columns by two rows.
    pub fn parse_preset(s: &str) -> MosaicoResult<Self> {
        let (c, r) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| MosaicoError::validation(format!("grid preset '{s}' is not CxR")))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|_| MosaicoError::validation(format!("grid preset '{s}' is not CxR")))
        };
        Self::new(parse(r)?, parse(c)?)
    }

    pub fn rows(self) -> u32 {
        self.rows
    }

    pub fn cols(self) -> u32 {
        self.cols
    }

    pub fn cell_count(self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self { rows: 2, cols: 2 }
    }
}

/// Even row-major tiling of `rect` into `spec` cells.
pub fn cell_rects(spec: GridSpec, rect: Bounds) -> Vec<Rect> {
    let cw = rect.width / f64::from(spec.cols);
    let ch = rect.height / f64::from(spec.rows);
    (0..spec.rows)
        .flat_map(|r| {
            (0..spec.cols).map(move |c| {
                let x = rect.x + f64::from(c) * cw;
                let y = rect.y + f64::from(r) * ch;
                Rect::new(x, y, x + cw, y + ch)
            })
        })
        .collect()
}

/// Regenerate every cell fragment for `spec` over `rect`.
///
/// Cell `i` keeps the id and image assignment of `previous[i]` when one exists; all other
/// geometry (outline, free edits, rotation, lock) is rebuilt as a plain size-mode rectangle.
/// New cells take ids from `alloc`.
pub fn build_cells(
    spec: GridSpec,
    rect: Bounds,
    previous: &[Fragment],
    mut alloc: impl FnMut() -> FragmentId,
) -> Vec<Fragment> {
    cell_rects(spec, rect)
        .into_iter()
        .enumerate()
        .map(|(i, cell)| {
            let (id, source) = match previous.get(i) {
                Some(p) => (p.id, p.source.clone()),
                None => (alloc(), String::new()),
            };
            Fragment::new(
                id,
                source,
                Point::new(cell.x0, cell.y0),
                cell.width(),
                cell.height(),
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/grid.rs"]
mod tests;
