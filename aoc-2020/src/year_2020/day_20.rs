use crate::utils::CharGrid;
use crate::utils::text::blocks;
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 20, tags = ["2020", "grid"])]
pub struct Solver;

const SEA_MONSTER: [&str; 3] = [
    "                  # ",
    "#    ##    ##    ###",
    " #  #  #  #  #  #   ",
];

#[derive(Debug, Clone)]
pub struct Tile {
    id: u64,
    grid: CharGrid,
}

fn top(grid: &CharGrid) -> Vec<u8> {
    grid.row(0).to_vec()
}

fn bottom(grid: &CharGrid) -> Vec<u8> {
    grid.row(grid.height() - 1).to_vec()
}

fn left(grid: &CharGrid) -> Vec<u8> {
    grid.column(0)
}

fn right(grid: &CharGrid) -> Vec<u8> {
    grid.column(grid.width() - 1)
}

/// The same key for an edge and its reverse, since tiles may be flipped
fn edge_key(mut edge: Vec<u8>) -> Vec<u8> {
    let reversed: Vec<u8> = edge.iter().rev().copied().collect();
    if reversed < edge {
        edge = reversed;
    }
    edge
}

fn edges(grid: &CharGrid) -> [Vec<u8>; 4] {
    [top(grid), right(grid), bottom(grid), left(grid)]
}

/// How many tiles carry each edge, in either direction
fn edge_counts(tiles: &[Tile]) -> HashMap<Vec<u8>, usize> {
    let mut counts = HashMap::new();
    for tile in tiles {
        for edge in edges(&tile.grid) {
            *counts.entry(edge_key(edge)).or_default() += 1;
        }
    }
    counts
}

fn is_outer(counts: &HashMap<Vec<u8>, usize>, edge: Vec<u8>) -> bool {
    counts.get(&edge_key(edge)) == Some(&1)
}

/// Tiles with exactly two edges that match no other tile
fn corners<'t>(tiles: &'t [Tile], counts: &HashMap<Vec<u8>, usize>) -> Vec<&'t Tile> {
    tiles
        .iter()
        .filter(|tile| {
            edges(&tile.grid)
                .into_iter()
                .filter(|e| is_outer(counts, e.clone()))
                .count()
                == 2
        })
        .collect()
}

/// Lay the tiles out in a square, each oriented to match its neighbours
///
/// Starts from a corner turned so its outer edges face up and left, then fills
/// row by row. Edges are unique among tiles, so every placement is forced.
fn assemble(tiles: &[Tile]) -> anyhow::Result<Vec<Vec<CharGrid>>> {
    let side = tiles.len().isqrt();
    if side * side != tiles.len() {
        bail!("{} tiles do not form a square", tiles.len());
    }
    let counts = edge_counts(tiles);
    let corner = *corners(tiles, &counts)
        .first()
        .ok_or_else(|| anyhow!("no corner tile"))?;

    let mut used = vec![false; tiles.len()];
    if let Some(i) = tiles.iter().position(|t| t.id == corner.id) {
        used[i] = true;
    }
    let first = corner
        .grid
        .orientations()
        .into_iter()
        .find(|g| is_outer(&counts, top(g)) && is_outer(&counts, left(g)))
        .ok_or_else(|| anyhow!("corner {} cannot face outwards", corner.id))?;

    let mut rows: Vec<Vec<CharGrid>> = Vec::with_capacity(side);
    for r in 0..side {
        let mut row: Vec<CharGrid> = Vec::with_capacity(side);
        for c in 0..side {
            if r == 0 && c == 0 {
                row.push(first.clone());
                continue;
            }
            let want_left = c.checked_sub(1).map(|pc| right(&row[pc]));
            let want_top = r.checked_sub(1).map(|pr| bottom(&rows[pr][c]));

            let (index, grid) = tiles
                .iter()
                .enumerate()
                .filter(|&(i, _)| !used[i])
                .flat_map(|(i, tile)| tile.grid.orientations().into_iter().map(move |g| (i, g)))
                .find(|(_, g)| {
                    want_left.as_ref().is_none_or(|e| left(g) == *e)
                        && want_top.as_ref().is_none_or(|e| top(g) == *e)
                })
                .ok_or_else(|| anyhow!("no tile fits at row {r} column {c}"))?;
            used[index] = true;
            row.push(grid);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Join the tiles with their borders removed
fn stitch(rows: &[Vec<CharGrid>]) -> CharGrid {
    let inner = rows[0][0].width() - 2;
    let size = inner * rows.len();
    let mut image = CharGrid::filled(size, size, b'.');
    for (r, row) in rows.iter().enumerate() {
        for (c, tile) in row.iter().enumerate() {
            for y in 0..inner {
                for x in 0..inner {
                    if let Some(cell) = tile.get(x + 1, y + 1) {
                        image.set(c * inner + x, r * inner + y, cell);
                    }
                }
            }
        }
    }
    image
}

/// Rough water left after marking every sea monster, in the orientation that has any
fn water_roughness(image: &CharGrid) -> Option<usize> {
    let monster: Vec<(usize, usize)> = SEA_MONSTER
        .iter()
        .enumerate()
        .flat_map(|(y, line)| {
            line.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'#')
                .map(move |(x, _)| (x, y))
        })
        .collect();
    let (mw, mh) = (SEA_MONSTER[0].len(), SEA_MONSTER.len());

    image.orientations().into_iter().find_map(|mut candidate| {
        let mut found = false;
        for y in 0..=candidate.height().saturating_sub(mh) {
            for x in 0..=candidate.width().saturating_sub(mw) {
                let hit = monster
                    .iter()
                    .all(|&(dx, dy)| matches!(candidate.get(x + dx, y + dy), Some(b'#' | b'O')));
                if hit {
                    found = true;
                    for &(dx, dy) in &monster {
                        candidate.set(x + dx, y + dy, b'O');
                    }
                }
            }
        }
        found.then(|| candidate.count(b'#'))
    })
}

fn parse_tile(lines: &[&str]) -> Result<Tile, ParseError> {
    let (header, rows) = lines
        .split_first()
        .ok_or_else(|| ParseError::MissingData("tile header".into()))?;
    let id = header
        .strip_prefix("Tile ")
        .and_then(|h| h.strip_suffix(':'))
        .and_then(|id| id.parse().ok())
        .ok_or_else(|| ParseError::InvalidFormat(format!("bad tile header {header:?}")))?;
    let grid = CharGrid::parse(&rows.join("\n"))?;
    if grid.width() != grid.height() || grid.width() < 3 {
        return Err(ParseError::InvalidFormat(format!("tile {id} is not square")));
    }
    Ok(Tile { id, grid })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Tile>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        blocks(input).iter().map(|b| parse_tile(b)).collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let counts = edge_counts(shared);
        let corners = corners(shared, &counts);
        if corners.len() != 4 {
            return Err(SolveError::SolveFailed(
                anyhow!("expected 4 corner tiles, found {}", corners.len()).into(),
            ));
        }
        Ok(corners.iter().map(|t| t.id).product::<u64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let rows = assemble(shared).map_err(|e| SolveError::SolveFailed(e.into()))?;
        water_roughness(&stitch(&rows))
            .map(|n| n.to_string())
            .ok_or_else(|| {
                SolveError::SolveFailed(anyhow!("no sea monsters in any orientation").into())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve;

    #[test]
    fn example_part1() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "20899048083289");
    }

    #[test]
    fn example_part2() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "273");
    }

    #[test]
    fn corner_ids() {
        let tiles = Solver::parse(EXAMPLE).unwrap();
        let counts = edge_counts(&tiles);
        let mut ids: Vec<_> = corners(&tiles, &counts).iter().map(|t| t.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1171, 1951, 2971, 3079]);
    }

    #[test]
    fn stitched_image_size() {
        let tiles = Solver::parse(EXAMPLE).unwrap();
        let image = stitch(&assemble(&tiles).unwrap());
        assert_eq!((image.width(), image.height()), (24, 24));
    }

    #[test]
    fn edge_key_ignores_direction() {
        assert_eq!(edge_key(b"#..".to_vec()), edge_key(b"..#".to_vec()));
    }

    #[test]
    fn bad_header_is_rejected() {
        assert!(Solver::parse("Tile x:\n#.#\n...\n#.#\n").is_err());
    }

    const EXAMPLE: &str = "\
Tile 2311:
..##.#..#.
##..#.....
#...##..#.
####.#...#
##.##.###.
##...#.###
.#.#.#..##
..#....#..
###...#.#.
..###..###

Tile 1951:
#.##...##.
#.####...#
.....#..##
#...######
.##.#....#
.###.#####
###.##.##.
.###....#.
..#.#..#.#
#...##.#..

Tile 1171:
####...##.
#..##.#..#
##.#..#.#.
.###.####.
..###.####
.##....##.
.#...####.
#.##.####.
####..#...
.....##...

Tile 1427:
###.##.#..
.#..#.##..
.#.##.#..#
#.#.#.##.#
....#...##
...##..##.
...#.#####
.#.####.#.
..#..###.#
..##.#..#.

Tile 1489:
##.#.#....
..##...#..
.##..##...
..#...#...
#####...#.
#..#.#.#.#
...#.#.#..
##.#...##.
..##.##.##
###.##.#..

Tile 2473:
#....####.
#..#.##...
#.##..#...
######.#.#
.#...#.#.#
.#########
.###.#..#.
########.#
##...##.#.
..###.#.#.

Tile 2971:
..#.#....#
#...###...
#.#.###...
##.##..#..
.#####..##
.#..####.#
#..#.#..#.
..####.###
..#.#.###.
...#.#.#.#

Tile 2729:
...#.#.#.#
####.#....
..#.#.....
....#..#.#
.##..##.#.
.#.####...
####.#.#..
##.####...
##..#.##..
#.##...##.

Tile 3079:
#.#.#####.
.#..######
..#.......
######....
####.#..#.
.#...#.##.
#.#####.##
..#.###...
..#.......
..#.###...
";
}
