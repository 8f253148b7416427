#![cfg(feature = "std")]

//! Terminal rendering of layouts, belief grids and heatmaps for the CLI.

use std::fmt::Write;
use std::string::String;

use crate::board::Board;
use crate::config::{ship_class, GRID_SIZE};
use crate::grid::Coord;
use crate::ship::Ship;
use crate::targeting::{BeliefGrid, CellState, Heatmap};

fn coord_label(coord: Coord) -> String {
    let col = (b'A' + coord.1 as u8) as char;
    format!("{}{}", col, coord.0 + 1)
}

fn framed<F>(mut cell: F) -> String
where
    F: FnMut(Coord) -> char,
{
    let mut out = String::new();
    let _ = writeln!(out, "    ╔═══════════════════════╗");
    out.push_str("    ║  ");
    for c in 0..GRID_SIZE {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    let _ = writeln!(out, " ║");
    let _ = writeln!(out, "    ╠═══════════════════════╣");
    for r in 0..GRID_SIZE {
        let _ = write!(out, "    ║{:2}", r + 1);
        for c in 0..GRID_SIZE {
            let _ = write!(out, " {}", cell((r, c)));
        }
        let _ = writeln!(out, " ║");
    }
    let _ = writeln!(out, "    ╚═══════════════════════╝");
    out
}

/// Fleet layout with one digit per ship id.
pub fn render_layout(ships: &[Ship]) -> String {
    let mut out = framed(|coord| {
        ships
            .iter()
            .find(|ship| ship.contains(coord))
            .and_then(|ship| char::from_digit((ship.id() % 10) as u32, 10))
            .unwrap_or('.')
    });
    for ship in ships {
        let _ = writeln!(
            out,
            "      #{} {} ({}) at {} {:?}",
            ship.id(),
            ship_class(ship.length()),
            ship.length(),
            coord_label(ship.anchor()),
            ship.orientation()
        );
    }
    out
}

/// Defending board as the defender sees it.
pub fn render_board(board: &Board) -> String {
    let (ships, hits, misses) = (board.ship_map(), board.hits(), board.misses());
    let mut out = framed(|(r, c)| {
        if hits.contains(r, c) {
            'X'
        } else if misses.contains(r, c) {
            'o'
        } else if ships.contains(r, c) {
            'S'
        } else {
            '.'
        }
    });
    out.push_str("    Legend: S=Ship  X=Hit  o=Miss  .=Water\n");
    out
}

/// The attacker's belief about the enemy board.
pub fn render_belief(belief: &BeliefGrid) -> String {
    let mut out = framed(|coord| match belief.cell(coord) {
        CellState::Unknown => '.',
        CellState::Miss => 'o',
        CellState::Hit => 'X',
        CellState::Sunk => '#',
    });
    out.push_str("    Legend: X=Hit  #=Sunk  o=Miss  .=Unknown\n");
    let afloat: Vec<String> = belief
        .remaining()
        .iter()
        .filter(|&&len| len > 0)
        .map(|len| len.to_string())
        .collect();
    let _ = writeln!(out, "    Afloat: [{}]", afloat.join(", "));
    out
}

/// Heatmap weights, one column per board column.
pub fn render_heatmap(heat: &Heatmap) -> String {
    let mut out = String::from("\nPlacement density:\n   ");
    for c in 0..GRID_SIZE {
        let _ = write!(out, " {:>4}", (b'A' + c as u8) as char);
    }
    out.push('\n');
    for (r, row) in heat.rows().iter().enumerate() {
        let _ = write!(out, "{:2} ", r + 1);
        for weight in row {
            let _ = write!(out, " {:4}", weight);
        }
        out.push('\n');
    }
    out
}

pub fn format_coord(coord: Coord) -> String {
    coord_label(coord)
}
