use anyhow::{anyhow, Context, Result};
use go::{Color, GameRecord, BOARD_SIZE};

use crate::{parse_first, Node};

/// Reads the first game of an SGF file into a `GameRecord`.
///
/// Validity (board size, handicap, setup stones) is not checked here, see `GameRecord::is_valid`.
pub fn read_game_record(bytes: &[u8]) -> Result<GameRecord> {
    let text = String::from_utf8_lossy(bytes);
    let root = parse_first(&text)?;

    let board_size = board_size(&root)?;
    let handicap = match root.get("HA") {
        Some(value) => value
            .trim()
            .parse::<u32>()
            .with_context(|| format!("Invalid handicap {:?}", value))?,
        None => 0,
    };
    let has_setup_stones = ["AB", "AW", "AE"].iter().any(|ident| root.has(ident));

    let mut moves = Vec::new();
    for node in root.main_sequence() {
        if let Some(mv) = node.get_move(board_size)? {
            moves.push(mv);
        }
    }

    Ok(GameRecord {
        board_size,
        handicap,
        has_setup_stones,
        moves,
        winner: winner(&root),
    })
}

fn board_size(root: &Node) -> Result<u8> {
    let Some(value) = root.get("SZ") else {
        return Ok(BOARD_SIZE);
    };

    let mut dims = value.split(':').map(|d| d.trim().parse::<u8>());
    let size = match (dims.next(), dims.next()) {
        (Some(Ok(size)), None) => size,
        (Some(Ok(cols)), Some(Ok(rows))) if cols == rows => cols,
        _ => return Err(anyhow!("Unsupported board size {:?}", value)),
    };

    if !(1..=26).contains(&size) {
        return Err(anyhow!("Unsupported board size {}", size));
    }

    Ok(size)
}

fn winner(root: &Node) -> Option<Color> {
    match root.get("RE")?.chars().next()?.to_ascii_uppercase() {
        'B' => Some(Color::Black),
        'W' => Some(Color::White),
        _ => None,
    }
}
