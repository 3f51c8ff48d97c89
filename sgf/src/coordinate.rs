use anyhow::{anyhow, Result};
use go::Point;

const ASCII_LETTER_A: u8 = b'a';

/// Decodes a point value. The second letter counts rows from the top of the board.
///
/// Returns `None` for a pass, written either as an empty value or as `tt` on boards up to 19x19.
pub fn decode_point(value: &str, size: u8) -> Result<Option<Point>> {
    if value.is_empty() || (value == "tt" && size <= 19) {
        return Ok(None);
    }

    let bytes = value.as_bytes();
    if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_lowercase) {
        return Err(anyhow!("Invalid point value: {:?}", value));
    }

    let col = bytes[0] - ASCII_LETTER_A;
    let row_from_top = bytes[1] - ASCII_LETTER_A;

    if col >= size || row_from_top >= size {
        return Err(anyhow!(
            "Point {:?} is off a board of size {}",
            value,
            size
        ));
    }

    Ok(Some(Point::new(size - 1 - row_from_top, col)))
}

pub fn encode_point(point: Option<Point>, size: u8) -> String {
    match point {
        Some(Point { row, col }) => {
            let col = (ASCII_LETTER_A + col) as char;
            let row = (ASCII_LETTER_A + (size - 1 - row)) as char;
            format!("{}{}", col, row)
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bottom_left() {
        assert_eq!(decode_point("as", 19).unwrap(), Some(Point::new(0, 0)));
    }

    #[test]
    fn test_decode_top_right() {
        assert_eq!(decode_point("sa", 19).unwrap(), Some(Point::new(18, 18)));
    }

    #[test]
    fn test_decode_star_point() {
        // pd is the upper right star point.
        assert_eq!(decode_point("pd", 19).unwrap(), Some(Point::new(15, 15)));
    }

    #[test]
    fn test_decode_pass() {
        assert_eq!(decode_point("", 19).unwrap(), None);
        assert_eq!(decode_point("tt", 19).unwrap(), None);
    }

    #[test]
    fn test_tt_is_a_point_on_large_boards() {
        assert_eq!(decode_point("tt", 21).unwrap(), Some(Point::new(1, 19)));
    }

    #[test]
    fn test_decode_invalid() {
        assert!(decode_point("zz", 19).is_err());
        assert!(decode_point("a", 19).is_err());
        assert!(decode_point("AB", 19).is_err());
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode_point(Some(Point::new(15, 15)), 19), "pd");
        assert_eq!(encode_point(Some(Point::new(0, 0)), 19), "as");
        assert_eq!(encode_point(None, 19), "");
    }
}
