use common::{ensure_len, Direction, Result};

/// Last move as a direction when it exceeds 0.1% of the latest close.
pub fn zigzag(closes: &[f64]) -> Result<Direction> {
    ensure_len(closes.len(), 2)?;
    let last = closes[closes.len() - 1];
    let previous = closes[closes.len() - 2];
    let threshold = 0.001 * last;

    if (last - previous).abs() > threshold {
        Ok(if last > previous {
            Direction::Up
        } else {
            Direction::Down
        })
    } else {
        Ok(Direction::Flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_moves_are_flat() {
        assert_eq!(zigzag(&[1.0000, 1.0005]).unwrap(), Direction::Flat);
        assert_eq!(zigzag(&[1.0000, 1.0020]).unwrap(), Direction::Up);
        assert_eq!(zigzag(&[1.0020, 1.0000]).unwrap(), Direction::Down);
    }
}
