//! Pointer gesture scripts for the headless client.
//!
//! One gesture per line; `#` starts a comment.
//!
//! ```text
//! down 450 650      # pointer-down at pixel (450, 650)
//! move 450 450
//! up 450 450
//! cancel
//! drag e2 e4        # down/move/up at the centers of two squares
//! ```

use crate::board::{BoardGeometry, Cell, Pixel};
use crate::error::ScriptError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Down(Pixel),
    Move(Pixel),
    Up(Pixel),
    Cancel,
}

pub fn parse_script(source: &str, geometry: &BoardGeometry) -> Result<Vec<Gesture>, ScriptError> {
    let mut gestures = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let err = |message: String| ScriptError {
            line: idx + 1,
            message,
        };
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["down", x, y] => gestures.push(Gesture::Down(pixel(x, y).map_err(err)?)),
            ["move", x, y] => gestures.push(Gesture::Move(pixel(x, y).map_err(err)?)),
            ["up", x, y] => gestures.push(Gesture::Up(pixel(x, y).map_err(err)?)),
            ["cancel"] => gestures.push(Gesture::Cancel),
            ["drag", from, to] => {
                let from: Cell = from.parse().map_err(err)?;
                let to: Cell = to.parse().map_err(err)?;
                let start = geometry.cell_center(from);
                let end = geometry.cell_center(to);
                gestures.extend([Gesture::Down(start), Gesture::Move(end), Gesture::Up(end)]);
            }
            _ => return Err(err(format!("unrecognized gesture {:?}", line))),
        }
    }
    Ok(gestures)
}

fn pixel(x: &str, y: &str) -> Result<Pixel, String> {
    let parse = |v: &str| {
        v.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .ok_or_else(|| format!("not a pixel coordinate: {:?}", v))
    };
    Ok(Pixel::new(parse(x)?, parse(y)?))
}
