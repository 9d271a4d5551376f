use crate::signature::Stroke;

/// Builds the canonical vector path for a stroke list: each stroke opens with
/// a move-to at its first point and continues with line-tos. Pure function of
/// the stroke contents; identical input yields an identical string.
pub fn build_path(strokes: &[Stroke]) -> String {
    let mut out = String::new();
    for stroke in strokes {
        for (index, point) in stroke.points.iter().enumerate() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push(if index == 0 { 'M' } else { 'L' });
            out.push(' ');
            push_coord(&mut out, point.x);
            out.push(' ');
            push_coord(&mut out, point.y);
        }
    }
    out
}

fn push_coord(out: &mut String, value: f64) {
    // Two decimal places is below pointer resolution; trim a trailing ".00"
    // so integral coordinates stay compact.
    let text = format!("{value:.2}");
    let text = text.strip_suffix(".00").unwrap_or(&text);
    out.push_str(text);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
}

#[derive(Debug, PartialEq)]
pub enum PathParseError {
    Empty,
    LeadingLineTo,
    UnexpectedToken(String),
    MissingCoordinate,
    BadCoordinate(String),
}

/// Parses a path in the builder's grammar: whitespace-separated `M x y` and
/// `L x y` commands, starting with `M`, finite coordinates only. The server
/// runs this over submitted payloads before storing them.
pub fn parse_path(path: &str) -> Result<Vec<PathCommand>, PathParseError> {
    let mut tokens = path.split_whitespace();
    let mut commands = Vec::new();
    while let Some(token) = tokens.next() {
        let move_to = match token {
            "M" => true,
            "L" => false,
            other => return Err(PathParseError::UnexpectedToken(other.to_string())),
        };
        if !move_to && commands.is_empty() {
            return Err(PathParseError::LeadingLineTo);
        }
        let x = parse_coord(tokens.next())?;
        let y = parse_coord(tokens.next())?;
        commands.push(if move_to {
            PathCommand::MoveTo { x, y }
        } else {
            PathCommand::LineTo { x, y }
        });
    }
    if commands.is_empty() {
        return Err(PathParseError::Empty);
    }
    Ok(commands)
}

fn parse_coord(token: Option<&str>) -> Result<f64, PathParseError> {
    let token = token.ok_or(PathParseError::MissingCoordinate)?;
    let value: f64 = token
        .parse()
        .map_err(|_| PathParseError::BadCoordinate(token.to_string()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PathParseError::BadCoordinate(token.to_string()))
    }
}
