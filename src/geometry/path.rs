//! Path normalization
//!
//! Turns raw outline data into one canonical, compact path string at a
//! given precision. The steps run in a fixed order:
//!
//! 1. point lists become path data (`M<points>z` or `M<points>`)
//! 2. decimal literals are rounded half-up to the precision
//! 3. exponent-notation tokens are replaced with `0`
//! 4. the text is parsed; a move-to onto the current point right after
//!    another move-to or a close-path is dropped
//! 5. the segments are printed back with redundant precision and repeated
//!    command letters removed
//!
//! Normalizing an already normalized path at the same precision returns
//! the identical string.

use crate::geometry::number::{format_number, round_literal};
use regex::Regex;
use std::sync::OnceLock;
use svgtypes::{PathParser, PathSegment};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("path data is empty")]
    Empty,
    #[error("unparsable path data: {0}")]
    Parse(String),
}

/// Where an outline's data comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSource<'a> {
    /// A `points` list of a closed shape
    ClosedPoints(&'a str),
    /// A `points` list of an open shape
    OpenPoints(&'a str),
    /// Explicit path data
    Data(&'a str),
}

impl PathSource<'_> {
    pub fn to_path_data(&self) -> String {
        match self {
            PathSource::ClosedPoints(points) => format!("M{}z", points.trim()),
            PathSource::OpenPoints(points) => format!("M{}", points.trim()),
            PathSource::Data(data) => data.trim().to_string(),
        }
    }
}

/// Normalize any outline source at `precision` decimal places
pub fn normalize_source(source: PathSource<'_>, precision: u32) -> Result<String, PathError> {
    normalize_path(&source.to_path_data(), precision)
}

/// Normalize raw path data at `precision` decimal places
pub fn normalize_path(data: &str, precision: u32) -> Result<String, PathError> {
    let rounded = round_literals(data, precision);
    let cleaned = zero_exponents(&rounded);
    let segments = parse_segments(&cleaned)?;
    let segments = drop_duplicate_moves(segments);
    if segments.is_empty() {
        return Err(PathError::Empty);
    }
    Ok(minify(&segments, precision))
}

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").expect("valid number regex")
    })
}

fn has_exponent(token: &str) -> bool {
    token.contains(['e', 'E'])
}

fn round_literals(data: &str, precision: u32) -> String {
    number_regex()
        .replace_all(data, |caps: &regex::Captures<'_>| {
            let token = &caps[0];
            if has_exponent(token) || !token.contains('.') {
                return token.to_string();
            }
            round_literal(token, precision).unwrap_or_else(|| token.to_string())
        })
        .into_owned()
}

/// Exponent notation never survives rounding at map precisions, so any such
/// token left over is treated as noise and zeroed. This also zeroes large
/// values written with a positive exponent.
fn zero_exponents(data: &str) -> String {
    let mut out = String::with_capacity(data.len());
    let mut last = 0;
    for token in number_regex().find_iter(data) {
        if !has_exponent(token.as_str()) {
            continue;
        }
        out.push_str(&data[last..token.start()]);
        if out.ends_with(|c: char| c.is_ascii_digit() || c == '.') {
            out.push(' ');
        }
        out.push('0');
        last = token.end();
    }
    out.push_str(&data[last..]);
    out
}

fn parse_segments(data: &str) -> Result<Vec<PathSegment>, PathError> {
    if data.trim().is_empty() {
        return Err(PathError::Empty);
    }
    PathParser::from(data)
        .map(|segment| segment.map_err(|e| PathError::Parse(e.to_string())))
        .collect()
}

/// Absolute end point of a segment given the current point and subpath start
pub(crate) fn end_point(segment: &PathSegment, current: (f64, f64), start: (f64, f64)) -> (f64, f64) {
    let resolve = |abs: bool, x: f64, y: f64| {
        if abs {
            (x, y)
        } else {
            (current.0 + x, current.1 + y)
        }
    };
    match *segment {
        PathSegment::MoveTo { abs, x, y }
        | PathSegment::LineTo { abs, x, y }
        | PathSegment::CurveTo { abs, x, y, .. }
        | PathSegment::SmoothCurveTo { abs, x, y, .. }
        | PathSegment::Quadratic { abs, x, y, .. }
        | PathSegment::SmoothQuadratic { abs, x, y }
        | PathSegment::EllipticalArc { abs, x, y, .. } => resolve(abs, x, y),
        PathSegment::HorizontalLineTo { abs, x } => {
            (if abs { x } else { current.0 + x }, current.1)
        }
        PathSegment::VerticalLineTo { abs, y } => {
            (current.0, if abs { y } else { current.1 + y })
        }
        PathSegment::ClosePath { .. } => start,
    }
}

/// Some drawing tools restart every subpath with a move-to onto the point
/// the pen already rests on. Those moves draw nothing.
fn drop_duplicate_moves(segments: Vec<PathSegment>) -> Vec<PathSegment> {
    let mut kept: Vec<PathSegment> = Vec::with_capacity(segments.len());
    let mut current = (0.0, 0.0);
    let mut start = (0.0, 0.0);

    for segment in segments {
        let target = end_point(&segment, current, start);
        if let PathSegment::MoveTo { .. } = segment {
            let follows_move_or_close = matches!(
                kept.last(),
                Some(PathSegment::MoveTo { .. }) | Some(PathSegment::ClosePath { .. })
            );
            if follows_move_or_close && target == current {
                continue;
            }
            start = target;
        }
        current = target;
        kept.push(segment);
    }

    kept
}

fn command_letter(segment: &PathSegment) -> char {
    let (abs, letter) = match *segment {
        PathSegment::MoveTo { abs, .. } => (abs, 'm'),
        PathSegment::LineTo { abs, .. } => (abs, 'l'),
        PathSegment::HorizontalLineTo { abs, .. } => (abs, 'h'),
        PathSegment::VerticalLineTo { abs, .. } => (abs, 'v'),
        PathSegment::CurveTo { abs, .. } => (abs, 'c'),
        PathSegment::SmoothCurveTo { abs, .. } => (abs, 's'),
        PathSegment::Quadratic { abs, .. } => (abs, 'q'),
        PathSegment::SmoothQuadratic { abs, .. } => (abs, 't'),
        PathSegment::EllipticalArc { abs, .. } => (abs, 'a'),
        PathSegment::ClosePath { .. } => return 'z',
    };
    if abs {
        letter.to_ascii_uppercase()
    } else {
        letter
    }
}

fn segment_args(segment: &PathSegment, precision: u32) -> String {
    let n = |v: f64| format_number(v, precision);
    let flag = |f: bool| if f { '1' } else { '0' };
    match *segment {
        PathSegment::MoveTo { x, y, .. }
        | PathSegment::LineTo { x, y, .. }
        | PathSegment::SmoothQuadratic { x, y, .. } => format!("{},{}", n(x), n(y)),
        PathSegment::HorizontalLineTo { x, .. } => n(x),
        PathSegment::VerticalLineTo { y, .. } => n(y),
        PathSegment::CurveTo { x1, y1, x2, y2, x, y, .. } => format!(
            "{},{} {},{} {},{}",
            n(x1),
            n(y1),
            n(x2),
            n(y2),
            n(x),
            n(y)
        ),
        PathSegment::SmoothCurveTo { x2, y2, x, y, .. } => {
            format!("{},{} {},{}", n(x2), n(y2), n(x), n(y))
        }
        PathSegment::Quadratic { x1, y1, x, y, .. } => {
            format!("{},{} {},{}", n(x1), n(y1), n(x), n(y))
        }
        PathSegment::EllipticalArc { rx, ry, x_axis_rotation, large_arc, sweep, x, y, .. } => format!(
            "{},{} {} {},{} {},{}",
            n(rx),
            n(ry),
            n(x_axis_rotation),
            flag(large_arc),
            flag(sweep),
            n(x),
            n(y)
        ),
        PathSegment::ClosePath { .. } => String::new(),
    }
}

fn minify(segments: &[PathSegment], precision: u32) -> String {
    let mut out = String::with_capacity(segments.len() * 12);
    // Command an argument group without a letter would continue with
    let mut implicit: Option<char> = None;
    let mut last_closed = false;

    for segment in segments {
        let letter = command_letter(segment);
        if letter == 'z' {
            if !last_closed {
                out.push('z');
            }
            last_closed = true;
            implicit = None;
            continue;
        }
        last_closed = false;

        if implicit == Some(letter) {
            out.push(' ');
        } else {
            out.push(letter);
        }
        out.push_str(&segment_args(segment, precision));

        implicit = Some(match letter {
            'M' => 'L',
            'm' => 'l',
            other => other,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_points_become_path() {
        let source = PathSource::ClosedPoints("10,10 90,10 50,90");
        assert_eq!(normalize_source(source, 2).unwrap(), "M10,10 90,10 50,90z");
    }

    #[test]
    fn test_open_points_stay_open() {
        let source = PathSource::OpenPoints(" 0,0 5,5 10,0 ");
        assert_eq!(normalize_source(source, 2).unwrap(), "M0,0 5,5 10,0");
    }

    #[test]
    fn test_explicit_commands_collapse() {
        let d = "M 10 10 L 90 10 L 50 90 Z";
        assert_eq!(normalize_path(d, 2).unwrap(), "M10,10 90,10 50,90z");
    }

    #[test]
    fn test_rounding_and_trailing_zeros() {
        let d = "M10.126,10.000 L20.004,30.5Z";
        assert_eq!(normalize_path(d, 2).unwrap(), "M10.13,10 20,30.5z");
        assert_eq!(normalize_path(d, 0).unwrap(), "M10,10 20,31z");
    }

    #[test]
    fn test_leading_zero_dropped() {
        assert_eq!(normalize_path("M0.5,-0.25 L1,1", 2).unwrap(), "M.5,-.25 1,1");
    }

    #[test]
    fn test_exponent_tokens_zeroed() {
        assert_eq!(normalize_path("M1e-7,5 L10,10", 2).unwrap(), "M0,5 10,10");
        assert_eq!(normalize_path("M10-1.5E-9 L10,10", 2).unwrap(), "M10,0 10,10");
    }

    #[test]
    fn test_duplicate_move_after_close_dropped() {
        let d = "M0,0 L10,0 L10,10 Z M0,0 L5,5 Z";
        assert_eq!(normalize_path(d, 2).unwrap(), "M0,0 10,0 10,10zL5,5z");
    }

    #[test]
    fn test_duplicate_consecutive_moves_dropped() {
        assert_eq!(normalize_path("M3,3 M3,3 L5,5", 2).unwrap(), "M3,3 5,5");
    }

    #[test]
    fn test_move_to_new_point_kept() {
        let d = "M0,0 L1,0 Z M5,5 L6,5 Z";
        assert_eq!(normalize_path(d, 2).unwrap(), "M0,0 1,0zM5,5 6,5z");
    }

    #[test]
    fn test_relative_commands_preserved() {
        assert_eq!(normalize_path("m10,10 l5,0 l0,5 z", 2).unwrap(), "m10,10 5,0 0,5z");
    }

    #[test]
    fn test_repeated_curves_share_letter() {
        let d = "M0,0 C1,1 2,2 3,3 C4,4 5,5 6,6 L7,7";
        assert_eq!(
            normalize_path(d, 2).unwrap(),
            "M0,0C1,1 2,2 3,3 4,4 5,5 6,6L7,7"
        );
    }

    #[test]
    fn test_axis_lines_print_single_argument() {
        assert_eq!(normalize_path("M0,0 H10 V10 h-5 Z", 2).unwrap(), "M0,0H10V10h-5z");
    }

    #[test]
    fn test_consecutive_close_paths_collapse() {
        assert_eq!(normalize_path("M0,0 L1,1 Z Z", 2).unwrap(), "M0,0 1,1z");
    }

    #[test]
    fn test_arc_round_trip() {
        let once = normalize_path("M0,0 A10,10 0 0 1 20,20", 2).unwrap();
        assert_eq!(once, "M0,0A10,10 0 0,1 20,20");
        assert_eq!(normalize_path(&once, 2).unwrap(), once);
    }

    #[test]
    fn test_idempotent_on_mixed_path() {
        let d = "M12.3456,7.891 h10.005 v-3.3333 Q1.25,2.5 3.75,5 T8.125,9 s1,2 3,4 z";
        let once = normalize_path(d, 2).unwrap();
        let twice = normalize_path(&once, 2).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_and_malformed() {
        assert_eq!(normalize_path("", 2), Err(PathError::Empty));
        assert_eq!(normalize_path("   ", 2), Err(PathError::Empty));
        assert!(matches!(normalize_path("not a path", 2), Err(PathError::Parse(_))));
    }
}
