use thiserror::Error;

use super::model::{Path, Point2D, Section};

/// Errors raised while reading a path command string
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// A command letter outside the supported move/line/close subset
    #[error("unsupported path command: {0:?}")]
    UnsupportedCommand(String),

    /// A bare scalar that is not a finite number
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    /// A comma token that is not exactly two finite numbers
    #[error("malformed coordinate pair: {0:?}")]
    MalformedCoordinate(String),

    /// An x scalar whose y partner never arrived
    #[error("coordinate pair is missing its y component")]
    IncompletePair,

    /// A coordinate or line command with no open section
    #[error("{0:?} appears before any move-to")]
    OutsideSection(String),

    #[error("invalid scale factors ({x}, {y})")]
    InvalidScale { x: f64, y: f64 },

    #[error("path contains no points")]
    Empty,
}

/// Parse a path command string into closed point loops.
///
/// Coordinates are divided by `x_scale`/`y_scale`, and the finished path is
/// shifted so its first point sits at the origin.
///
/// # Supported grammar
/// * `M x,y` / `m x,y` - start a new section in absolute / relative mode
/// * `L` / `l` - switch the coordinate mode for the rest of the section
/// * `Z` / `z` - close the current section
/// * `x,y` or `x y` - one coordinate
pub fn parse(command: &str, x_scale: f64, y_scale: f64) -> Result<Path, ParseError> {
    let mut parser = PathParser::new(x_scale, y_scale)?;
    for token in command.split_whitespace() {
        parser.feed(token)?;
    }
    parser.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Absolute,
    Relative,
}

/// A coordinate split across two whitespace-separated tokens
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    Empty,
    X(f64),
    Complete(Point2D),
}

/// Parser state for the section currently being drawn
#[derive(Debug)]
struct OpenSection {
    section: Section,
    mode: Mode,
    cursor: Point2D,
    pending: Pending,
}

impl OpenSection {
    fn new(mode: Mode) -> Self {
        Self {
            section: Section::default(),
            mode,
            cursor: Point2D::ORIGIN,
            pending: Pending::Empty,
        }
    }

    /// Resolve a scaled coordinate against the cursor and append it
    fn push(&mut self, raw: Point2D) {
        self.cursor = if self.mode == Mode::Relative && !self.section.is_empty() {
            self.cursor + raw
        } else {
            raw
        };
        self.section.push(self.cursor);
    }

    /// Move a completed split coordinate into the section
    fn flush(&mut self) -> Result<(), ParseError> {
        match std::mem::replace(&mut self.pending, Pending::Empty) {
            Pending::Empty => Ok(()),
            Pending::X(_) => Err(ParseError::IncompletePair),
            Pending::Complete(point) => {
                self.push(point);
                Ok(())
            }
        }
    }
}

struct PathParser {
    x_scale: f64,
    y_scale: f64,
    sections: Vec<Section>,
    open: Option<OpenSection>,
}

impl PathParser {
    fn new(x_scale: f64, y_scale: f64) -> Result<Self, ParseError> {
        let valid = |s: f64| s.is_finite() && s != 0.0;
        if !valid(x_scale) || !valid(y_scale) {
            return Err(ParseError::InvalidScale {
                x: x_scale,
                y: y_scale,
            });
        }
        Ok(Self {
            x_scale,
            y_scale,
            sections: Vec::new(),
            open: None,
        })
    }

    fn feed(&mut self, token: &str) -> Result<(), ParseError> {
        match token {
            "M" => self.start_section(Mode::Absolute),
            "m" => self.start_section(Mode::Relative),
            "Z" | "z" => self.close_section(),
            "L" => self.switch_mode(token, Mode::Absolute),
            "l" => self.switch_mode(token, Mode::Relative),
            _ if token.contains(',') => self.coordinate_pair(token),
            _ => self.scalar(token),
        }
    }

    fn start_section(&mut self, mode: Mode) -> Result<(), ParseError> {
        self.close_section()?;
        self.open = Some(OpenSection::new(mode));
        Ok(())
    }

    fn close_section(&mut self) -> Result<(), ParseError> {
        if let Some(mut open) = self.open.take() {
            open.flush()?;
            if !open.section.is_empty() {
                self.sections.push(open.section);
            }
        }
        Ok(())
    }

    fn switch_mode(&mut self, token: &str, mode: Mode) -> Result<(), ParseError> {
        let open = self.open_section(token)?;
        open.flush()?;
        open.mode = mode;
        Ok(())
    }

    fn coordinate_pair(&mut self, token: &str) -> Result<(), ParseError> {
        let malformed = || ParseError::MalformedCoordinate(token.to_string());
        let (x, y) = token.split_once(',').ok_or_else(malformed)?;
        let x = parse_number(x).ok_or_else(malformed)?;
        let y = parse_number(y).ok_or_else(malformed)?;
        let point = Point2D::new(x / self.x_scale, y / self.y_scale);

        let open = self.open_section(token)?;
        open.flush()?;
        open.push(point);
        Ok(())
    }

    fn scalar(&mut self, token: &str) -> Result<(), ParseError> {
        let value = match parse_number(token) {
            Some(v) => v,
            None if token.starts_with(|c: char| c.is_ascii_alphabetic()) => {
                return Err(ParseError::UnsupportedCommand(token.to_string()));
            }
            None => return Err(ParseError::InvalidNumber(token.to_string())),
        };

        let (x_scale, y_scale) = (self.x_scale, self.y_scale);
        let open = self.open_section(token)?;
        let pending = open.pending;
        open.pending = match pending {
            Pending::Empty => Pending::X(value / x_scale),
            Pending::X(x) => Pending::Complete(Point2D::new(x, value / y_scale)),
            Pending::Complete(_) => {
                open.flush()?;
                Pending::X(value / x_scale)
            }
        };
        Ok(())
    }

    fn open_section(&mut self, token: &str) -> Result<&mut OpenSection, ParseError> {
        self.open
            .as_mut()
            .ok_or_else(|| ParseError::OutsideSection(token.to_string()))
    }

    fn finish(mut self) -> Result<Path, ParseError> {
        self.close_section()?;

        let mut path = Path::new(self.sections);
        let anchor = path.anchor().ok_or(ParseError::Empty)?;
        path.translate(Point2D::ORIGIN - anchor);
        Ok(path)
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
