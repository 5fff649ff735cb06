//! Placement of the badge on screen.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vertical {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Horizontal {
    Left,
    Center,
    Right,
}

/// One of the nine supported placements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    TopLeft,
    TopCenter,
    #[default]
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Position {
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::MiddleCenter,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    fn axes(self) -> (Vertical, Horizontal) {
        match self {
            Position::TopLeft => (Vertical::Top, Horizontal::Left),
            Position::TopCenter => (Vertical::Top, Horizontal::Center),
            Position::TopRight => (Vertical::Top, Horizontal::Right),
            Position::MiddleLeft => (Vertical::Middle, Horizontal::Left),
            Position::MiddleCenter => (Vertical::Middle, Horizontal::Center),
            Position::MiddleRight => (Vertical::Middle, Horizontal::Right),
            Position::BottomLeft => (Vertical::Bottom, Horizontal::Left),
            Position::BottomCenter => (Vertical::Bottom, Horizontal::Center),
            Position::BottomRight => (Vertical::Bottom, Horizontal::Right),
        }
    }

    fn from_axes(vertical: Vertical, horizontal: Horizontal) -> Self {
        match (vertical, horizontal) {
            (Vertical::Top, Horizontal::Left) => Position::TopLeft,
            (Vertical::Top, Horizontal::Center) => Position::TopCenter,
            (Vertical::Top, Horizontal::Right) => Position::TopRight,
            (Vertical::Middle, Horizontal::Left) => Position::MiddleLeft,
            (Vertical::Middle, Horizontal::Center) => Position::MiddleCenter,
            (Vertical::Middle, Horizontal::Right) => Position::MiddleRight,
            (Vertical::Bottom, Horizontal::Left) => Position::BottomLeft,
            (Vertical::Bottom, Horizontal::Center) => Position::BottomCenter,
            (Vertical::Bottom, Horizontal::Right) => Position::BottomRight,
        }
    }

    /// CSS declarations that pin the badge to this position.
    pub fn declarations(self) -> Vec<(&'static str, &'static str)> {
        let (vertical, horizontal) = self.axes();
        let mut declarations = Vec::with_capacity(3);

        declarations.push(match vertical {
            Vertical::Top => ("top", "0px"),
            Vertical::Middle => ("top", "50%"),
            Vertical::Bottom => ("bottom", "0px"),
        });
        declarations.push(match horizontal {
            Horizontal::Left => ("left", "0px"),
            Horizontal::Center => ("left", "50%"),
            Horizontal::Right => ("right", "0px"),
        });

        let transform = match (vertical == Vertical::Middle, horizontal == Horizontal::Center) {
            (true, true) => Some("translate(-50%, -50%)"),
            (true, false) => Some("translateY(-50%)"),
            (false, true) => Some("translateX(-50%)"),
            (false, false) => None,
        };
        if let Some(transform) = transform {
            declarations.push(("transform", transform));
        }

        declarations
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopCenter => "top-center",
            Position::TopRight => "top-right",
            Position::MiddleLeft => "middle-left",
            Position::MiddleCenter => "middle-center",
            Position::MiddleRight => "middle-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomCenter => "bottom-center",
            Position::BottomRight => "bottom-right",
        }
    }
}

impl FromStr for Position {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `center-middle` is accepted as a synonym of `middle-center`
        if s == "center-middle" {
            return Ok(Position::MiddleCenter);
        }

        let unknown = || ConfigError::UnknownPosition(s.to_string());
        let (vertical, horizontal) = s.split_once('-').ok_or_else(unknown)?;

        let vertical = match vertical {
            "top" => Vertical::Top,
            "middle" => Vertical::Middle,
            "bottom" => Vertical::Bottom,
            _ => return Err(unknown()),
        };
        let horizontal = match horizontal {
            "left" => Horizontal::Left,
            "center" | "middle" => Horizontal::Center,
            "right" => Horizontal::Right,
            _ => return Err(unknown()),
        };

        Ok(Position::from_axes(vertical, horizontal))
    }
}

impl TryFrom<String> for Position {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.as_str().to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
