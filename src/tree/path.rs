//! Path strings.
//! A path is the sequence of left/right choices from the root,
//! written over `{l, r}`; the empty path is written as `root`.
use serde::{Serialize, Deserialize};

use crate::error::{ObliqueTreeError, Result};

use std::fmt;
use std::str::FromStr;


/// The token that denotes the empty path.
pub const ROOT_TOKEN: &str = "root";


/// The output of [`Hyperplane::split`](crate::Hyperplane::split).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeftRight {
    /// Negative score.
    Left,
    /// Non-negative score.
    Right,
}


impl LeftRight {
    #[inline]
    fn as_char(self) -> char {
        match self {
            LeftRight::Left  => 'l',
            LeftRight::Right => 'r',
        }
    }
}


/// Location of a decision node, as a sequence of left/right moves
/// from the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TreePath(Vec<LeftRight>);


impl TreePath {
    /// Returns the path of the root.
    #[inline]
    pub fn root() -> Self {
        Self(Vec::new())
    }


    /// Parse a path string such as `root`, `l`, or `lrl`.
    /// Surrounding white spaces are ignored.
    pub fn parse(path: &str) -> Result<Self> {
        let path = path.trim();
        if path == ROOT_TOKEN {
            return Ok(Self::root());
        }

        if path.is_empty() {
            let message = format!(
                "an empty path string is not allowed, use \"{ROOT_TOKEN}\""
            );
            return Err(ObliqueTreeError::Structural(message));
        }

        path.chars()
            .map(|c| match c {
                'l' => Ok(LeftRight::Left),
                'r' => Ok(LeftRight::Right),
                _ => {
                    let message = format!(
                        "path \"{path}\" contains `{c}`, \
                        only `l` and `r` are allowed"
                    );
                    Err(ObliqueTreeError::Structural(message))
                },
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }


    /// Returns `true` if this is the path of the root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }


    /// Returns the depth of the node this path points to.
    #[inline]
    pub fn depth(&self) -> usize {
        self.0.len()
    }


    /// Returns the moves of this path.
    #[inline]
    pub fn moves(&self) -> &[LeftRight] {
        &self.0[..]
    }


    /// Returns the path of the parent and the last move,
    /// or `None` for the root.
    #[inline]
    pub fn split_last(&self) -> Option<(&[LeftRight], LeftRight)> {
        self.0.split_last()
            .map(|(last, parent)| (parent, *last))
    }


    /// Returns the first `depth` moves of this path.
    #[inline]
    pub fn prefix(&self, depth: usize) -> Self {
        Self(self.0[..depth.min(self.0.len())].to_vec())
    }
}


impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, "{ROOT_TOKEN}");
        }
        self.0.iter()
            .try_for_each(|side| write!(f, "{}", side.as_char()))
    }
}


impl FromStr for TreePath {
    type Err = ObliqueTreeError;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root() {
        let path = TreePath::parse("root").unwrap();
        assert!(path.is_root());
        assert_eq!(path.split_last(), None);
        assert_eq!(path.to_string(), "root");
    }


    #[test]
    fn test_parse_moves() {
        let path: TreePath = " lrl ".parse().unwrap();
        assert_eq!(path.depth(), 3);
        assert_eq!(path.to_string(), "lrl");

        let (parent, last) = path.split_last().unwrap();
        assert_eq!(parent, &[LeftRight::Left, LeftRight::Right]);
        assert_eq!(last, LeftRight::Left);
        assert_eq!(path.prefix(1).to_string(), "l");
        assert_eq!(path.prefix(0).to_string(), "root");
    }


    #[test]
    fn test_parse_failure() {
        assert!(TreePath::parse("").is_err());
        assert!(TreePath::parse("lx").is_err());
        assert!(TreePath::parse("Root").is_err());
    }
}
