use crate::vector::Vector;
use std::fmt;

/// A non-empty group of points together with its representative centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Sequential identifier, starting at 0, assigned in centroid order
    pub id: usize,
    pub centroid: Vector,
    pub members: Vec<Vector>,
}

impl Cluster {
    pub fn new(id: usize, centroid: Vector, members: Vec<Vector>) -> Self {
        Self {
            id,
            centroid,
            members,
        }
    }

    /// Number of member points
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cluster Id: {}", self.id)?;
        writeln!(f, "Centroid: {}", self.centroid)?;
        write!(f, "Points:")?;
        for member in &self.members {
            write!(f, " {}", member)?;
        }
        writeln!(f)
    }
}
