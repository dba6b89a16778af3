use std::fmt;
use std::sync::Arc;

/// Identifier of a class such as `P1`.
///
/// The priority rank used by the fitness bonus is encoded as the digit at
/// position 1 of the identifier. Cloning is cheap; the text is shared.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(Arc<str>);

impl ClassId {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the priority rank from the identifier.
    ///
    /// Returns `None` when the identifier has no digit at position 1,
    /// e.g. `"X"` or `"Px"`.
    pub fn priority_rank(&self) -> Option<u32> {
        self.0.chars().nth(1).and_then(|c| c.to_digit(10))
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ClassId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ClassId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

/// The value held by an occupied cell: which class and for how many slots.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassTag {
    pub class_id: ClassId,
    pub duration: usize,
}

impl ClassTag {
    pub fn new(class_id: impl Into<ClassId>, duration: usize) -> Self {
        Self {
            class_id: class_id.into(),
            duration: duration.max(1),
        }
    }
}

impl fmt::Display for ClassTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}h", self.class_id, self.duration)
    }
}

/// A class offered in a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDefinition {
    pub id: ClassId,
    /// Number of contiguous slots the class occupies (1 or 2).
    pub duration: usize,
    /// Lower rank means higher priority.
    pub priority_rank: u32,
}

impl ClassDefinition {
    pub fn new(id: impl Into<ClassId>, duration: usize, priority_rank: u32) -> Self {
        Self {
            id: id.into(),
            duration: duration.max(1),
            priority_rank,
        }
    }

    /// The cell value this class writes into a grid.
    pub fn tag(&self) -> ClassTag {
        ClassTag {
            class_id: self.id.clone(),
            duration: self.duration,
        }
    }
}

/// The fixed set of classes available for a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassCatalog {
    classes: Vec<ClassDefinition>,
}

impl ClassCatalog {
    pub fn new(classes: Vec<ClassDefinition>) -> Self {
        Self { classes }
    }

    /// Five classes `P1`..`P5`; `P1` and `P5` take two slots.
    pub fn standard() -> Self {
        Self::new(vec![
            ClassDefinition::new("P1", 2, 1),
            ClassDefinition::new("P2", 1, 2),
            ClassDefinition::new("P3", 1, 3),
            ClassDefinition::new("P4", 1, 4),
            ClassDefinition::new("P5", 2, 5),
        ])
    }

    pub fn classes(&self) -> &[ClassDefinition] {
        &self.classes
    }

    pub fn get(&self, id: &ClassId) -> Option<&ClassDefinition> {
        self.classes.iter().find(|class| &class.id == id)
    }

    pub fn duration_of(&self, id: &ClassId) -> Option<usize> {
        self.get(id).map(|class| class.duration)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Default for ClassCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
