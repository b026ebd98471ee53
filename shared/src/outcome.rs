use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{SnapshotError, WheelError};
use crate::snapshot::{Snapshot, SnapshotEntry};

/// What a slice (or half of a split slice) looks like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub color: String,
    pub icon: String,
    /// Image drawn over the slice instead of the flat color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Face {
    pub fn flat(color: &str, icon: &str) -> Self {
        Self {
            color: color.to_string(),
            icon: icon.to_string(),
            photo: None,
        }
    }
}

/// Configuration form of an outcome, before any chosen-state exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutcomeSpec {
    Simple { name: String, face: Face },
    Split { name: String, parts: [Face; 2] },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitPart {
    pub face: Face,
    pub chosen: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeKind {
    Simple { face: Face, chosen: bool },
    /// Two halves sharing one slice; picked together as one slot.
    Split { parts: [SplitPart; 2] },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub id: String,
    pub label: String,
    pub kind: OutcomeKind,
}

impl Outcome {
    pub fn from_spec(spec: OutcomeSpec) -> Self {
        match spec {
            OutcomeSpec::Simple { name, face } => Self {
                id: slug(&name),
                label: name,
                kind: OutcomeKind::Simple { face, chosen: false },
            },
            OutcomeSpec::Split { name, parts: [a, b] } => Self {
                id: slug(&name),
                label: name,
                kind: OutcomeKind::Split {
                    parts: [
                        SplitPart { face: a, chosen: false },
                        SplitPart { face: b, chosen: false },
                    ],
                },
            },
        }
    }

    /// A split outcome counts as chosen only once both halves are.
    pub fn is_chosen(&self) -> bool {
        match &self.kind {
            OutcomeKind::Simple { chosen, .. } => *chosen,
            OutcomeKind::Split { parts } => parts[0].chosen && parts[1].chosen,
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self.kind, OutcomeKind::Split { .. })
    }

    pub fn faces(&self) -> Vec<&Face> {
        match &self.kind {
            OutcomeKind::Simple { face, .. } => vec![face],
            OutcomeKind::Split { parts } => parts.iter().map(|p| &p.face).collect(),
        }
    }

    pub fn icons(&self) -> Vec<String> {
        self.faces().into_iter().map(|f| f.icon.clone()).collect()
    }

    pub fn colors(&self) -> Vec<String> {
        self.faces().into_iter().map(|f| f.color.clone()).collect()
    }

    fn mark(&mut self, value: bool) {
        match &mut self.kind {
            OutcomeKind::Simple { chosen, .. } => *chosen = value,
            OutcomeKind::Split { parts } => {
                for part in parts.iter_mut() {
                    part.chosen = value;
                }
            }
        }
    }

    fn to_entry(&self) -> SnapshotEntry {
        match &self.kind {
            OutcomeKind::Simple { chosen, .. } => SnapshotEntry::Simple(*chosen),
            OutcomeKind::Split { parts } => {
                SnapshotEntry::split([parts[0].chosen, parts[1].chosen])
            }
        }
    }
}

fn slug(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect()
}

/// The fixed, ordered list of slices and their chosen-state.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeRegistry {
    outcomes: Vec<Outcome>,
}

impl OutcomeRegistry {
    /// Builds the wheel in configuration order. Every face color must be a
    /// valid hex color.
    pub fn from_specs(specs: Vec<OutcomeSpec>) -> Result<Self, WheelError> {
        if specs.is_empty() {
            return Err(WheelError::EmptyWheel);
        }
        let outcomes: Vec<Outcome> = specs.into_iter().map(Outcome::from_spec).collect();
        for face in outcomes.iter().flat_map(Outcome::faces) {
            Rgb::from_hex(&face.color)?;
        }
        Ok(Self { outcomes })
    }

    pub fn default_fruits() -> Self {
        Self {
            outcomes: default_fruit_specs().into_iter().map(Outcome::from_spec).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Outcome> {
        self.outcomes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter()
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Indices of every slice that can still be picked, in slice order.
    pub fn eligible_indices(&self) -> Vec<usize> {
        self.outcomes
            .iter()
            .enumerate()
            .filter(|(_, o)| !o.is_chosen())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_chosen()).count()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Marks the outcome at `index` fully chosen. Only the spin engine calls
    /// this, with an index it took from `eligible_indices`.
    pub fn commit(&mut self, index: usize) -> Result<&Outcome, WheelError> {
        let len = self.outcomes.len();
        let outcome = self
            .outcomes
            .get_mut(index)
            .ok_or(WheelError::UnknownOutcome { index, len })?;
        outcome.mark(true);
        Ok(outcome)
    }

    pub fn reset(&mut self) {
        for outcome in &mut self.outcomes {
            outcome.mark(false);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.outcomes.iter().map(Outcome::to_entry).collect())
    }

    /// Applies a stored snapshot. Nothing is changed unless every entry matches
    /// the shape of the outcome it mirrors.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let entries = &snapshot.0;
        if entries.len() != self.outcomes.len() {
            return Err(SnapshotError::LengthMismatch {
                expected: self.outcomes.len(),
                found: entries.len(),
            });
        }

        for (index, (outcome, entry)) in self.outcomes.iter().zip(entries).enumerate() {
            let compatible = match (&outcome.kind, entry) {
                (OutcomeKind::Simple { .. }, SnapshotEntry::Simple(_)) => true,
                (OutcomeKind::Split { .. }, SnapshotEntry::Split(split)) => split.split,
                _ => false,
            };
            if !compatible {
                return Err(SnapshotError::ShapeMismatch { index });
            }
        }

        for (outcome, entry) in self.outcomes.iter_mut().zip(entries) {
            match (&mut outcome.kind, entry) {
                (OutcomeKind::Simple { chosen, .. }, SnapshotEntry::Simple(value)) => {
                    *chosen = *value
                }
                (OutcomeKind::Split { parts }, SnapshotEntry::Split(split)) => {
                    parts[0].chosen = split.parts[0];
                    parts[1].chosen = split.parts[1];
                }
                _ => {}
            }
        }
        Ok(())
    }
}

pub fn default_fruit_specs() -> Vec<OutcomeSpec> {
    let simple = |name: &str, color: &str, icon: &str| OutcomeSpec::Simple {
        name: name.to_string(),
        face: Face::flat(color, icon),
    };

    vec![
        simple("Strawberry", "#df2b2b", "🍓"),
        simple("Orange", "#fb8c00", "🍊"),
        simple("Lemon", "#f2ce24", "🍋"),
        simple("Lime", "#3fa64b", "🍋‍🟩"),
        simple("Blueberry", "#2060c9", "🫐"),
        simple("Grape", "#7b3bb6", "🍇"),
        simple("Kiwi", "#72b33f", "🥝"),
        simple("Watermelon", "#eb3a78", "🍉"),
        simple("Mango", "#ffb300", "🥭"),
        OutcomeSpec::Split {
            name: "Apple".to_string(),
            parts: [Face::flat("#d62828", "🍎"), Face::flat("#2aa74a", "🍏")],
        },
        simple("Coconut", "#7a4f2a", "🥥"),
        simple("Blackberry", "#23103e", "🖤🍇"),
    ]
}
