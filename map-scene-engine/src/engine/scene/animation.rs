use bevy::prelude::*;
use constants::models::ANIMATION_FRAME_RATE;

/// Named frame range of an imported animation clip.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSequence {
    pub name: String,
    pub from: f32,
    pub to: f32,
}

impl AnimationSequence {
    pub fn from_duration(name: impl Into<String>, duration_secs: f32) -> Self {
        Self {
            name: name.into(),
            from: 0.0,
            to: (duration_secs * ANIMATION_FRAME_RATE).round(),
        }
    }
}

/// Every clip shipped with a model, sorted by name.
///
/// Descriptive only: selected geometry is detached from its skeleton, so no
/// clip is ever played. The catalogue records the frame ranges and the pose
/// the model was authored to rest in, for logging and inspection.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct AnimationCatalog {
    sequences: Vec<AnimationSequence>,
    /// Clip whose first frame the model is recorded as resting in.
    pub pose: Option<String>,
}

impl AnimationCatalog {
    pub fn from_clips<'a>(clips: impl IntoIterator<Item = (&'a str, f32)>) -> Self {
        let mut sequences: Vec<AnimationSequence> = clips
            .into_iter()
            .map(|(name, duration)| AnimationSequence::from_duration(name, duration))
            .collect();
        sequences.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            sequences,
            pose: None,
        }
    }

    pub fn sequences(&self) -> &[AnimationSequence] {
        &self.sequences
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&AnimationSequence> {
        self.sequences.iter().find(|s| s.name == name)
    }

    /// Record `name` as the resting pose at its first frame.
    /// Returns that frame, or `None` if the model has no such clip.
    pub fn hold_pose(&mut self, name: &str) -> Option<f32> {
        let frame = self.find(name)?.from;
        self.pose = Some(name.to_string());
        Some(frame)
    }

    /// Log each sequence the way the importer reports them.
    pub fn log(&self, model: &str) {
        for sequence in &self.sequences {
            info!(
                "{model}: animation '{}' frames {}..{}",
                sequence.name, sequence.from, sequence.to
            );
        }
    }
}
