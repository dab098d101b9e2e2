use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub config_loaded: bool,
    pub ground_requested: bool,
    pub ground_ready: bool,
    pub ground_spawned: bool,
    pub models_requested: bool,
    pub models_placed: usize,
    pub models_total: usize,
}

impl LoadingProgress {
    pub fn all_models_placed(&self) -> bool {
        self.models_requested && self.models_placed >= self.models_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_placed_requires_request() {
        let mut progress = LoadingProgress::default();
        assert!(!progress.all_models_placed());

        progress.models_requested = true;
        progress.models_total = 2;
        progress.models_placed = 1;
        assert!(!progress.all_models_placed());

        progress.models_placed = 2;
        assert!(progress.all_models_placed());
    }
}
