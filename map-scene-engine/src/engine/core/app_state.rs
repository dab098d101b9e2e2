use bevy::prelude::*;

use crate::engine::error::SceneError;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    LoadingConfig,
    BuildingScene,
    Running,
    /// Scene construction stopped on an error; whatever was built keeps rendering.
    Failed,
}

/// Single exit point for scene construction errors.
pub fn abort_scene_on_error(
    In(result): In<Result<(), SceneError>>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if let Err(err) = result {
        if *state.get() == AppState::Failed {
            return;
        }
        error!("Scene construction aborted: {err}");
        println!("→ Transitioning to Failed state");
        next_state.set(AppState::Failed);
    }
}

// Transition to BuildingScene state
pub fn transition_to_building_scene(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.config_loaded {
        println!("→ Transitioning to BuildingScene state");
        next_state.set(AppState::BuildingScene);
    }
}

// Final transition to running state, the ground texture may still be arriving
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.all_models_placed() {
        println!("→ All models placed, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<AppState>()
            .init_resource::<LoadingProgress>();
        app
    }

    fn state(app: &App) -> AppState {
        *app.world().resource::<State<AppState>>().get()
    }

    #[test]
    fn test_error_moves_to_failed() {
        let mut app = app();
        app.add_systems(
            Update,
            (|| -> Result<(), SceneError> { Err(SceneError::Precondition("no primary window")) })
                .pipe(abort_scene_on_error),
        );

        app.update();
        app.update();
        assert_eq!(state(&app), AppState::Failed);
    }

    #[test]
    fn test_ok_keeps_state() {
        let mut app = app();
        app.add_systems(
            Update,
            (|| -> Result<(), SceneError> { Ok(()) }).pipe(abort_scene_on_error),
        );

        app.update();
        app.update();
        assert_eq!(state(&app), AppState::LoadingConfig);
    }

    #[test]
    fn test_loading_progress_drives_transitions() {
        let mut app = app();
        app.add_systems(
            Update,
            (
                transition_to_building_scene.run_if(in_state(AppState::LoadingConfig)),
                transition_to_running.run_if(in_state(AppState::BuildingScene)),
            ),
        );

        app.update();
        assert_eq!(state(&app), AppState::LoadingConfig);

        app.world_mut().resource_mut::<LoadingProgress>().config_loaded = true;
        app.update();
        app.update();
        assert_eq!(state(&app), AppState::BuildingScene);

        {
            let mut progress = app.world_mut().resource_mut::<LoadingProgress>();
            progress.models_requested = true;
            progress.models_total = 1;
            progress.models_placed = 1;
        }
        app.update();
        app.update();
        assert_eq!(state(&app), AppState::Running);
    }
}
