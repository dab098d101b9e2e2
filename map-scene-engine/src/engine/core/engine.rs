use bevy::prelude::*;

use crate::engine::core::app_setup::create_app;

/// Owns the Bevy application for the lifetime of the scene.
///
/// `new` builds the app with every plugin and system registered, `run`
/// hands control to the render loop. Dropping an engine that never ran
/// releases the app and everything it loaded.
pub struct SceneEngine {
    app: App,
}

impl SceneEngine {
    pub fn new() -> Self {
        Self { app: create_app() }
    }

    pub fn run(mut self) -> AppExit {
        self.app.run()
    }
}

impl Default for SceneEngine {
    fn default() -> Self {
        Self::new()
    }
}
