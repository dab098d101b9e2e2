mod engine;

use engine::core::engine::SceneEngine;

fn main() {
    let engine = SceneEngine::new();

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            engine.run();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        engine.run();
    }
}
