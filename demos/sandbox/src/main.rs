// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Strata Sandbox
// Builds a small scene and a small network, then prints what the render loop
// would query from them.
//
// Usage: sandbox [scene_config.ron]

use std::sync::Arc;

use anyhow::{Context, Result};
use glam::{Quat, Vec3};
use strata_rtgi::{Activation, Connection, Layer, Model, Unit};
use strata_scene::{
    CmptCamera, CmptLight, CmptTransform, InfiniteAreaLight, Light, PointLight, SObj, Scene,
    SceneConfig, SpotLight,
};

fn load_config() -> Result<SceneConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read scene config '{path}'"))?;
            Ok(SceneConfig::from_ron_str(&source)?)
        }
        None => Ok(SceneConfig::named("sandbox")),
    }
}

fn build_scene(config: SceneConfig) -> Result<Scene> {
    let root = SObj::new(None, "root");
    let scene = Scene::with_config(config, Some(Arc::clone(&root)));
    let guard = scene.lock_write();

    let camera = SObj::new(Some(&root), "camera");
    CmptTransform::from_position(&camera, Vec3::new(0.0, 1.5, 6.0))?;
    CmptCamera::with_defaults(&camera)?;

    let lamp = SObj::new(Some(&root), "lamp");
    CmptTransform::from_position(&lamp, Vec3::new(2.0, 4.0, 0.0))?;
    CmptLight::new(&lamp, Light::Point(PointLight::default()))?;

    let spot = SObj::new(Some(&lamp), "spot");
    CmptTransform::new(
        &spot,
        Vec3::new(0.0, -1.0, 0.0),
        Quat::from_rotation_x(0.3),
        Vec3::ONE,
    )?;
    CmptLight::new(&spot, Light::Spot(SpotLight::default()))?;

    let sky = SObj::new(Some(&root), "sky");
    CmptLight::new(&sky, Light::InfiniteArea(InfiniteAreaLight::default()))?;

    drop(guard);
    Ok(scene)
}

fn build_model() -> Result<Arc<Model>> {
    let model = Model::new("radiance");
    let hidden = Layer::new(Some(&model), 3, Connection::Dense, Activation::ReLU);
    hidden.add_unit(&Unit::new(vec![0.5, -0.25, 1.0], 0.1))?;
    hidden.add_unit(&Unit::new(vec![-1.0, 0.75, 0.5], 0.0))?;
    let output = Layer::new(Some(&model), 2, Connection::Dense, Activation::Tanh);
    output.add_unit(&Unit::new(vec![1.0, 1.0], -0.5))?;
    Ok(model)
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let scene = build_scene(load_config()?)?;
    let count = scene.gen_id()?;
    log::info!("Scene '{}': {count} objects", scene.name());

    if let Some(root) = scene.root() {
        for sobj in root.descend() {
            log::info!("  #{} {}", scene.get_id(&sobj), sobj.name());
        }
    }

    if let Some(camera) = scene.get_cmpt_camera() {
        log::info!("Camera at {}", camera.world_position());
    }
    for light in scene.get_cmpt_lights() {
        let light_data = light.light();
        if light_data.is_infinite() {
            log::info!("Infinite light, radiance {}", light_data.radiance());
        } else {
            log::info!(
                "Light at {}, radiance {}",
                light.world_position(),
                light_data.radiance()
            );
        }
    }
    if let Some(env) = scene.get_infinite_area_light() {
        log::info!("Environment intensity {}", env.intensity);
    }

    let model = build_model()?;
    log::info!(
        "Model '{}' on [1, 0, 0]: {:?}",
        model.name(),
        model.eval(&[1.0, 0.0, 0.0])
    );
    println!("{}", model.gen_func()?);

    Ok(())
}
