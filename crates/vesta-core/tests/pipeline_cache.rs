// Copyright 2026 the Vesta authors
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

//! Pipeline cache behavior observed through the frame driver.

mod common;

use std::borrow::Cow;

use common::renderer;
use vesta_core::math::{Extent2D, Rgba8};
use vesta_core::renderer::api::{ShaderModuleDescriptor, ShaderSourceData};
use vesta_core::renderer::RenderDevice;

const WHITE: Rgba8 = Rgba8::WHITE;

#[test]
fn repeated_state_reuses_the_cached_pipeline() {
    let mut r = renderer(800, 600);
    let tex = r
        .create_texture(
            Extent2D {
                width: 2,
                height: 2,
            },
            &[0u8; 16],
            None,
        )
        .unwrap();

    for _ in 0..3 {
        r.begin_scene().unwrap();
        r.draw_sprite(0, 0, 16, 16, 0.0, 0.0, 1.0, 1.0, tex, WHITE)
            .unwrap();
        r.end_scene().unwrap();
    }

    assert_eq!(r.device().pipelines_created(), 1);
    assert_eq!(r.pipelines_created(), 1);
}

#[test]
fn distinct_states_build_distinct_pipelines() {
    let mut r = renderer(800, 600);
    let tex = r
        .create_texture(
            Extent2D {
                width: 2,
                height: 2,
            },
            &[0u8; 16],
            None,
        )
        .unwrap();

    r.begin_scene().unwrap();
    r.draw_sprite(0, 0, 16, 16, 0.0, 0.0, 1.0, 1.0, tex, WHITE)
        .unwrap();
    r.draw_rectangle(0, 0, 8, 8, WHITE, false).unwrap();
    r.draw_rectangle(0, 0, 8, 8, WHITE, true).unwrap();
    r.end_scene().unwrap();

    // Sprite, solid rectangle and outline rectangle differ in format or
    // topology, so each gets its own pipeline.
    assert_eq!(r.device().pipelines_created(), 3);
}

#[test]
fn change_size_discards_cached_pipelines() {
    let mut r = renderer(800, 600);
    let tex = r
        .create_texture(
            Extent2D {
                width: 2,
                height: 2,
            },
            &[0u8; 16],
            None,
        )
        .unwrap();

    r.begin_scene().unwrap();
    r.draw_sprite(0, 0, 16, 16, 0.0, 0.0, 1.0, 1.0, tex, WHITE)
        .unwrap();
    r.end_scene().unwrap();
    assert_eq!(r.device().pipelines_alive(), 1);

    r.change_size(Extent2D {
        width: 1024,
        height: 768,
    })
    .unwrap();
    assert_eq!(r.device().pipelines_alive(), 0);

    // The same state is rebuilt on the next scene.
    r.begin_scene().unwrap();
    r.draw_sprite(0, 0, 16, 16, 0.0, 0.0, 1.0, 1.0, tex, WHITE)
        .unwrap();
    r.end_scene().unwrap();
    assert_eq!(r.device().pipelines_created(), 2);
    assert_eq!(r.device().pipelines_alive(), 1);
}

#[test]
fn failed_pipeline_creation_leaves_the_cache_usable() {
    let mut r = renderer(800, 600);
    let tex = r
        .create_texture(
            Extent2D {
                width: 2,
                height: 2,
            },
            &[0u8; 16],
            None,
        )
        .unwrap();

    r.device().fail_next_pipeline();
    r.begin_scene().unwrap();
    r.draw_sprite(0, 0, 16, 16, 0.0, 0.0, 1.0, 1.0, tex, WHITE)
        .unwrap();
    assert!(r.end_scene().is_err());

    // Nothing was cached for the failed key; the next scene builds it.
    r.begin_scene().unwrap();
    r.draw_sprite(0, 0, 16, 16, 0.0, 0.0, 1.0, 1.0, tex, WHITE)
        .unwrap();
    r.end_scene().unwrap();
    assert_eq!(r.device().pipelines_created(), 1);
}

#[test]
fn failed_pipeline_destroy_does_not_stop_the_sweep() {
    let mut r = renderer(800, 600);
    let tex = r
        .create_texture(
            Extent2D {
                width: 2,
                height: 2,
            },
            &[0u8; 16],
            None,
        )
        .unwrap();

    r.begin_scene().unwrap();
    r.draw_sprite(0, 0, 16, 16, 0.0, 0.0, 1.0, 1.0, tex, WHITE)
        .unwrap();
    r.draw_rectangle(0, 0, 8, 8, WHITE, false).unwrap();
    r.draw_rectangle(0, 0, 8, 8, WHITE, true).unwrap();
    r.end_scene().unwrap();
    assert_eq!(r.device().pipelines_alive(), 3);

    // The first destroy fails; the other two pipelines must still be
    // destroyed before the error surfaces.
    r.device().fail_next_pipeline_destroy();
    assert!(r
        .change_size(Extent2D {
            width: 1024,
            height: 768,
        })
        .is_err());
    assert_eq!(r.device().pipelines_alive(), 1);
}

#[test]
fn unregistered_shader_name_fails_submission() {
    let mut r = vesta_core::BatchRenderer::new(common::RecordingDevice::new(), 800, 600);

    r.begin_scene().unwrap();
    r.draw_rectangle(0, 0, 8, 8, WHITE, false).unwrap();
    assert!(r.end_scene().is_err());
}

#[test]
fn shader_reregistration_destroys_the_displaced_module() {
    let mut r = renderer(800, 600);
    let desc = ShaderModuleDescriptor {
        label: Some("sprite"),
        source: ShaderSourceData::Wgsl(Cow::Borrowed("")),
        vs_entry: "vs_main",
        fs_entry: "fs_main",
    };

    assert!(r.device().shaders_destroyed().is_empty());
    r.register_shader("sprite", &desc).unwrap();
    assert_eq!(r.device().shaders_destroyed().len(), 1);
}
