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

//! End-to-end smoke tests against a real adapter. Ignored by default since
//! CI machines may not expose one.

use vesta_core::math::{Extent2D, Rgba, Rgba8};
use vesta_core::renderer::RenderDevice;

#[test]
#[ignore = "requires a GPU adapter"]
fn renders_a_frame_of_sprites() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut renderer = vesta_wgpu::init(640, 480).expect("device init");
    let texture = renderer
        .create_texture(
            Extent2D {
                width: 2,
                height: 2,
            },
            &[255u8; 16],
            Some("checker"),
        )
        .expect("texture");

    renderer.fill(Rgba::BLACK);
    renderer.begin_scene().expect("begin");
    renderer
        .draw_sprite(10, 10, 64, 64, 0.0, 0.0, 1.0, 1.0, texture, Rgba8::WHITE)
        .expect("sprite");
    renderer
        .draw_rectangle(100, 10, 40, 40, Rgba8::new(255, 0, 0, 128), false)
        .expect("rectangle");
    renderer
        .draw_rectangle(100, 60, 40, 40, Rgba8::WHITE, true)
        .expect("outline");
    renderer.end_scene().expect("end");
    renderer.flush().expect("flush");
}

#[test]
#[ignore = "requires a GPU adapter"]
fn survives_a_resize_between_scenes() {
    let mut renderer = vesta_wgpu::init(320, 240).expect("device init");

    renderer.begin_scene().expect("begin");
    renderer
        .draw_rectangle(0, 0, 32, 32, Rgba8::WHITE, false)
        .expect("rectangle");
    renderer.end_scene().expect("end");

    renderer
        .change_size(Extent2D {
            width: 640,
            height: 480,
        })
        .expect("resize");

    renderer.begin_scene().expect("begin");
    renderer
        .draw_rectangle(0, 0, 32, 32, Rgba8::WHITE, false)
        .expect("rectangle");
    renderer.end_scene().expect("end");
    renderer.flush().expect("flush");
}
