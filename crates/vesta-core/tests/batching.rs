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

//! Batching semantics of the frame driver: merge rules, draw order and
//! scene bracketing.

mod common;

use common::{renderer, TraceEvent};
use vesta_core::math::{Extent2D, Mat4, Rect, Rgba8};
use vesta_core::renderer::api::TextureId;
use vesta_core::renderer::error::{RenderError, UsageError};
use vesta_core::renderer::RenderDevice;

const WHITE: Rgba8 = Rgba8::WHITE;

fn draw_indexed_events(trace: &[TraceEvent]) -> Vec<(std::ops::Range<u32>, i32)> {
    trace
        .iter()
        .filter_map(|event| match event {
            TraceEvent::DrawIndexed(range, base) => Some((range.clone(), *base)),
            _ => None,
        })
        .collect()
}

#[test]
fn identical_sprites_merge_into_one_command() {
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
    for _ in 0..5 {
        r.draw_sprite(0, 0, 16, 16, 0.0, 0.0, 1.0, 1.0, tex, WHITE)
            .unwrap();
    }
    r.end_scene().unwrap();

    let draws = draw_indexed_events(&r.device().trace());
    assert_eq!(draws, vec![(0..30, 0)]);
}

#[test]
fn texture_change_splits_the_batch_in_order() {
    let mut r = renderer(800, 600);
    let size = Extent2D {
        width: 2,
        height: 2,
    };
    let a = r.create_texture(size, &[0u8; 16], Some("a")).unwrap();
    let b = r.create_texture(size, &[0u8; 16], Some("b")).unwrap();

    // A, A, B must submit exactly two commands, A's first.
    r.begin_scene().unwrap();
    r.draw_sprite(0, 0, 16, 16, 0.0, 0.0, 1.0, 1.0, a, WHITE)
        .unwrap();
    r.draw_sprite(16, 0, 16, 16, 0.0, 0.0, 1.0, 1.0, a, WHITE)
        .unwrap();
    r.draw_sprite(32, 0, 16, 16, 0.0, 0.0, 1.0, 1.0, b, WHITE)
        .unwrap();
    r.end_scene().unwrap();

    let trace = r.device().trace();
    let draws = draw_indexed_events(&trace);
    assert_eq!(draws, vec![(0..12, 0), (12..18, 8)]);

    let bound: Vec<_> = trace
        .iter()
        .filter_map(|event| match event {
            TraceEvent::BindTextures(slots) => Some(slots[0]),
            _ => None,
        })
        .collect();
    assert_eq!(bound, vec![a, b]);
}

#[test]
fn blend_change_splits_every_draw() {
    let mut r = renderer(800, 600);
    let opaque = WHITE;
    let translucent = Rgba8::new(255, 255, 255, 128);

    r.begin_scene().unwrap();
    for i in 0..4 {
        let color = if i % 2 == 0 { opaque } else { translucent };
        r.draw_rectangle(i * 10, 0, 8, 8, color, false).unwrap();
    }
    r.end_scene().unwrap();

    assert_eq!(draw_indexed_events(&r.device().trace()).len(), 4);
}

#[test]
fn placeholder_texture_bound_for_empty_slots() {
    let mut r = renderer(800, 600);
    r.begin_scene().unwrap();
    r.draw_rectangle(0, 0, 8, 8, WHITE, false).unwrap();
    r.end_scene().unwrap();

    let placeholder = TextureId(0);
    assert!(r
        .device()
        .trace()
        .contains(&TraceEvent::BindTextures([placeholder, placeholder])));
}

#[test]
fn unchanged_draw_transform_keeps_the_batch_open() {
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
    let transform = Mat4::orthographic_screen(400, 300);

    r.begin_scene().unwrap();
    r.set_draw_transform(&transform);
    r.draw_sprite(0, 0, 16, 16, 0.0, 0.0, 1.0, 1.0, tex, WHITE)
        .unwrap();
    // Same value again: reference identity is preserved, no split.
    r.set_draw_transform(&transform);
    r.draw_sprite(16, 0, 16, 16, 0.0, 0.0, 1.0, 1.0, tex, WHITE)
        .unwrap();
    r.end_scene().unwrap();

    assert_eq!(draw_indexed_events(&r.device().trace()).len(), 1);
}

#[test]
fn flush_primitive_2d_forces_a_split() {
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
    r.flush_primitive_2d().unwrap();
    r.draw_sprite(16, 0, 16, 16, 0.0, 0.0, 1.0, 1.0, tex, WHITE)
        .unwrap();
    r.end_scene().unwrap();

    assert_eq!(draw_indexed_events(&r.device().trace()).len(), 2);
}

#[test]
fn outline_rectangle_uses_line_topology_indices() {
    let mut r = renderer(800, 600);
    r.begin_scene().unwrap();
    r.draw_rectangle(0, 0, 8, 8, WHITE, true).unwrap();
    r.end_scene().unwrap();

    // Four edges, two indices each.
    assert_eq!(draw_indexed_events(&r.device().trace()), vec![(0..8, 0)]);
}

#[test]
fn shared_buffer_growth_preserves_earlier_batches() {
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

    // 4096-byte initial vertex buffer holds 42 sprites at 96 bytes each;
    // 60 forces a growth mid-scene.
    r.begin_scene().unwrap();
    for i in 0..60 {
        r.draw_sprite(i, 0, 4, 4, 0.0, 0.0, 1.0, 1.0, tex, WHITE)
            .unwrap();
    }
    r.end_scene().unwrap();

    let draws = draw_indexed_events(&r.device().trace());
    assert_eq!(draws.len(), 2);
    let total: u32 = draws.iter().map(|(range, _)| range.end - range.start).sum();
    assert_eq!(total, 60 * 6);
    // The retired shared buffer was handed to the first command and
    // destroyed when the command list was cleared after submission.
    assert!(!r.device().buffers_destroyed().is_empty());
}

#[test]
fn oversized_batch_splits_before_u16_indices_wrap() {
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

    // Grow the shared buffers far enough that the next scene fits without
    // a growth-forced split (23000 sprites stage ~2.2 MB of vertices).
    r.begin_scene().unwrap();
    for i in 0..23000 {
        r.draw_sprite(i % 800, 0, 4, 4, 0.0, 0.0, 1.0, 1.0, tex, WHITE)
            .unwrap();
    }
    r.end_scene().unwrap();
    r.device().clear_trace();

    // 17000 identical sprites are 68000 vertices. One merged command
    // could not address them with u16 indices, so the batch must close at
    // 65536 vertices and the follow-on command rebase from there.
    r.begin_scene().unwrap();
    for i in 0..17000 {
        r.draw_sprite(i % 800, 0, 4, 4, 0.0, 0.0, 1.0, 1.0, tex, WHITE)
            .unwrap();
    }
    r.end_scene().unwrap();

    let draws = draw_indexed_events(&r.device().trace());
    assert_eq!(draws, vec![(0..98304, 0), (98304..102000, 65536)]);
}

#[test]
fn scene_bracketing_is_enforced() {
    let mut r = renderer(800, 600);
    assert!(matches!(
        r.end_scene(),
        Err(RenderError::Usage(UsageError::SceneNotActive))
    ));
    assert!(matches!(
        r.draw_rectangle(0, 0, 8, 8, WHITE, false),
        Err(RenderError::Usage(UsageError::SceneNotActive))
    ));

    r.begin_scene().unwrap();
    assert!(matches!(
        r.begin_scene(),
        Err(RenderError::Usage(UsageError::SceneAlreadyActive))
    ));
    r.end_scene().unwrap();
}

#[test]
fn change_size_mid_scene_fails_without_mutation() {
    let mut r = renderer(800, 600);
    r.begin_scene().unwrap();
    let before = r.extent();
    assert!(matches!(
        r.change_size(Extent2D {
            width: 1024,
            height: 768,
        }),
        Err(RenderError::Usage(UsageError::ResizeDuringScene))
    ));
    assert_eq!(r.extent(), before);
    r.end_scene().unwrap();

    r.change_size(Extent2D {
        width: 1024,
        height: 768,
    })
    .unwrap();
    assert_eq!(
        r.extent(),
        Extent2D {
            width: 1024,
            height: 768,
        }
    );
    assert_eq!(r.get_clip_rect(), Rect::from_extent(r.extent()));
}

#[test]
fn frame_state_is_captured_at_scene_begin() {
    let mut r = renderer(800, 600);
    let clip = Rect {
        xmin: 10,
        ymin: 10,
        xmax: 100,
        ymax: 100,
    };
    r.set_clip_rect(clip);
    r.set_gamma(2.2);
    r.begin_scene().unwrap();
    // Mid-scene changes only affect the next scene.
    r.set_clip_rect(Rect::from_extent(r.extent()));
    r.end_scene().unwrap();

    let frames = r.device().frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].clip, clip);
    assert_eq!(frames[0].gamma, 2.2);
}

#[test]
fn sprite2_dual_texture_path_binds_both_slots() {
    let mut r = renderer(800, 600);
    let size = Extent2D {
        width: 2,
        height: 2,
    };
    let a = r.create_texture(size, &[0u8; 16], None).unwrap();
    let b = r.create_texture(size, &[0u8; 16], None).unwrap();

    r.begin_scene().unwrap();
    r.draw_sprite2(
        0,
        0,
        16,
        16,
        0.0,
        0.0,
        1.0,
        1.0,
        0.0,
        0.0,
        1.0,
        1.0,
        a,
        b,
        WHITE,
        vesta_core::renderer::api::ColorMode::Add,
    )
    .unwrap();
    r.end_scene().unwrap();

    let trace = r.device().trace();
    assert!(trace.contains(&TraceEvent::BindTextures([a, b])));
    assert!(trace.iter().any(|event| matches!(
        event,
        TraceEvent::SetUniforms(
            _,
            vesta_core::renderer::api::FragmentMode::ModColorAddAlpha
        )
    )));
}
