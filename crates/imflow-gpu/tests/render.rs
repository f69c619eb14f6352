mod common;

use glam::{UVec2, Vec4};
use imflow_core::presets::Preset;
use imflow_core::{AddressMode, FilterMode, Sampler, TexelBuffer, TransformUniform};
use imflow_gpu::ImagePass;

use common::{context, max_diff, pattern, reference, render, upload, FORMAT};

fn nearest(mode: AddressMode) -> Sampler {
    Sampler::new(mode, FilterMode::Nearest)
}

#[test]
fn matching_resolution_reproduces_texture() {
    let Some(ctx) = context() else { return };
    let pass = ImagePass::new(&ctx.device, FORMAT);
    let image = pattern(4, 4);
    let texture = upload(&ctx, &image);
    let uniforms = TransformUniform::identity(4, 4);
    let sampler = nearest(AddressMode::ClampToEdge);

    let gpu = render(&ctx, &pass, &texture, &uniforms, &sampler, UVec2::new(4, 4));
    assert_eq!(gpu, image.to_rgba8());
}

#[test]
fn smaller_target_addresses_top_left_region() {
    let Some(ctx) = context() else { return };
    let pass = ImagePass::new(&ctx.device, FORMAT);
    let image = pattern(8, 8);
    let texture = upload(&ctx, &image);
    let uniforms = TransformUniform::identity(4, 4);
    let sampler = nearest(AddressMode::ClampToEdge);
    let target = UVec2::new(4, 4);

    let gpu = render(&ctx, &pass, &texture, &uniforms, &sampler, target);
    let cpu = reference(&image, &uniforms, &sampler, target);
    assert_eq!(gpu, cpu);
}

#[test]
fn larger_target_follows_sampler_addressing() {
    let Some(ctx) = context() else { return };
    let pass = ImagePass::new(&ctx.device, FORMAT);
    let image = pattern(4, 4);
    let texture = upload(&ctx, &image);
    // scale (1.5, 2.5): pixel centers land mid-texel, past the right and bottom edges
    let uniforms = TransformUniform::identity(6, 10);
    let target = UVec2::new(4, 4);

    for mode in [AddressMode::Repeat, AddressMode::ClampToEdge, AddressMode::MirrorRepeat] {
        let sampler = nearest(mode);
        let gpu = render(&ctx, &pass, &texture, &uniforms, &sampler, target);
        let cpu = reference(&image, &uniforms, &sampler, target);
        assert_eq!(gpu, cpu, "{mode:?}");
    }
}

#[test]
fn viewer_preset_matches_reference_within_rounding() {
    let Some(ctx) = context() else { return };
    let pass = ImagePass::new(&ctx.device, FORMAT);
    let image = pattern(6, 5);
    let texture = upload(&ctx, &image);
    let uniforms = TransformUniform::identity(3, 5);
    let sampler = Preset::Viewer.sampler();
    let target = UVec2::new(6, 5);

    let gpu = render(&ctx, &pass, &texture, &uniforms, &sampler, target);
    let cpu = reference(&image, &uniforms, &sampler, target);
    // hardware bilinear weights carry only a few bits of sub-texel precision
    assert!(max_diff(&gpu, &cpu) <= 3, "max diff {}", max_diff(&gpu, &cpu));
}

#[test]
fn rebinding_smaller_texture_is_picked_up_without_new_uniforms() {
    let Some(ctx) = context() else { return };
    let pass = ImagePass::new(&ctx.device, FORMAT);
    let uniforms = TransformUniform::identity(4, 4);
    let sampler = nearest(AddressMode::ClampToEdge);
    let target = UVec2::new(4, 4);

    let large = pattern(8, 8);
    let first = render(&ctx, &pass, &upload(&ctx, &large), &uniforms, &sampler, target);
    assert_eq!(first, reference(&large, &uniforms, &sampler, target));

    // same uniform block, different texture size: scale must follow
    let small = pattern(4, 4);
    let second = render(&ctx, &pass, &upload(&ctx, &small), &uniforms, &sampler, target);
    assert_eq!(second, small.to_rgba8());
}

#[test]
fn image_in_corner_of_canvas_fills_target() {
    let Some(ctx) = context() else { return };
    let pass = ImagePass::new(&ctx.device, FORMAT);

    let photo = pattern(3, 2);
    let mut canvas = TexelBuffer::filled(8, 8, Vec4::new(1.0, 0.0, 1.0, 1.0)).unwrap();
    canvas.write_region(UVec2::ZERO, &photo).unwrap();
    let texture = upload(&ctx, &canvas);

    let uniforms = TransformUniform::identity(3, 2);
    let sampler = nearest(AddressMode::ClampToEdge);
    let gpu = render(&ctx, &pass, &texture, &uniforms, &sampler, UVec2::new(3, 2));
    assert_eq!(gpu, photo.to_rgba8());
}
