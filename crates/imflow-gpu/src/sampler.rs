use imflow_core::{AddressMode, FilterMode, Sampler};

pub fn address_mode(mode: AddressMode) -> wgpu::AddressMode {
    match mode {
        AddressMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
        AddressMode::Repeat => wgpu::AddressMode::Repeat,
        AddressMode::MirrorRepeat => wgpu::AddressMode::MirrorRepeat,
    }
}

pub fn filter_mode(mode: FilterMode) -> wgpu::FilterMode {
    match mode {
        FilterMode::Nearest => wgpu::FilterMode::Nearest,
        FilterMode::Linear => wgpu::FilterMode::Linear,
    }
}

/// Build the GPU sampler that behaves like `sampler` does on the CPU.
/// Single mip level: mipmap filter is nearest and LOD pinned to 0.
pub fn create_sampler(device: &wgpu::Device, sampler: &Sampler) -> wgpu::Sampler {
    let filter = filter_mode(sampler.filter);
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("image_sampler"),
        address_mode_u: address_mode(sampler.address_mode_u),
        address_mode_v: address_mode(sampler.address_mode_v),
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: filter,
        min_filter: filter,
        mipmap_filter: wgpu::FilterMode::Nearest,
        lod_min_clamp: 0.0,
        lod_max_clamp: 0.0,
        ..Default::default()
    })
}
