/// Maximum point lights uploaded per frame
pub const MAX_LIGHTS: usize = 4;

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 3],
    pub _pad: f32,
}

/// Per-draw object data, bound with a dynamic offset
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// Smoke material uniform block (matches `Smoke` in smoke.wgsl)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SmokeUniform {
    pub base_color: [f32; 3],
    pub time: f32,
    pub opacity: f32,
    pub _pad: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightData {
    pub position: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    pub range: f32,
}

/// All lights for one frame
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub lights: [LightData; MAX_LIGHTS],
    pub count: u32,
    pub ambient: f32,
    pub _pad: [f32; 2],
}

impl Default for LightsUniform {
    fn default() -> Self {
        Self {
            lights: [LightData::default(); MAX_LIGHTS],
            count: 0,
            ambient: 0.15,
            _pad: [0.0; 2],
        }
    }
}

/// Interleaved mesh vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
        assert_eq!(std::mem::size_of::<ModelUniform>(), 144);
        assert_eq!(std::mem::size_of::<SmokeUniform>(), 32);
        assert_eq!(std::mem::size_of::<LightData>(), 32);
        assert_eq!(std::mem::size_of::<LightsUniform>(), 32 * MAX_LIGHTS + 16);
    }

    #[test]
    fn vertex_stride_is_six_floats() {
        assert_eq!(Vertex::layout().array_stride, 24);
    }
}
