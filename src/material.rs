/// How a texture's stored values must be interpreted by the sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// Perceptual color meant for direct display; decoded to linear on sample
    Srgb,
    /// Data that is already linear (normals, roughness, occlusion)
    Linear,
}

/// Which material input a texture feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureRole {
    BaseColor,
    Emissive,
    Normal,
    MetallicRoughness,
    Occlusion,
}

impl TextureRole {
    /// Color-bearing inputs are sRGB, everything else is linear data
    pub const fn color_space(self) -> ColorSpace {
        match self {
            TextureRole::BaseColor | TextureRole::Emissive => ColorSpace::Srgb,
            TextureRole::Normal | TextureRole::MetallicRoughness | TextureRole::Occlusion => {
                ColorSpace::Linear
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureRef {
    pub role: TextureRole,
    pub image_index: usize,
    /// `None` until the asset has been prepared
    pub color_space: Option<ColorSpace>,
}

impl TextureRef {
    pub fn untagged(role: TextureRole, image_index: usize) -> Self {
        Self {
            role,
            image_index,
            color_space: None,
        }
    }
}

/// Surface material for the standard lit pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: Option<String>,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub textures: Vec<TextureRef>,
}

impl Material {
    pub fn color(rgb: [f32; 3]) -> Self {
        Self {
            name: None,
            base_color: [rgb[0], rgb[1], rgb[2], 1.0],
            metallic: 0.0,
            roughness: 0.8,
            textures: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Assigns every texture the color space its role requires
    pub fn tag_color_spaces(&mut self) {
        for texture in &mut self.textures {
            texture.color_space = Some(texture.role.color_space());
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::color([0.7, 0.7, 0.7])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_map_to_color_spaces() {
        assert_eq!(TextureRole::BaseColor.color_space(), ColorSpace::Srgb);
        assert_eq!(TextureRole::Emissive.color_space(), ColorSpace::Srgb);
        assert_eq!(TextureRole::Normal.color_space(), ColorSpace::Linear);
        assert_eq!(TextureRole::MetallicRoughness.color_space(), ColorSpace::Linear);
        assert_eq!(TextureRole::Occlusion.color_space(), ColorSpace::Linear);
    }

    #[test]
    fn test_tag_color_spaces() {
        let mut material = Material::default();
        material.textures.push(TextureRef::untagged(TextureRole::BaseColor, 0));
        material.textures.push(TextureRef::untagged(TextureRole::Normal, 1));
        material.tag_color_spaces();

        assert_eq!(material.textures[0].color_space, Some(ColorSpace::Srgb));
        assert_eq!(material.textures[1].color_space, Some(ColorSpace::Linear));
    }
}
