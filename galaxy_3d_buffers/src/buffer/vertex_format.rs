/// Vertex format descriptor.
///
/// A VertexFormat is an ordered list of named attributes packed tightly in
/// declaration order. Its only contract with `VertexBuffer` is the stride:
/// the byte size of one vertex.

use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::gfx_error;

// ===== ATTRIBUTE FORMAT =====

/// Data type and component count of one vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum AttributeFormat {
    // Float formats
    R32_SFLOAT,          // float (4 bytes)
    R32G32_SFLOAT,       // vec2 (8 bytes)
    R32G32B32_SFLOAT,    // vec3 (12 bytes)
    R32G32B32A32_SFLOAT, // vec4 (16 bytes)

    // Integer formats (signed)
    R32_SINT,
    R32G32_SINT,
    R32G32B32_SINT,
    R32G32B32A32_SINT,
    R16_SINT,
    R16G16_SINT,
    R16G16B16A16_SINT,
    R8_SINT,
    R8G8_SINT,
    R8G8B8A8_SINT,

    // Integer formats (unsigned)
    R32_UINT,
    R32G32_UINT,
    R32G32B32_UINT,
    R32G32B32A32_UINT,
    R16_UINT,
    R16G16_UINT,
    R16G16B16A16_UINT,
    R8_UINT,
    R8G8_UINT,
    R8G8B8A8_UINT,
}

impl AttributeFormat {
    /// Number of components (1 to 4)
    pub fn component_count(&self) -> u32 {
        use AttributeFormat::*;
        match self {
            R32_SFLOAT | R32_SINT | R32_UINT | R16_SINT | R16_UINT | R8_SINT | R8_UINT => 1,
            R32G32_SFLOAT | R32G32_SINT | R32G32_UINT | R16G16_SINT | R16G16_UINT
                | R8G8_SINT | R8G8_UINT => 2,
            R32G32B32_SFLOAT | R32G32B32_SINT | R32G32B32_UINT => 3,
            R32G32B32A32_SFLOAT | R32G32B32A32_SINT | R32G32B32A32_UINT
                | R16G16B16A16_SINT | R16G16B16A16_UINT | R8G8B8A8_SINT | R8G8B8A8_UINT => 4,
        }
    }

    /// Size in bytes of one component
    pub fn component_size_bytes(&self) -> u32 {
        use AttributeFormat::*;
        match self {
            R32_SFLOAT | R32G32_SFLOAT | R32G32B32_SFLOAT | R32G32B32A32_SFLOAT
                | R32_SINT | R32G32_SINT | R32G32B32_SINT | R32G32B32A32_SINT
                | R32_UINT | R32G32_UINT | R32G32B32_UINT | R32G32B32A32_UINT => 4,
            R16_SINT | R16G16_SINT | R16G16B16A16_SINT
                | R16_UINT | R16G16_UINT | R16G16B16A16_UINT => 2,
            R8_SINT | R8G8_SINT | R8G8B8A8_SINT
                | R8_UINT | R8G8_UINT | R8G8B8A8_UINT => 1,
        }
    }

    /// Size in bytes of the whole attribute
    pub fn size_bytes(&self) -> u32 {
        self.component_count() * self.component_size_bytes()
    }
}

// ===== ATTRIBUTES =====

/// Attribute declaration used to build a VertexFormat
#[derive(Debug, Clone)]
pub struct AttributeDesc {
    pub name: String,
    pub format: AttributeFormat,
}

impl AttributeDesc {
    pub fn new(name: impl Into<String>, format: AttributeFormat) -> Self {
        Self { name: name.into(), format }
    }
}

/// Attribute placed inside a vertex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: String,
    pub format: AttributeFormat,
    /// Offset in bytes from the start of the vertex
    pub offset: u32,
}

// ===== VERTEX FORMAT =====

/// Packed vertex layout
#[derive(Debug, Clone)]
pub struct VertexFormat {
    attributes: Vec<VertexAttribute>,
    attribute_names: FxHashMap<String, usize>,
    stride: u32,
}

impl VertexFormat {
    /// Build a format from attribute declarations
    ///
    /// # Errors
    ///
    /// `InvalidResource` if the list is empty or declares a name twice.
    pub fn new(attributes: Vec<AttributeDesc>) -> Result<Self> {
        if attributes.is_empty() {
            gfx_error!("galaxy3d::VertexFormat", "VertexFormat must have at least one attribute");
            return Err(Error::InvalidResource(
                "VertexFormat must have at least one attribute".to_string()
            ));
        }

        let mut placed = Vec::with_capacity(attributes.len());
        let mut attribute_names = FxHashMap::default();
        let mut offset: u32 = 0;

        for (index, desc) in attributes.into_iter().enumerate() {
            if attribute_names.insert(desc.name.clone(), index).is_some() {
                gfx_error!("galaxy3d::VertexFormat", "Duplicate attribute name '{}'", desc.name);
                return Err(Error::InvalidResource(
                    format!("Duplicate attribute name '{}'", desc.name)
                ));
            }
            let size = desc.format.size_bytes();
            placed.push(VertexAttribute {
                name: desc.name,
                format: desc.format,
                offset,
            });
            offset += size;
        }

        Ok(Self {
            attributes: placed,
            attribute_names,
            stride: offset,
        })
    }

    /// Format known only by its stride (no attribute metadata)
    pub fn from_stride(stride: u32) -> Self {
        Self {
            attributes: Vec::new(),
            attribute_names: FxHashMap::default(),
            stride,
        }
    }

    /// Byte size of one vertex
    pub fn stride(&self) -> u32 { self.stride }

    /// Attributes in declaration order
    pub fn attributes(&self) -> &[VertexAttribute] { &self.attributes }

    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&VertexAttribute> {
        self.attribute_names.get(name).map(|&index| &self.attributes[index])
    }
}

#[cfg(test)]
#[path = "vertex_format_tests.rs"]
mod tests;
