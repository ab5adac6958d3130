/// Scalar type of one vertex attribute component.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ComponentType {
    F32,
    U32,
    U8,
}

/// Per-type facts needed to describe an attribute to the driver.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ComponentInfo {
    pub gl_enum: u32,
    pub size: u32,
    /// Default normalization when the type is pushed without an override.
    pub normalized: bool,
}

impl ComponentType {
    /// Lookup table for every supported component type.
    ///
    /// `U32` defaults to normalized while `F32` and `U8` do not. Integer colors
    /// packed as `u32` rely on this, so the asymmetry is kept.
    #[inline]
    pub const fn info(self) -> ComponentInfo {
        match self {
            ComponentType::F32 => ComponentInfo {
                gl_enum: glow::FLOAT,
                size: 4,
                normalized: false,
            },
            ComponentType::U32 => ComponentInfo {
                gl_enum: glow::UNSIGNED_INT,
                size: 4,
                normalized: true,
            },
            ComponentType::U8 => ComponentInfo {
                gl_enum: glow::UNSIGNED_BYTE,
                size: 1,
                normalized: false,
            },
        }
    }

    #[inline]
    pub const fn size(self) -> u32 {
        self.info().size
    }
}

/// One attribute of a vertex record.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexBufferElement {
    pub ty: ComponentType,
    pub count: u32,
    pub normalized: bool,
}

impl VertexBufferElement {
    /// Byte width of this attribute within one vertex.
    #[inline]
    pub const fn size(&self) -> u32 {
        self.count * self.ty.size()
    }
}

/// Ordered description of how one vertex record is laid out in a buffer.
///
/// Elements must be pushed in the order the vertex shader declares its inputs;
/// the n-th element feeds attribute slot n. `stride` always equals the sum of
/// every element's size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBufferLayout {
    elements: Vec<VertexBufferElement>,
    stride: u32,
}

impl VertexBufferLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an attribute of `count` components using the type's default normalization.
    pub fn push(&mut self, ty: ComponentType, count: u32) -> &mut Self {
        self.push_with(ty, count, ty.info().normalized)
    }

    /// Appends an attribute with an explicit normalization flag.
    pub fn push_with(&mut self, ty: ComponentType, count: u32, normalized: bool) -> &mut Self {
        debug_assert!(count > 0, "vertex attribute with zero components");

        let element = VertexBufferElement { ty, count, normalized };
        self.stride += element.size();
        self.elements.push(element);
        self
    }

    #[inline]
    pub fn push_f32(&mut self, count: u32) -> &mut Self {
        self.push(ComponentType::F32, count)
    }

    #[inline]
    pub fn push_u32(&mut self, count: u32) -> &mut Self {
        self.push(ComponentType::U32, count)
    }

    #[inline]
    pub fn push_u8(&mut self, count: u32) -> &mut Self {
        self.push(ComponentType::U8, count)
    }

    #[inline]
    pub fn elements(&self) -> &[VertexBufferElement] {
        &self.elements
    }

    /// Byte distance between consecutive vertices.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Elements paired with their byte offset inside the vertex record.
    pub fn attributes(&self) -> impl Iterator<Item = (&VertexBufferElement, u32)> + '_ {
        self.elements.iter().scan(0u32, |offset, element| {
            let at = *offset;
            *offset += element.size();
            Some((element, at))
        })
    }
}
