//! Helix format constants and enumerations.

use serde::{Deserialize, Serialize};

/// Magic bytes at the start of a Helix file.
pub const HX_MAGIC: &[u8; 2] = b"HX";

/// Format version written into the header.
pub const HX_VERSION: &str = "0.1.0";

/// Zero tag closing a property list, and the object list.
pub const SENTINEL: u8 = 0;

/// Strings carry a `u16` byte length prefix.
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// Size of one link table record: `u32 from, u32 to, u8 kind`.
pub const LINK_RECORD_SIZE: usize = 9;

/// Alignment of array payloads when array padding is enabled.
pub const ARRAY_ALIGNMENT: u64 = 4;

/// Payload kind of a property. Each [`PropertyType`] is bound to exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    U8,
    U32,
    F32,
    Vec3,
    Vec4,
    F32Array,
    U32Array,
}

impl ValueKind {
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::U8 => "uint8",
            Self::U32 => "uint32",
            Self::F32 => "float32",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::F32Array => "float32[]",
            Self::U32Array => "uint32[]",
        }
    }
}

macro_rules! u8_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($(#[$vmeta:meta])* $variant:ident = $value:literal,)+ }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            #[inline]
            pub const fn as_u8(self) -> u8 {
                self as u8
            }

            /// Decode from the wire byte; `None` for values outside the enumeration.
            pub const fn from_u8(value: u8) -> Option<Self> {
                match value {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

u8_enum! {
    /// Type tag opening an object record. Zero is reserved for the list sentinel.
    pub enum ObjectType {
        Scene = 1,
        SceneNode = 2,
        ModelInstance = 3,
        Mesh = 4,
        Material = 5,
        Texture = 6,
        DirectionalLight = 7,
        PointLight = 8,
        SpotLight = 9,
    }
}

u8_enum! {
    /// Property tags. Zero is reserved for the list sentinel.
    pub enum PropertyType {
        Version = 1,
        Generator = 2,
        PadArrays = 3,
        DefaultSceneIndex = 4,
        LightingMode = 5,

        Name = 10,
        Url = 11,

        Position = 20,
        Rotation = 21,
        Scale = 22,

        Color = 30,
        Intensity = 31,
        Radius = 32,
        CastShadows = 33,
        SpotInnerAngle = 34,
        SpotOuterAngle = 35,

        LightingModel = 40,
        Roughness = 41,
        Metallicness = 42,
        AlphaThreshold = 43,

        VertexPositions = 50,
        VertexNormals = 51,
        VertexUvs = 52,
        Indices = 53,
        NumVertices = 54,

        AmbientColor = 60,
    }
}

impl PropertyType {
    /// The payload kind this tag is written with.
    pub const fn value_kind(self) -> ValueKind {
        match self {
            Self::Version | Self::Generator | Self::Name | Self::Url => ValueKind::String,
            Self::PadArrays
            | Self::DefaultSceneIndex
            | Self::LightingMode
            | Self::CastShadows
            | Self::LightingModel => ValueKind::U8,
            Self::NumVertices => ValueKind::U32,
            Self::Intensity
            | Self::Radius
            | Self::SpotInnerAngle
            | Self::SpotOuterAngle
            | Self::Roughness
            | Self::Metallicness
            | Self::AlphaThreshold => ValueKind::F32,
            Self::Position | Self::Scale | Self::Color | Self::AmbientColor => ValueKind::Vec3,
            Self::Rotation => ValueKind::Vec4,
            Self::VertexPositions | Self::VertexNormals | Self::VertexUvs => ValueKind::F32Array,
            Self::Indices => ValueKind::U32Array,
        }
    }
}

u8_enum! {
    /// Relation carried by a link record.
    pub enum LinkKind {
        /// Scene hierarchy, or a plain reference (instance to mesh, instance to material).
        Hierarchy = 0,
        /// Group instance to one of its member objects.
        Proxied = 1,
        /// Material to its color map texture.
        ColorMap = 2,
        /// Material to its normal map texture.
        NormalMap = 3,
        /// Material to its specular map texture.
        SpecularMap = 4,
    }
}

u8_enum! {
    /// Scene-wide lighting mode stored in the header.
    pub enum LightingMode {
        Fixed = 0,
        Dynamic = 1,
    }
}

u8_enum! {
    /// Per-material shading model.
    pub enum LightingModel {
        Unlit = 0,
        BlinnPhong = 1,
        Ggx = 2,
    }
}

impl Default for LightingMode {
    fn default() -> Self {
        Self::Fixed
    }
}

impl Default for LightingModel {
    fn default() -> Self {
        Self::Ggx
    }
}

/// Number of zero bytes needed to bring `pos` to the array alignment.
#[inline]
pub const fn array_padding(pos: u64) -> u64 {
    (ARRAY_ALIGNMENT - pos % ARRAY_ALIGNMENT) % ARRAY_ALIGNMENT
}
