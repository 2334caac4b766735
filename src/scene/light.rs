//! Light description.

use serde::{Deserialize, Serialize};

use crate::hx::ObjectType;
use crate::util::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightType {
    Directional,
    #[default]
    Point,
    Spot,
}

impl LightType {
    /// Record type a light of this kind is written as.
    pub const fn object_type(self) -> ObjectType {
        match self {
            Self::Directional => ObjectType::DirectionalLight,
            Self::Point => ObjectType::PointLight,
            Self::Spot => ObjectType::SpotLight,
        }
    }
}

/// Light parameters. Spot angles are in radians and only written for spot lights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    pub light_type: LightType,
    pub color: Vec3,
    pub intensity: f32,
    /// Attenuation radius for point and spot lights.
    pub radius: f32,
    pub cast_shadows: bool,
    pub spot_inner_angle: f32,
    pub spot_outer_angle: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            light_type: LightType::Point,
            color: Vec3::ONE,
            intensity: 1.0,
            radius: 100.0,
            cast_shadows: false,
            spot_inner_angle: 0.4,
            spot_outer_angle: 0.5,
        }
    }
}

impl Light {
    pub fn new(light_type: LightType) -> Self {
        Self { light_type, ..Default::default() }
    }

    pub fn directional() -> Self {
        Self::new(LightType::Directional)
    }

    pub fn point() -> Self {
        Self::new(LightType::Point)
    }

    pub fn spot(inner: f32, outer: f32) -> Self {
        Self {
            light_type: LightType::Spot,
            spot_inner_angle: inner,
            spot_outer_angle: outer,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Vec3, intensity: f32) -> Self {
        self.color = color;
        self.intensity = intensity;
        self
    }

    pub fn with_shadows(mut self, cast: bool) -> Self {
        self.cast_shadows = cast;
        self
    }

    /// Directional lights have no position-based falloff.
    #[inline]
    pub fn has_radius(&self) -> bool {
        self.light_type != LightType::Directional
    }
}
