//! Brush parameter store
//!
//! Every brush carries one [`Setting`] per [`SettingId`]. A setting has a base
//! value and, for each [`InputId`], an optional [`ResponseCurve`] whose output
//! is added to the base value when the setting is evaluated.

use serde::{Deserialize, Serialize};

use crate::error::BrushError;
use crate::mapping::ResponseCurve;

macro_rules! indexed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $err:ident { $($(#[$vmeta:meta])* $variant:ident,)+ }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// All variants in index order
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Number of variants
            pub const COUNT: usize = Self::ALL.len();

            #[inline]
            pub fn index(self) -> usize {
                self as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = BrushError;

            fn try_from(index: usize) -> Result<Self, Self::Error> {
                Self::ALL
                    .get(index)
                    .copied()
                    .ok_or(BrushError::$err(index))
            }
        }
    };
}

indexed_enum! {
    /// Tunable brush parameters
    pub enum SettingId: UnknownSetting {
        /// Natural log of the basic dab radius
        RadiusLogarithmic,
        /// Base opacity
        Opaque,
        /// How strongly pressure scales opacity (0 = not at all, 1 = fully)
        OpaqueByPressure,
        /// Log radius added per unit of pressure
        RadiusByPressure,
        /// Amplitude of uniform jitter on the log radius
        RadiusByRandom,
        /// Log radius added per unit of smoothed speed
        RadiusBySpeed,
        /// Standard deviation of the gaussian position jitter
        OffsetByRandom,
        /// Offset along the smoothed direction of travel
        OffsetBySpeed,
        /// Time constant of the velocity filter behind `OffsetBySpeed`
        OffsetBySpeedSlowness,
        /// Time constant of the speed magnitude filter behind `OffsetBySpeed`
        OffsetBySpeedMagnitudeSlowness,
        /// Time constant of the speed magnitude filter behind `RadiusBySpeed`
        RadiusBySpeedSlowness,
        /// Time constant of the virtual cursor filter
        PositionT,
        /// Time constant of the painted position filter
        PositionT2,
        DabsPerActualRadius,
        DabsPerBasicRadius,
        DabsPerSecond,
        /// Edge hardness, 0 = soft, 1 = hard
        Hardness,
        SaturationSlowdown,
        /// Blend strength toward the color under the dab
        AdaptColorFromImage,
        ColorHueByRandom,
        ColorHueByPressure,
        ColorSaturationByRandom,
        ColorSaturationByPressure,
        ColorValueByRandom,
        ColorValueByPressure,
    }
}

indexed_enum! {
    /// Dynamic quantities that can modulate a setting
    pub enum InputId: UnknownInput {
        /// Stylus pressure, 0..1
        Pressure,
        /// Smoothed speed (radius band)
        Speed,
        /// Uniform random number drawn once per dab, 0..1
        Random,
        /// Time since the stroke started
        StrokeTime,
    }
}

/// Current value of every input, indexed by [`InputId`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Inputs {
    values: [f32; InputId::COUNT],
}

impl Inputs {
    pub fn new(pressure: f32, speed: f32, random: f32, stroke_time: f32) -> Self {
        let mut values = [0.0; InputId::COUNT];
        values[InputId::Pressure.index()] = pressure;
        values[InputId::Speed.index()] = speed;
        values[InputId::Random.index()] = random;
        values[InputId::StrokeTime.index()] = stroke_time;
        Self { values }
    }

    #[inline]
    pub fn get(&self, input: InputId) -> f32 {
        self.values[input.index()]
    }
}

/// One brush parameter: a base value plus optional per-input curves
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub base_value: f32,
    mappings: [Option<ResponseCurve>; InputId::COUNT],
}

impl Setting {
    /// The curve for `input`, if one has been written
    pub fn mapping(&self, input: InputId) -> Option<&ResponseCurve> {
        self.mappings[input.index()].as_ref()
    }

    /// Whether any input modulates this setting
    pub fn has_mappings(&self) -> bool {
        self.mappings.iter().any(Option::is_some)
    }

    /// Base value plus every present curve evaluated at its input
    pub fn evaluate(&self, inputs: &Inputs) -> f32 {
        InputId::ALL
            .iter()
            .filter_map(|&input| {
                self.mapping(input)
                    .map(|curve| curve.evaluate(inputs.get(input)))
            })
            .fold(self.base_value, |acc, contribution| acc + contribution)
    }
}

/// Effective value of every setting for one dab
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSettings {
    values: [f32; SettingId::COUNT],
}

impl ResolvedSettings {
    #[inline]
    pub fn get(&self, id: SettingId) -> f32 {
        self.values[id.index()]
    }
}

impl std::ops::Index<SettingId> for ResolvedSettings {
    type Output = f32;

    fn index(&self, id: SettingId) -> &f32 {
        &self.values[id.index()]
    }
}

/// The full parameter store of a brush
///
/// Serialized as exactly one entry per [`SettingId`]; snapshots of any other
/// length are rejected on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrushSettings {
    settings: [Setting; SettingId::COUNT],
}

impl BrushSettings {
    /// All base values zero, no mappings
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn setting(&self, id: SettingId) -> &Setting {
        &self.settings[id.index()]
    }

    /// Base (unmodulated) value of a setting
    #[inline]
    pub fn base(&self, id: SettingId) -> f32 {
        self.settings[id.index()].base_value
    }

    pub fn set_base(&mut self, id: SettingId, value: f32) {
        self.settings[id.index()].base_value = value;
    }

    /// Write one control-point coordinate of the (`id`, `input`) curve,
    /// creating the curve with all points zeroed on first write.
    ///
    /// # Panics
    /// If `index` is not a valid coordinate index (`0..8`).
    pub fn set_mapping(&mut self, id: SettingId, input: InputId, index: usize, value: f32) {
        self.settings[id.index()].mappings[input.index()]
            .get_or_insert_with(ResponseCurve::default)
            .set_coordinate(index, value);
    }

    /// Drop the (`id`, `input`) curve. Returns it if one was present.
    pub fn remove_mapping(&mut self, id: SettingId, input: InputId) -> Option<ResponseCurve> {
        self.settings[id.index()].mappings[input.index()].take()
    }

    /// Effective value of one setting
    pub fn evaluate(&self, id: SettingId, inputs: &Inputs) -> f32 {
        self.setting(id).evaluate(inputs)
    }

    /// Effective value of every setting
    pub fn resolve(&self, inputs: &Inputs) -> ResolvedSettings {
        let mut values = [0.0; SettingId::COUNT];
        for (value, setting) in values.iter_mut().zip(&self.settings) {
            *value = setting.evaluate(inputs);
        }
        ResolvedSettings { values }
    }
}
