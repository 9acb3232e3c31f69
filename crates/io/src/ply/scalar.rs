/// Numeric property types allowed in a PLY header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
}

impl ScalarType {
    /// Accepts both the classic names (`uchar`) and the sized ones (`uint8`).
    pub fn parse(token: &str) -> Option<Self> {
        let ty = match token {
            "char" | "int8" => ScalarType::Int8,
            "uchar" | "uint8" => ScalarType::Uint8,
            "short" | "int16" => ScalarType::Int16,
            "ushort" | "uint16" => ScalarType::Uint16,
            "int" | "int32" => ScalarType::Int32,
            "uint" | "uint32" => ScalarType::Uint32,
            "float" | "float32" => ScalarType::Float32,
            "double" | "float64" => ScalarType::Float64,
            _ => return None,
        };
        Some(ty)
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Int8 => "char",
            ScalarType::Uint8 => "uchar",
            ScalarType::Int16 => "short",
            ScalarType::Uint16 => "ushort",
            ScalarType::Int32 => "int",
            ScalarType::Uint32 => "uint",
            ScalarType::Float32 => "float",
            ScalarType::Float64 => "double",
        }
    }

    pub fn size(self) -> usize {
        match self {
            ScalarType::Int8 | ScalarType::Uint8 => 1,
            ScalarType::Int16 | ScalarType::Uint16 => 2,
            ScalarType::Int32 | ScalarType::Uint32 | ScalarType::Float32 => 4,
            ScalarType::Float64 => 8,
        }
    }

    /// Decodes one little-endian value. `bytes` must hold at least
    /// [`size`](Self::size) bytes.
    pub fn decode_le(self, bytes: &[u8]) -> f64 {
        match self {
            ScalarType::Int8 => i8::from_le_bytes([bytes[0]]) as f64,
            ScalarType::Uint8 => bytes[0] as f64,
            ScalarType::Int16 => i16::from_le_bytes([bytes[0], bytes[1]]) as f64,
            ScalarType::Uint16 => u16::from_le_bytes([bytes[0], bytes[1]]) as f64,
            ScalarType::Int32 => {
                i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64
            }
            ScalarType::Uint32 => {
                u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64
            }
            ScalarType::Float32 => {
                f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64
            }
            ScalarType::Float64 => {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(&bytes[..8]);
                f64::from_le_bytes(buf)
            }
        }
    }

    /// Parses one ASCII token as this type. Float tokens go through the
    /// declared precision, so `float` values are narrowed like their
    /// binary counterparts.
    pub fn parse_ascii(self, token: &str) -> Result<f64, String> {
        fn num<T>(token: &str) -> Result<f64, String>
        where
            T: std::str::FromStr + Into<f64>,
            T::Err: std::fmt::Display,
        {
            token
                .parse::<T>()
                .map(Into::into)
                .map_err(|e| format!("'{}': {}", token, e))
        }

        match self {
            ScalarType::Int8 => num::<i8>(token),
            ScalarType::Uint8 => num::<u8>(token),
            ScalarType::Int16 => num::<i16>(token),
            ScalarType::Uint16 => num::<u16>(token),
            ScalarType::Int32 => num::<i32>(token),
            ScalarType::Uint32 => num::<u32>(token),
            ScalarType::Float32 => num::<f32>(token),
            ScalarType::Float64 => num::<f64>(token),
        }
    }
}

/// Converts a decoded value to an integer channel, clamping to
/// `0..=max` and truncating fractions. NaN maps to 0. The flag reports
/// whether the value had to be clamped.
pub(crate) fn clamp_unsigned(value: f64, max: u16) -> (u16, bool) {
    if value.is_nan() {
        return (0, true);
    }
    let clamped = value.clamp(0.0, max as f64);
    (clamped as u16, clamped != value)
}
