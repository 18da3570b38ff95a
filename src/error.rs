use alloc::string::String;

/// Layout engine error.
///
/// Every variant is a caller precondition violation. The engine either
/// returns a complete plan or one of these, never a partial result.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// No sources were supplied.
    #[error("no images to place")]
    EmptyInput,
    /// A configuration value is out of range.
    #[error("invalid {key}: {reason}")]
    InvalidConfiguration {
        key: &'static str,
        reason: &'static str,
    },
    /// A source carries no dimensions and no override is active.
    #[error("no dimensions known for {name:?} and no size override is set")]
    UnknownSize { name: String },
    /// A source has zero width or height.
    #[error("{name:?} has a zero width or height")]
    ZeroSourceDimension { name: String },
    /// Some canvas coordinate or extent does not fit in `u32`.
    #[error("sprite sheet exceeds {max} pixels on an axis", max = u32::MAX)]
    DimensionOverflow,
}
