use crate::error::Result;

/// Validate structural integrity of a curve, surface or decoded entity.
pub trait Validate {
    fn validate(&self) -> Result<()>;

    /// Boolean form of [`Validate::validate`].
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Compute an axis-aligned bounding box.
pub trait BoundingBox {
    type Point;
    fn bounding_box(&self) -> (Self::Point, Self::Point);
}
