use std::{collections::HashSet, sync::LazyLock};

use super::shape::Shape;

/// Base shapes the catalog is generated from.
const BASE_SHAPES: [&[&[u8]]; 18] = [
    &[&[1]],
    &[&[1, 1]],
    &[&[1, 0], &[0, 1]],
    &[&[1, 1, 1]],
    &[&[1, 1, 1, 1]],
    &[&[1], &[1]],
    &[&[1], &[1], &[1]],
    &[&[1], &[1], &[1], &[1]],
    &[&[1, 1], &[1, 1]],
    // L
    &[&[1, 0], &[1, 0], &[1, 1]],
    // J
    &[&[0, 1], &[0, 1], &[1, 1]],
    // T
    &[&[1, 1, 1], &[0, 1, 0]],
    // S
    &[&[0, 1, 1], &[1, 1, 0]],
    // Z
    &[&[1, 1, 0], &[0, 1, 1]],
    // long L
    &[&[1, 1, 1], &[1, 0, 0]],
    // long J
    &[&[1, 1, 1], &[0, 0, 1]],
    // 3x3 square
    &[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]],
    // 2x3 rectangle
    &[&[1, 1, 1], &[1, 1, 1]],
];

static STANDARD: LazyLock<ShapeCatalog> = LazyLock::new(|| {
    ShapeCatalog::from_base_shapes(BASE_SHAPES.into_iter().map(|grid| {
        Shape::from_grid(grid).expect("base shapes should be valid grids")
    }))
});

/// Ordered, duplicate-free set of every shape orientation pieces are drawn from.
///
/// Each base shape contributes its unrotated form followed by its 90°, 180°
/// and 270° clockwise rotations; orientations whose canonical key was already
/// seen are skipped. The order is therefore stable across runs.
///
/// # Example
///
/// ```
/// use blockfit_engine::ShapeCatalog;
///
/// let catalog = ShapeCatalog::standard();
/// assert_eq!(catalog.len(), 29);
/// assert!(catalog.iter().all(|shape| shape.is_trimmed()));
/// ```
#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    shapes: Vec<Shape>,
}

impl ShapeCatalog {
    /// Returns the catalog generated from the built-in base shapes.
    ///
    /// The catalog is computed on first use and shared afterwards.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Generates all distinct orientations of the given base shapes.
    pub fn from_base_shapes<I>(base_shapes: I) -> Self
    where
        I: IntoIterator<Item = Shape>,
    {
        let mut seen = HashSet::new();
        let mut shapes = vec![];
        for base in base_shapes {
            let mut current = base;
            for _ in 0..4 {
                let trimmed = current.trimmed();
                if seen.insert(trimmed.key()) {
                    shapes.push(trimmed);
                }
                current = current.rotated_right();
            }
        }
        Self { shapes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.shapes.iter()
    }
}
