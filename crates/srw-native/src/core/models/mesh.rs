use serde::Serialize;

/// One dimension of the (energy, x, y) sampling mesh.
///
/// Points are spread linearly from `min` to `max`, both ends included. No
/// ordering is assumed between `min` and `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub count: u32,
}

impl Axis {
    pub fn new(min: f64, max: f64, count: u32) -> Self {
        Self { min, max, count }
    }

    /// Spacing between neighbouring points, or `0.0` for axes with fewer than two points.
    pub fn step(&self) -> f64 {
        if self.count <= 1 {
            0.0
        } else {
            (self.max - self.min) / f64::from(self.count - 1)
        }
    }

    /// Coordinate of the point at `index`.
    ///
    /// Indices past the end extrapolate along the same step.
    pub fn value_at(&self, index: u32) -> f64 {
        self.min + self.step() * f64::from(index)
    }

    pub fn values(&self) -> Vec<f64> {
        (0..self.count).map(|i| self.value_at(i)).collect()
    }
}

/// Mesh description decoded from the ten-line header of an SRW `.dat` file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeshMetadata {
    pub point_count_energy: u32,
    pub point_count_x: u32,
    pub point_count_y: u32,
    pub energy_min: f64,
    pub energy_max: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl MeshMetadata {
    pub fn energy_axis(&self) -> Axis {
        Axis::new(self.energy_min, self.energy_max, self.point_count_energy)
    }

    pub fn x_axis(&self) -> Axis {
        Axis::new(self.x_min, self.x_max, self.point_count_x)
    }

    pub fn y_axis(&self) -> Axis {
        Axis::new(self.y_min, self.y_max, self.point_count_y)
    }

    /// Number of grid values the header describes (`ne * nx * ny`).
    pub fn expected_value_count(&self) -> u64 {
        u64::from(self.point_count_energy)
            * u64::from(self.point_count_x)
            * u64::from(self.point_count_y)
    }

    /// Whether `count` values fill the mesh exactly.
    ///
    /// The loaders never enforce this; callers that need a full grid check it themselves.
    pub fn matches_value_count(&self, count: usize) -> bool {
        u64::try_from(count).is_ok_and(|n| n == self.expected_value_count())
    }
}
