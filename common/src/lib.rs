pub mod shapes;

pub use shapes::{Circle, Point, Rect, Vector};
