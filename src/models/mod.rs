pub mod aspects;
pub mod chart;
pub mod lunar;
pub mod retrograde;
pub mod zodiac;

pub use aspects::*;
pub use chart::*;
pub use lunar::*;
pub use retrograde::*;
pub use zodiac::*;
