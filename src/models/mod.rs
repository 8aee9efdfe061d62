pub mod analysis;
pub mod enums;
pub mod hospital;
pub mod pet;
pub mod recommendation;
pub mod symptom;

pub use analysis::*;
pub use enums::*;
pub use hospital::*;
pub use pet::*;
pub use recommendation::*;
pub use symptom::*;
