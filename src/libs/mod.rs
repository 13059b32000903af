pub mod alignment;
pub mod conservation;
pub mod distance;
pub mod io;
pub mod phylo;
