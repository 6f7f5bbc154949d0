pub mod collect;
pub mod design;
pub mod name_map;
pub mod orthogonality;
pub mod prepare;
pub mod rank;
