pub mod detect;
pub mod enrich;
pub mod errors;
pub mod specs;
pub mod surface;
pub mod tlv;
pub mod value;
