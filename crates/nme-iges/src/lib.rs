//! IGES exchange for rational B-spline curves (entity 126) and surfaces
//! (entity 128).

pub mod iges_directory;
pub mod iges_entities;
pub mod iges_global;
pub mod iges_params;
pub mod iges_reader;
pub mod iges_record;
pub mod iges_writer;

pub use iges_directory::DirectoryEntry;
pub use iges_entities::{
    decode_curve, decode_surface, encode_curve, encode_surface, IgesCurveRecord,
    IgesSurfaceRecord, RATIONAL_BSPLINE_CURVE, RATIONAL_BSPLINE_SURFACE,
};
pub use iges_global::GlobalSection;
pub use iges_params::{tokenize, Param, ParamCursor};
pub use iges_reader::{load_iges, parse_iges, IgesModel};
pub use iges_record::{split_records, IgesRecord, IgesSection};
pub use iges_writer::{save_iges, write_iges, IgesExport};
