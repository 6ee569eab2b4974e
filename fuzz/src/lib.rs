//! Shared inputs for the netdissect fuzz targets.

pub mod frames;
