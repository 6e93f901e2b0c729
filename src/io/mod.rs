//! Reading and writing the generated configuration artifacts

pub mod artifacts;

pub use artifacts::{
    BENCHMARK_CSV, FYI_WATERFALL_JSON, WATERFALL_JSON, read_existing_fyi, validate_artifacts,
    write_artifacts,
};
