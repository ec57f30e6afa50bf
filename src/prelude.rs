pub use crate::data_structs::{
    Dataset,
    MeasurementRecord,
    PlateReading,
    StatSummary,
};
pub use crate::error::{PlateError, PlateResult};
pub use crate::io::{
    load_assignments,
    read_mapping,
    read_plate_file,
    Assignment,
    PlateBlockReader,
    PlateParserConfig,
    WellMapping,
};
pub use crate::pipeline::{
    analyse_data_dir,
    AnalysisConfig,
    DirectoryReport,
    FixedRoles,
    RatioPolicy,
    RoleSelector,
};
pub use crate::tools::{
    annotate,
    compute_ratios,
    generate_all,
    generate_plate,
    merge_files,
    AnnotatedDataset,
    MeasurementShape,
    RatioRecord,
    RatioRoles,
};
