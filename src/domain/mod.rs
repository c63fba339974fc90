pub mod categories;
pub mod error;
pub mod install;
pub mod install_path;
pub mod manifest;
pub mod paths;
pub mod project_config;
pub mod source;
pub mod write_plan;

pub use categories::CategoryTable;
pub use error::AppError;
pub use install::{AddOutcome, InstallEvent, InstallPreview, InstallResult};
pub use install_path::{InstallLayout, ResolvedFile};
pub use manifest::{ComponentManifest, FieldViolation, FileEntry, FileSource, ManifestError};
pub use project_config::{
    ConstraintCollision, DependencyMerge, FetchConfig, InstalledComponent, ProjectConfig,
};
pub use source::{Location, SourceDescriptor, SourceKind};
pub use write_plan::{PathState, WriteAction, WritePlan, WriteStep};
