#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod diff;
pub mod error;
pub mod execute;
pub mod find_replace;
pub mod fs;
pub mod lock;
pub mod names;
pub mod natural;
pub mod operations;
pub mod output;
pub mod pattern;
pub mod plan;
pub mod preview;
pub mod scanner;
pub mod template;

pub use config::Config;
pub use diff::{compute_diff, join_segments, DiffKind, DiffSegment};
pub use error::{DubError, Result};
pub use execute::{execute_plan, execute_plan_with_options, undo_plan, ExecuteOptions, RenameOutcome};
pub use find_replace::find_replace;
pub use fs::{DirEntry, FileInfo, FileSystem, MemoryFileSystem, OsFileSystem};
pub use lock::LockFile;
pub use names::{parse_names, read_names_file};
pub use natural::{natural_compare, natural_sort};
pub use operations::{
    apply_operation, plan_operation, rename_operation, scan_operation, undo_operation, NameSource,
    PlanFile, PlanRequest, RenameOptions,
};
pub use output::{
    ApplyResult, OutputFormat, OutputFormatter, PlanResult, RenameResult, ScanResult, UndoResult,
    VersionResult,
};
pub use pattern::{expand_shortcuts, filter_files, PatternMatcher, RegexMatcher};
pub use plan::{conflict_count, pending_count, plan_renames, reverse_plan, RenamePlanEntry};
pub use preview::{render_plan, Preview};
pub use scanner::{scan_directory, FileEntry};
pub use template::{expand_names, expand_template};
