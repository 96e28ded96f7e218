//! Verbosity-gated logging macros for the schedule pipeline.
//!
//! Output goes to stderr so it never mixes with rendered reports. Levels
//! mirror the host's `--verbose` count:
//! - 0: SILENT
//! - 1: STAGES (graph built, project finish, selected path)
//! - 2: TASKS (per-task timings)
//! - 3: PATHS (every enumerated critical path and tie-break step)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_STAGES: u8 = 1;
pub const VERBOSITY_TASKS: u8 = 2;
pub const VERBOSITY_PATHS: u8 = 3;

/// Log a pipeline stage summary (verbosity >= 1).
#[macro_export]
macro_rules! log_stage {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_STAGES {
            eprintln!("[cpm] {}", format_args!($($arg)*));
        }
    };
}

/// Log per-task detail (verbosity >= 2).
#[macro_export]
macro_rules! log_task {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_TASKS {
            eprintln!("[cpm]   {}", format_args!($($arg)*));
        }
    };
}

/// Log path enumeration and selection internals (verbosity >= 3).
#[macro_export]
macro_rules! log_path {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_PATHS {
            eprintln!("[cpm]     {}", format_args!($($arg)*));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(VERBOSITY_SILENT < VERBOSITY_STAGES);
        assert!(VERBOSITY_STAGES < VERBOSITY_TASKS);
        assert!(VERBOSITY_TASKS < VERBOSITY_PATHS);
    }

    #[test]
    fn test_log_macros_compile() {
        let verbosity = VERBOSITY_SILENT;
        log_stage!(verbosity, "stage {}", 1);
        log_task!(verbosity, "task {}", 2);
        log_path!(verbosity, "path {}", 3);
    }
}
