use crate::common::*;

#[doc = "Custom log format: [timestamp] [level] message"]
fn log_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S"),
        record.level(),
        &record.args()
    )
}

#[doc = r#"
    Sets the global logger: daily-rotated files under ./logs plus stdout.

    # Panics
    When the logger cannot be initialized the application cannot report
    anything, so startup is aborted.
"#]
pub fn set_global_logger() {
    let logger_handle = Logger::try_with_env_or_str("info")
        .expect("[set_global_logger] Failed to build logger spec")
        .log_to_file(FileSpec::default().directory("logs"))
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(7),
        )
        .duplicate_to_stdout(Duplicate::All)
        .format_for_files(log_format)
        .format_for_stdout(log_format)
        .start()
        .expect("[set_global_logger] Failed to start logger");

    /* the handle must stay alive for the whole process, or logging stops */
    std::mem::forget(logger_handle);
}
