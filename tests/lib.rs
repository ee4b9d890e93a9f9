mod engine;
mod properties;

/// Routes the crate's log output (with the 'logging' feature) through the
/// test harness. Set RUST_LOG=subset_regex=debug to see it.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
