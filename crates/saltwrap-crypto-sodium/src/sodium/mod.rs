pub(crate) mod ffi;
pub(crate) mod safe;

use once_cell::sync::Lazy;

/// Ensure libsodium is initialized exactly once.
static SODIUM_INIT: Lazy<()> = Lazy::new(|| {
    // If initialization fails, panic: crypto backend cannot operate.
    safe::sodium_init().expect("libsodium initialization failed");
    // A libsodium build with different sizes would silently break every
    // buffer contract in saltwrap-core.
    safe::check_sizes().expect("libsodium sizes disagree with saltwrap-core constants");
});

pub(crate) fn init() {
    Lazy::force(&SODIUM_INIT);
}
