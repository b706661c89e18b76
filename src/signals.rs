use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Polled by the removal loop, which aborts with `Interrupted` once set.
pub fn received_ctrl_c() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

pub fn install_interrupt_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| INTERRUPTED.store(true, Ordering::SeqCst))
}
