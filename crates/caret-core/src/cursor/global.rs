//! The process-wide cursor.
//!
//! A process drives one physical terminal, so there is one shared
//! [`CursorController`]. It is built on first access over an
//! [`AnsiDriver`] on stdin/stdout unless a driver was installed first.
//! Access goes through a `Mutex`; callers on different threads are
//! serialized by it.

use caret_common::traits::TerminalDriver;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::info;

use super::controller::CursorController;
use crate::driver::AnsiDriver;

/// Driver type the shared controller is built over
pub type SharedDriver = Box<dyn TerminalDriver + Send>;

pub type GlobalController = CursorController<SharedDriver>;

static GLOBAL: OnceLock<Mutex<GlobalController>> = OnceLock::new();

fn cell() -> &'static Mutex<GlobalController> {
    GLOBAL.get_or_init(|| {
        info!("Creating process-wide cursor controller on stdio");
        Mutex::new(CursorController::new(Box::new(AnsiDriver::stdio()) as SharedDriver))
    })
}

/// Lock the shared controller, creating it if needed.
///
/// A panic while the lock was held does not make the controller unusable;
/// its state is a list of points and stays consistent.
pub fn global() -> MutexGuard<'static, GlobalController> {
    cell().lock().unwrap_or_else(PoisonError::into_inner)
}

/// Use `driver` for the shared controller.
///
/// Before first access this decides which driver the controller is built
/// with. Afterwards it swaps the driver and keeps saved positions.
pub fn install_global<D>(driver: D)
where
    D: TerminalDriver + Send + 'static,
{
    let controller = CursorController::new(Box::new(driver) as SharedDriver);
    if let Err(rejected) = GLOBAL.set(Mutex::new(controller)) {
        let driver = rejected
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .into_driver();
        global().replace_driver(driver);
        info!("Replaced driver of process-wide cursor controller");
    } else {
        info!("Installed driver for process-wide cursor controller");
    }
}
