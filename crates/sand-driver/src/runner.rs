//! Running a driver on its own thread.

use std::io;
use std::thread;

use crossbeam::channel::Sender;
use sand_render::DrawSurface;

use crate::command::SimCommand;
use crate::driver::PendulumDriver;
use crate::timer::TimerService;

/// A driver running `run()` on a background thread.
///
/// Dropping the handle tears the driver down and waits for the thread.
pub struct DriverThread<S: DrawSurface, T: TimerService> {
    commands: Sender<SimCommand>,
    thread: Option<thread::JoinHandle<PendulumDriver<S, T>>>,
}

impl<S, T> DriverThread<S, T>
where
    S: DrawSurface + Send + 'static,
    T: TimerService + Send + 'static,
{
    /// Start `driver` on a thread named `sand-driver`. `commands` must feed
    /// the receiver the driver was built with.
    pub fn spawn(mut driver: PendulumDriver<S, T>, commands: Sender<SimCommand>) -> io::Result<Self> {
        let thread = thread::Builder::new()
            .name("sand-driver".to_string())
            .spawn(move || {
                driver.run();
                driver
            })?;
        Ok(Self {
            commands,
            thread: Some(thread),
        })
    }

    pub fn send(&self, command: SimCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Tear the driver down and hand it back. `None` if the thread panicked
    /// or was already stopped.
    pub fn stop(&mut self) -> Option<PendulumDriver<S, T>> {
        let thread = self.thread.take()?;
        let _ = self.commands.send(SimCommand::Teardown);
        match thread.join() {
            Ok(driver) => Some(driver),
            Err(_) => {
                log::error!("driver thread panicked");
                None
            }
        }
    }
}

impl<S: DrawSurface, T: TimerService> Drop for DriverThread<S, T> {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = self.commands.send(SimCommand::Teardown);
            let _ = thread.join();
        }
    }
}
