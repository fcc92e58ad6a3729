use std::fmt;

pub const APP_NAME: &str = "Sand Pendulum";

/// What the host shows in its caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Nothing seeded yet.
    AwaitingSeed,
    /// Seeded and drawing.
    Running,
    /// Periodic progress report.
    Step(usize),
    /// Capacity reached; nothing more will be drawn until the next seed.
    Done,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::AwaitingSeed => write!(f, "{APP_NAME}  -  click on starting point"),
            Status::Running => f.write_str(APP_NAME),
            Status::Step(n) => write!(f, "{APP_NAME}    step {n}"),
            Status::Done => write!(f, "{APP_NAME}   (done)"),
        }
    }
}
