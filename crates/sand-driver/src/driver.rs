//! The periodic driver: owns the simulation and paces it against a timer.
//!
//! Everything runs on one thread. A tick advances one burst of points,
//! painting each as it goes. Between points the driver pumps its inbox so
//! clicks, resizes and teardown are handled mid-burst; a tick arriving
//! while busy turns into an immediate extra burst rather than an
//! overlapping one.

use std::collections::VecDeque;

use crossbeam::channel::{Receiver, Sender};
use crossbeam::select;
use glam::{IVec2, UVec2};
use sand_core::{advance, ParameterControls, ParameterKind, Point, SimulationParameters, Trajectory};
use sand_render::{
    export_history, DrawSurface, ExportConfig, IncrementalRenderer, InkMode, RenderSettings, Target,
};

use crate::command::{DriverEvent, SimCommand};
use crate::config::DriverConfig;
use crate::state::DriverState;
use crate::status::Status;
use crate::timer::TimerService;

pub struct PendulumDriver<S: DrawSurface, T: TimerService> {
    surface: S,
    timer: T,
    commands: Receiver<SimCommand>,
    events: Option<Sender<DriverEvent>>,
    config: DriverConfig,
    trajectory: Trajectory,
    controls: ParameterControls,
    renderer: IncrementalRenderer,
    state: DriverState,
    status: Status,
    /// A reseed that arrived mid-burst; applied when the burst stops.
    pending_seed: Option<Point>,
    /// Commands pulled off the channel while a repaint looked for resizes.
    deferred: VecDeque<SimCommand>,
}

impl<S: DrawSurface, T: TimerService> PendulumDriver<S, T> {
    pub fn new(surface: S, timer: T, commands: Receiver<SimCommand>, config: DriverConfig) -> Self {
        let mut renderer = IncrementalRenderer::new(RenderSettings::default());
        renderer.set_screen_size(surface.size());
        let mut driver = Self {
            surface,
            timer,
            commands,
            events: None,
            config,
            trajectory: Trajectory::new(config.capacity),
            controls: ParameterControls::default(),
            renderer,
            state: DriverState::Idle,
            status: Status::AwaitingSeed,
            pending_seed: None,
            deferred: VecDeque::new(),
        };
        driver.repaint();
        driver
    }

    pub fn with_parameters(mut self, params: SimulationParameters) -> Self {
        self.controls = ParameterControls::new(params);
        self
    }

    pub fn with_render_settings(mut self, settings: RenderSettings) -> Self {
        self.renderer = IncrementalRenderer::new(settings);
        self.renderer.set_screen_size(self.surface.size());
        self.repaint();
        self
    }

    /// Send status, parameter and export notifications to `events`.
    pub fn with_events(mut self, events: Sender<DriverEvent>) -> Self {
        self.events = Some(events);
        self.emit(DriverEvent::Status(self.status));
        self
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn controls(&self) -> &ParameterControls {
        &self.controls
    }

    pub fn renderer(&self) -> &IncrementalRenderer {
        &self.renderer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// React to one timer tick.
    pub fn on_tick(&mut self) {
        match self.state {
            DriverState::Done | DriverState::Dead => {}
            DriverState::Running | DriverState::LateCatchup => {
                self.state = DriverState::LateCatchup;
            }
            DriverState::Idle => {
                if self.trajectory.is_empty() {
                    return;
                }
                if self.trajectory.is_full() {
                    self.finish();
                    return;
                }
                self.run_bursts();
            }
        }
    }

    fn run_bursts(&mut self) {
        loop {
            self.state = DriverState::Running;
            self.burst();

            if self.state == DriverState::Dead {
                self.pending_seed = None;
                return;
            }
            if let Some(seed) = self.pending_seed.take() {
                self.apply_reset(seed);
                return;
            }
            match self.state {
                DriverState::LateCatchup => log::trace!("tick arrived mid-burst, catching up"),
                DriverState::Running => {
                    self.state = DriverState::Idle;
                    return;
                }
                _ => return,
            }
        }
    }

    fn burst(&mut self) {
        for _ in 0..self.config.points_per_tick.max(1) {
            if !self.advance_one() {
                return;
            }
            self.pump();
            if self.state == DriverState::Dead || self.pending_seed.is_some() {
                return;
            }
        }
    }

    /// Advance and paint a single point. Returns `false` once the run is over.
    fn advance_one(&mut self) -> bool {
        let index = match advance(&mut self.trajectory, self.controls.params()) {
            Ok(index) => index,
            Err(e) => {
                log::warn!("stopping: {e}");
                self.finish();
                return false;
            }
        };
        self.renderer.paint_segment(
            &mut self.surface,
            &self.trajectory,
            index,
            Target::Screen,
            InkMode::Screen,
        );

        let len = self.trajectory.len();
        if len % self.config.status_every.max(1) == 0 {
            self.set_status(Status::Step(len));
        }
        if self.trajectory.is_full() {
            self.finish();
            return false;
        }
        true
    }

    fn finish(&mut self) {
        self.state = DriverState::Done;
        self.timer.cancel();
        log::info!("Trajectory complete at {} points", self.trajectory.len());
        self.set_status(Status::Done);
    }

    /// Handle whatever has queued up, in arrival order.
    fn pump(&mut self) {
        while self.timer.ticks().try_recv().is_ok() {
            self.on_tick();
        }
        loop {
            let command = match self.deferred.pop_front() {
                Some(command) => command,
                None => match self.commands.try_recv() {
                    Ok(command) => command,
                    Err(_) => break,
                },
            };
            self.handle_command(command);
        }
    }

    pub fn handle_command(&mut self, command: SimCommand) {
        log::debug!("command: {command:?}");
        match command {
            SimCommand::Click(pixel) => self.click(pixel),
            SimCommand::Seed(seed) => self.request_reset(seed),
            SimCommand::Resize(size) => self.resize(size),
            SimCommand::Slider { kind, action } => {
                self.controls.scroll(kind, action);
                self.emit_parameter(kind);
            }
            SimCommand::EnterText { kind, text } => match self.controls.enter_text(kind, &text) {
                Ok(_) => self.emit_parameter(kind),
                Err(e) => {
                    log::warn!("{e}");
                    self.emit(DriverEvent::InvalidInput { kind, input: text });
                }
            },
            SimCommand::Export(config) => self.export(&config),
            SimCommand::Teardown => self.teardown(),
        }
    }

    fn click(&mut self, pixel: IVec2) {
        let size = self.surface.size();
        let inside = pixel.x >= 0
            && pixel.y >= 0
            && (pixel.x as u32) < size.x
            && (pixel.y as u32) < size.y;
        if !inside {
            log::debug!("ignoring click at {pixel} outside {size}");
            return;
        }
        match self.renderer.mapping(Target::Screen).to_normalized(pixel) {
            Some(seed) => self.request_reset(seed),
            None => log::debug!("ignoring click on an empty surface"),
        }
    }

    fn request_reset(&mut self, seed: Point) {
        if !seed.is_finite() {
            log::warn!("ignoring non-finite seed {seed:?}");
            return;
        }
        if self.state.is_busy() {
            self.pending_seed = Some(seed);
        } else {
            self.apply_reset(seed);
        }
    }

    fn apply_reset(&mut self, seed: Point) {
        log::info!("Starting at ({:.4}, {:.4})", seed.x, seed.y);
        self.trajectory.reset(seed);
        self.pending_seed = None;
        self.state = DriverState::Idle;
        self.timer.start(self.config.tick_interval());
        self.set_status(Status::Running);
        self.repaint();
    }

    fn resize(&mut self, size: UVec2) {
        self.surface.resize(size);
        self.renderer.set_screen_size(size);
        self.repaint();
    }

    /// Clear and redraw the whole trajectory, giving up if another resize
    /// is already waiting.
    fn repaint(&mut self) -> usize {
        let Self {
            surface,
            renderer,
            trajectory,
            commands,
            deferred,
            config,
            ..
        } = self;
        renderer.repaint_screen(surface, trajectory, config.points_per_tick, || {
            deferred.extend(commands.try_iter());
            deferred.iter().any(|c| matches!(c, SimCommand::Resize(_)))
        })
    }

    fn export(&mut self, config: &ExportConfig) {
        let result = export_history(&mut self.renderer, &self.trajectory, config);
        let result = match result {
            Ok(report) => Ok(report.output_path),
            Err(e) => {
                log::error!("Print failed (error {}): {e}", e.code());
                Err(e)
            }
        };
        self.emit(DriverEvent::ExportFinished(result));
    }

    fn teardown(&mut self) {
        log::debug!("teardown at {} points", self.trajectory.len());
        self.state = DriverState::Dead;
        self.timer.cancel();
    }

    fn set_status(&mut self, status: Status) {
        self.status = status;
        self.emit(DriverEvent::Status(status));
    }

    fn emit_parameter(&self, kind: ParameterKind) {
        self.emit(DriverEvent::Parameter {
            kind,
            value: self.controls.value(kind),
            position: self.controls.slider(kind).position(),
            text: self.controls.text(kind),
        });
    }

    fn emit(&self, event: DriverEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }

    /// Handle one pending tick and every queued command without blocking.
    /// Returns `false` once the driver is dead.
    pub fn poll(&mut self) -> bool {
        if self.timer.ticks().try_recv().is_ok() {
            self.on_tick();
        }
        self.pump();
        self.state != DriverState::Dead
    }

    /// Block on ticks and commands until teardown. A closed command
    /// channel counts as teardown.
    pub fn run(&mut self) {
        while self.state != DriverState::Dead {
            let ticks = self.timer.ticks().clone();
            let commands = self.commands.clone();
            select! {
                recv(ticks) -> tick => {
                    if tick.is_ok() {
                        self.on_tick();
                    }
                }
                recv(commands) -> command => match command {
                    Ok(command) => self.handle_command(command),
                    Err(_) => self.teardown(),
                },
            }
            self.pump();
        }
    }
}
