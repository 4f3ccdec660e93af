use log::{error, info};
use vk_game::{
    prelude::*,
    winit::{
        application::ApplicationHandler,
        event::{ElementState, KeyEvent, WindowEvent},
        event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
        keyboard::{KeyCode, PhysicalKey},
        window::WindowId,
    },
};

type GameLoop = FrameLoop<MonotonicClock, WindowTarget>;

pub struct Engine {
    config: EngineConfig,
    frame_loop: Option<GameLoop>,
    fatal: Option<anyhow::Error>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            frame_loop: None,
            fatal: None,
        }
    }

    /// Drive the window until it is closed or something fails.
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = EventLoop::new()?;
        // The pacer does the waiting, winit must not block.
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;

        match self.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<GameLoop> {
        // Refuse a bad rate before opening anything.
        FramePacer::validate_expected_fps(self.config.target_fps)?;

        let window = create_window(event_loop, &self.config)?;
        let app = VkGameApp::builder()
            .with_app_info(self.config.title.clone().into(), self.config.app_version)
            .with_debug_utils(self.config.verbose)
            .build(&window, window.inner_size().into())?;

        let pacer = FramePacer::with_monotonic_clock(self.config.target_fps)?;
        Ok(FrameLoop::new(pacer, WindowTarget::new(app, window))?)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{:#}", err);
        self.fatal = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for Engine {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.frame_loop.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(frame_loop) => {
                info!(
                    "Running at {} FPS",
                    frame_loop.pacer().expected_fps()
                );
                self.frame_loop = Some(frame_loop);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(frame_loop) = self.frame_loop.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => frame_loop.target_mut().request_close(),
            WindowEvent::Resized(size) => frame_loop.target_mut().resized(size.into()),
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(frame_loop) = self.frame_loop.as_mut() else {
            return;
        };

        match frame_loop.step() {
            Ok(LoopState::Continue) => (),
            Ok(LoopState::Exit) => event_loop.exit(),
            Err(err) => self.fail(event_loop, err.into()),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(frame_loop) = self.frame_loop.take() {
            match frame_loop.measured_fps() {
                Some(fps) => info!(
                    "Shutting down after {} frames, last measured at {:.1} FPS",
                    frame_loop.pacer().frame_count(),
                    fps
                ),
                None => info!(
                    "Shutting down after {} frames",
                    frame_loop.pacer().frame_count()
                ),
            }
        }
    }
}
