//! Window, event loop and frame scheduling
//!
//! `about_to_wait` asks for a redraw after every event batch, so
//! `RedrawRequested` fires once per display refresh for the life of the
//! window. Each redraw advances the sequencer, uploads the stage, renders,
//! and finally forwards any navigation click collected from the overlay.

use std::sync::Arc;

use log::{error, info};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::{
    animation::{FrameClock, Sequencer},
    config::ShowcaseConfig,
    error::{Result, VitrineError},
    gfx::{Model, RenderEngine, ShowcaseCamera},
    navigation::NavPoint,
    stage::Stage,
    ui::{navigation_panel, UiManager},
};

pub struct VitrineApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: ShowcaseConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    camera: ShowcaseCamera,
    model: Option<Model>,
    stage: Stage,
    sequencer: Sequencer,
    clock: FrameClock,
    fatal: Option<VitrineError>,
}

impl VitrineApp {
    /// Creates the event loop and loads the model
    ///
    /// A model that fails to load is logged and left out; the showcase
    /// still runs with an empty scene and every transition becomes a no-op.
    pub fn new(config: ShowcaseConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;

        let model = match Model::load(&config.model_path) {
            Ok(model) => Some(model),
            Err(err) => {
                error!("{err}");
                None
            }
        };

        let stage = config.initial_stage(model.is_some());
        let (width, height) = config.window_size;
        let camera = ShowcaseCamera::new(stage.camera, config.fov_y, width as f32 / height as f32);
        let sequencer = Sequencer::new(&config);

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                ui_manager: None,
                camera,
                model,
                stage,
                sequencer,
                clock: FrameClock::start(),
                fatal: None,
            },
        })
    }

    /// Runs the event loop until the window closes
    pub fn run(mut self) -> Result<()> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop.run_app(&mut self.app_state)?;

        match self.app_state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (width, height) = self.config.window_size;
        let window = event_loop.create_window(
            WindowAttributes::default()
                .with_title(self.config.title.clone())
                .with_inner_size(winit::dpi::LogicalSize::new(width, height)),
        )?;
        let window_handle = Arc::new(window);
        let (width, height) = window_handle.inner_size().into();

        let lights = self.config.lights;
        let window_clone = window_handle.clone();
        let renderer = pollster::block_on(async move {
            RenderEngine::new(window_clone, width, height, lights).await
        })?;

        if let Some(model) = self.model.as_mut() {
            model.init_gpu_resources(renderer.device(), renderer.transform_layout());
        }
        self.camera.resize_projection(width, height);

        let ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window_handle,
        );

        info!("rendering at {width}x{height}");
        self.ui_manager = Some(ui_manager);
        self.render_engine = Some(renderer);
        self.window = Some(window_handle);
        Ok(())
    }

    fn redraw(&mut self) {
        let (Some(render_engine), Some(ui_manager), Some(window)) = (
            self.render_engine.as_mut(),
            self.ui_manager.as_mut(),
            self.window.as_ref(),
        ) else {
            return;
        };

        let now = self.clock.now();
        self.sequencer.frame(&mut self.stage, now);

        self.camera.set_eye(self.stage.camera);
        render_engine.update(self.camera.uniform);
        if let (Some(model), Some(transform)) = (self.model.as_mut(), self.stage.model.as_ref()) {
            model.update_transform(render_engine.queue(), transform.matrix());
        }

        let navigation = self.sequencer.navigation();
        let mut clicked: Option<NavPoint> = None;
        render_engine.render_frame_with_ui(
            self.model.as_ref(),
            self.stage.background,
            |device, queue, encoder, color_attachment| {
                ui_manager.draw(device, queue, encoder, window, color_attachment, |ui| {
                    clicked = navigation_panel(ui, navigation);
                });
            },
        );

        if let Some(point) = clicked {
            self.sequencer.request(point, &mut self.stage, now);
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.init_graphics(event_loop) {
            error!("failed to initialise graphics: {err}");
            self.fatal = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // Pointer events go to the overlay first
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            }
            | WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.camera.resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
