pub use bevy_ecs::world::World;
use std::sync::{Arc, Mutex, MutexGuard};
use winit::{application::ApplicationHandler, event::WindowEvent, window::Window};

use crate::input::InputState;
pub type Result<T> = anyhow::Result<T>;

pub mod components;
pub mod input;
pub mod prelude;

pub trait Layer: 'static {
    fn frame(&mut self, context: &LayerContext) -> Result<()>;
    fn detach(&mut self, context: &LayerContext);
    fn event(&mut self, _context: &LayerContext, _event: LayerEvent) {}
}

pub trait LayerFactory: 'static {
    fn create(&self, context: &LayerContext) -> Box<dyn Layer>;
}

pub struct LayerContext {
    pub window: Arc<Window>,
    pub world: Arc<Mutex<World>>,
    /// Number of frames driven so far, starting at 1 for the first frame.
    pub tick: u64,
}

impl LayerContext {
    /// Lock the shared world, turning a poisoned lock into an error.
    pub fn lock_world(&self) -> Result<MutexGuard<'_, World>> {
        self.world
            .lock()
            .map_err(|_| anyhow::anyhow!("world lock poisoned"))
    }
}

pub enum LayerEvent {
    WindowEvent(Arc<WindowEvent>),
}

pub struct ApplicationBuilder {
    layer_factories: Vec<Box<dyn LayerFactory>>,
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self {
            layer_factories: Vec::new(),
        }
    }

    pub fn add_layer_factory(mut self, factory: impl LayerFactory) -> Self {
        self.layer_factories.push(Box::new(factory));
        self
    }

    pub fn add_layer<F>(mut self, factory_fn: F) -> Self
    where
        F: Fn(&LayerContext) -> Box<dyn Layer> + 'static,
    {
        self.layer_factories
            .push(Box::new(ClosureLayerFactory::new(factory_fn)));
        self
    }

    pub fn build(self) -> Application {
        let mut world = World::new();
        world.insert_resource(InputState::new());

        Application {
            layer_factories: self.layer_factories,
            state: None,
            world: Arc::new(Mutex::new(world)),
            tick: 0,
        }
    }
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

struct ClosureLayerFactory<F> {
    factory_fn: F,
}

impl<F> ClosureLayerFactory<F> {
    fn new(factory_fn: F) -> Self {
        Self { factory_fn }
    }
}

impl<F> LayerFactory for ClosureLayerFactory<F>
where
    F: Fn(&LayerContext) -> Box<dyn Layer> + 'static,
{
    fn create(&self, context: &LayerContext) -> Box<dyn Layer> {
        (self.factory_fn)(context)
    }
}

pub struct Application {
    layer_factories: Vec<Box<dyn LayerFactory>>,
    state: Option<ApplicationState>,
    world: Arc<Mutex<World>>,
    tick: u64,
}

pub struct ApplicationState {
    window: Arc<Window>,
    layers: Vec<Box<dyn Layer>>,
}

impl Application {
    fn context(&self, window: Arc<Window>) -> LayerContext {
        LayerContext {
            window,
            world: self.world.clone(),
            tick: self.tick,
        }
    }

    fn redraw(&mut self) -> Result<()> {
        let Some(window) = self.state.as_ref().map(|state| state.window.clone()) else {
            return Ok(());
        };

        self.tick += 1;
        let context = self.context(window);

        if let Some(state) = &mut self.state {
            for layer in &mut state.layers {
                layer.frame(&context)?;
            }
        }

        context.lock_world()?.clear_trackers();

        Ok(())
    }

    /// Run a closure against the shared world, e.g. to spawn entities or insert
    /// resources before the event loop starts.
    pub fn with_world<R>(&mut self, f: impl FnOnce(&mut World) -> R) -> Result<R> {
        let mut world = self
            .world
            .lock()
            .map_err(|_| anyhow::anyhow!("world lock poisoned"))?;
        Ok(f(&mut world))
    }

    pub fn spawn<B: bevy_ecs::bundle::Bundle>(
        &mut self,
        label: impl Into<String>,
        bundle: B,
    ) -> Result<bevy_ecs::entity::Entity> {
        use crate::prelude::*;
        let bundle = (
            Tag {
                label: label.into(),
            },
            bundle,
        );
        self.with_world(|world| world.spawn(bundle).id())
    }

    fn record_input(&mut self, event: &WindowEvent) {
        use winit::event::ElementState;
        use winit::keyboard::PhysicalKey;

        let WindowEvent::KeyboardInput {
            event: key_event, ..
        } = event
        else {
            return;
        };
        let PhysicalKey::Code(keycode) = key_event.physical_key else {
            return;
        };

        let Ok(mut world) = self.world.lock() else {
            log::error!("Dropping key input, world lock poisoned");
            return;
        };
        if let Some(mut input_state) = world.get_resource_mut::<InputState>() {
            match key_event.state {
                ElementState::Pressed if !key_event.repeat => input_state.press_key(keycode),
                ElementState::Pressed => {}
                ElementState::Released => input_state.release_key(keycode),
            }
        }
    }
}

impl ApplicationHandler for Application {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        let window_attributes = Window::default_attributes().with_title("helmsman");
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Unable to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let context = self.context(window.clone());

        let layers: Vec<Box<dyn Layer>> = self
            .layer_factories
            .iter()
            .map(|factory| factory.create(&context))
            .collect();

        log::info!("Resumed with {} layers", layers.len());
        self.state = Some(ApplicationState { window, layers });
    }

    fn suspended(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(mut state) = self.state.take() {
            let context = self.context(state.window.clone());

            for layer in &mut state.layers {
                layer.detach(&context);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        self.record_input(&event);

        let event = Arc::new(event);

        match *event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    log::error!("Unable to run frame: {}", e);
                }
            }
            _ => {}
        }

        if let Some(window) = self.state.as_ref().map(|state| state.window.clone()) {
            let context = self.context(window);

            if let Some(state) = &mut self.state {
                for layer in &mut state.layers {
                    layer.event(&context, LayerEvent::WindowEvent(event.clone()));
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}
