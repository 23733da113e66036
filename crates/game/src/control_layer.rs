use crate::prelude::*;

use helmsman_engine::Result;

use crate::systems::{control_schedule, install_control_resources};

/// Runs the control schedule once per frame.
pub struct ControlLayer {
    schedule: Schedule,
}

impl ControlLayer {
    pub fn new(context: &LayerContext) -> Self {
        match context.lock_world() {
            Ok(mut world) => install_control_resources(&mut world),
            Err(e) => log::error!("Unable to install control resources: {}", e),
        }

        Self {
            schedule: control_schedule(),
        }
    }
}

impl Layer for ControlLayer {
    fn frame(&mut self, context: &LayerContext) -> Result<()> {
        let mut world = context.lock_world()?;
        self.schedule.run(&mut world);

        Ok(())
    }

    fn detach(&mut self, context: &LayerContext) {
        log::info!("Control layer detached after {} ticks", context.tick);
    }
}
