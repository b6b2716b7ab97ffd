pub mod ecs;
pub mod world;

pub use ecs::{create_schedule, create_world, EditSet};
pub use world::{ActiveCharacter, EditIntent, EditQueue, Wizard, WizardSnapshot};
