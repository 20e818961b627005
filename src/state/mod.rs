mod map_state_machine;
mod renderer;
mod spy;

pub use map_state_machine::MapStateMachine;
pub use renderer::KeyRecord;
pub use renderer::KeyValItem;
pub use renderer::Renderer;
pub use renderer::RendererError;
pub use spy::StateMachineSpy;
