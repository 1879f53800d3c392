//! State Module - Input and time
//!
//! - **Keyboard** - Key event model, listener registry with scoped handles
//! - **Input** - crossterm key conversion and key sources
//! - **Timer** - Cancellable deadline timers polled by the host loop

mod input;
mod keyboard;
mod timer;

pub use input::*;
pub use keyboard::*;
pub use timer::*;
